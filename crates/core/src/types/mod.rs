//! Core types for the shop catalog.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod asset;
pub mod id;
pub mod price;

pub use asset::{AssetName, AssetNameError};
pub use id::*;
pub use price::{Price, PriceError};
