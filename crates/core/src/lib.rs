//! Shop Catalog Core - Shared types library.
//!
//! This crate provides common types used across all shop catalog components:
//! - `admin` - Product catalog web admin (record store, asset store, routes)
//! - `cli` - Command-line tools for migrations and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and asset names
//! - [`image`] - Image reference resolution for product writes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod image;
pub mod types;

pub use image::{resolve_image, superseded_image};
pub use types::*;
