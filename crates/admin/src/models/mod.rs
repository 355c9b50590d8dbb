//! Domain models for the catalog admin.

pub mod product;

pub use product::{Product, ProductFields};
