//! Test fixtures for field-route.
//!
//! Provides unit catalogs for two depot groups and the small square used by
//! the worked examples.

pub mod field_catalog;

pub use field_catalog::*;
