//! # echest testkit
//!
//! Test utilities for echest.
//!
//! This crate provides:
//! - Fixtures that open every backend over throwaway storage
//! - Property-based test generators using proptest
//! - Cross-crate contract tests (under `tests/`)
//!
//! ## Usage
//!
//! ```rust
//! use echest_testkit::prelude::*;
//! use echest_storage::{ChestStorage, EntityId};
//!
//! with_each_backend(|store| {
//!     assert_eq!(store.upgrades(EntityId::new()).unwrap(), 0);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
