//! # echest core
//!
//! Container sizing, admin sessions and configuration on top of
//! [`echest_storage`].
//!
//! This crate provides:
//! - Size normalization and upgrade arithmetic ([`policy`])
//! - An admin session table that redirects saves ([`AdminSessions`])
//! - [`ChestManager`], which combines both with a storage backend
//! - [`Config`], which selects and opens that backend
//!
//! ## Example
//!
//! ```rust
//! use echest_core::{ChestManager, Config, UpgradeOutcome};
//! use echest_storage::EntityId;
//!
//! let manager = ChestManager::from_config(&Config::new().base_type("memory"));
//! let id = EntityId::new();
//!
//! assert_eq!(manager.open_chest(id).size(), 27);
//! assert_eq!(
//!     manager.add_upgrade(id, 1),
//!     UpgradeOutcome::Changed { from: 27, to: 36 }
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;
pub mod policy;
mod session;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use manager::{ChestManager, ChestView};
pub use policy::UpgradeOutcome;
pub use session::AdminSessions;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
