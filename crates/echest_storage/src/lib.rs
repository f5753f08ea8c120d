//! # echest storage
//!
//! Storage contract and backends for per-entity containers.
//!
//! A container record is an upgrade count plus a slot array. The size of
//! the container is derived from the upgrade count (`27 + upgrades * 9`)
//! and never stored on its own.
//!
//! ## Design Principles
//!
//! - One contract, [`ChestStorage`], for every backend
//! - No caching: every call is a fresh read or write
//! - Failures are returned; [`ChestStorageExt`] opts into log-and-default
//! - Must be `Send + Sync` for concurrent access
//!
//! ## Available Backends
//!
//! - [`FileBackend`] - One JSON document per entity
//! - [`RelationalBackend`] - One SQLite row per entity
//! - [`InMemoryBackend`] - For testing and dry runs
//!
//! [`Backend::open`] picks one from a configured kind string and always
//! succeeds, falling back to file storage.
//!
//! ## Example
//!
//! ```rust
//! use echest_storage::{ChestStorage, EntityId, InMemoryBackend};
//! use echest_codec::Item;
//!
//! let backend = InMemoryBackend::new();
//! let id = EntityId::new();
//! backend.save_items(id, &[Some(Item::new("torch", 32))]).unwrap();
//! let slots = backend.load_items(id, backend.size(id).unwrap() as usize).unwrap();
//! assert_eq!(slots.len(), 27);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod factory;
mod file;
mod id;
mod lenient;
mod memory;
mod relational;

pub use backend::{size_for_upgrades, upgrades_for_size, ChestStorage, BASE_SIZE, SLOTS_PER_UPGRADE};
pub use error::{FailureClass, StorageError, StorageResult};
pub use factory::{Backend, BackendKind};
pub use file::{FileBackend, RECORD_EXTENSION};
pub use id::EntityId;
pub use lenient::ChestStorageExt;
pub use memory::InMemoryBackend;
pub use relational::RelationalBackend;
