//! CLI command implementations.

pub mod inspect;
pub mod resize;
pub mod upgrade;
