//! Domain layer: archive operations and command construction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod entities;
pub mod error;

pub use command::build_command;
pub use entities::*;
pub use error::{DomainError, DomainResult};
