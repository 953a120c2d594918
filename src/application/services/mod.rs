//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (CommandExecutor, BinaryLocator)
//! but are themselves concrete structs, not traits.

mod archive;

pub use archive::ArchiveService;
