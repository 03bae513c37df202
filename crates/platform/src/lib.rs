//! Filesystem layer for session reorganization.
//!
//! This crate provides:
//! - The `FilesystemOperations` trait the engine performs all I/O through
//! - `LocalFilesystem`, the std-backed implementation
//! - Collision-safe destination naming (`unique_path`)
//! - Destination provisioning (`provision`)
//! - Copy/move transfers that preserve file metadata (`transfer`)

pub mod filesystem;
pub mod implementations;
pub mod paths;
pub mod provision;
pub mod transfer;

pub use filesystem::{EntryKind, FilesystemOperations};
pub use implementations::local::LocalFilesystem;
pub use paths::unique_path;
pub use provision::{provision, ProvisionedDir};
pub use transfer::transfer;

/// Result type for filesystem operations
pub type Result<T> = std::result::Result<T, fitsprep_errors::PlatformError>;
