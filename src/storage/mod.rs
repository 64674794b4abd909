//! Storage backend.
//!
//! This module provides:
//! - `SQLite` database implementation
//! - File, disk and RAM CRUD operations
//! - File-on-disk and RAM-on-disk membership with free space accounting
//! - Whole-database snapshots for the derivation layer
//!
//! # Architecture
//!
//! The storage layer uses `SQLite` with the `sqlx` crate for async operations.
//! Multi-statement operations run in one transaction; constraint violations
//! are classified into [`PlacementError`](crate::error::PlacementError) kinds.
//!
//! The implementation is split across submodules:
//! - `core`: Pool management, migrations, and helper functions
//! - `file`, `disk`, `ram`: Entity CRUD operations
//! - `membership`: Attach and detach operations
//! - `snapshot`: Consistent reads and table reset
//! - `trait_impl`: `PlacementStore` implementation
//!
//! # Example
//!
//! ```ignore
//! use disk_placement::storage::{Disk, File, SqliteStorage};
//!
//! let storage = SqliteStorage::new("./data/placement.db").await?;
//! storage.add_disk(&Disk::new(10, "DELL", 7, 50, 3)).await?;
//! storage.add_file(&File::new(1, "jpg", 10)).await?;
//! storage.attach_file(1, 10).await?;
//! ```

mod core;
mod disk;
mod file;
mod membership;
mod ram;
mod snapshot;
mod trait_impl;
mod types;

pub use self::core::SqliteStorage;
pub use types::{Disk, File, Ram, Snapshot};
