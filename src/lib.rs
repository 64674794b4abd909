//! Disk Placement Analytics
//!
//! Tracks files, disks and RAM modules, which files sit on which disks, and
//! which RAM modules are installed in which disks, and derives placement
//! answers from that state.
//!
//! # Features
//!
//! - `SQLite` persistence with transactional free space accounting
//! - Capacity matching against free space and installed RAM
//! - Directed file closeness and conflicting disk detection
//! - Disk availability ranking and RAM company exclusivity
//! - A `placement-report` binary printing every derivation as JSON
//!
//! # Quick Start
//!
//! ```bash
//! DATABASE_PATH=./data/placement.db ./placement-report
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  mutations  ┌────────────────┐
//! │ PlacementService │────────────▶│ PlacementStore │──────▶ SQLite
//! │                  │◀────────────│  (repository)  │
//! └────────┬─────────┘  snapshot   └────────────────┘
//!          │
//!          ▼
//!   pure derivations
//!   (capacity, closeness, conflicts, availability, exclusivity, stats)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod placement;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;
