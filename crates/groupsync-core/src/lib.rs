//! Group and build-phase reconciliation for Xcode Group Sync
//!
//! Keeps an Xcode group and a target's sources build phase in step with the
//! files present in one folder on disk:
//!
//! - **Delta computation**: path-keyed differences between the files on disk
//!   and each membership list
//! - **Group reconciliation**: detach stale children, create references for
//!   new files
//! - **Build-phase reconciliation**: drop stale entries, compile exactly the
//!   references the group step created
//! - **Orphan cleanup**: delete file references dropped from the build phase
//!
//! # Architecture
//!
//! ```text
//!               groupsync-cli
//!                     |
//!              groupsync-core
//!                     |
//!         +-----------+-----------+
//!         |                       |
//! groupsync-project         groupsync-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use groupsync_core::{GroupSync, SyncConfig};
//!
//! fn example() -> groupsync_core::Result<()> {
//!     let config = SyncConfig::new("/Users/dev/Project", "/App", "App", "/Generated", r"\.swift$");
//!     let report = GroupSync::new(config).run()?;
//!     println!("{:?}", report.outcome);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod sync;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use sync::{
    Delta, GroupSync, LogicalPath, SourceFile, SyncOutcome, SyncReport, compute_delta,
    reconcile_build_phase, reconcile_group, remove_orphans,
};
