//! Synchronization of one group and one sources build phase
//!
//! The run is a pipeline over an in-memory [`Project`](groupsync_project::Project):
//!
//! 1. [`compute_delta`] between the files on disk and the group's children
//! 2. [`reconcile_group`] applies it and reports the references it created
//! 3. [`compute_delta`] between the files on disk and the build phase,
//!    finished with [`Delta::with_additions`] from step 2
//! 4. [`reconcile_build_phase`] applies that
//! 5. [`remove_orphans`] deletes the references dropped in step 4
//!
//! [`GroupSync`] drives the pipeline and persists the result.

mod build_phase;
mod delta;
mod engine;
mod group;
mod orphan;

pub use build_phase::reconcile_build_phase;
pub use delta::{Delta, LogicalPath, SourceFile, compute_delta};
pub use engine::{GroupSync, SyncOutcome, SyncReport};
pub use group::reconcile_group;
pub use orphan::remove_orphans;
