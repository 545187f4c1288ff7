//! Shared test utilities for the xcode-group-sync workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`fixture`]: [`ProjectFixture`] builder for `project.pbxproj` JSON
//! - [`project`]: [`TestProject`] sandbox holding a source tree and a project file

pub mod fixture;
pub mod project;

pub use fixture::ProjectFixture;
pub use project::{TestProject, fixtures_dir};
