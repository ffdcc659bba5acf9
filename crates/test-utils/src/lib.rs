//! Shared test utilities for the flows2fim workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Scratch directory helpers
//! - Control table fixtures
//! - Recording fakes for the GDAL collaborators
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{write_control_file, RecordingTools, FakeAvailability};
//! ```

pub mod fakes;
pub mod fixtures;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fakes::*;
pub use fixtures::*;
pub use paths::*;
