//! Git tag store abstraction layer
//!
//! This module provides a trait-based abstraction over the tag operations
//! semvertag delegates to git, allowing for a real implementation backed by
//! a repository on disk and a mock implementation for testing.
//!
//! The core only ever consumes a list of raw tag names and hands back the
//! exact string to create; everything git-specific stays behind this trait.
//!
//! # Implementations
//!
//! - [repository::GitTagStore]: A real implementation using the `git2` crate
//! - [mock::MockTagStore]: An in-memory implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockTagStore;
pub use repository::GitTagStore;

use crate::error::Result;

/// Tag operations semvertag needs from a version-control backend.
///
/// Calls are blocking and issued strictly in sequence; a failing call is
/// fatal for the current invocation and is not retried.
pub trait TagStore {
    /// All tag names in the repository, one raw string per tag, in no
    /// guaranteed order.
    fn list_tag_names(&self) -> Result<Vec<String>>;

    /// Create an annotated tag with the given name and message at the
    /// current HEAD.
    ///
    /// There is no duplicate pre-check; creating a tag that already exists
    /// fails and the error is surfaced as-is.
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a tag to the named remote.
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}
