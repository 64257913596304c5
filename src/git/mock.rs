use std::cell::RefCell;

use crate::error::Result;
use crate::git::TagStore;

/// Mock tag store for testing without an actual git repository.
///
/// Seeded with raw tag names; records every created and pushed tag so
/// tests can assert on the exact strings handed to the backend.
pub struct MockTagStore {
    tags: RefCell<Vec<String>>,
    pushed: RefCell<Vec<(String, String)>>,
}

impl MockTagStore {
    /// Create a mock store seeded with the given tag names.
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockTagStore {
            tags: RefCell::new(tags.into_iter().map(Into::into).collect()),
            pushed: RefCell::new(Vec::new()),
        }
    }

    /// Tags pushed so far, as (remote, name) pairs.
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }
}

impl Default for MockTagStore {
    fn default() -> Self {
        Self::with_tags(Vec::<String>::new())
    }
}

impl TagStore for MockTagStore {
    fn list_tag_names(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().clone())
    }

    fn create_tag(&self, name: &str, _message: &str) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|t| t == name) {
            return Err(git2::Error::from_str(&format!("tag '{}' already exists", name)).into());
        }
        tags.push(name.to_string());
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }
}
