//! Persistence collaborator interfaces
//!
//! The store and the name suggestion service never talk to a database
//! directly. They go through these traits, implemented by:
//! - `Database` - the SQLite store used by the app and CLI
//! - `MemoryStorage` - an in-process store for tests and embedding
//!
//! Every call is an atomic request/response; failures are propagated to
//! the caller unchanged.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::habits::HabitBranch;
use crate::models::{NameCount, TagCollection};

/// Storage for the tag collection and the habit index
pub trait TagStorage: Send + Sync {
    /// Load the whole tag collection, `None` if nothing was saved yet
    fn load_tag_collection(&self) -> Result<Option<TagCollection>>;

    /// Replace the whole tag collection
    fn save_tag_collection(&self, collection: &TagCollection) -> Result<()>;

    /// Keys of all known habit branches, in insertion order
    fn habit_branch_keys(&self) -> Result<Vec<String>>;

    fn load_habit_branch(&self, key: &str) -> Result<Option<HabitBranch>>;

    /// Insert or replace the given branches in one batch
    fn save_habit_branches(&self, branches: &[HabitBranch]) -> Result<()>;
}

/// Storage for name autocomplete counters
pub trait NameSuggestionStorage: Send + Sync {
    fn name_suggestion_count(&self, name: &str) -> Result<i64>;

    /// Add `delta` to a name's counter.
    ///
    /// The row is deleted once the counter drops to zero or below and only
    /// inserted when the resulting count is positive.
    fn adjust_name_suggestion_count(&self, name: &str, delta: i64) -> Result<()>;

    /// Names starting with `prefix` (case-sensitive), most used first then
    /// alphabetical, at most `limit` entries
    fn query_name_suggestions(&self, prefix: &str, limit: usize) -> Result<Vec<NameCount>>;
}

#[derive(Debug, Default)]
struct MemoryState {
    collection: Option<TagCollection>,
    branches: Vec<HabitBranch>,
    names: HashMap<String, i64>,
}

/// In-memory implementation of both storage traits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|e| Error::InvalidData(format!("Memory storage poisoned: {}", e)))
    }
}

impl TagStorage for MemoryStorage {
    fn load_tag_collection(&self) -> Result<Option<TagCollection>> {
        Ok(self.lock()?.collection.clone())
    }

    fn save_tag_collection(&self, collection: &TagCollection) -> Result<()> {
        self.lock()?.collection = Some(collection.clone());
        Ok(())
    }

    fn habit_branch_keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.branches.iter().map(|b| b.key.clone()).collect())
    }

    fn load_habit_branch(&self, key: &str) -> Result<Option<HabitBranch>> {
        Ok(self.lock()?.branches.iter().find(|b| b.key == key).cloned())
    }

    fn save_habit_branches(&self, branches: &[HabitBranch]) -> Result<()> {
        let mut state = self.lock()?;
        for branch in branches {
            match state.branches.iter_mut().find(|b| b.key == branch.key) {
                Some(existing) => *existing = branch.clone(),
                None => state.branches.push(branch.clone()),
            }
        }
        Ok(())
    }
}

impl NameSuggestionStorage for MemoryStorage {
    fn name_suggestion_count(&self, name: &str) -> Result<i64> {
        Ok(self.lock()?.names.get(name).copied().unwrap_or(0))
    }

    fn adjust_name_suggestion_count(&self, name: &str, delta: i64) -> Result<()> {
        let mut state = self.lock()?;
        let count = state.names.get(name).copied().unwrap_or(0) + delta;
        if count > 0 {
            state.names.insert(name.to_string(), count);
        } else {
            state.names.remove(name);
        }
        Ok(())
    }

    fn query_name_suggestions(&self, prefix: &str, limit: usize) -> Result<Vec<NameCount>> {
        let state = self.lock()?;
        let mut matches: Vec<NameCount> = state
            .names
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, count)| NameCount {
                name: name.clone(),
                count: *count,
            })
            .collect();

        matches.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        matches.truncate(limit);
        Ok(matches)
    }
}
