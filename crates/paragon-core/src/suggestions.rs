//! Name autocomplete counters
//!
//! Every expense or receipt line name that is saved bumps a counter; the
//! counters rank prefix suggestions while the user types a new name.

use tracing::debug;

use crate::config::MatchingConfig;
use crate::error::Result;
use crate::models::{NameCount, NameUsage};
use crate::storage::NameSuggestionStorage;
use crate::usage::calculate_name_difference;

pub struct NameSuggestions<S: NameSuggestionStorage> {
    storage: S,
    limit: usize,
}

impl<S: NameSuggestionStorage> NameSuggestions<S> {
    pub fn new(storage: S, config: &MatchingConfig) -> Self {
        Self {
            storage,
            limit: config.name_suggestion_limit,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply the per-name difference between two snapshots
    pub fn increment_names(&self, old: &NameUsage, current: &NameUsage) -> Result<()> {
        let deltas = calculate_name_difference(old, current);
        for delta in &deltas {
            self.storage
                .adjust_name_suggestion_count(&delta.name, delta.count)?;
        }
        debug!("Applied {} name suggestion deltas", deltas.len());
        Ok(())
    }

    pub fn decrement_names(&self, old: &NameUsage) -> Result<()> {
        self.increment_names(old, &NameUsage::empty())
    }

    /// Most used names starting with `prefix`
    pub fn suggest(&self, prefix: &str) -> Result<Vec<NameCount>> {
        self.storage.query_name_suggestions(prefix, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use crate::storage::MemoryStorage;
    use crate::usage::calculate_name_usage;

    fn named(names: &[&str]) -> Vec<Expense> {
        names.iter().map(|n| Expense::new(n, 1.0, &[], 0)).collect()
    }

    fn suggestions() -> NameSuggestions<MemoryStorage> {
        NameSuggestions::new(MemoryStorage::new(), &MatchingConfig::default())
    }

    #[test]
    fn test_increment_and_suggest() {
        let names = suggestions();
        let current = calculate_name_usage(&named(&["Mleko", "Masło", "Mleko"]));
        names.increment_names(&NameUsage::empty(), &current).unwrap();

        let found = names.suggest("M").unwrap();
        assert_eq!(
            found,
            vec![
                NameCount {
                    name: "Mleko".to_string(),
                    count: 2
                },
                NameCount {
                    name: "Masło".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_edit_moves_counts() {
        let names = suggestions();
        let before = calculate_name_usage(&named(&["Mleko", "Chleb"]));
        names.increment_names(&NameUsage::empty(), &before).unwrap();

        let after = calculate_name_usage(&named(&["Mleko", "Chleb razowy"]));
        names.increment_names(&before, &after).unwrap();

        assert_eq!(names.storage().name_suggestion_count("Chleb").unwrap(), 0);
        assert_eq!(names.storage().name_suggestion_count("Chleb razowy").unwrap(), 1);
        assert_eq!(names.storage().name_suggestion_count("Mleko").unwrap(), 1);
    }

    #[test]
    fn test_decrement_removes_names() {
        let names = suggestions();
        let usage = calculate_name_usage(&named(&["Ser"]));
        names.increment_names(&NameUsage::empty(), &usage).unwrap();
        names.decrement_names(&usage).unwrap();

        assert!(names.suggest("").unwrap().is_empty());
    }

    #[test]
    fn test_suggest_respects_limit() {
        let storage = MemoryStorage::new();
        for i in 0..60 {
            storage
                .adjust_name_suggestion_count(&format!("item {:02}", i), 1)
                .unwrap();
        }
        let names = NameSuggestions::new(storage, &MatchingConfig::default());
        assert_eq!(names.suggest("item").unwrap().len(), 50);
    }
}
