//! Expense snapshot commands
//!
//! The host app owns expense storage; these commands take before/after
//! snapshots as JSON files and fold the difference into tag usage, habits
//! and name counters.

use std::path::Path;

use anyhow::Result;
use paragon_core::{
    calculate_name_usage, calculate_tag_usage, Database, NameSuggestions, TagCollectionStore,
};
use tracing::info;

use super::read_expenses;

pub fn cmd_expenses_apply(
    store: &mut TagCollectionStore<Database>,
    names: &NameSuggestions<Database>,
    file: &Path,
    previous: Option<&Path>,
) -> Result<()> {
    let current = read_expenses(file)?;
    let previous = match previous {
        Some(path) => read_expenses(path)?,
        None => Vec::new(),
    };

    store.apply_new_tags(&current, &calculate_tag_usage(&previous))?;
    names.increment_names(
        &calculate_name_usage(&previous),
        &calculate_name_usage(&current),
    )?;

    info!(
        "Applied {} expenses against {} previous",
        current.len(),
        previous.len()
    );
    println!(
        "✅ Applied {} expenses ({} chains in use)",
        current.len(),
        store.collection().chains.iter().filter(|c| c.count > 0).count()
    );
    Ok(())
}

pub fn cmd_expenses_remove(
    store: &mut TagCollectionStore<Database>,
    names: &NameSuggestions<Database>,
    file: &Path,
) -> Result<()> {
    let removed = read_expenses(file)?;

    store.decrement_tags(&calculate_tag_usage(&removed))?;
    names.decrement_names(&calculate_name_usage(&removed))?;

    println!("✅ Removed {} expenses from usage counts", removed.len());
    Ok(())
}
