//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init/status and shared utilities (open_db, open_store, read_expenses)
//! - `expenses` - Applying expense snapshots to usage counts
//! - `names` - Name autocomplete
//! - `reports` - Report generation commands
//! - `tags` - Tag management commands

pub mod core;
pub mod expenses;
pub mod names;
pub mod reports;
pub mod tags;

// Re-export command functions for main.rs
pub use core::*;
pub use expenses::*;
pub use names::*;
pub use reports::*;
pub use tags::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
