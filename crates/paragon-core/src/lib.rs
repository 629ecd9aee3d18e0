//! Paragon Core Library
//!
//! Tag accounting and reporting for the Paragon receipt tracker:
//! - Tag and name usage snapshots with signed differences
//! - Session-scoped tag collection store with change notifications
//! - Fuzzy habit learning for tag suggestions by product name
//! - Name autocomplete counters
//! - Category tree, month comparison and month navigation reports
//! - SQLite persistence with connection pooling

pub mod charts;
pub mod config;
pub mod db;
pub mod error;
pub mod habits;
pub mod models;
pub mod month;
pub mod storage;
pub mod store;
pub mod suggestions;
pub mod usage;

pub use charts::{
    build_comparison_data, build_details_data, previous_and_next, previous_and_next_at,
    AdjacentMonths, ComparisonChartData, ComparisonChartMonth, ComparisonChartTag,
    DetailsChartData,
};
pub use config::MatchingConfig;
pub use db::{Database, DbStats};
pub use error::{Error, Result};
pub use habits::{branch_key, levenshtein, product_key, HabitBranch, ProductHabit};
pub use models::{
    ChainKey, ChainUsage, Expense, HabitEntry, ManualTag, NameCount, NameUsage, Tag, TagChain,
    TagCollection, TagDeletion, TagUsage, NO_CATEGORY_TAG, NO_SUB_CATEGORY_TAG,
};
pub use month::Month;
pub use storage::{MemoryStorage, NameSuggestionStorage, TagStorage};
pub use store::{TagCollectionStore, TagEvent, TagSubscriber};
pub use suggestions::NameSuggestions;
pub use usage::{
    calculate_name_difference, calculate_name_usage, calculate_tag_difference,
    calculate_tag_usage,
};
