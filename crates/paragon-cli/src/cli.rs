//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Paragon - Receipt expense tagging and reports
#[derive(Parser)]
#[command(name = "paragon")]
#[command(about = "Offline-first expense tagging and spending reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "paragon.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Matching config file (defaults to the user config, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status
    Status,

    /// Manage tags (list, add, delete, edit, suggest)
    Tags {
        #[command(subcommand)]
        action: Option<TagsAction>,
    },

    /// Apply expense snapshots to tag usage, habits and name counters
    Expenses {
        #[command(subcommand)]
        action: ExpensesAction,
    },

    /// Name autocomplete
    Names {
        #[command(subcommand)]
        action: NamesAction,
    },

    /// Generate reports from an expense file
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },
}

#[derive(Subcommand)]
pub enum TagsAction {
    /// List tags with their usage
    List,

    /// Add a new tag under an optional parent chain
    Add {
        /// Display name
        name: String,
        /// Color (e.g., "#10b981")
        #[arg(long, default_value = "#9e9e9e")]
        color: String,
        /// Parent chain as comma-separated tag ids (e.g., "1,4")
        #[arg(long, value_delimiter = ',')]
        parent: Vec<String>,
    },

    /// Delete an unused chain, and its last tag once nothing references it
    Delete {
        /// Chain as comma-separated tag ids; the last id is the tag to delete
        #[arg(value_delimiter = ',', required = true)]
        chain: Vec<String>,
    },

    /// Change a tag's name and/or color
    Edit {
        /// Tag id
        tag_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    /// Suggest tags for a product name from learned habits
    Suggest {
        /// Product name as typed by the user
        product_name: String,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// Apply the current expense list, diffed against an optional previous one
    Apply {
        /// JSON file with the current expenses
        #[arg(short, long)]
        file: PathBuf,
        /// JSON file with the expenses as they were before the change
        #[arg(long)]
        previous: Option<PathBuf>,
    },

    /// Remove deleted expenses from usage counts and name counters
    Remove {
        /// JSON file with the deleted expenses
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum NamesAction {
    /// Most used names starting with a prefix
    Suggest {
        /// Case-sensitive prefix (empty for the top names)
        #[arg(default_value = "")]
        prefix: String,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Nested category breakdown
    Details {
        /// JSON file with expenses
        #[arg(short, long)]
        file: PathBuf,
        /// Only expenses from this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Month by month totals grouped by main tag
    Compare {
        /// JSON file with expenses
        #[arg(short, long)]
        file: PathBuf,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Previous and next months to navigate to
    Months {
        /// Selected month (YYYY-MM), defaults to the current month
        #[arg(long)]
        selected: Option<String>,
        /// Months with data, comma-separated (YYYY-MM,...)
        #[arg(long, value_delimiter = ',')]
        available: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
