//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `open_store` / `open_names` - Shared constructors
//! - `read_expenses` - Expense file loader
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Database summary

use std::path::Path;

use anyhow::{Context, Result};
use paragon_core::{
    Database, Expense, MatchingConfig, NameSuggestions, TagCollectionStore, TagStorage,
};

pub fn load_config(path: Option<&Path>) -> Result<MatchingConfig> {
    match path {
        Some(path) => MatchingConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => MatchingConfig::load().context("Failed to load config"),
    }
}

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn open_store(db: &Database, config: &MatchingConfig) -> Result<TagCollectionStore<Database>> {
    TagCollectionStore::open(db.clone(), config.clone()).context("Failed to load tag collection")
}

pub fn open_names(db: &Database, config: &MatchingConfig) -> NameSuggestions<Database> {
    NameSuggestions::new(db.clone(), config)
}

/// Read a JSON array of expenses
pub fn read_expenses(path: &Path) -> Result<Vec<Expense>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid expense file {}", path.display()))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    if db.load_tag_collection()?.is_none() {
        db.save_tag_collection(&Default::default())?;
        println!("   Created empty tag collection");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a tag: paragon tags add Groceries");
    println!("  2. Apply expenses: paragon expenses apply --file expenses.json");

    Ok(())
}

pub fn cmd_status(db: &Database) -> Result<()> {
    let stats = db.stats()?;
    let collection = db.load_tag_collection()?.unwrap_or_default();

    println!();
    println!("📦 Paragon Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Database:          {}", db.path());
    println!(
        "   Tag collection:    {}",
        if stats.has_collection {
            "saved"
        } else {
            "not initialized"
        }
    );
    println!("   Tags:              {}", collection.tags.len());
    println!("   Chains:            {}", collection.chains.len());
    println!("   Habit branches:    {}", stats.habit_branches);
    println!("   Suggested names:   {}", stats.name_suggestions);

    Ok(())
}
