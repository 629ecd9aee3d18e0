//! Name autocomplete command

use anyhow::Result;
use paragon_core::{Database, NameSuggestions};

use super::truncate;

pub fn cmd_names_suggest(names: &NameSuggestions<Database>, prefix: &str) -> Result<()> {
    let found = names.suggest(prefix)?;

    if found.is_empty() {
        println!("No names start with '{}'", prefix);
        return Ok(());
    }

    println!("   {:40} │ {:>5}", "Name", "Count");
    println!("   ─────────────────────────────────────────┼───────");
    for name in &found {
        println!("   {:40} │ {:>5}", truncate(&name.name, 40), name.count);
    }

    Ok(())
}
