//! Tag command implementations

use anyhow::{bail, Result};
use paragon_core::{Database, ManualTag, TagCollectionStore, TagDeletion};

use super::truncate;

type Store = TagCollectionStore<Database>;

/// Render a chain with display names, falling back to the raw id
fn chain_label(store: &Store, tag_ids: &[String]) -> String {
    tag_ids
        .iter()
        .map(|id| {
            store
                .tag_names()
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.clone())
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

pub fn cmd_tags_list(store: &Store) -> Result<()> {
    let collection = store.collection();

    if collection.tags.is_empty() {
        println!("No tags found. Add one with 'paragon tags add <name>'.");
        return Ok(());
    }

    println!();
    println!("🏷️  Tags");
    println!("   {:>4} │ {:20} │ {:9} │ {:>5}", "Id", "Name", "Color", "Used");
    println!("   ─────┼──────────────────────┼───────────┼───────");
    for tag in collection.tags.values() {
        println!(
            "   {:>4} │ {:20} │ {:9} │ {:>5}",
            tag.id,
            truncate(&tag.name, 20),
            tag.color,
            collection.tag_usage_count(&tag.id)
        );
    }

    if !collection.chains.is_empty() {
        println!();
        println!("🔗 Chains");
        for chain in &collection.chains {
            println!(
                "   {:>5}  {}",
                chain.count,
                chain_label(store, &chain.tag_ids)
            );
        }
    }

    Ok(())
}

pub fn cmd_tags_add(store: &mut Store, name: &str, color: &str, parent: &[String]) -> Result<()> {
    let parent: Vec<String> = parent.iter().map(|id| id.trim().to_lowercase()).collect();
    if let Some(missing) = parent
        .iter()
        .find(|id| !store.collection().contains_tag(id))
    {
        bail!("Parent tag not found: {}", missing);
    }

    let id = store.next_tag_id();
    let mut chain = parent;
    chain.push(id.clone());

    store.add_tag_manually(&ManualTag {
        id: id.clone(),
        name: name.to_string(),
        color: color.to_string(),
        chain: chain.clone(),
    })?;

    println!(
        "✅ Created tag '{}' (id: {}) as {}",
        name,
        id,
        chain_label(store, &chain)
    );
    Ok(())
}

pub fn cmd_tags_delete(store: &mut Store, chain: &[String]) -> Result<()> {
    let Some(tag_id) = chain.last() else {
        bail!("Chain must contain at least one tag id");
    };

    if !store.collection().can_delete(chain) {
        bail!(
            "Chain {} is still used by expenses and cannot be deleted",
            chain_label(store, chain)
        );
    }

    let label = chain_label(store, chain);
    store.delete_tags_manually(&[TagDeletion {
        tag_id: tag_id.clone(),
        chain: chain.to_vec(),
    }])?;

    if store.collection().contains_tag(tag_id) {
        println!("✅ Deleted chain {} (tag '{}' is still used elsewhere)", label, tag_id);
    } else {
        println!("✅ Deleted chain {} and tag '{}'", label, tag_id);
    }
    Ok(())
}

pub fn cmd_tags_edit(
    store: &mut Store,
    tag_id: &str,
    name: Option<&str>,
    color: Option<&str>,
) -> Result<()> {
    let Some(tag) = store.collection().tags.get(&tag_id.to_lowercase()).cloned() else {
        bail!("Tag not found: {}", tag_id);
    };

    if name.is_none() && color.is_none() {
        bail!("Nothing to change: pass --name and/or --color");
    }

    let name = name.unwrap_or(tag.name.as_str());
    let color = color.unwrap_or(tag.color.as_str());
    store.set_tag_color_and_name(&tag.id, color, name)?;

    println!("✅ Updated tag {}: '{}' [{}]", tag.id, name, color);
    Ok(())
}

pub fn cmd_tags_suggest(store: &Store, product_name: &str) -> Result<()> {
    let suggested = store.tag_suggestions(product_name)?;

    if suggested.is_empty() {
        println!("No suggestion for '{}'", product_name);
        return Ok(());
    }

    println!("💡 {} → {}", product_name, chain_label(store, &suggested));
    Ok(())
}
