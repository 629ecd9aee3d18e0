//! Session-scoped owner of the tag collection
//!
//! `TagCollectionStore` hydrates the collection from a [`TagStorage`],
//! applies usage diffs and manual edits to a working copy, writes the whole
//! copy back and only then replaces its own state and notifies subscribers.
//! A failed save leaves the store as it was, so the call can be retried.
//!
//! All mutations take `&mut self`, so one store is the single writer for
//! its session. Hosts sharing it between threads wrap it in a `Mutex`.

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::config::MatchingConfig;
use crate::error::{Error, Result};
use crate::habits::{branch_key, closest_key, product_key, HabitBranch};
use crate::models::{
    is_reserved_tag_id, normalize_tag_ids, ChainKey, HabitEntry, ManualTag, Named, Tag,
    TagCollection, TagDeletion, TagUsage, Tagged,
};
use crate::storage::TagStorage;
use crate::usage::{calculate_tag_difference, calculate_tag_usage};

/// Change notification sent to subscribers
#[derive(Debug, Clone, Copy)]
pub enum TagEvent<'a> {
    /// Sent after every successful mutation
    Collection(&'a TagCollection),
    /// Sent only when some tag id maps to a different color
    Colors(&'a HashMap<String, String>),
    /// Sent only when some tag id maps to a different name
    Names(&'a HashMap<String, String>),
}

/// Callback invoked for every [`TagEvent`]
pub type TagSubscriber = Box<dyn Fn(&TagEvent<'_>) + Send + Sync>;

pub struct TagCollectionStore<S: TagStorage> {
    storage: S,
    config: MatchingConfig,
    collection: TagCollection,
    colors: HashMap<String, String>,
    names: HashMap<String, String>,
    subscribers: Vec<TagSubscriber>,
}

impl<S: TagStorage> TagCollectionStore<S> {
    /// Load the collection from storage, starting empty if none was saved
    pub fn open(storage: S, config: MatchingConfig) -> Result<Self> {
        let collection = storage.load_tag_collection()?.unwrap_or_default();
        info!(
            "Loaded tag collection: {} tags, {} chains",
            collection.tags.len(),
            collection.chains.len()
        );

        let colors = color_map(&collection);
        let names = name_map(&collection);
        Ok(Self {
            storage,
            config,
            collection,
            colors,
            names,
            subscribers: Vec::new(),
        })
    }

    pub fn collection(&self) -> &TagCollection {
        &self.collection
    }

    /// Tag id to color lookup
    pub fn tag_colors(&self) -> &HashMap<String, String> {
        &self.colors
    }

    /// Tag id to display name lookup
    pub fn tag_names(&self) -> &HashMap<String, String> {
        &self.names
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn subscribe(&mut self, subscriber: TagSubscriber) {
        self.subscribers.push(subscriber);
    }

    /// Discard in-memory state and hydrate again from storage
    pub fn reload(&mut self) -> Result<()> {
        self.collection = self.storage.load_tag_collection()?.unwrap_or_default();
        self.publish();
        Ok(())
    }

    // ========== Usage accounting ==========

    /// Fold the difference between two usage snapshots into the chains.
    ///
    /// This is the only write path for chain counts. A count that would go
    /// negative is logged and clamped to zero.
    pub fn increment_tags(&mut self, old: &TagUsage, current: &TagUsage) -> Result<()> {
        let difference = calculate_tag_difference(old, current);
        if difference.is_empty() {
            debug!("Tag usage unchanged, nothing to apply");
            return Ok(());
        }

        let mut next = self.collection.clone();
        for delta in &difference.chains {
            let chain = next.find_or_create_chain(&delta.tag_ids);
            chain.count += delta.count;
            if chain.count < 0 {
                error!(
                    "Chain {} dropped to {} after applying {}, clamping to 0",
                    chain.key(),
                    chain.count,
                    delta.count
                );
                chain.count = 0;
            }
        }

        debug!("Applied {} chain usage deltas", difference.chains.len());
        self.commit(next)
    }

    /// Remove all usage recorded in `old`
    pub fn decrement_tags(&mut self, old: &TagUsage) -> Result<()> {
        self.increment_tags(old, &TagUsage::empty())
    }

    /// Apply the live tags of `items` against a previous snapshot, then
    /// learn name-to-tag habits from them
    pub fn apply_new_tags<T: Tagged + Named>(&mut self, items: &[T], old: &TagUsage) -> Result<()> {
        let current = calculate_tag_usage(items);
        self.increment_tags(old, &current)?;

        let habits: Vec<HabitEntry> = items
            .iter()
            .filter(|item| !item.name().trim().is_empty())
            .map(|item| HabitEntry {
                product_name: item.name().to_string(),
                tag_ids: item.tag_ids().to_vec(),
            })
            .collect();
        self.learn_tag_habits(&habits)
    }

    // ========== Manual edits ==========

    /// Smallest positive integer not used as a tag id
    pub fn next_tag_id(&self) -> String {
        (1u64..)
            .map(|n| n.to_string())
            .find(|id| !self.collection.tags.contains_key(id))
            .unwrap_or_default()
    }

    /// Define a tag (if new) and make sure its chain exists with a zero count
    pub fn add_tag_manually(&mut self, tag: &ManualTag) -> Result<()> {
        let id = tag.id.trim().to_lowercase();
        let name = tag.name.trim().to_lowercase();

        if id.is_empty() || name.is_empty() {
            return Err(Error::Precondition(
                "Tag id and name must not be empty".to_string(),
            ));
        }
        if is_reserved_tag_id(&id) || is_reserved_tag_id(&name) {
            return Err(Error::Precondition(format!(
                "'{}' is reserved and cannot be used as a tag",
                tag.name
            )));
        }

        let mut next = self.collection.clone();
        next.tags.entry(id.clone()).or_insert_with(|| Tag {
            id,
            name,
            color: tag.color.clone(),
        });

        if !tag.chain.is_empty() {
            next.find_or_create_chain(&tag.chain);
        }

        self.commit(next)
    }

    /// Remove unused chains and any tag no longer referenced by a chain.
    ///
    /// Chains with a positive count are kept; callers check
    /// [`TagCollection::can_delete`] first.
    pub fn delete_tags_manually(&mut self, deletions: &[TagDeletion]) -> Result<()> {
        let mut next = self.collection.clone();
        for deletion in deletions {
            let key = ChainKey::new(&deletion.chain);
            if let Some(position) = next.chains.iter().position(|c| c.key() == key) {
                let count = next.chains[position].count;
                if count == 0 {
                    next.chains.remove(position);
                } else {
                    warn!("Not removing chain {} still used {} times", key, count);
                }
            }

            let tag_id = deletion.tag_id.to_lowercase();
            if !next.chains.iter().any(|c| c.references(&tag_id)) {
                next.tags.remove(&tag_id);
            }
        }

        self.commit(next)
    }

    /// Rename and recolor a tag; unknown ids are logged and ignored
    pub fn set_tag_color_and_name(&mut self, tag_id: &str, color: &str, name: &str) -> Result<()> {
        let mut next = self.collection.clone();
        let Some(tag) = next.tags.get_mut(&tag_id.to_lowercase()) else {
            warn!("Cannot update unknown tag '{}'", tag_id);
            return Ok(());
        };

        tag.color = color.to_string();
        tag.name = name.trim().to_lowercase();
        self.commit(next)
    }

    // ========== Habits ==========

    /// Remember the tags given to each product name (last write wins)
    pub fn learn_tag_habits(&mut self, entries: &[HabitEntry]) -> Result<()> {
        let mut touched: Vec<HabitBranch> = Vec::new();

        for entry in entries {
            require_product_name(&entry.product_name)?;

            let branch = branch_key(&entry.product_name);
            if branch.is_empty() || entry.tag_ids.is_empty() {
                continue;
            }

            let position = match touched.iter().position(|b| b.key == branch) {
                Some(position) => position,
                None => {
                    let loaded = self.storage.load_habit_branch(&branch)?;
                    touched.push(loaded.unwrap_or_else(|| HabitBranch::new(&branch)));
                    touched.len() - 1
                }
            };

            touched[position].learn(
                &product_key(&entry.product_name),
                &normalize_tag_ids(&entry.tag_ids),
            );
        }

        if touched.is_empty() {
            return Ok(());
        }

        debug!("Saving {} habit branches", touched.len());
        self.storage.save_habit_branches(&touched)
    }

    /// Suggest tags for a product name from learned habits.
    ///
    /// Tags deleted since they were learned are dropped from the result.
    pub fn tag_suggestions(&self, product_name: &str) -> Result<Vec<String>> {
        require_product_name(product_name)?;

        let branch = branch_key(product_name);
        if branch.is_empty() {
            return Ok(Vec::new());
        }

        let keys = self.storage.habit_branch_keys()?;
        let Some(matched) = closest_key(
            &branch,
            keys.iter().map(String::as_str),
            &self.config,
            Some(self.config.early_accept_distance),
        ) else {
            return Ok(Vec::new());
        };

        let Some(habits) = self.storage.load_habit_branch(matched)? else {
            return Ok(Vec::new());
        };

        let suggested = habits
            .suggest(&product_key(product_name), &self.config)
            .unwrap_or_default();

        Ok(suggested
            .iter()
            .filter(|id| self.collection.contains_tag(id))
            .cloned()
            .collect())
    }

    // ========== Persistence and notification ==========

    /// Persist `next` and adopt it; on error the current state is untouched
    fn commit(&mut self, next: TagCollection) -> Result<()> {
        self.storage.save_tag_collection(&next)?;
        self.collection = next;
        self.publish();
        Ok(())
    }

    fn publish(&mut self) {
        for subscriber in &self.subscribers {
            subscriber(&TagEvent::Collection(&self.collection));
        }

        let colors = color_map(&self.collection);
        if colors != self.colors {
            self.colors = colors;
            for subscriber in &self.subscribers {
                subscriber(&TagEvent::Colors(&self.colors));
            }
        }

        let names = name_map(&self.collection);
        if names != self.names {
            self.names = names;
            for subscriber in &self.subscribers {
                subscriber(&TagEvent::Names(&self.names));
            }
        }
    }
}

fn require_product_name(product_name: &str) -> Result<()> {
    if product_name.trim().is_empty() {
        return Err(Error::Precondition(
            "Product name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn color_map(collection: &TagCollection) -> HashMap<String, String> {
    collection
        .tags
        .values()
        .map(|t| (t.id.clone(), t.color.clone()))
        .collect()
}

fn name_map(collection: &TagCollection) -> HashMap<String, String> {
    collection
        .tags
        .values()
        .map(|t| (t.id.clone(), t.name.clone()))
        .collect()
}
