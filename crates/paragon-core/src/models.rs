//! Domain models for Paragon

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved tag id for items that carry no tags at all
pub const NO_CATEGORY_TAG: &str = "noCategoryTag";

/// Reserved tag id for the share of a node not refined by a deeper tag
pub const NO_SUB_CATEGORY_TAG: &str = "noSubCategoryTag";

/// Returns true if `id` collides with one of the reserved sentinel ids
pub fn is_reserved_tag_id(id: &str) -> bool {
    id.eq_ignore_ascii_case(NO_CATEGORY_TAG) || id.eq_ignore_ascii_case(NO_SUB_CATEGORY_TAG)
}

/// Lower-case every id of a chain
pub fn normalize_tag_ids(tag_ids: &[String]) -> Vec<String> {
    tag_ids.iter().map(|id| id.to_lowercase()).collect()
}

// ========== Item accessors ==========

/// Anything that carries an ordered tag chain
pub trait Tagged {
    fn tag_ids(&self) -> &[String];
}

/// Anything with a free-text name (expense or receipt line item)
pub trait Named {
    fn name(&self) -> &str;
}

/// Anything with a monetary amount
pub trait Priced {
    fn amount(&self) -> f64;
}

/// Anything dated by a unix timestamp in seconds
pub trait Dated {
    fn date_unix_timestamp(&self) -> i64;
}

/// A flat expense row as handed over by the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub date: i64,
}

impl Expense {
    pub fn new(name: &str, amount: f64, tag_ids: &[&str], date: i64) -> Self {
        Self {
            name: name.to_string(),
            amount,
            tag_ids: tag_ids.iter().map(|s| s.to_string()).collect(),
            date,
        }
    }
}

impl Tagged for Expense {
    fn tag_ids(&self) -> &[String] {
        &self.tag_ids
    }
}

impl Named for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Priced for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Expense {
    fn date_unix_timestamp(&self) -> i64 {
        self.date
    }
}

// ========== Tags and chains ==========

/// A user-defined category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Identity of a chain: its lower-cased ids joined with a unit separator
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainKey(String);

impl ChainKey {
    const SEPARATOR: char = '\u{1f}';

    pub fn new<S: AsRef<str>>(tag_ids: &[S]) -> Self {
        let mut key = String::new();
        for (i, id) in tag_ids.iter().enumerate() {
            if i > 0 {
                key.push(Self::SEPARATOR);
            }
            key.push_str(&id.as_ref().to_lowercase());
        }
        Self(key)
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.replace(Self::SEPARATOR, " > "))
    }
}

/// One concrete category path used by at least one historical expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagChain {
    pub tag_ids: Vec<String>,
    pub count: i64,
}

impl TagChain {
    pub fn key(&self) -> ChainKey {
        ChainKey::new(&self.tag_ids)
    }

    /// True if this chain begins with `prefix` (case-insensitive)
    pub fn starts_with(&self, prefix: &[String]) -> bool {
        prefix.len() <= self.tag_ids.len()
            && prefix
                .iter()
                .zip(&self.tag_ids)
                .all(|(p, id)| p.to_lowercase() == id.to_lowercase())
    }

    /// True if any id of this chain equals `tag_id` (case-insensitive)
    pub fn references(&self, tag_id: &str) -> bool {
        let tag_id = tag_id.to_lowercase();
        self.tag_ids.iter().any(|id| id.to_lowercase() == tag_id)
    }
}

/// The persisted aggregate root holding a user's whole category hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagCollection {
    #[serde(default)]
    pub tags: BTreeMap<String, Tag>,
    #[serde(default)]
    pub chains: Vec<TagChain>,
}

impl TagCollection {
    pub fn find_chain(&self, key: &ChainKey) -> Option<&TagChain> {
        self.chains.iter().find(|c| &c.key() == key)
    }

    /// Find the chain with this key, creating it with a zero count if absent
    pub fn find_or_create_chain(&mut self, tag_ids: &[String]) -> &mut TagChain {
        let key = ChainKey::new(tag_ids);
        let position = match self.chains.iter().position(|c| c.key() == key) {
            Some(position) => position,
            None => {
                self.chains.push(TagChain {
                    tag_ids: normalize_tag_ids(tag_ids),
                    count: 0,
                });
                self.chains.len() - 1
            }
        };
        &mut self.chains[position]
    }

    /// True when no chain starting with `chain` is still in use
    pub fn can_delete(&self, chain: &[String]) -> bool {
        self.chains
            .iter()
            .filter(|c| c.starts_with(chain))
            .all(|c| c.count == 0)
    }

    /// Number of items whose chain ends at `tag_id`
    pub fn tag_usage_count(&self, tag_id: &str) -> i64 {
        let tag_id = tag_id.to_lowercase();
        self.chains
            .iter()
            .filter(|c| c.tag_ids.last().is_some_and(|id| id.to_lowercase() == tag_id))
            .map(|c| c.count)
            .sum()
    }

    pub fn contains_tag(&self, tag_id: &str) -> bool {
        self.tags.contains_key(&tag_id.to_lowercase())
    }
}

/// Request to add a tag through the tag editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualTag {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Full chain ending with this tag (e.g. `["groceries", "dairy"]`)
    pub chain: Vec<String>,
}

/// Request to remove a tag (and its unused chain) through the tag editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDeletion {
    pub tag_id: String,
    pub chain: Vec<String>,
}

// ========== Usage snapshots ==========

/// How many items use exactly this chain (signed when used as a delta)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainUsage {
    pub tag_ids: Vec<String>,
    pub count: i64,
}

impl ChainUsage {
    pub fn key(&self) -> ChainKey {
        ChainKey::new(&self.tag_ids)
    }
}

/// Chain usage snapshot or signed diff between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsage {
    pub chains: Vec<ChainUsage>,
}

impl TagUsage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn count_for(&self, tag_ids: &[String]) -> i64 {
        let key = ChainKey::new(tag_ids);
        self.chains
            .iter()
            .find(|c| c.key() == key)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Add `count` to the chain matching `tag_ids`, appending it if unseen
    pub(crate) fn add(&mut self, tag_ids: &[String], count: i64) {
        let key = ChainKey::new(tag_ids);
        match self.chains.iter_mut().find(|c| c.key() == key) {
            Some(existing) => existing.count += count,
            None => self.chains.push(ChainUsage {
                tag_ids: tag_ids.to_vec(),
                count,
            }),
        }
    }
}

/// Occurrences of one free-text name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: i64,
}

/// Name usage snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameUsage {
    pub items: Vec<NameCount>,
}

impl NameUsage {
    pub fn empty() -> Self {
        Self::default()
    }
}

// ========== Habits ==========

/// A product name paired with the tags the user gave it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub product_name: String,
    pub tag_ids: Vec<String>,
}

impl HabitEntry {
    pub fn new(product_name: &str, tag_ids: &[&str]) -> Self {
        Self {
            product_name: product_name.to_string(),
            tag_ids: tag_ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}
