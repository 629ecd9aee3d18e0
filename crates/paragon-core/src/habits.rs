//! Habit index for suggesting tags from product names
//!
//! Learned associations are bucketed by a *branch key* (the product name
//! reduced to letters) and, inside a branch, by a *product key* (letters
//! and digits). The last tags learned for a product key win.
//!
//! Lookups resolve a key exactly first and otherwise fall back to the
//! nearest key by Levenshtein distance, bounded by a share of the key
//! length taken from [`MatchingConfig`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MatchingConfig;

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-ząćęłńóśźż]").expect("valid branch key pattern"));

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9ąćęłńóśźż]").expect("valid product key pattern"));

/// Product name lower-cased and stripped to letters (Polish alphabet)
pub fn branch_key(product_name: &str) -> String {
    NON_LETTERS
        .replace_all(&product_name.to_lowercase(), "")
        .into_owned()
}

/// Product name lower-cased and stripped to letters and digits
pub fn product_key(product_name: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(&product_name.to_lowercase(), "")
        .into_owned()
}

/// Tags most recently learned for one exact product key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductHabit {
    pub key: String,
    pub tag_ids: Vec<String>,
}

/// All products sharing one branch key, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitBranch {
    pub key: String,
    #[serde(default)]
    pub products: Vec<ProductHabit>,
}

impl HabitBranch {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            products: Vec::new(),
        }
    }

    /// Overwrite the tags suggested for `product_key`
    pub fn learn(&mut self, product_key: &str, tag_ids: &[String]) {
        match self.products.iter_mut().find(|p| p.key == product_key) {
            Some(product) => product.tag_ids = tag_ids.to_vec(),
            None => self.products.push(ProductHabit {
                key: product_key.to_string(),
                tag_ids: tag_ids.to_vec(),
            }),
        }
    }

    /// Tags of the product closest to `product_key`, if any is close enough
    pub fn suggest(&self, product_key: &str, config: &MatchingConfig) -> Option<&[String]> {
        let keys = self.products.iter().map(|p| p.key.as_str());
        let key = closest_key(product_key, keys, config, None)?;
        self.products
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.tag_ids.as_slice())
    }
}

/// Levenshtein edit distance over Unicode scalar values
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Resolve `target` against `candidates`.
///
/// An exact match always wins. Otherwise fuzzy matching is only attempted
/// when the key is long enough for `fuzzy_distance_ratio` to allow one
/// edit; the minimum-distance candidate within the bound is returned, the
/// first one on ties. With `early_accept` set, the first candidate closer
/// than that distance is returned without looking further.
pub fn closest_key<'a, I>(
    target: &str,
    candidates: I,
    config: &MatchingConfig,
    early_accept: Option<usize>,
) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let candidates = candidates.into_iter();

    if let Some(exact) = candidates.clone().find(|c| *c == target) {
        return Some(exact);
    }

    let max_distance = config.max_distance(target.chars().count());
    if max_distance < 1.0 {
        return None;
    }

    let mut best: Option<(usize, &'a str)> = None;
    for candidate in candidates {
        let distance = levenshtein(target, candidate);

        if early_accept.is_some_and(|limit| distance < limit) {
            debug!("Accepting '{}' for '{}' at distance {}", candidate, target, distance);
            return Some(candidate);
        }

        if distance as f64 <= max_distance && best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }

    if let Some((distance, candidate)) = best {
        debug!("Closest key to '{}' is '{}' at distance {}", target, candidate, distance);
    }

    best.map(|(_, candidate)| candidate)
}
