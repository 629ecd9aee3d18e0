//! Usage accounting for tag chains and free-text names
//!
//! A usage snapshot counts how many items currently use each chain (or
//! name). The store compares a snapshot taken before a mutation with one
//! taken after it and applies only the signed difference.

use crate::models::{normalize_tag_ids, NameCount, NameUsage, Named, TagUsage, Tagged};

/// Count items per exact (ordered, lower-cased) tag chain.
///
/// Items without tags contribute nothing. Chains keep first-seen order.
pub fn calculate_tag_usage<T: Tagged>(items: &[T]) -> TagUsage {
    let mut usage = TagUsage::empty();
    for item in items {
        let tag_ids = normalize_tag_ids(item.tag_ids());
        if tag_ids.is_empty() {
            continue;
        }
        usage.add(&tag_ids, 1);
    }
    usage
}

/// Signed delta that turns `old` into `current`, without zero entries
pub fn calculate_tag_difference(old: &TagUsage, current: &TagUsage) -> TagUsage {
    let mut difference = TagUsage::empty();
    for chain in &old.chains {
        difference.add(&chain.tag_ids, -chain.count);
    }
    for chain in &current.chains {
        difference.add(&chain.tag_ids, chain.count);
    }

    difference.chains.retain(|chain| chain.count != 0);
    difference
}

/// Count items per exact name. No normalisation is applied.
pub fn calculate_name_usage<T: Named>(items: &[T]) -> NameUsage {
    let mut usage = NameUsage::empty();
    for item in items {
        let name = item.name();
        match usage.items.iter_mut().find(|i| i.name == name) {
            Some(existing) => existing.count += 1,
            None => usage.items.push(NameCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    usage
}

/// Per-name signed deltas (`+current - old`), zero entries dropped
pub fn calculate_name_difference(old: &NameUsage, current: &NameUsage) -> Vec<NameCount> {
    let mut deltas: Vec<NameCount> = Vec::new();
    let signed = current
        .items
        .iter()
        .map(|i| (i, 1))
        .chain(old.items.iter().map(|i| (i, -1)));

    for (item, sign) in signed {
        match deltas.iter_mut().find(|d| d.name == item.name) {
            Some(existing) => existing.count += sign * item.count,
            None => deltas.push(NameCount {
                name: item.name.clone(),
                count: sign * item.count,
            }),
        }
    }

    deltas.retain(|d| d.count != 0);
    deltas
}
