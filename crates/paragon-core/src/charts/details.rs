//! Category drill-down tree

use serde::{Deserialize, Serialize};

use crate::models::{Priced, Tagged, NO_CATEGORY_TAG, NO_SUB_CATEGORY_TAG};

/// One node of the category tree. The root has no tag id and no parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsChartData {
    pub tag_id: Option<String>,
    pub total_amount: f64,
    pub total_expenses: i64,
    /// Share of the parent's total, 1 for the root
    pub percentage: f64,
    pub inner_tags: Vec<DetailsChartData>,
    pub parent_tag_ids: Option<Vec<String>>,
}

impl DetailsChartData {
    fn root() -> Self {
        Self {
            tag_id: None,
            total_amount: 0.0,
            total_expenses: 0,
            percentage: 1.0,
            inner_tags: Vec::new(),
            parent_tag_ids: None,
        }
    }

    fn child(tag_id: &str, parent_tag_ids: Vec<String>) -> Self {
        Self {
            tag_id: Some(tag_id.to_string()),
            total_amount: 0.0,
            total_expenses: 0,
            percentage: 0.0,
            inner_tags: Vec::new(),
            parent_tag_ids: Some(parent_tag_ids),
        }
    }

    /// Ids from the root down to and including this node
    fn path(&self) -> Vec<String> {
        let mut path = self.parent_tag_ids.clone().unwrap_or_default();
        path.extend(self.tag_id.clone());
        path
    }

    fn add(&mut self, amount: f64) {
        self.total_amount += amount;
        self.total_expenses += 1;
    }

    fn find_or_create_child(&mut self, tag_id: &str) -> &mut DetailsChartData {
        let index = match self
            .inner_tags
            .iter()
            .position(|c| c.tag_id.as_deref() == Some(tag_id))
        {
            Some(index) => index,
            None => {
                let child = Self::child(tag_id, self.path());
                self.inner_tags.push(child);
                self.inner_tags.len() - 1
            }
        };
        &mut self.inner_tags[index]
    }

    /// Direct child by tag id
    pub fn inner_tag(&self, tag_id: &str) -> Option<&DetailsChartData> {
        self.inner_tags
            .iter()
            .find(|c| c.tag_id.as_deref() == Some(tag_id))
    }

    fn finish(&mut self) {
        let total = self.total_amount;
        for child in &mut self.inner_tags {
            child.percentage = if total != 0.0 {
                child.total_amount / total
            } else {
                0.0
            };
            child.finish();
        }
        // sort_by is stable: equal totals keep first-seen order
        self.inner_tags
            .sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    }
}

/// Fold items into a tree of nested category totals.
///
/// Every tagged path ends in a `noSubCategoryTag` leaf and untagged items
/// land in a root-level `noCategoryTag` node, so children always add up to
/// their parent.
pub fn build_details_data<T: Priced + Tagged>(items: &[T]) -> DetailsChartData {
    let mut root = DetailsChartData::root();
    let mut no_category = DetailsChartData::child(NO_CATEGORY_TAG, Vec::new());

    for item in items {
        let amount = item.amount();
        root.add(amount);

        if item.tag_ids().is_empty() {
            no_category.add(amount);
            continue;
        }

        let mut node = &mut root;
        for tag_id in item.tag_ids() {
            node = node.find_or_create_child(tag_id);
            node.add(amount);
        }
        node.find_or_create_child(NO_SUB_CATEGORY_TAG).add(amount);
    }

    if no_category.total_expenses > 0 {
        root.inner_tags.push(no_category);
    }

    root.finish();
    root
}
