//! Month over month comparison grouped by main tag

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Dated, Priced, Tagged, NO_CATEGORY_TAG};
use crate::month::Month;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChartTag {
    pub tag_id: String,
    pub amount: f64,
    pub expense_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChartMonth {
    pub month: Month,
    pub tags: Vec<ComparisonChartTag>,
    pub expenses_count: i64,
    pub total_amount: f64,
}

impl ComparisonChartMonth {
    fn new(month: Month) -> Self {
        Self {
            month,
            tags: Vec::new(),
            expenses_count: 0,
            total_amount: 0.0,
        }
    }

    fn add(&mut self, tag_id: &str, amount: f64) {
        self.expenses_count += 1;
        self.total_amount += amount;

        match self.tags.iter_mut().find(|t| t.tag_id == tag_id) {
            Some(tag) => {
                tag.amount += amount;
                tag.expense_count += 1;
            }
            None => self.tags.push(ComparisonChartTag {
                tag_id: tag_id.to_string(),
                amount,
                expense_count: 1,
            }),
        }
    }

    pub fn tag(&self, tag_id: &str) -> Option<&ComparisonChartTag> {
        self.tags.iter().find(|t| t.tag_id == tag_id)
    }
}

/// Months with activity, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChartData {
    pub months: Vec<ComparisonChartMonth>,
}

/// Group items dated within `[from_timestamp, to_timestamp]` by calendar
/// month and by their first tag.
///
/// Every month overlapping the range is considered; months without any
/// matching item are left out.
pub fn build_comparison_data<T: Priced + Tagged + Dated>(
    items: &[T],
    from_timestamp: i64,
    to_timestamp: i64,
) -> Result<ComparisonChartData> {
    if from_timestamp > to_timestamp {
        return Err(Error::InvalidRange {
            from: from_timestamp,
            to: to_timestamp,
        });
    }

    let first = Month::from_timestamp(from_timestamp)?;
    let last = Month::from_timestamp(to_timestamp)?;

    let mut months = Vec::new();
    for month in Month::range(first, last).into_iter().rev() {
        let mut summary = ComparisonChartMonth::new(month);
        for item in items
            .iter()
            .filter(|item| month.contains(item.date_unix_timestamp()))
        {
            let tag_id = item
                .tag_ids()
                .first()
                .map(String::as_str)
                .unwrap_or(NO_CATEGORY_TAG);
            summary.add(tag_id, item.amount());
        }

        if summary.expenses_count > 0 {
            months.push(summary);
        }
    }

    debug!(
        "Comparison chart: {} of {} months with expenses",
        months.len(),
        last.index() - first.index() + 1
    );

    Ok(ComparisonChartData { months })
}
