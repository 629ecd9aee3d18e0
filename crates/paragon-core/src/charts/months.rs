//! Previous/next navigation between reporting months

use serde::{Deserialize, Serialize};

use crate::month::Month;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentMonths {
    pub previous: Option<Month>,
    pub next: Option<Month>,
}

/// Neighbours of `selected` among the months that have data.
///
/// `None` selects the current calendar month. Both the selected and the
/// current month are always navigable, even without data.
pub fn previous_and_next(selected: Option<Month>, available: &[Month]) -> AdjacentMonths {
    previous_and_next_at(selected, available, Month::current())
}

/// Same as [`previous_and_next`] with an explicit current month
pub fn previous_and_next_at(
    selected: Option<Month>,
    available: &[Month],
    current: Month,
) -> AdjacentMonths {
    let selected = selected.unwrap_or(current);

    let mut months: Vec<Month> = available.to_vec();
    months.push(selected);
    months.push(current);
    months.sort();
    months.dedup();

    // selected is always present after the pushes above
    let Ok(position) = months.binary_search(&selected) else {
        return AdjacentMonths::default();
    };

    AdjacentMonths {
        previous: position.checked_sub(1).map(|i| months[i]),
        next: months.get(position + 1).copied(),
    }
}
