//! Report builders
//!
//! Pure folds over flat expense lists:
//! - `details` - nested category tree with totals and percentages
//! - `comparison` - month by month totals grouped by main tag
//! - `months` - adjacent reporting months for navigation

pub mod comparison;
pub mod details;
pub mod months;

pub use comparison::{
    build_comparison_data, ComparisonChartData, ComparisonChartMonth, ComparisonChartTag,
};
pub use details::{build_details_data, DetailsChartData};
pub use months::{previous_and_next, previous_and_next_at, AdjacentMonths};
