//! Report command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use paragon_core::{
    build_comparison_data, build_details_data, previous_and_next, ComparisonChartData,
    DetailsChartData, Month,
};

use super::{read_expenses, truncate};

/// Parse a YYYY-MM-DD argument into the unix timestamp of the start or the
/// last second of that day (UTC)
pub fn parse_day(value: &str, end_of_day: bool) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", value))?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    let time = time.with_context(|| format!("Invalid date '{}'", value))?;
    Ok(time.and_utc().timestamp())
}

pub fn parse_month(value: &str) -> Result<Month> {
    value
        .parse::<Month>()
        .with_context(|| format!("Invalid month '{}' (use YYYY-MM)", value))
}

pub fn details_report(file: &Path, month: Option<&str>) -> Result<DetailsChartData> {
    let mut expenses = read_expenses(file)?;
    if let Some(month) = month {
        let month = parse_month(month)?;
        expenses.retain(|e| month.contains(e.date));
    }
    Ok(build_details_data(&expenses))
}

pub fn cmd_report_details(file: &Path, month: Option<&str>, json: bool) -> Result<()> {
    let root = details_report(file, month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&root)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending Details");
    if let Some(month) = month {
        println!("   Month: {}", month);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if root.total_expenses == 0 {
        println!("   No expenses found.");
        return Ok(());
    }

    println!("   Total: {:.2} ({} expenses)", root.total_amount, root.total_expenses);
    println!();
    println!(
        "   {:25} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────┼────────┼───────");

    fn print_node(node: &DetailsChartData, indent: usize) {
        let prefix = "  ".repeat(indent);
        let label = node.tag_id.as_deref().unwrap_or_default();
        let width = 25usize.saturating_sub(prefix.len());
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            format!("{}{}", prefix, truncate(label, width)),
            node.total_amount,
            node.percentage * 100.0,
            node.total_expenses
        );
        for child in &node.inner_tags {
            print_node(child, indent + 1);
        }
    }

    for node in &root.inner_tags {
        print_node(node, 0);
    }

    Ok(())
}

pub fn comparison_report(file: &Path, from: &str, to: &str) -> Result<ComparisonChartData> {
    let expenses = read_expenses(file)?;
    let data = build_comparison_data(&expenses, parse_day(from, false)?, parse_day(to, true)?)?;
    Ok(data)
}

pub fn cmd_report_compare(file: &Path, from: &str, to: &str, json: bool) -> Result<()> {
    let data = comparison_report(file, from, to)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!();
    println!("📈 Month Comparison");
    println!("   Period: {} to {}", from, to);
    println!("   ─────────────────────────────────────────────────────────────");

    if data.months.is_empty() {
        println!("   No expenses found in this period.");
        return Ok(());
    }

    for month in &data.months {
        println!(
            "   {} │ {:>10.2} │ {:>5} expenses",
            month.month, month.total_amount, month.expenses_count
        );
        for tag in &month.tags {
            println!(
                "     {:20} │ {:>10.2} │ {:>5}",
                truncate(&tag.tag_id, 20),
                tag.amount,
                tag.expense_count
            );
        }
    }

    Ok(())
}

pub fn cmd_report_months(selected: Option<&str>, available: &[String], json: bool) -> Result<()> {
    let selected = selected.map(parse_month).transpose()?;
    let available = available
        .iter()
        .map(|m| parse_month(m))
        .collect::<Result<Vec<_>>>()?;

    let adjacent = previous_and_next(selected, &available);

    if json {
        println!("{}", serde_json::to_string_pretty(&adjacent)?);
        return Ok(());
    }

    let show = |m: Option<Month>| m.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
    println!("   Previous: {}", show(adjacent.previous));
    println!("   Next:     {}", show(adjacent.next));
    Ok(())
}
