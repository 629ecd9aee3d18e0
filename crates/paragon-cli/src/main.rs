//! Paragon CLI - Expense tagging and spending reports
//!
//! Usage:
//!   paragon init                                 Initialize database
//!   paragon expenses apply --file expenses.json  Update tag usage and habits
//!   paragon tags suggest "Mleko 2%"              Suggest tags for a product
//!   paragon report details --file expenses.json  Category breakdown

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Status => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_status(&db)
        }
        Commands::Tags { action } => {
            let db = commands::open_db(&cli.db)?;
            let mut store = commands::open_store(&db, &config)?;
            match action {
                None | Some(TagsAction::List) => commands::cmd_tags_list(&store),
                Some(TagsAction::Add {
                    name,
                    color,
                    parent,
                }) => commands::cmd_tags_add(&mut store, &name, &color, &parent),
                Some(TagsAction::Delete { chain }) => commands::cmd_tags_delete(&mut store, &chain),
                Some(TagsAction::Edit {
                    tag_id,
                    name,
                    color,
                }) => commands::cmd_tags_edit(
                    &mut store,
                    &tag_id,
                    name.as_deref(),
                    color.as_deref(),
                ),
                Some(TagsAction::Suggest { product_name }) => {
                    commands::cmd_tags_suggest(&store, &product_name)
                }
            }
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&cli.db)?;
            let mut store = commands::open_store(&db, &config)?;
            let names = commands::open_names(&db, &config);
            match action {
                ExpensesAction::Apply { file, previous } => commands::cmd_expenses_apply(
                    &mut store,
                    &names,
                    &file,
                    previous.as_deref(),
                ),
                ExpensesAction::Remove { file } => {
                    commands::cmd_expenses_remove(&mut store, &names, &file)
                }
            }
        }
        Commands::Names { action } => {
            let db = commands::open_db(&cli.db)?;
            let names = commands::open_names(&db, &config);
            match action {
                NamesAction::Suggest { prefix } => commands::cmd_names_suggest(&names, &prefix),
            }
        }
        Commands::Report { report_type } => match report_type {
            ReportType::Details { file, month, json } => {
                commands::cmd_report_details(&file, month.as_deref(), json)
            }
            ReportType::Compare {
                file,
                from,
                to,
                json,
            } => commands::cmd_report_compare(&file, &from, &to, json),
            ReportType::Months {
                selected,
                available,
                json,
            } => commands::cmd_report_months(selected.as_deref(), &available, json),
        },
    }
}
