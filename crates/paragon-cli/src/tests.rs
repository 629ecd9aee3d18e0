//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use paragon_core::{
    Database, Expense, MatchingConfig, NameSuggestionStorage, TagCollectionStore, TagStorage,
    NO_CATEGORY_TAG,
};
use tempfile::NamedTempFile;

use crate::commands::{self, truncate};

fn setup_store() -> (Database, TagCollectionStore<Database>) {
    let db = Database::in_memory().unwrap();
    let store = commands::open_store(&db, &MatchingConfig::default()).unwrap();
    (db, store)
}

fn write_expenses(expenses: &[Expense]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(expenses).unwrap().as_bytes())
        .unwrap();
    file
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// 2024-03-10 and 2024-04-02, UTC
const MARCH: i64 = 1_710_028_800;
const APRIL: i64 = 1_712_016_000;

// ========== Tags Command Tests ==========

#[test]
fn test_cmd_tags_list_empty() {
    let (_db, store) = setup_store();
    assert!(commands::cmd_tags_list(&store).is_ok());
}

#[test]
fn test_cmd_tags_add_root_and_child() {
    let (_db, mut store) = setup_store();
    commands::cmd_tags_add(&mut store, "Groceries", "#00ff00", &[]).unwrap();
    commands::cmd_tags_add(&mut store, "Dairy", "#ffffff", &ids(&["1"])).unwrap();

    let collection = store.collection();
    assert_eq!(collection.tags["1"].name, "groceries");
    assert_eq!(collection.tags["2"].name, "dairy");
    assert!(collection.find_chain(&paragon_core::ChainKey::new(&["1", "2"])).is_some());
    assert!(commands::cmd_tags_list(&store).is_ok());
}

#[test]
fn test_cmd_tags_add_invalid_parent() {
    let (_db, mut store) = setup_store();
    let result = commands::cmd_tags_add(&mut store, "Dairy", "#ffffff", &ids(&["7"]));
    assert!(result.is_err());
    assert!(store.collection().tags.is_empty());
}

#[test]
fn test_cmd_tags_add_reserved_name() {
    let (_db, mut store) = setup_store();
    let result = commands::cmd_tags_add(&mut store, NO_CATEGORY_TAG, "#000000", &[]);
    assert!(result.is_err());
}

#[test]
fn test_cmd_tags_edit() {
    let (_db, mut store) = setup_store();
    commands::cmd_tags_add(&mut store, "Groceries", "#00ff00", &[]).unwrap();

    commands::cmd_tags_edit(&mut store, "1", None, Some("#123456")).unwrap();
    assert_eq!(store.tag_colors()["1"], "#123456");
    assert_eq!(store.tag_names()["1"], "groceries");

    assert!(commands::cmd_tags_edit(&mut store, "1", None, None).is_err());
    assert!(commands::cmd_tags_edit(&mut store, "9", Some("x"), None).is_err());
}

#[test]
fn test_cmd_tags_delete_unused() {
    let (_db, mut store) = setup_store();
    commands::cmd_tags_add(&mut store, "Groceries", "#00ff00", &[]).unwrap();

    commands::cmd_tags_delete(&mut store, &ids(&["1"])).unwrap();
    assert!(store.collection().tags.is_empty());
    assert!(store.collection().chains.is_empty());
}

#[test]
fn test_cmd_tags_delete_in_use_fails() {
    let (_db, mut store) = setup_store();
    commands::cmd_tags_add(&mut store, "Groceries", "#00ff00", &[]).unwrap();
    let names = commands::open_names(store.storage(), &MatchingConfig::default());

    let file = write_expenses(&[Expense::new("Mleko", 3.5, &["1"], MARCH)]);
    commands::cmd_expenses_apply(&mut store, &names, file.path(), None).unwrap();

    assert!(commands::cmd_tags_delete(&mut store, &ids(&["1"])).is_err());
    assert!(store.collection().contains_tag("1"));
}

// ========== Expenses Command Tests ==========

#[test]
fn test_cmd_expenses_apply_learns_habits_and_names() {
    let (db, mut store) = setup_store();
    commands::cmd_tags_add(&mut store, "Groceries", "#00ff00", &[]).unwrap();
    commands::cmd_tags_add(&mut store, "Dairy", "#ffffff", &ids(&["1"])).unwrap();
    let names = commands::open_names(&db, &MatchingConfig::default());

    let file = write_expenses(&[
        Expense::new("Mleko 2%", 3.5, &["1", "2"], MARCH),
        Expense::new("Mleko 2%", 3.5, &["1", "2"], APRIL),
        Expense::new("Chleb", 4.0, &["1"], APRIL),
    ]);
    commands::cmd_expenses_apply(&mut store, &names, file.path(), None).unwrap();

    assert_eq!(store.collection().tag_usage_count("2"), 2);
    assert_eq!(store.collection().tag_usage_count("1"), 1);
    assert_eq!(store.tag_suggestions("mleko 2%").unwrap(), ids(&["1", "2"]));
    assert_eq!(db.name_suggestion_count("Mleko 2%").unwrap(), 2);
    assert!(commands::cmd_tags_suggest(&store, "Mleko 2%").is_ok());
    assert!(commands::cmd_names_suggest(&names, "Ml").is_ok());

    // A fresh store sees what was persisted
    let reopened = commands::open_store(&db, &MatchingConfig::default()).unwrap();
    assert_eq!(reopened.collection(), store.collection());
}

#[test]
fn test_cmd_expenses_apply_with_previous_moves_counts() {
    let (db, mut store) = setup_store();
    commands::cmd_tags_add(&mut store, "Groceries", "#00ff00", &[]).unwrap();
    commands::cmd_tags_add(&mut store, "Transport", "#0000ff", &[]).unwrap();
    let names = commands::open_names(&db, &MatchingConfig::default());

    let before = vec![Expense::new("Bilet", 4.4, &["1"], MARCH)];
    let after = vec![Expense::new("Bilet miesięczny", 4.4, &["2"], MARCH)];
    let before_file = write_expenses(&before);
    let after_file = write_expenses(&after);

    commands::cmd_expenses_apply(&mut store, &names, before_file.path(), None).unwrap();
    commands::cmd_expenses_apply(
        &mut store,
        &names,
        after_file.path(),
        Some(before_file.path()),
    )
    .unwrap();

    assert_eq!(store.collection().tag_usage_count("1"), 0);
    assert_eq!(store.collection().tag_usage_count("2"), 1);
    assert_eq!(db.name_suggestion_count("Bilet").unwrap(), 0);
    assert_eq!(db.name_suggestion_count("Bilet miesięczny").unwrap(), 1);
}

#[test]
fn test_cmd_expenses_remove() {
    let (db, mut store) = setup_store();
    commands::cmd_tags_add(&mut store, "Groceries", "#00ff00", &[]).unwrap();
    let names = commands::open_names(&db, &MatchingConfig::default());

    let file = write_expenses(&[Expense::new("Ser", 9.0, &["1"], MARCH)]);
    commands::cmd_expenses_apply(&mut store, &names, file.path(), None).unwrap();
    commands::cmd_expenses_remove(&mut store, &names, file.path()).unwrap();

    assert_eq!(store.collection().tag_usage_count("1"), 0);
    assert!(names.suggest("").unwrap().is_empty());
    // The tag can now be deleted
    assert!(commands::cmd_tags_delete(&mut store, &ids(&["1"])).is_ok());
}

#[test]
fn test_read_expenses_invalid_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"not json").unwrap();
    assert!(commands::read_expenses(file.path()).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_details_report_month_filter() {
    let file = write_expenses(&[
        Expense::new("Mleko", 10.0, &["1"], MARCH),
        Expense::new("Bilet", 5.0, &[], APRIL),
    ]);

    let all = commands::details_report(file.path(), None).unwrap();
    assert_eq!(all.total_amount, 15.0);
    assert_eq!(all.total_expenses, 2);

    let march = commands::details_report(file.path(), Some("2024-03")).unwrap();
    assert_eq!(march.total_amount, 10.0);
    assert_eq!(march.inner_tags.len(), 1);

    assert!(commands::cmd_report_details(file.path(), None, false).is_ok());
    assert!(commands::cmd_report_details(file.path(), Some("2024-03"), true).is_ok());
    assert!(commands::details_report(file.path(), Some("March")).is_err());
}

#[test]
fn test_comparison_report() {
    let file = write_expenses(&[
        Expense::new("Mleko", 10.0, &["1", "2"], MARCH),
        Expense::new("Bilet", 5.0, &[], APRIL),
    ]);

    let data = commands::comparison_report(file.path(), "2024-03-01", "2024-04-30").unwrap();
    let months: Vec<String> = data.months.iter().map(|m| m.month.to_string()).collect();
    assert_eq!(months, vec!["2024-04", "2024-03"]);
    assert_eq!(data.months[1].tags[0].tag_id, "1");

    // A single-day range still covers its whole month
    let data = commands::comparison_report(file.path(), "2024-04-02", "2024-04-02").unwrap();
    assert_eq!(data.months.len(), 1);

    assert!(commands::comparison_report(file.path(), "2024-04-30", "2024-03-01").is_err());
    assert!(commands::cmd_report_compare(file.path(), "2024-03-01", "2024-04-30", false).is_ok());
}

#[test]
fn test_parse_day() {
    assert_eq!(commands::parse_day("2020-01-01", false).unwrap(), 1_577_836_800);
    assert_eq!(commands::parse_day("2020-01-01", true).unwrap(), 1_577_923_199);
    assert!(commands::parse_day("01/01/2020", false).is_err());
}

#[test]
fn test_cmd_report_months() {
    let available = ids(&["2023-01", "2023-03"]);
    assert!(commands::cmd_report_months(Some("2023-03"), &available, false).is_ok());
    assert!(commands::cmd_report_months(None, &[], true).is_ok());
    assert!(commands::cmd_report_months(Some("2023-13"), &[], false).is_err());
}

// ========== Status Tests ==========

#[test]
fn test_cmd_status() {
    let db = Database::in_memory().unwrap();
    assert!(commands::cmd_status(&db).is_ok());
    assert!(db.load_tag_collection().unwrap().is_none());
}

#[test]
fn test_cmd_init_creates_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paragon.db");
    commands::cmd_init(&path).unwrap();

    let db = commands::open_db(&path).unwrap();
    assert!(db.load_tag_collection().unwrap().is_some());
}

#[test]
fn test_load_config_override() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[suggestions]\nlimit = 5\n").unwrap();
    let config = commands::load_config(Some(file.path())).unwrap();
    assert_eq!(config.name_suggestion_limit, 5);
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("this is a long string", 10), "this is...");
    assert_eq!(truncate("żółć żółć żółć", 7), "żółć...");
}
