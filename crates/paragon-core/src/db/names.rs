//! Name suggestion counters

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::Result;
use crate::models::NameCount;
use crate::storage::NameSuggestionStorage;

impl NameSuggestionStorage for Database {
    fn name_suggestion_count(&self, name: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: Option<i64> = conn
            .query_row(
                "SELECT count FROM name_suggestions WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0))
    }

    fn adjust_name_suggestion_count(&self, name: &str, delta: i64) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let current: Option<i64> = tx
            .query_row(
                "SELECT count FROM name_suggestions WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        let count = current.unwrap_or(0) + delta;
        match (current, count > 0) {
            (Some(_), true) => {
                tx.execute(
                    "UPDATE name_suggestions SET count = ? WHERE name = ?",
                    params![count, name],
                )?;
            }
            (Some(_), false) => {
                tx.execute("DELETE FROM name_suggestions WHERE name = ?", params![name])?;
            }
            (None, true) => {
                tx.execute(
                    "INSERT INTO name_suggestions (name, count) VALUES (?, ?)",
                    params![name, count],
                )?;
            }
            (None, false) => {}
        }

        tx.commit()?;
        Ok(())
    }

    fn query_name_suggestions(&self, prefix: &str, limit: usize) -> Result<Vec<NameCount>> {
        let conn = self.conn()?;
        // substr keeps the prefix match case-sensitive, unlike LIKE
        let mut stmt = conn.prepare(
            r#"
            SELECT name, count FROM name_suggestions
            WHERE substr(name, 1, length(?1)) = ?1
            ORDER BY count DESC, name ASC
            LIMIT ?2
            "#,
        )?;

        let rows = stmt.query_map(params![prefix, limit as i64], |row| {
            Ok(NameCount {
                name: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
