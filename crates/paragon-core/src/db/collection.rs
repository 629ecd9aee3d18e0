//! Tag collection and habit branch storage

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::habits::{HabitBranch, ProductHabit};
use crate::models::TagCollection;
use crate::storage::TagStorage;

impl TagStorage for Database {
    fn load_tag_collection(&self) -> Result<Option<TagCollection>> {
        let conn = self.conn()?;
        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM tag_collection WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_tag_collection(&self, collection: &TagCollection) -> Result<()> {
        let conn = self.conn()?;
        let document = serde_json::to_string(collection)?;
        conn.execute(
            r#"
            INSERT INTO tag_collection (id, document) VALUES (1, ?)
            ON CONFLICT(id) DO UPDATE SET
                document = excluded.document,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![document],
        )?;
        Ok(())
    }

    fn habit_branch_keys(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT branch_key FROM habit_branches ORDER BY id")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn load_habit_branch(&self, key: &str) -> Result<Option<HabitBranch>> {
        let conn = self.conn()?;
        let products: Option<String> = conn
            .query_row(
                "SELECT products FROM habit_branches WHERE branch_key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match products {
            Some(json) => {
                let products: Vec<ProductHabit> = serde_json::from_str(&json)?;
                Ok(Some(HabitBranch {
                    key: key.to_string(),
                    products,
                }))
            }
            None => Ok(None),
        }
    }

    fn save_habit_branches(&self, branches: &[HabitBranch]) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        for branch in branches {
            let products = serde_json::to_string(&branch.products)?;
            // Upsert keeps the row id, so insertion order survives updates
            tx.execute(
                r#"
                INSERT INTO habit_branches (branch_key, products) VALUES (?, ?)
                ON CONFLICT(branch_key) DO UPDATE SET
                    products = excluded.products,
                    updated_at = CURRENT_TIMESTAMP
                "#,
                params![branch.key, products],
            )?;
        }

        tx.commit()?;
        debug!("Saved {} habit branches", branches.len());
        Ok(())
    }
}
