//! User Storage
//! Mission: Store and look up accounts in the `users` table

use crate::auth::models::{Account, NewAccount};
use crate::db::Database;
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

const ACCOUNT_COLUMNS: &str = "id, username, password, full_name, profile_picture_url";

/// Account storage over the shared database
#[derive(Clone)]
pub struct UserStore {
    db: Database,
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        username: row.get(1)?,
        password_digest: row.get(2)?,
        full_name: row.get(3)?,
        profile_picture_url: row.get(4)?,
    })
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get account by username (exact, case-sensitive match)
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<Account>> {
        let sql = format!("SELECT {} FROM users WHERE username = ?1", ACCOUNT_COLUMNS);
        self.db
            .call(|conn| {
                conn.query_row(&sql, params![username], account_from_row)
                    .optional()
            })
            .await
            .context("Failed to look up user by username")
    }

    /// Get account by id
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<Account>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", ACCOUNT_COLUMNS);
        self.db
            .call(|conn| conn.query_row(&sql, params![id], account_from_row).optional())
            .await
            .context("Failed to look up user by id")
    }

    /// Insert a new account; fails if the username is taken
    pub async fn create_user(&self, account: &NewAccount) -> Result<i64> {
        let id = self
            .db
            .call(|conn| {
                conn.execute(
                    "INSERT INTO users (username, password, full_name, profile_picture_url)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        account.username,
                        account.password_digest,
                        account.full_name,
                        account.profile_picture_url,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .context("Failed to insert user")?;

        info!("✅ Created user: {} ({})", account.username, id);
        Ok(id)
    }
}
