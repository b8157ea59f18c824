use super::{page_bounds, timestamp, Database, WriteError};
use crate::models::User;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

const USER_COLUMNS: &str = "id, username, email, password, created_at";

impl Database {
    /// Insert a user. `password_hash` must already be hashed.
    pub fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, WriteError> {
        let conn = self.conn.lock();
        let created_at = timestamp();

        conn.execute(
            "INSERT INTO users (username, email, password, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, email, password_hash, created_at],
        )?;

        let user = User {
            id: conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at,
        };

        info!("Created user: {} ({})", user.username, user.id);
        Ok(user)
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                params![id],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                params![email],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// First user holding either `username` or `email`, if any.
    pub fn find_user_conflict(&self, username: &str, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let user = conn
            .query_row(
                &format!(
                    "SELECT {} FROM users WHERE username = ?1 OR email = ?2 ORDER BY id LIMIT 1",
                    USER_COLUMNS
                ),
                params![username, email],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn list_users(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let (offset, limit) = page_bounds(offset, limit);
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT ?1 OFFSET ?2",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map(params![limit, offset], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Overwrite a user's fields. Returns `None` if the row is gone.
    pub fn update_user(
        &self,
        id: i64,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, WriteError> {
        let rows = {
            let conn = self.conn.lock();
            conn.execute(
                "UPDATE users SET username = ?1, email = ?2, password = ?3 WHERE id = ?4",
                params![username, email, password_hash, id],
            )?
        };

        if rows == 0 {
            return Ok(None);
        }

        info!("Updated user: {} ({})", username, id);
        Ok(self.get_user(id)?)
    }

    /// Delete a user and, through the foreign key, their todos.
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let rows = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;

        if rows > 0 {
            info!("Deleted user: {}", id);
        }
        Ok(rows > 0)
    }

    fn row_to_user(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}
