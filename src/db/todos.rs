use super::{page_bounds, timestamp, Database};
use crate::models::{FilterTodo, Todo, TodoSchema, TodoState, TodoUpdate};
use anyhow::Result;
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension, Row};
use tracing::debug;

const TODO_COLUMNS: &str = "id, title, description, state, user_id, created_at, updated_at";

impl Database {
    pub fn create_todo(&self, user_id: i64, todo: &TodoSchema) -> Result<Todo> {
        let conn = self.conn.lock();
        let now = timestamp();

        conn.execute(
            "INSERT INTO todos (title, description, state, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                todo.title,
                todo.description,
                todo.state.as_str(),
                user_id,
                now
            ],
        )?;

        Ok(Todo {
            id: conn.last_insert_rowid(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            state: todo.state,
            user_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// A todo, only if `user_id` owns it.
    pub fn get_todo(&self, id: i64, user_id: i64) -> Result<Option<Todo>> {
        let conn = self.conn.lock();
        Self::fetch_todo(&conn, id, user_id)
    }

    fn fetch_todo(conn: &Connection, id: i64, user_id: i64) -> Result<Option<Todo>> {
        let todo = conn
            .query_row(
                &format!(
                    "SELECT {} FROM todos WHERE id = ?1 AND user_id = ?2",
                    TODO_COLUMNS
                ),
                params![id, user_id],
                Self::row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    pub fn list_todos(&self, user_id: i64, filter: &FilterTodo) -> Result<Vec<Todo>> {
        let mut sql = format!("SELECT {} FROM todos WHERE user_id = ?", TODO_COLUMNS);
        let mut args = vec![Value::Integer(user_id)];

        if let Some(title) = &filter.title {
            sql.push_str(" AND title LIKE ? ESCAPE '\\'");
            args.push(Value::Text(contains_pattern(title)));
        }
        if let Some(description) = &filter.description {
            sql.push_str(" AND description LIKE ? ESCAPE '\\'");
            args.push(Value::Text(contains_pattern(description)));
        }
        if let Some(state) = filter.state {
            sql.push_str(" AND state = ?");
            args.push(Value::Text(state.as_str().to_string()));
        }

        let (offset, limit) = page_bounds(filter.offset, filter.limit);
        sql.push_str(" ORDER BY id LIMIT ? OFFSET ?");
        args.push(Value::Integer(limit));
        args.push(Value::Integer(offset));

        debug!("Listing todos for user {}: {}", user_id, sql);

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let todos = stmt
            .query_map(params_from_iter(args.iter()), Self::row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    /// Apply the fields present in `patch`. `None` if the todo is not the user's.
    pub fn update_todo(&self, id: i64, user_id: i64, patch: &TodoUpdate) -> Result<Option<Todo>> {
        let conn = self.conn.lock();
        let Some(mut todo) = Self::fetch_todo(&conn, id, user_id)? else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = description.clone();
        }
        if let Some(state) = patch.state {
            todo.state = state;
        }
        todo.updated_at = timestamp();

        let rows = conn.execute(
            "UPDATE todos SET title = ?1, description = ?2, state = ?3, updated_at = ?4
             WHERE id = ?5 AND user_id = ?6",
            params![
                todo.title,
                todo.description,
                todo.state.as_str(),
                todo.updated_at,
                id,
                user_id
            ],
        )?;
        if rows == 0 {
            return Ok(None);
        }

        Ok(Some(todo))
    }

    /// Delete a todo the user owns. `false` if there was nothing to delete.
    pub fn delete_todo(&self, id: i64, user_id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let rows = conn.execute(
            "DELETE FROM todos WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }

    fn row_to_todo(row: &Row) -> rusqlite::Result<Todo> {
        let state: String = row.get(3)?;
        let state = TodoState::parse(&state).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("unknown todo state: {}", state).into(),
            )
        })?;

        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            state,
            user_id: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

/// `LIKE` pattern matching `needle` anywhere, with `%`, `_` and `\`
/// taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
