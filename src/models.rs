use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String, // bcrypt hash - never serialize
    pub created_at: String,
}

/// Incoming user payload for create and update
#[derive(Debug, Clone, Deserialize)]
pub struct UserSchema {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User response (sanitized)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl UserPublic {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserPublic>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn default_offset() -> i64 {
    0
}

fn default_limit() -> i64 {
    100
}

/// Offset/limit paging for list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FilterPage {
    #[serde(default = "default_offset")]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for FilterPage {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            limit: default_limit(),
        }
    }
}

/// Todo lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    Draft,
    Todo,
    Doing,
    Done,
    Trash,
}

impl TodoState {
    pub fn as_str(&self) -> &str {
        match self {
            TodoState::Draft => "draft",
            TodoState::Todo => "todo",
            TodoState::Doing => "doing",
            TodoState::Done => "done",
            TodoState::Trash => "trash",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(TodoState::Draft),
            "todo" => Some(TodoState::Todo),
            "doing" => Some(TodoState::Doing),
            "done" => Some(TodoState::Done),
            "trash" => Some(TodoState::Trash),
            _ => None,
        }
    }
}

/// A todo owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoSchema {
    pub title: String,
    pub description: String,
    pub state: TodoState,
}

/// Partial todo update; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPublic {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub created_at: String,
    pub updated_at: String,
}

impl TodoPublic {
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            state: todo.state,
            created_at: todo.created_at.clone(),
            updated_at: todo.updated_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<TodoPublic>,
}

/// Todo list filters. Title and description match by substring.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
    #[serde(default = "default_offset")]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for FilterTodo {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            state: None,
            offset: default_offset(),
            limit: default_limit(),
        }
    }
}
