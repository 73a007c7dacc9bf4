//! Domain types for the todo service.
//!
//! # Design
//! `Todo` is the persisted record and also the wire representation: every
//! field is serialized, absent options as `null`, timestamps as naive
//! ISO-8601 strings. `NewTodo` and `TodoChanges` are only ever produced by the
//! payload validators, so anything holding one has already passed validation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a todo.
pub type TodoId = i64;

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A validated todo that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewTodo {
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            deadline_at: self.deadline_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Whitelisted partial update of a todo.
///
/// `None` leaves the field untouched. For nullable fields `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub deadline_at: Option<Option<NaiveDateTime>>,
}

impl TodoChanges {
    /// Merge the changes into `todo` and stamp `updated_at`.
    pub fn apply(self, todo: &mut Todo, updated_at: NaiveDateTime) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(deadline_at) = self.deadline_at {
            todo.deadline_at = deadline_at;
        }
        todo.updated_at = updated_at;
    }
}
