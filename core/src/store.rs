//! Record store collaborator.
//!
//! # Design
//! `TodoService` only talks to persistence through `TodoStore`, so any
//! durable backend can be plugged in behind an `Arc<dyn TodoStore>`. Each
//! method is a single-record operation and must be atomic on its own; no
//! multi-record transactions are required.
//!
//! `MemoryStore` is the bundled implementation: a `BTreeMap` behind a tokio
//! `RwLock`, listing in ascending id order.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::TodoError;
use crate::filter::TodoFilter;
use crate::types::{NewTodo, Todo, TodoId};

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;

    async fn list(&self, filter: &TodoFilter) -> Result<Vec<Todo>, TodoError>;

    /// Overwrite an existing record. Returns `None` if the id no longer exists.
    async fn save(&self, todo: Todo) -> Result<Option<Todo>, TodoError>;

    /// Delete a record, returning its last state if it existed.
    async fn remove(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<TodoId, Todo>,
    last_id: TodoId,
}

/// In-process `TodoStore`. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| TodoError::Store("id space exhausted".to_string()))?;
        table.last_id = id;
        let todo = todo.into_todo(id);
        table.rows.insert(id, todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self, filter: &TodoFilter) -> Result<Vec<Todo>, TodoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect())
    }

    async fn save(&self, todo: Todo) -> Result<Option<Todo>, TodoError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&todo.id) {
            Some(row) => {
                *row = todo.clone();
                Ok(Some(todo))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        Ok(self.table.write().await.rows.remove(&id))
    }
}
