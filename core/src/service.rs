//! The todo service: validation and filtering in front of a `TodoStore`.
//!
//! # Design
//! `TodoService` is cheap to clone and holds only the injected store. It never
//! touches HTTP types; the server crate maps `TodoError` variants onto status
//! codes. Server-managed timestamps are stamped here, not by the store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TodoError;
use crate::filter::TodoFilter;
use crate::payload::{self, Payload};
use crate::store::{MemoryStore, TodoStore};
use crate::timestamp;
use crate::types::{Todo, TodoId};

/// Body of the health check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
}

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// A service backed by a fresh `MemoryStore`.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn health(&self) -> Health {
        Health {
            status: "ok".to_string(),
        }
    }

    /// List todos, optionally restricted to deadlines within `window` days
    /// and to a completion state.
    pub async fn list(
        &self,
        window: Option<&str>,
        completed: Option<&str>,
    ) -> Result<Vec<Todo>, TodoError> {
        let filter = TodoFilter::from_query(window, completed, timestamp::now());
        tracing::debug!(?filter, "listing todos");
        self.store.list(&filter).await
    }

    pub async fn get(&self, id: TodoId) -> Result<Todo, TodoError> {
        tracing::debug!(id, "fetching todo");
        self.store.get(id).await?.ok_or(TodoError::NotFound)
    }

    pub async fn create(&self, payload: &Payload) -> Result<Todo, TodoError> {
        let new = payload::new_todo(payload, timestamp::now()).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected create payload");
        })?;
        let todo = self.store.insert(new).await?;
        tracing::info!(id = todo.id, title = %todo.title, "created todo");
        Ok(todo)
    }

    /// Merge the whitelisted fields of `payload` into an existing todo.
    pub async fn update(&self, id: TodoId, payload: &Payload) -> Result<Todo, TodoError> {
        let mut todo = self.get(id).await?;
        let changes = payload::todo_changes(payload).inspect_err(|e| {
            tracing::warn!(id, error = %e, "rejected update payload");
        })?;
        changes.apply(&mut todo, timestamp::now());
        // the record may have been deleted since it was read
        let todo = self.store.save(todo).await?.ok_or(TodoError::NotFound)?;
        tracing::info!(id, "updated todo");
        Ok(todo)
    }

    /// Delete a todo. Deleting an unknown id is not an error and yields `None`.
    pub async fn delete(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        let removed = self.store.remove(id).await?;
        match &removed {
            Some(_) => tracing::info!(id, "deleted todo"),
            None => tracing::debug!(id, "delete of unknown todo ignored"),
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use serde_json::{json, Value};

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn date(days_from_now: i64) -> String {
        (timestamp::now() + TimeDelta::days(days_from_now))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    #[test]
    fn health_is_ok() {
        assert_eq!(TodoService::in_memory().health().status, "ok");
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_todo() {
        let service = TodoService::in_memory();
        let created = service
            .create(&payload(json!({
                "title": "Watch lecture",
                "description": "Week 1",
                "deadline_at": "2023-02-27T00:00:00"
            })))
            .await
            .unwrap();
        assert_eq!(service.get(created.id).await.unwrap(), created);
        assert_eq!(
            created.deadline_at,
            NaiveDate::from_ymd_opt(2023, 2, 27).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let service = TodoService::in_memory();
        assert_eq!(service.get(42).await.unwrap_err(), TodoError::NotFound);
    }

    #[tokio::test]
    async fn create_missing_title_is_rejected() {
        let service = TodoService::in_memory();
        let err = service
            .create(&payload(json!({"completed": true})))
            .await
            .unwrap_err();
        assert_eq!(err, TodoError::validation("Missing required fields: title"));
        assert!(service.list(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_is_a_merge() {
        let service = TodoService::in_memory();
        let created = service
            .create(&payload(json!({"title": "Buy milk", "description": "2L"})))
            .await
            .unwrap();

        let updated = service
            .update(created.id, &payload(json!({"completed": true})))
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.description.as_deref(), Some("2L"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(service.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_unknown_is_not_found_before_validation() {
        let service = TodoService::in_memory();
        let err = service
            .update(7, &payload(json!({"bogus": 1})))
            .await
            .unwrap_err();
        assert_eq!(err, TodoError::NotFound);
    }

    #[tokio::test]
    async fn rejected_update_leaves_record_untouched() {
        let service = TodoService::in_memory();
        let created = service
            .create(&payload(json!({"title": "Keep"})))
            .await
            .unwrap();
        let err = service
            .update(created.id, &payload(json!({"title": "Changed", "color": "red"})))
            .await
            .unwrap_err();
        assert_eq!(err, TodoError::validation("Unexpected fields: color"));
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let service = TodoService::in_memory();
        let created = service
            .create(&payload(json!({"title": "Gone soon"})))
            .await
            .unwrap();
        assert_eq!(service.delete(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(service.delete(created.id).await.unwrap(), None);
        assert_eq!(service.get(created.id).await.unwrap_err(), TodoError::NotFound);
    }

    #[tokio::test]
    async fn list_filters_by_window_and_completion() {
        let service = TodoService::in_memory();
        for body in [
            json!({"title": "soon", "deadline_at": date(1)}),
            json!({"title": "soon done", "deadline_at": date(2), "completed": true}),
            json!({"title": "later", "deadline_at": date(30)}),
            json!({"title": "whenever"}),
        ] {
            service.create(&payload(body)).await.unwrap();
        }

        let titles = |todos: Vec<Todo>| -> Vec<String> {
            todos.into_iter().map(|t| t.title).collect()
        };

        assert_eq!(service.list(None, None).await.unwrap().len(), 4);
        assert_eq!(
            titles(service.list(Some("7"), None).await.unwrap()),
            vec!["soon", "soon done"]
        );
        assert_eq!(
            titles(service.list(Some("7"), Some("true")).await.unwrap()),
            vec!["soon done"]
        );
        assert_eq!(
            titles(service.list(None, Some("false")).await.unwrap()),
            vec!["soon", "later", "whenever"]
        );
        assert!(service.list(Some("-365"), None).await.unwrap().is_empty());
    }
}
