//! Todos of the requesting user.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{Page, UPSTREAM_MAX_TODO_ID, offset};
use crate::domain::entities::{Todo, TodoInput, UpstreamTodo};
use crate::domain::repositories::TodoRepository;
use crate::domain::sync::{SYNC_PAGE_LIMIT, SyncReconciler, SyncReport, Syncable};
use crate::error::AppError;
use crate::infrastructure::upstream::{UpstreamClient, decode};

#[derive(Debug, Deserialize)]
struct TodoEcho {
    title: Option<String>,
    completed: Option<bool>,
}

/// Service for todos owned by a user.
pub struct TodoService<R: TodoRepository> {
    repository: Arc<R>,
    upstream: Arc<dyn UpstreamClient>,
    reconciler: Arc<SyncReconciler>,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(
        repository: Arc<R>,
        upstream: Arc<dyn UpstreamClient>,
        reconciler: Arc<SyncReconciler>,
    ) -> Self {
        Self {
            repository,
            upstream,
            reconciler,
        }
    }

    /// Lists one page of the user's todos.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self, user_id: i64, page: i64, size: i64) -> Result<Page<Todo>, AppError> {
        info!(user_id, page, size, "Listing todos");

        let total = self.repository.count(user_id).await?;
        let items = self
            .repository
            .list(user_id, offset(page, size), size)
            .await?;

        Ok(Page {
            items,
            page,
            size,
            total,
        })
    }

    /// Pulls the user's todos from the upstream into the local store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the fetch fails.
    pub async fn fetch_sync(&self, user_id: i64) -> Result<SyncReport, AppError> {
        info!(user_id, "Synchronizing todos");

        let path = format!("users/{user_id}/todos?_limit={SYNC_PAGE_LIMIT}");
        self.reconciler
            .reconcile::<UpstreamTodo>(user_id, &path, self.repository.as_ref())
            .await
    }

    /// Finds one of the user's todos.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no todo with this id.
    pub async fn find(&self, user_id: i64, todo_id: i64) -> Result<Todo, AppError> {
        self.repository
            .find(user_id, todo_id)
            .await?
            .ok_or_else(|| AppError::not_found("Todo not found", json!({ "todo_id": todo_id })))
    }

    /// Creates a todo upstream and stores the echoed record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the upstream rejects the todo.
    pub async fn create(&self, user_id: i64, input: TodoInput) -> Result<Todo, AppError> {
        info!(user_id, "Creating todo");

        let echo = self
            .upstream
            .post(
                "todos",
                json!({
                    "title": input.title,
                    "completed": input.completed,
                    "userId": user_id,
                }),
            )
            .await?;
        let echoed: UpstreamTodo = decode(echo)?;

        self.repository.create(echoed.into_local(user_id)).await
    }

    /// Replaces title and completion of one of the user's todos.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no todo with this id.
    /// Returns [`AppError::Upstream`] if the upstream rejects the update.
    pub async fn update(&self, user_id: i64, todo_id: i64, input: TodoInput) -> Result<Todo, AppError> {
        info!(user_id, todo_id, "Updating todo");

        let mut todo = self.find(user_id, todo_id).await?;

        let echo = self
            .upstream
            .put(
                &format!("todos/{}", todo_id.min(UPSTREAM_MAX_TODO_ID)),
                json!({ "title": input.title, "completed": input.completed }),
            )
            .await?;
        let echoed: TodoEcho = decode(echo)?;

        todo.title = echoed.title.unwrap_or(input.title);
        todo.completed = echoed.completed.unwrap_or(input.completed);

        self.repository.update(&todo).await
    }

    /// Deletes one of the user's todos upstream and locally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user owns no todo with this id.
    /// Returns [`AppError::Upstream`] if the upstream rejects the delete.
    pub async fn remove(&self, user_id: i64, todo_id: i64) -> Result<String, AppError> {
        info!(user_id, todo_id, "Deleting todo");

        self.find(user_id, todo_id).await?;
        self.upstream.delete(&format!("todos/{todo_id}")).await?;

        if !self.repository.delete(user_id, todo_id).await? {
            return Err(AppError::not_found(
                "Todo not found",
                json!({ "todo_id": todo_id }),
            ));
        }

        Ok("Success delete todo".to_string())
    }
}
