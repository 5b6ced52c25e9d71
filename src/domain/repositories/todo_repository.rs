//! Repository trait for todos.

use crate::domain::entities::{NewTodo, Todo, UpstreamTodo};
use crate::domain::sync::SyncTarget;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for todos.
///
/// Every operation is scoped by owner: a todo belonging to another user is
/// never returned, updated or deleted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTodoRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_todo.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Counts the todos owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, user_id: i64) -> Result<i64, AppError>;

    /// Lists one page of todos owned by `user_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, user_id: i64, offset: i64, limit: i64) -> Result<Vec<Todo>, AppError>;

    /// Returns the titles of every todo owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn titles(&self, user_id: i64) -> Result<Vec<String>, AppError>;

    /// Finds a todo by id within the owner's scope.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Todo>, AppError>;

    /// Inserts one todo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError>;

    /// Inserts a batch of todos in one statement and returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_many(&self, todos: Vec<NewTodo>) -> Result<u64, AppError>;

    /// Persists `title` and `completed` of an existing todo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no todo matches id and owner.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, todo: &Todo) -> Result<Todo, AppError>;

    /// Deletes a todo. Returns `false` when no todo matched id and owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl<R: TodoRepository> SyncTarget<UpstreamTodo> for R {
    async fn existing_titles(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        self.titles(user_id).await
    }

    async fn insert_many(&self, todos: Vec<NewTodo>) -> Result<u64, AppError> {
        self.create_many(todos).await
    }
}
