//! PostgreSQL implementation of todo repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{NewTodo, Todo};
use crate::domain::repositories::TodoRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    user_id: i64,
    title: String,
    completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            completed: row.completed,
        }
    }
}

/// PostgreSQL repository for todos.
///
/// Every statement filters on `user_id`.
pub struct PgTodoRepository {
    pool: Arc<PgPool>,
}

impl PgTodoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn count(&self, user_id: i64) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list(&self, user_id: i64, offset: i64, limit: i64) -> Result<Vec<Todo>, AppError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, user_id, title, completed
            FROM todos
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn titles(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        let titles = sqlx::query_scalar::<_, String>("SELECT title FROM todos WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(titles)
    }

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, user_id, title, completed
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (user_id, title, completed)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, completed
            "#,
        )
        .bind(new_todo.user_id)
        .bind(&new_todo.title)
        .bind(new_todo.completed)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn create_many(&self, todos: Vec<NewTodo>) -> Result<u64, AppError> {
        if todos.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO todos (user_id, title, completed) ");
        builder.push_values(todos, |mut row, todo| {
            row.push_bind(todo.user_id)
                .push_bind(todo.title)
                .push_bind(todo.completed);
        });

        let result = builder.build().execute(self.pool.as_ref()).await?;
        Ok(result.rows_affected())
    }

    async fn update(&self, todo: &Todo) -> Result<Todo, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET title = $3, completed = $4
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, completed
            "#,
        )
        .bind(todo.id)
        .bind(todo.user_id)
        .bind(&todo.title)
        .bind(todo.completed)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Todo::from)
            .ok_or_else(|| AppError::not_found("Todo not found", json!({ "todo_id": todo.id })))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
