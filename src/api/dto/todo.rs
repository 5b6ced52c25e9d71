//! DTOs for todo endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Todo, TodoInput};

/// `POST /api/todos` body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub title: Option<String>,

    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<CreateTodoRequest> for TodoInput {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            completed: req.completed.unwrap_or(false),
        }
    }
}

/// `PUT /api/todos/update/{todoId}` body. Both fields are required.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(required)]
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoInput {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            completed: req.completed.unwrap_or(false),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            user_id: todo.user_id,
            title: todo.title,
            completed: todo.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_completed_to_false() {
        let req: CreateTodoRequest = serde_json::from_str(r#"{"title": "buy milk"}"#).unwrap();
        assert!(req.validate().is_ok());

        let input = TodoInput::from(req);
        assert!(!input.completed);
    }

    #[test]
    fn test_update_requires_completed() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"title": "buy milk"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("completed"));
    }

    #[test]
    fn test_response_uses_camel_case() {
        let body = serde_json::to_value(TodoResponse::from(Todo {
            id: 1,
            user_id: 2,
            title: "t".to_string(),
            completed: true,
        }))
        .unwrap();
        assert_eq!(body["userId"], 2);
    }
}
