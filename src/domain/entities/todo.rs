//! Todo entity, owned by a user.

use serde::{Deserialize, Serialize};

use crate::domain::sync::Syncable;

/// A todo stored locally.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

/// Input data for inserting a todo. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

/// Validated todo content from a create or update request.
#[derive(Debug, Clone)]
pub struct TodoInput {
    pub title: String,
    pub completed: bool,
}

/// A todo as the upstream API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Syncable for UpstreamTodo {
    type Local = NewTodo;
    const RESOURCE: &'static str = "todo";

    fn title(&self) -> &str {
        &self.title
    }

    fn into_local(self, scope_id: i64) -> NewTodo {
        NewTodo {
            user_id: scope_id,
            title: self.title,
            completed: self.completed,
        }
    }
}
