//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the wire schema but are defined independently of the
//! mock-server crate; the integration tests catch any drift between the
//! two. `title` is set at creation and never edited in place, so the update
//! payload carries only `completed`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo. The server assigns the id and
/// starts the item with `completed = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for updating an existing todo. `completed` is the only
/// field a client may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub completed: bool,
}
