//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of items that can be added, toggled
//! between complete and incomplete, deleted one at a time, or cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklist_macros::Action;
use uuid::Uuid;

/// Unique identifier for a todo item
///
/// Opaque to callers; assigned once at creation and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Trimmed, non-empty description
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new, incomplete todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }
}

/// State of the todo list
///
/// Items are kept in insertion order; new items are always appended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos, oldest first
    pub items: Vec<TodoItem>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true when there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Whether the bulk-delete affordance applies (false when empty)
    #[must_use]
    pub fn can_delete_all(&self) -> bool {
        !self.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == *id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Position of a todo in the list
    #[must_use]
    pub fn position(&self, id: &TodoId) -> Option<usize> {
        self.items.iter().position(|t| t.id == *id)
    }

    /// Item texts in list order
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Actions representing commands and events for the todo list
///
/// Commands express what the user asked for. The reducer turns a valid
/// command into exactly one event and applies it; an invalid command (blank
/// text, unknown id) produces nothing.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Add a todo with the given raw text
    #[command]
    AddItem {
        /// Untrimmed input
        text: String,
    },

    /// Command: Flip a todo between complete and incomplete
    #[command]
    ToggleCompleted {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Delete one todo
    #[command]
    DeleteOne {
        /// Todo to delete
        id: TodoId,
    },

    /// Command: Delete every todo
    ///
    /// Irreversible; callers gate it behind a confirmation.
    #[command]
    DeleteAll,

    // ========== Events ==========
    /// Event: Todo was added
    #[event]
    ItemAdded {
        /// Todo identifier
        id: TodoId,
        /// Trimmed text
        text: String,
        /// When the todo was created
        created_at: DateTime<Utc>,
    },

    /// Event: Todo completion changed
    #[event]
    CompletionToggled {
        /// Todo identifier
        id: TodoId,
        /// Completion flag after the toggle
        completed: bool,
    },

    /// Event: Todo was deleted
    #[event]
    ItemDeleted {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: All todos were deleted
    #[event]
    AllDeleted {
        /// How many todos were removed
        removed: usize,
    },
}
