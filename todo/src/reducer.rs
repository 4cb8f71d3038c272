//! Reducer logic for the todo list.
//!
//! Commands are validated, turned into a single event, and the event is
//! applied to state. Invalid commands are dropped without touching state.

use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use tasklist_core::{
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    SmallVec,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of fresh item identifiers
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates an `AddItem` command, returning the text to store
    fn validate_add_item(text: &str) -> Option<&str> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Validates a `ToggleCompleted` command, returning the new flag
    fn validate_toggle(state: &TodoState, id: &TodoId) -> Option<bool> {
        state.get(id).map(|todo| !todo.completed)
    }

    /// Validates a `DeleteOne` command
    fn validate_delete_one(state: &TodoState, id: &TodoId) -> bool {
        state.exists(id)
    }

    /// Applies an event to state
    ///
    /// Replaying an `ItemAdded` for an id already present is ignored so ids
    /// stay unique.
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        match action {
            TodoAction::ItemAdded {
                id,
                text,
                created_at,
            } => {
                if !state.exists(id) {
                    state
                        .items
                        .push(TodoItem::new(*id, text.clone(), *created_at));
                }
            },
            TodoAction::CompletionToggled { id, completed } => {
                if let Some(todo) = state.items.iter_mut().find(|t| t.id == *id) {
                    todo.completed = *completed;
                }
            },
            TodoAction::ItemDeleted { id } => {
                state.items.retain(|t| t.id != *id);
            },
            TodoAction::AllDeleted { .. } => {
                state.items.clear();
            },
            // Commands are not applied to state
            TodoAction::AddItem { .. }
            | TodoAction::ToggleCompleted { .. }
            | TodoAction::DeleteOne { .. }
            | TodoAction::DeleteAll => {},
        }
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::AddItem { text } => {
                // Validate command
                let Some(text) = Self::validate_add_item(&text) else {
                    tracing::trace!("Ignoring blank todo text");
                    return SmallVec::new();
                };

                // Create event
                let event = TodoAction::ItemAdded {
                    id: TodoId::from_uuid(env.ids.next_id()),
                    text: text.to_string(),
                    created_at: env.clock.now(),
                };

                // Apply event to state
                Self::apply_event(state, &event);
                tracing::debug!(count = state.count(), "Todo added");

                SmallVec::new()
            },

            TodoAction::ToggleCompleted { id } => {
                let Some(completed) = Self::validate_toggle(state, &id) else {
                    tracing::trace!(%id, "Ignoring toggle of unknown todo");
                    return SmallVec::new();
                };

                let event = TodoAction::CompletionToggled { id, completed };
                Self::apply_event(state, &event);
                tracing::debug!(%id, completed, "Todo toggled");

                SmallVec::new()
            },

            TodoAction::DeleteOne { id } => {
                if !Self::validate_delete_one(state, &id) {
                    tracing::trace!(%id, "Ignoring delete of unknown todo");
                    return SmallVec::new();
                }

                let event = TodoAction::ItemDeleted { id };
                Self::apply_event(state, &event);
                tracing::debug!(%id, "Todo deleted");

                SmallVec::new()
            },

            TodoAction::DeleteAll => {
                let event = TodoAction::AllDeleted {
                    removed: state.count(),
                };
                Self::apply_event(state, &event);
                tracing::debug!("All todos deleted");

                SmallVec::new()
            },

            // ========== Events ==========
            // Events can be replayed to rebuild state
            event @ (TodoAction::ItemAdded { .. }
            | TodoAction::CompletionToggled { .. }
            | TodoAction::ItemDeleted { .. }
            | TodoAction::AllDeleted { .. }) => {
                Self::apply_event(state, &event);
                SmallVec::new()
            },
        }
    }
}
