//! The home screen: the todo list, the add-item panel, and the delete-all gate.
//!
//! `HomeReducer` combines the todo and panel reducers, each scoped to its
//! slice of [`HomeState`], and handles the screen's own actions on top.
//! Confirming the panel adds its text to the todo list in the same reduction;
//! the panel's `Submitted` event that follows is only a notification.

use crate::config::{Palette, UiConfig};
use crate::panel::{PanelAction, PanelEnvironment, PanelReducer, PanelState};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use crate::view::{ButtonProps, ButtonVariant, ConfirmDialog, HomeView, PanelView, TodoRow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tasklist_core::{
    composition::{BoxedReducer, CombinedReducer, combine_reducers, scope_reducer},
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    SmallVec,
};
use tasklist_macros::Action;

/// State of the home screen
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeState {
    /// The todo list
    pub todos: TodoState,
    /// The add-item panel
    pub panel: PanelState,
    /// Open delete-all confirmation, if any
    pub confirmation: Option<ConfirmDialog>,
}

impl HomeState {
    /// A screen with an empty list and a closed panel
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the display model for the current state
    #[must_use]
    pub fn render(&self, palette: &Palette) -> HomeView {
        let rows: Vec<TodoRow> = self
            .todos
            .items
            .iter()
            .map(|item| TodoRow::new(item, palette))
            .collect();

        HomeView {
            title: "Welcome to TodoList!".to_string(),
            add: ButtonProps::new("Add Todo", ButtonVariant::Primary, false, palette),
            delete_all: ButtonProps::new(
                "Delete All",
                ButtonVariant::Danger,
                !self.todos.can_delete_all(),
                palette,
            ),
            list_title: format!("Todos ({})", self.todos.count()),
            empty_text: rows
                .is_empty()
                .then(|| "No todos yet. Add one above!".to_string()),
            rows,
            panel: PanelView::new(&self.panel, palette),
            dialog: self.confirmation.clone(),
        }
    }
}

/// Actions for the home screen
#[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HomeAction {
    /// Action for the todo list
    Todo(TodoAction),

    /// Action for the add-item panel
    Panel(PanelAction),

    /// Command: Show the add-item panel
    #[command]
    OpenPanel,

    /// Command: Ask for confirmation before clearing the list
    #[command]
    RequestDeleteAll,

    /// Command: The user confirmed clearing the list
    #[command]
    ConfirmDeleteAll,

    /// Command: The user backed out of clearing the list
    #[command]
    DismissDeleteAll,
}

/// Environment dependencies for the home screen
#[derive(Clone, Debug)]
pub struct HomeEnvironment {
    /// Todo list dependencies
    pub todo: TodoEnvironment,
    /// Panel dependencies
    pub panel: PanelEnvironment,
}

impl HomeEnvironment {
    /// Build both child environments from shared dependencies
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>, config: &UiConfig) -> Self {
        Self {
            todo: TodoEnvironment::new(Arc::clone(&clock), ids),
            panel: PanelEnvironment::new(clock, config.animation.clone()),
        }
    }
}

fn todo_state(state: &mut HomeState) -> &mut TodoState {
    &mut state.todos
}

fn todo_action(action: HomeAction) -> Option<TodoAction> {
    match action {
        HomeAction::Todo(action) => Some(action),
        _ => None,
    }
}

fn todo_env(env: &HomeEnvironment) -> &TodoEnvironment {
    &env.todo
}

fn panel_state(state: &mut HomeState) -> &mut PanelState {
    &mut state.panel
}

fn panel_action(action: HomeAction) -> Option<PanelAction> {
    match action {
        HomeAction::Panel(action) => Some(action),
        _ => None,
    }
}

fn panel_env(env: &HomeEnvironment) -> &PanelEnvironment {
    &env.panel
}

/// Reducer for the home screen
#[derive(Clone, Debug)]
pub struct HomeReducer {
    features: Arc<CombinedReducer<HomeState, HomeAction, HomeEnvironment>>,
}

impl HomeReducer {
    /// Creates a new `HomeReducer`
    #[must_use]
    pub fn new() -> Self {
        let features: Vec<BoxedReducer<HomeState, HomeAction, HomeEnvironment>> = vec![
            Box::new(scope_reducer(
                TodoReducer::new(),
                todo_state,
                todo_action,
                HomeAction::Todo,
                todo_env,
            )),
            Box::new(scope_reducer(
                PanelReducer::new(),
                panel_state,
                panel_action,
                HomeAction::Panel,
                panel_env,
            )),
        ];

        Self {
            features: Arc::new(combine_reducers(features)),
        }
    }
}

impl Default for HomeReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for HomeReducer {
    type State = HomeState;
    type Action = HomeAction;
    type Environment = HomeEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            HomeAction::Panel(PanelAction::Confirm) => {
                let text = state
                    .panel
                    .confirm_enabled()
                    .then(|| state.panel.trimmed_text().to_string());

                let mut effects = self
                    .features
                    .reduce(state, HomeAction::Panel(PanelAction::Confirm), env);
                if let Some(text) = text {
                    tracing::debug!("Adding confirmed panel text to the todo list");
                    effects.extend(self.features.reduce(
                        state,
                        HomeAction::Todo(TodoAction::AddItem { text }),
                        env,
                    ));
                }
                effects
            },

            action @ (HomeAction::Todo(_) | HomeAction::Panel(_)) => {
                self.features.reduce(state, action, env)
            },

            HomeAction::OpenPanel => self.features.reduce(
                state,
                HomeAction::Panel(PanelAction::SetVisible { visible: true }),
                env,
            ),

            HomeAction::RequestDeleteAll => {
                if !state.todos.can_delete_all() {
                    tracing::trace!("Ignoring delete-all request on an empty list");
                    return SmallVec::new();
                }
                state.confirmation = Some(ConfirmDialog::delete_all());
                SmallVec::new()
            },

            HomeAction::ConfirmDeleteAll => {
                if state.confirmation.take().is_none() {
                    tracing::trace!("Ignoring delete-all confirmation without a prompt");
                    return SmallVec::new();
                }
                self.features
                    .reduce(state, HomeAction::Todo(TodoAction::DeleteAll), env)
            },

            HomeAction::DismissDeleteAll => {
                state.confirmation = None;
                SmallVec::new()
            },
        }
    }
}
