//! Display models for the todo screen.
//!
//! The screen's pressable buttons, text inputs, list rows, and confirmation
//! dialog are plain data built from state. Each carries the action its press
//! would dispatch, so a renderer only forwards the returned action to the
//! store.

use crate::config::Palette;
use crate::panel::{PanelAction, PanelPhase, PanelState};
use crate::screen::HomeAction;
use crate::types::{TodoAction, TodoId, TodoItem};
use serde::{Deserialize, Serialize};

/// Visual style of a button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Filled with the primary color
    #[default]
    Primary,
    /// Light fill, dark text
    Secondary,
    /// Destructive action
    Danger,
}

/// A labeled pressable action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonProps {
    /// Text on the button
    pub label: String,
    /// Visual style
    pub variant: ButtonVariant,
    /// Presses are ignored when set
    pub disabled: bool,
    /// Fill color
    pub background: String,
    /// Label color
    pub foreground: String,
}

impl ButtonProps {
    /// Build a button, resolving its colors from `palette`
    #[must_use]
    pub fn new(label: impl Into<String>, variant: ButtonVariant, disabled: bool, palette: &Palette) -> Self {
        let (background, foreground) = if disabled {
            (&palette.gray, &palette.white)
        } else {
            match variant {
                ButtonVariant::Primary => (&palette.primary, &palette.white),
                ButtonVariant::Secondary => (&palette.light_gray, &palette.black),
                ButtonVariant::Danger => (&palette.red, &palette.white),
            }
        };

        Self {
            label: label.into(),
            variant,
            disabled,
            background: background.clone(),
            foreground: foreground.clone(),
        }
    }

    /// The action to dispatch for a press, or `None` while disabled
    #[must_use]
    pub fn press<A>(&self, action: A) -> Option<A> {
        (!self.disabled).then_some(action)
    }
}

/// Single- or multi-line text entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputProps {
    /// Current text
    pub value: String,
    /// Hint shown while empty
    pub placeholder: String,
    /// Hint color
    pub placeholder_color: String,
    /// Whether line breaks are allowed
    pub multiline: bool,
    /// Visible lines
    pub lines: u8,
    /// Focus when shown
    pub auto_focus: bool,
}

impl TextInputProps {
    /// Action for a keystroke; carries the full new text
    #[must_use]
    pub fn change(&self, new_text: impl Into<String>) -> HomeAction {
        HomeAction::Panel(PanelAction::TextChanged {
            text: new_text.into(),
        })
    }

    /// Action for the keyboard's submit key
    #[must_use]
    pub const fn submit(&self) -> HomeAction {
        HomeAction::Panel(PanelAction::Confirm)
    }
}

/// One row of the todo list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRow {
    /// Item the row shows
    pub id: TodoId,
    /// Item text
    pub text: String,
    /// Completion flag
    pub completed: bool,
    /// Completed items are struck through
    pub strike_through: bool,
    /// Text color
    pub text_color: String,
    /// "Done" / "Undo"
    pub toggle: ButtonProps,
    /// "Delete"
    pub delete: ButtonProps,
}

impl TodoRow {
    /// Build the row for `item`
    #[must_use]
    pub fn new(item: &TodoItem, palette: &Palette) -> Self {
        let (label, variant, text_color) = if item.completed {
            ("Undo", ButtonVariant::Secondary, &palette.gray)
        } else {
            ("Done", ButtonVariant::Primary, &palette.black)
        };

        Self {
            id: item.id,
            text: item.text.clone(),
            completed: item.completed,
            strike_through: item.completed,
            text_color: text_color.clone(),
            toggle: ButtonProps::new(label, variant, false, palette),
            delete: ButtonProps::new("Delete", ButtonVariant::Danger, false, palette),
        }
    }

    /// Action for the toggle button
    #[must_use]
    pub fn on_toggle(&self) -> Option<HomeAction> {
        self.toggle
            .press(HomeAction::Todo(TodoAction::ToggleCompleted { id: self.id }))
    }

    /// Action for the delete button
    #[must_use]
    pub fn on_delete(&self) -> Option<HomeAction> {
        self.delete
            .press(HomeAction::Todo(TodoAction::DeleteOne { id: self.id }))
    }
}

/// A confirmation prompt with a cancel and a destructive action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmDialog {
    /// Dialog title
    pub title: String,
    /// Question asked
    pub message: String,
    /// Label of the default, non-destructive action
    pub cancel_label: String,
    /// Label of the destructive action
    pub destructive_label: String,
}

impl ConfirmDialog {
    /// The prompt gating "Delete All"
    #[must_use]
    pub fn delete_all() -> Self {
        Self {
            title: "Delete All Todos".to_string(),
            message: "Are you sure you want to delete all todos?".to_string(),
            cancel_label: "Cancel".to_string(),
            destructive_label: "Delete".to_string(),
        }
    }

    /// Action for the cancel choice
    #[must_use]
    pub const fn on_cancel(&self) -> HomeAction {
        HomeAction::DismissDeleteAll
    }

    /// Action for the destructive choice
    #[must_use]
    pub const fn on_confirm(&self) -> HomeAction {
        HomeAction::ConfirmDeleteAll
    }
}

/// The add-item panel while it is on screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    /// Panel heading
    pub title: String,
    /// Text entry
    pub input: TextInputProps,
    /// Hint under the input
    pub helper_text: String,
    /// Confirm button, disabled while the trimmed text is empty
    pub add: ButtonProps,
    /// Cancel button
    pub cancel: ButtonProps,
    /// Lifecycle phase
    pub phase: PanelPhase,
    /// Slide offset, 0.0 resting and 1.0 offscreen
    pub offset: f64,
}

impl PanelView {
    /// Build the panel view, or `None` when the panel is closed
    #[must_use]
    pub fn new(panel: &PanelState, palette: &Palette) -> Option<Self> {
        if !panel.phase.is_presented() {
            return None;
        }

        Some(Self {
            title: "Add New Todo".to_string(),
            input: TextInputProps {
                value: panel.text.clone(),
                placeholder: "What needs to be done?".to_string(),
                placeholder_color: palette.gray.clone(),
                multiline: true,
                lines: 3,
                auto_focus: true,
            },
            helper_text: "Press Enter or tap \"Add\" to save your todo".to_string(),
            add: ButtonProps::new("Add Todo", ButtonVariant::Primary, !panel.confirm_enabled(), palette),
            cancel: ButtonProps::new("Cancel", ButtonVariant::Secondary, false, palette),
            phase: panel.phase,
            offset: panel.offset,
        })
    }

    /// Action for the add button
    #[must_use]
    pub fn on_add(&self) -> Option<HomeAction> {
        self.add.press(HomeAction::Panel(PanelAction::Confirm))
    }

    /// Action for the cancel button
    #[must_use]
    pub fn on_cancel(&self) -> Option<HomeAction> {
        self.cancel.press(HomeAction::Panel(PanelAction::Cancel))
    }

    /// Action for a tap outside the panel
    #[must_use]
    pub const fn on_backdrop(&self) -> HomeAction {
        HomeAction::Panel(PanelAction::RequestClose)
    }
}

/// Everything the home screen shows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomeView {
    /// Screen heading
    pub title: String,
    /// Opens the panel
    pub add: ButtonProps,
    /// Asks to clear the list; disabled when empty
    pub delete_all: ButtonProps,
    /// "Todos (n)"
    pub list_title: String,
    /// Shown instead of rows when the list is empty
    pub empty_text: Option<String>,
    /// One row per item, in list order
    pub rows: Vec<TodoRow>,
    /// The panel, while on screen
    pub panel: Option<PanelView>,
    /// The open confirmation dialog, if any
    pub dialog: Option<ConfirmDialog>,
}

impl HomeView {
    /// Action for the "Add Todo" button
    #[must_use]
    pub fn on_add(&self) -> Option<HomeAction> {
        self.add.press(HomeAction::OpenPanel)
    }

    /// Action for the "Delete All" button
    #[must_use]
    pub fn on_delete_all(&self) -> Option<HomeAction> {
        self.delete_all.press(HomeAction::RequestDeleteAll)
    }

    /// Row for `id`
    #[must_use]
    pub fn row(&self, id: &TodoId) -> Option<&TodoRow> {
        self.rows.iter().find(|row| row.id == *id)
    }
}
