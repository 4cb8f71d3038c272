//! Single-screen todo list.
//!
//! - [`types`] / [`reducer`]: the in-memory todo list (add, toggle, delete one,
//!   delete all) as commands validated into events
//! - [`panel`] / [`animation`]: the add-item panel, a text buffer with a
//!   time-driven slide lifecycle (`Closed → Opening → Open → Closing`)
//! - [`screen`]: the home screen composing both, plus the delete-all
//!   confirmation gate
//! - [`view`]: display models built from screen state
//! - [`config`]: animation timing and palette
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist_core::environment::{SystemClock, UuidGenerator};
//! use tasklist_runtime::Store;
//! use todo::{HomeAction, HomeEnvironment, HomeReducer, HomeState, PanelAction, UiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = UiConfig::default();
//! let env = HomeEnvironment::new(Arc::new(SystemClock), Arc::new(UuidGenerator), &config);
//! let store = Store::new(HomeState::new(), HomeReducer::new(), env);
//!
//! store.send(HomeAction::OpenPanel).await?;
//! store
//!     .send(HomeAction::Panel(PanelAction::TextChanged { text: "Buy milk".into() }))
//!     .await?;
//! let mut handle = store.send(HomeAction::Panel(PanelAction::Confirm)).await?;
//! handle.wait().await;
//!
//! let view = store.snapshot().render(&config.palette);
//! println!("{}", view.list_title);
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod config;
pub mod panel;
pub mod reducer;
pub mod screen;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use animation::{Easing, SlideAnimation};
pub use config::{AnimationConfig, ConfigError, Palette, UiConfig};
pub use panel::{PanelAction, PanelEnvironment, PanelPhase, PanelReducer, PanelState};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use screen::{HomeAction, HomeEnvironment, HomeReducer, HomeState};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};
pub use view::{ButtonProps, ButtonVariant, ConfirmDialog, HomeView, PanelView, TextInputProps, TodoRow};
