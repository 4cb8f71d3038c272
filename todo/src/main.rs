//! Scripted walkthrough of the todo screen.
//!
//! Drives the home screen through the store the way a UI would: opens the
//! panel, types, confirms, toggles and deletes rows, and clears the list
//! through the confirmation dialog. Prints the rendered screen after each step.
//!
//! An optional first argument names a JSON file with `UiConfig` overrides.
//! Set `RUST_LOG=todo=debug` to watch reducers and animation frames.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tasklist_core::environment::{SystemClock, UuidGenerator};
use tasklist_runtime::Store;
use todo::{
    HomeAction, HomeEnvironment, HomeReducer, HomeState, HomeView, PanelAction, PanelPhase,
    UiConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type HomeStore = Store<HomeState, HomeAction, HomeEnvironment, HomeReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = load_config()?;
    tracing::info!(
        duration_ms = config.animation.duration_ms,
        easing = ?config.animation.easing,
        "Starting todo demo"
    );

    let env = HomeEnvironment::new(Arc::new(SystemClock), Arc::new(UuidGenerator), &config);
    let store = Store::new(HomeState::new(), HomeReducer::new(), env);
    let show = |step: &str| print_view(step, &store.snapshot().render(&config.palette));

    show("Initial screen");

    add_through_panel(&store, "  Buy milk  ").await?;
    show("Added \"Buy milk\"");

    store.send(HomeAction::OpenPanel).await?;
    store
        .send(HomeAction::Panel(PanelAction::TextChanged {
            text: "   ".to_string(),
        }))
        .await?;
    wait_for_panel(&store, PanelPhase::Open).await?;
    show("Blank input keeps \"Add Todo\" disabled");
    store.send(HomeAction::Panel(PanelAction::Cancel)).await?;
    wait_for_panel(&store, PanelPhase::Closed).await?;

    add_through_panel(&store, "Walk dog").await?;
    add_through_panel(&store, "Call mom").await?;

    let view = store.snapshot().render(&config.palette);
    if let Some(action) = view.rows.first().and_then(todo::TodoRow::on_toggle) {
        store.send(action).await?;
    }
    if let Some(action) = view.rows.get(1).and_then(todo::TodoRow::on_delete) {
        store.send(action).await?;
    }
    show("Toggled the first row, deleted the second");

    store.send(HomeAction::RequestDeleteAll).await?;
    show("Asked to delete everything");
    store.send(HomeAction::DismissDeleteAll).await?;

    store.send(HomeAction::RequestDeleteAll).await?;
    store.send(HomeAction::ConfirmDeleteAll).await?;
    show("Confirmed delete all");

    store.shutdown_default().await?;
    tracing::info!("Demo finished");
    Ok(())
}

fn load_config() -> anyhow::Result<UiConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(UiConfig::default());
    };

    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read configuration file {path}"))?;
    UiConfig::from_json(&input).with_context(|| format!("Invalid configuration in {path}"))
}

/// Open the panel, type `text`, confirm, and wait until it has slid away
async fn add_through_panel(store: &HomeStore, text: &str) -> anyhow::Result<()> {
    store.send(HomeAction::OpenPanel).await?;
    wait_for_panel(store, PanelPhase::Open).await?;

    store
        .send(HomeAction::Panel(PanelAction::TextChanged {
            text: text.to_string(),
        }))
        .await?;
    let mut handle = store.send(HomeAction::Panel(PanelAction::Confirm)).await?;
    handle.wait().await;

    wait_for_panel(store, PanelPhase::Closed).await
}

async fn wait_for_panel(store: &HomeStore, phase: PanelPhase) -> anyhow::Result<()> {
    let mut snapshots = store.subscribe_snapshots();

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let current = snapshots.borrow_and_update().panel.phase;
            if current == phase {
                return Ok::<(), anyhow::Error>(());
            }
            snapshots.changed().await?;
        }
    })
    .await
    .with_context(|| format!("Panel did not reach {phase:?}"))?
}

fn print_view(step: &str, view: &HomeView) {
    println!("\n=== {step} ===");
    println!("{}", view.title);

    let disabled = if view.delete_all.disabled { " (disabled)" } else { "" };
    println!("[{}] [{}{disabled}]", view.add.label, view.delete_all.label);

    println!("{}", view.list_title);
    if let Some(empty) = &view.empty_text {
        println!("  {empty}");
    }
    for row in &view.rows {
        let mark = if row.completed { "x" } else { " " };
        let text = if row.strike_through {
            format!("~{}~", row.text)
        } else {
            row.text.clone()
        };
        println!("  [{mark}] {text}  <{}> <{}>", row.toggle.label, row.delete.label);
    }

    if let Some(panel) = &view.panel {
        let add = if panel.add.disabled { " (disabled)" } else { "" };
        println!(
            "  -- {} ({:?}, offset {:.2}) --",
            panel.title, panel.phase, panel.offset
        );
        println!("  > {:?}  ({})", panel.input.value, panel.input.placeholder);
        println!("  {}", panel.helper_text);
        println!("  [{}{add}] [{}]", panel.add.label, panel.cancel.label);
    }

    if let Some(dialog) = &view.dialog {
        println!(
            "  ! {}: {} [{}] [{}]",
            dialog.title, dialog.message, dialog.cancel_label, dialog.destructive_label
        );
    }
}
