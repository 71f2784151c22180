//! Command-line demo of the to-do client.
//!
//! Connects to the configured backend, checks the session, loads the first
//! page of tasks and prints what the task board would show.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use taskboard_client::session_storage::InMemorySessionStorage;
use taskboard_client::view::{
    completed_in, format_date, next_pagination_label, unseen_toasts, visible_tasks,
};
use taskboard_client::{AppState, ClientConfig, ClientEnvironment, HttpBackend, actions, build_store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard=info,taskboard_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = ClientConfig::from_env()?;
    taskboard_runtime::metrics::register_metrics();
    taskboard_client::sync::register_metrics();

    tracing::info!(api_url = %config.api.base_url, "Starting taskboard client");

    let env = ClientEnvironment::new(
        Arc::new(HttpBackend::new(&config.api)?),
        Arc::new(InMemorySessionStorage::new()),
        &config.sync,
    );
    let store = build_store(&config, env);

    let seen = AtomicUsize::new(0);
    let _subscription = store.subscribe(move |state: &AppState| {
        let queue = &state.toasts.queue;
        for toast in unseen_toasts(queue, seen.load(Ordering::Relaxed)) {
            tracing::info!(kind = ?toast.kind, "{}", toast.message);
        }
        seen.store(queue.len(), Ordering::Relaxed);
    });

    let mut handle = store.send(actions::fetch_profile()).await?;
    handle.wait().await;

    let session = store.state(|s| s.session.clone()).await;
    if !session.is_logged_in {
        println!("Not signed in to {}", config.api.base_url);
        store.shutdown(Duration::from_secs(5)).await?;
        return Ok(());
    }
    println!("Signed in as {}", session.profile.full_name);

    let mut handle = store.send(actions::change_page(1)).await?;
    handle.wait().await;

    let state = store.snapshot().await;
    let visible = visible_tasks(&state.tasks.items, &state.filter, &state.search);
    println!(
        "\nPage {}/{} ({} tasks)",
        state.tasks.pager.page,
        state.tasks.pager.pages,
        visible.len()
    );
    for task in &visible {
        let status = match task.completed_at {
            Some(completed_at) => format!("done in {}", completed_in(completed_at, task.created_at)),
            None => format!("due {}", format_date(task.due_date)),
        };
        println!(
            "  #{} [{:?}] {} ({})",
            task.id, task.task_state, task.title, status
        );
    }
    println!(
        "\n{}",
        next_pagination_label(
            state.tasks.items.len(),
            state.tasks.pager.page,
            state.tasks.pager.size
        )
        .as_str()
    );

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
