use occupancy::{OccupancyStore, dataset};
use parking_api::app;
use parking_api::error::MainError;
use parking_api::simulator::drift_loop;
use parking_api::state::AppState;
use shared::error::InitializationError;
use shared::{ServerConfig, init_tracing, load_config, shutdown_listener};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), MainError> {
    init_tracing()?;

    let config = load_config().map_err(InitializationError::from)?;
    info!(name: "config.loaded", config = ?config, "config loaded");

    let facilities = match config.simulation.dataset_path.as_deref() {
        Some(path) => dataset::load(path)?,
        None => dataset::montreal(),
    };
    let store = OccupancyStore::seeded(facilities, config.simulation.seed)?;
    info!(
        name: "store.initialized",
        facilities = store.facilities().len(),
        seeded = config.simulation.seed.is_some(),
        "occupancy store initialized"
    );
    let state = AppState::new(store);

    // Cancelled by the SIGINT/SIGTERM listener or by whichever task finishes first.
    let shutdown_token = CancellationToken::new();
    let mut signal_handle = tokio::spawn(shutdown_listener(Some(shutdown_token.clone())));

    let mut axum_handle = tokio::spawn(run_server(
        state.clone(),
        config.server.clone(),
        shutdown_token.clone(),
    ));

    let mut drift_handle = tokio::spawn(drift_loop(
        state.store.clone(),
        Duration::from_secs(config.simulation.drift_interval_seconds),
        shutdown_token.clone(),
    ));

    let mut axum_done = false;
    let mut drift_done = false;

    let (task, outcome) = tokio::select! {
        res = &mut axum_handle => {
            axum_done = true;
            ("axum", server_outcome(res))
        }
        res = &mut drift_handle => {
            drift_done = true;
            ("drift", res.map_err(MainError::from))
        }
        res = &mut signal_handle => ("listener", res.map_err(MainError::from)),
    };
    info!(name: "task.completed", task, "task completed first, propagating cancellation token to other tasks");
    shutdown_token.cancel();

    let mut first_err = None;
    record_exit(task, outcome, &mut first_err);
    if !axum_done {
        info!(name: "task.completion.awaiting", task = "axum", "awaiting task completion");
        record_exit("axum", server_outcome(axum_handle.await), &mut first_err);
    }
    if !drift_done {
        info!(name: "task.completion.awaiting", task = "drift", "awaiting task completion");
        record_exit("drift", drift_handle.await.map_err(MainError::from), &mut first_err);
    }

    if let Some(err) = first_err {
        Err(err)
    } else {
        Ok(())
    }
}

fn server_outcome(res: Result<Result<(), std::io::Error>, JoinError>) -> Result<(), MainError> {
    Ok(res??)
}

/// Logs how a task ended and keeps the earliest error.
fn record_exit(task: &str, outcome: Result<(), MainError>, first_err: &mut Option<MainError>) {
    match outcome {
        Ok(()) => info!(name: "task.exited", task, "task exited cleanly"),
        Err(e) => {
            warn!(name: "task.exited", task, error = ?e, "task exited with error");
            first_err.get_or_insert(e);
        }
    }
}

async fn run_server(
    state: AppState,
    server: ServerConfig,
    shutdown: CancellationToken,
) -> Result<(), std::io::Error> {
    let listen_addr = server.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await?;
    info!(
        name: "axum.initialized",
        listen_addr = %listen_addr,
        public_base_url = %server.public_base_url,
        "starting server"
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
