//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::BackendApi;
use crossbeam_channel::{Receiver, Sender};
use tokio::{runtime::Handle, task::JoinHandle};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each command runs as its own task, so
/// completions come back in whatever order the backend answers.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn BackendApi>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                fail_pending(&cmd_rx, &ui_tx, &format!("backend worker startup failure: {err}"));
                return;
            }
        };

        tracing::info!("backend worker ready");
        serve_commands(runtime.handle(), &cmd_rx, &ui_tx, api);
        tracing::info!("backend worker stopped");
    })
}

fn serve_commands(
    handle: &Handle,
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
    api: Arc<dyn BackendApi>,
) {
    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

    while let Ok(cmd) = cmd_rx.recv() {
        in_flight.retain(|task| !task.is_finished());
        if cmd == BackendCommand::Shutdown {
            tracing::info!(in_flight = in_flight.len(), "backend worker shutting down");
            break;
        }

        tracing::debug!(command = cmd.name(), "backend command received");
        let api = Arc::clone(&api);
        let ui_tx = ui_tx.clone();
        in_flight.push(handle.spawn(async move {
            let Some(event) = execute(api.as_ref(), cmd).await else {
                return;
            };
            if ui_tx.try_send(event).is_err() {
                tracing::warn!("ui event queue unavailable; dropping backend completion");
            }
        }));
    }

    for task in in_flight {
        task.abort();
    }
}

/// Runs one command against the backend and maps the outcome to the event the
/// reducer expects.
pub async fn execute(api: &dyn BackendApi, cmd: BackendCommand) -> Option<UiEvent> {
    let event = match cmd {
        BackendCommand::Ping { request } => match api.ping().await {
            Ok(response) => UiEvent::PingSucceeded {
                request,
                message: response.message,
            },
            Err(err) => UiEvent::PingFailed {
                request,
                error: UiError::from_client_error(UiErrorContext::Ping, &err),
            },
        },
        BackendCommand::StartAuth => match api.start_auth().await {
            Ok(response) => UiEvent::AuthUrlReady {
                state: response.state,
                auth_url: response.auth_url,
            },
            Err(err) => {
                UiEvent::AuthFailed(UiError::from_client_error(UiErrorContext::Auth, &err))
            }
        },
        BackendCommand::FetchProfile { request, state } => {
            match api.user_profile(&state).await {
                Ok(profile) => UiEvent::ProfileLoaded {
                    request,
                    state,
                    profile,
                },
                Err(err) => UiEvent::ProfileFailed {
                    request,
                    state,
                    error: UiError::from_client_error(UiErrorContext::Profile, &err),
                },
            }
        }
        BackendCommand::FetchFitness { request, state } => {
            match api.training_volume(&state).await {
                Ok(snapshot) => UiEvent::FitnessLoaded {
                    request,
                    state,
                    snapshot: Box::new(snapshot),
                },
                Err(err) => UiEvent::FitnessFailed {
                    request,
                    state,
                    error: UiError::from_client_error(UiErrorContext::Fitness, &err),
                },
            }
        }
        BackendCommand::Shutdown => return None,
    };

    Some(event)
}

/// Without a runtime nothing can be executed; answer every queued command with
/// a failure so the UI does not wait forever.
fn fail_pending(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: &str) {
    while let Ok(cmd) = cmd_rx.recv() {
        let event = match cmd {
            BackendCommand::Ping { request } => UiEvent::PingFailed {
                request,
                error: UiError::undelivered(UiErrorContext::Ping, reason),
            },
            BackendCommand::StartAuth => {
                UiEvent::AuthFailed(UiError::undelivered(UiErrorContext::Auth, reason))
            }
            BackendCommand::FetchProfile { request, state } => UiEvent::ProfileFailed {
                request,
                state,
                error: UiError::undelivered(UiErrorContext::Profile, reason),
            },
            BackendCommand::FetchFitness { request, state } => UiEvent::FitnessFailed {
                request,
                state,
                error: UiError::undelivered(UiErrorContext::Fitness, reason),
            },
            BackendCommand::Shutdown => return,
        };
        let _ = ui_tx.try_send(event);
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
