//! Command orchestration: runs reducer effects against the backend command
//! queue, the location, and the pending redirect slot.

use std::collections::VecDeque;

use client_core::FailurePolicy;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::reducer::{reduce, Effect, Session};
use crate::location::AppLocation;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "backend command queued");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            Err(format!("backend queue is full; {cmd_name} was not sent"))
        }
        Err(TrySendError::Disconnected(_)) => Err(format!(
            "backend worker disconnected; {cmd_name} was not sent"
        )),
    }
}

/// Owns the session and applies every transition to it.
pub struct Controller {
    session: Session,
    location: AppLocation,
    cmd_tx: Sender<BackendCommand>,
    pending_redirect: Option<String>,
}

impl Controller {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        location: AppLocation,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            session: Session::new(failure_policy),
            location,
            cmd_tx,
            pending_redirect: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn location(&self) -> &AppLocation {
        &self.location
    }

    /// Initial mount: first ping, plus completion of an OAuth return if the
    /// location carries one.
    pub fn mount(&mut self) {
        let auth_return = self.location.auth_return();
        self.handle(UiEvent::Mounted { auth_return });
    }

    pub fn handle(&mut self, event: UiEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in reduce(&mut self.session, event) {
                if let Some(follow_up) = self.run_effect(effect) {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    /// Applies every completion the backend worker has reported so far.
    pub fn drain_backend_events(&mut self, ui_rx: &Receiver<UiEvent>) -> usize {
        let mut applied = 0;
        while let Ok(event) = ui_rx.try_recv() {
            self.handle(event);
            applied += 1;
        }
        applied
    }

    pub fn take_redirect(&mut self) -> Option<String> {
        self.pending_redirect.take()
    }

    pub fn shutdown(&self) {
        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Shutdown) {
            tracing::debug!("backend shutdown not delivered: {reason}");
        }
    }

    /// Returns a synthetic failure when a command could not be queued, so the
    /// matching in-flight flag is cleared like any other failure.
    fn run_effect(&mut self, effect: Effect) -> Option<UiEvent> {
        match effect {
            Effect::Ping { request } => self
                .send(BackendCommand::Ping { request })
                .err()
                .map(|reason| UiEvent::PingFailed {
                    request,
                    error: UiError::undelivered(UiErrorContext::Ping, reason),
                }),
            Effect::StartAuth => self.send(BackendCommand::StartAuth).err().map(|reason| {
                UiEvent::AuthFailed(UiError::undelivered(UiErrorContext::Auth, reason))
            }),
            Effect::FetchProfile { request, state } => self
                .send(BackendCommand::FetchProfile {
                    request,
                    state: state.clone(),
                })
                .err()
                .map(|reason| UiEvent::ProfileFailed {
                    request,
                    state,
                    error: UiError::undelivered(UiErrorContext::Profile, reason),
                }),
            Effect::FetchFitness { request, state } => self
                .send(BackendCommand::FetchFitness {
                    request,
                    state: state.clone(),
                })
                .err()
                .map(|reason| UiEvent::FitnessFailed {
                    request,
                    state,
                    error: UiError::undelivered(UiErrorContext::Fitness, reason),
                }),
            Effect::Redirect(url) => {
                tracing::info!("oauth: redirecting to provider");
                self.pending_redirect = Some(url);
                None
            }
            Effect::StripLocationQuery => {
                self.location.strip_query();
                None
            }
        }
    }

    fn send(&self, cmd: BackendCommand) -> Result<(), String> {
        dispatch_backend_command(&self.cmd_tx, cmd)
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
