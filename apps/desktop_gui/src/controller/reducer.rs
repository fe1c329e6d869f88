//! Session state and its transitions. `reduce` is the only place the session
//! changes; it performs no I/O and returns the effects the caller must run.

use client_core::FailurePolicy;
use shared::domain::{FitnessSnapshot, UserProfile};
use tracing::{debug, info, warn};

use crate::controller::events::{UiError, UiErrorCategory, UiEvent};

pub const PING_FALLBACK_MESSAGE: &str = "Error connecting to backend";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u64);
    };
}

id_newtype!(RequestId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Overview,
    Calendar,
}

impl ViewTab {
    pub const ALL: [ViewTab; 2] = [ViewTab::Overview, ViewTab::Calendar];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Calendar => "Training Calendar",
        }
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Ping { request: RequestId },
    StartAuth,
    FetchProfile { request: RequestId, state: String },
    FetchFitness { request: RequestId, state: String },
    Redirect(String),
    StripLocationQuery,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub message: String,
    pub loading: bool,
    pub user: Option<UserProfile>,
    pub auth_state: Option<String>,
    pub fitness_data: Option<FitnessSnapshot>,
    pub fitness_loading: bool,
    pub current_view: ViewTab,
    pub auth_in_flight: bool,
    pub notice: Option<String>,
    mounted: bool,
    ping_request: Option<RequestId>,
    profile_request: Option<RequestId>,
    fitness_request: Option<RequestId>,
    next_request: u64,
    failure_policy: FailurePolicy,
}

impl Session {
    pub fn new(failure_policy: FailurePolicy) -> Self {
        Self {
            failure_policy,
            ..Self::default()
        }
    }

    pub fn profile_pending(&self) -> bool {
        self.profile_request.is_some()
    }

    /// Connecting replaces `auth_state`; not allowed while a fetch for the
    /// current token is still running.
    pub fn can_connect(&self) -> bool {
        !self.auth_in_flight
            && self.user.is_none()
            && self.profile_request.is_none()
            && self.fitness_request.is_none()
    }

    fn allocate_request(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn start_ping(&mut self) -> Effect {
        let request = self.allocate_request();
        self.loading = true;
        self.ping_request = Some(request);
        Effect::Ping { request }
    }

    fn is_current_token(&self, state: &str) -> bool {
        self.auth_state.as_deref() == Some(state)
    }

    /// Logs a non-ping failure and, if the policy asks for it, raises a notice.
    /// Queue failures are always shown.
    fn record_failure(&mut self, error: &UiError) {
        warn!(
            context = ?error.context(),
            category = ?error.category(),
            error = error.message(),
            "background request failed"
        );
        let surfaced = error.category() == UiErrorCategory::Undelivered
            || error
                .context()
                .surface()
                .is_some_and(|surface| self.failure_policy.is_surfaced(surface));
        if surfaced {
            self.notice = Some(error.describe());
        }
    }
}

pub fn reduce(session: &mut Session, event: UiEvent) -> Vec<Effect> {
    debug!(event = event.name(), "reduce");
    let mut effects = Vec::new();

    match event {
        UiEvent::Mounted { auth_return } => {
            if session.mounted {
                debug!("ignoring repeated mount");
                return effects;
            }
            session.mounted = true;
            effects.push(session.start_ping());

            if let Some(auth_return) = auth_return {
                info!("oauth: returning from provider; loading athlete data");
                let profile_request = session.allocate_request();
                let fitness_request = session.allocate_request();
                session.auth_state = Some(auth_return.state.clone());
                session.profile_request = Some(profile_request);
                session.fitness_request = Some(fitness_request);
                session.fitness_loading = true;
                effects.push(Effect::FetchProfile {
                    request: profile_request,
                    state: auth_return.state.clone(),
                });
                effects.push(Effect::FetchFitness {
                    request: fitness_request,
                    state: auth_return.state,
                });
                effects.push(Effect::StripLocationQuery);
            }
        }
        UiEvent::PingRequested => {
            if session.loading {
                debug!("ping already in flight");
            } else {
                effects.push(session.start_ping());
            }
        }
        UiEvent::PingSucceeded { request, message } => {
            if session.ping_request == Some(request) {
                session.message = message;
                session.loading = false;
                session.ping_request = None;
            } else {
                debug!(request = request.0, "dropping stale ping result");
            }
        }
        UiEvent::PingFailed { request, error } => {
            if session.ping_request == Some(request) {
                warn!(error = error.message(), "ping failed");
                if error.category() == UiErrorCategory::Undelivered {
                    session.notice = Some(error.describe());
                }
                session.message = PING_FALLBACK_MESSAGE.to_string();
                session.loading = false;
                session.ping_request = None;
            } else {
                debug!(request = request.0, "dropping stale ping failure");
            }
        }
        UiEvent::ConnectRequested => {
            if !session.can_connect() {
                debug!("connect ignored; already connecting, connected, or loading");
            } else {
                session.auth_in_flight = true;
                effects.push(Effect::StartAuth);
            }
        }
        UiEvent::AuthUrlReady { state, auth_url } => {
            if session.auth_in_flight {
                session.auth_in_flight = false;
                session.auth_state = Some(state);
                effects.push(Effect::Redirect(auth_url));
            } else {
                debug!("dropping unsolicited authorization url");
            }
        }
        UiEvent::AuthFailed(error) => {
            session.auth_in_flight = false;
            session.record_failure(&error);
        }
        UiEvent::ProfileLoaded {
            request,
            state,
            profile,
        } => {
            if session.profile_request == Some(request) && session.is_current_token(&state) {
                info!(username = %profile.username, "athlete profile loaded");
                session.user = Some(profile);
                session.profile_request = None;
            } else {
                debug!(request = request.0, "dropping stale profile result");
            }
        }
        UiEvent::ProfileFailed {
            request,
            state,
            error,
        } => {
            if session.profile_request == Some(request) && session.is_current_token(&state) {
                session.profile_request = None;
                session.record_failure(&error);
            } else {
                debug!(request = request.0, "dropping stale profile failure");
            }
        }
        UiEvent::FitnessLoaded {
            request,
            state,
            snapshot,
        } => {
            if session.fitness_request == Some(request) && session.is_current_token(&state) {
                session.fitness_data = Some(*snapshot);
                session.fitness_loading = false;
                session.fitness_request = None;
            } else {
                debug!(request = request.0, "dropping stale training data");
            }
        }
        UiEvent::FitnessFailed {
            request,
            state,
            error,
        } => {
            if session.fitness_request == Some(request) && session.is_current_token(&state) {
                session.fitness_loading = false;
                session.fitness_request = None;
                session.record_failure(&error);
            } else {
                debug!(request = request.0, "dropping stale training failure");
            }
        }
        UiEvent::ViewChanged(tab) => {
            session.current_view = tab;
        }
        UiEvent::NoticeDismissed => {
            session.notice = None;
        }
    }

    effects
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
