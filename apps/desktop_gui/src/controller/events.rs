//! Controller inputs and error modeling for the desktop GUI.

use client_core::{ClientError, FailureKind, FailureSurface};
use shared::{
    domain::{FitnessSnapshot, UserProfile},
    protocol::AuthReturn,
};

use crate::controller::reducer::{RequestId, ViewTab};

/// Everything that can move the session forward: user intents from the UI
/// thread and completions reported back by the backend worker.
#[derive(Debug, Clone)]
pub enum UiEvent {
    Mounted {
        auth_return: Option<AuthReturn>,
    },
    PingRequested,
    PingSucceeded {
        request: RequestId,
        message: String,
    },
    PingFailed {
        request: RequestId,
        error: UiError,
    },
    ConnectRequested,
    AuthUrlReady {
        state: String,
        auth_url: String,
    },
    AuthFailed(UiError),
    ProfileLoaded {
        request: RequestId,
        state: String,
        profile: UserProfile,
    },
    ProfileFailed {
        request: RequestId,
        state: String,
        error: UiError,
    },
    FitnessLoaded {
        request: RequestId,
        state: String,
        snapshot: Box<FitnessSnapshot>,
    },
    FitnessFailed {
        request: RequestId,
        state: String,
        error: UiError,
    },
    ViewChanged(ViewTab),
    NoticeDismissed,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mounted { .. } => "mounted",
            Self::PingRequested => "ping_requested",
            Self::PingSucceeded { .. } => "ping_succeeded",
            Self::PingFailed { .. } => "ping_failed",
            Self::ConnectRequested => "connect_requested",
            Self::AuthUrlReady { .. } => "auth_url_ready",
            Self::AuthFailed(_) => "auth_failed",
            Self::ProfileLoaded { .. } => "profile_loaded",
            Self::ProfileFailed { .. } => "profile_failed",
            Self::FitnessLoaded { .. } => "fitness_loaded",
            Self::FitnessFailed { .. } => "fitness_failed",
            Self::ViewChanged(_) => "view_changed",
            Self::NoticeDismissed => "notice_dismissed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Backend,
    Validation,
    /// The command never reached the backend worker.
    Undelivered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Ping,
    Auth,
    Profile,
    Fitness,
}

impl UiErrorContext {
    /// Failure-policy bucket for this context. Ping is always visible and has none.
    pub fn surface(self) -> Option<FailureSurface> {
        match self {
            Self::Ping => None,
            Self::Auth => Some(FailureSurface::Auth),
            Self::Profile => Some(FailureSurface::Profile),
            Self::Fitness => Some(FailureSurface::Fitness),
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::Ping => "Backend health check",
            Self::Auth => "Strava connection",
            Self::Profile => "Loading your profile",
            Self::Fitness => "Loading training data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = if err.is_unauthorized() {
            UiErrorCategory::Auth
        } else {
            match (err.kind(), err) {
                (FailureKind::Network, _) => UiErrorCategory::Transport,
                (FailureKind::Backend, ClientError::Decode { .. }) => UiErrorCategory::Validation,
                (FailureKind::Backend, _) => UiErrorCategory::Backend,
            }
        };

        Self::new(category, context, err.to_string())
    }

    pub fn undelivered(context: UiErrorContext, reason: impl Into<String>) -> Self {
        Self::new(UiErrorCategory::Undelivered, context, reason)
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line explanation suitable for a notice banner.
    pub fn describe(&self) -> String {
        let subject = self.context.subject();
        match self.category {
            UiErrorCategory::Auth => {
                format!("{subject} failed: the Strava session is not authorized; connect again.")
            }
            UiErrorCategory::Transport => {
                format!("{subject} failed: backend unreachable; check the API URL and network.")
            }
            UiErrorCategory::Validation => {
                format!("{subject} failed: the backend sent an unexpected response.")
            }
            UiErrorCategory::Backend => format!("{subject} failed: {}", self.message),
            UiErrorCategory::Undelivered => {
                format!("{subject} was not started: {}", self.message)
            }
        }
    }
}
