use thiserror::Error;

/// Coarse failure taxonomy: could the backend be reached at all, and if so,
/// did it answer with something usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Backend,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build http client: {0}")]
    Setup(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}{}", detail_suffix(.detail))]
    Status {
        endpoint: &'static str,
        status: u16,
        detail: Option<String>,
    },
    #[error("malformed response from {endpoint}: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Setup(_) | Self::Network { .. } => FailureKind::Network,
            Self::Status { .. } | Self::Decode { .. } => FailureKind::Backend,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
