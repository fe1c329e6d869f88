//! Backend commands queued from UI to backend worker.

use crate::controller::reducer::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Ping { request: RequestId },
    StartAuth,
    FetchProfile { request: RequestId, state: String },
    FetchFitness { request: RequestId, state: String },
    /// Aborts everything still in flight and stops the worker.
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ping { .. } => "ping",
            Self::StartAuth => "start_auth",
            Self::FetchProfile { .. } => "fetch_profile",
            Self::FetchFitness { .. } => "fetch_fitness",
            Self::Shutdown => "shutdown",
        }
    }
}
