use serde::{Deserialize, Serialize};

pub const PING_PATH: &str = "/ping";
pub const AUTH_START_PATH: &str = "/auth/strava";
pub const USER_PROFILE_PATH: &str = "/user/profile";
pub const TRAINING_VOLUME_PATH: &str = "/training/volume";

/// Query parameter the backend sets to `true` when redirecting back after OAuth.
pub const AUTH_SUCCESS_PARAM: &str = "auth_success";
/// Query parameter carrying the OAuth correlation token.
pub const STATE_PARAM: &str = "state";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStartResponse {
    pub state: String,
    pub auth_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateQuery<'a> {
    pub state: &'a str,
}

/// Completed OAuth round-trip as signalled by the return location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthReturn {
    pub state: String,
}

impl AuthReturn {
    /// Extracts the return marker from decoded query pairs. Both
    /// `auth_success=true` and a non-empty `state` must be present.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Option<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut success = false;
        let mut state = None;
        for (key, value) in pairs {
            match key.as_ref() {
                AUTH_SUCCESS_PARAM => success = value.as_ref() == "true",
                STATE_PARAM => state = Some(value.as_ref().to_string()),
                _ => {}
            }
        }

        let state = state.filter(|state| !state.is_empty())?;
        success.then_some(Self { state })
    }
}
