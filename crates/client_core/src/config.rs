use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const SETTINGS_FILE_NAME: &str = "stryde.toml";

/// Background operations whose failures may be shown to the user. Ping
/// failures are always shown and are not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureSurface {
    Auth,
    Profile,
    Fitness,
}

impl FromStr for FailureSurface {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auth" => Ok(Self::Auth),
            "profile" => Ok(Self::Profile),
            "fitness" | "training" => Ok(Self::Fitness),
            other => Err(format!("unknown failure surface '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailurePolicy {
    surfaced: BTreeSet<FailureSurface>,
}

impl FailurePolicy {
    /// Only ping failures reach the user; everything else is logged.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn surfacing(surfaces: impl IntoIterator<Item = FailureSurface>) -> Self {
        Self {
            surfaced: surfaces.into_iter().collect(),
        }
    }

    pub fn is_surfaced(&self, surface: FailureSurface) -> bool {
        self.surfaced.contains(&surface)
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_url: String,
    pub request_timeout: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            failure_policy: FailurePolicy::silent(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    surface_failures: Option<Vec<String>>,
}

/// Loads settings from the default file location and the process environment.
pub fn load_settings() -> ClientSettings {
    load_settings_with(default_settings_path().as_deref(), |name| {
        std::env::var(name).ok()
    })
}

/// `stryde.toml` in the working directory wins over the per-user config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("stryde").join(SETTINGS_FILE_NAME))
}

pub fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(path) = path {
        if let Some(file_cfg) = read_file_settings(path) {
            apply_file_settings(&mut settings, file_cfg);
        }
    }

    if let Some(v) = env("STRYDE_API_URL") {
        settings.api_url = normalize_api_url(&v);
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = normalize_api_url(&v);
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Some(timeout) = parse_timeout("APP__REQUEST_TIMEOUT_SECS", &v) {
            settings.request_timeout = timeout;
        }
    }

    if let Some(v) = env("APP__SURFACE_FAILURES") {
        settings.failure_policy = parse_failure_policy(v.split(','));
    }

    settings
}

fn read_file_settings(path: &Path) -> Option<FileSettings> {
    let raw = fs::read_to_string(path).ok()?;
    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => Some(file_cfg),
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable settings file: {err}");
            None
        }
    }
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_url {
        settings.api_url = normalize_api_url(&v);
    }
    if let Some(secs) = file_cfg.request_timeout_secs {
        if let Some(timeout) = parse_timeout("request_timeout_secs", &secs.to_string()) {
            settings.request_timeout = timeout;
        }
    }
    if let Some(surfaces) = file_cfg.surface_failures {
        settings.failure_policy = parse_failure_policy(surfaces.iter().map(String::as_str));
    }
}

/// Whole seconds, at least one.
fn parse_timeout(setting: &str, raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            warn!(setting, value = %raw, "ignoring invalid request timeout");
            None
        }
    }
}

fn parse_failure_policy<'a>(raw: impl Iterator<Item = &'a str>) -> FailurePolicy {
    FailurePolicy::surfacing(raw.filter(|item| !item.trim().is_empty()).filter_map(
        |item| match item.parse::<FailureSurface>() {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!("{err}; ignoring");
                None
            }
        },
    ))
}

pub fn normalize_api_url(raw_api_url: &str) -> String {
    let raw_api_url = raw_api_url.trim();

    if raw_api_url.is_empty() {
        return DEFAULT_API_URL.to_string();
    }

    raw_api_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
