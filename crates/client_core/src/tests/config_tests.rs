use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("stryde_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE_NAME);
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_with(None, env_from(&[]));
    assert_eq!(settings.api_url, DEFAULT_API_URL);
    assert_eq!(
        settings.request_timeout,
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    );
    assert_eq!(settings.failure_policy, FailurePolicy::silent());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_settings_file(
        r#"
api_url = "http://file.example"
request_timeout_secs = 5
surface_failures = ["profile"]
"#,
    );

    let from_file = load_settings_with(Some(&path), env_from(&[]));
    assert_eq!(from_file.api_url, "http://file.example");
    assert_eq!(from_file.request_timeout, Duration::from_secs(5));
    assert!(from_file.failure_policy.is_surfaced(FailureSurface::Profile));
    assert!(!from_file.failure_policy.is_surfaced(FailureSurface::Auth));

    let overridden = load_settings_with(
        Some(&path),
        env_from(&[
            ("STRYDE_API_URL", "http://stryde.example/"),
            ("APP__API_URL", "http://app.example/"),
            ("APP__SURFACE_FAILURES", "auth, fitness"),
        ]),
    );
    assert_eq!(overridden.api_url, "http://app.example");
    assert!(overridden.failure_policy.is_surfaced(FailureSurface::Auth));
    assert!(overridden.failure_policy.is_surfaced(FailureSurface::Fitness));
    assert!(!overridden.failure_policy.is_surfaced(FailureSurface::Profile));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn invalid_values_are_ignored() {
    let settings = load_settings_with(
        None,
        env_from(&[
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
            ("APP__SURFACE_FAILURES", "ping,profile,"),
        ]),
    );
    assert_eq!(
        settings.request_timeout,
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    );
    assert_eq!(
        settings.failure_policy,
        FailurePolicy::surfacing([FailureSurface::Profile])
    );
}

#[test]
fn unreadable_file_falls_back_to_defaults() {
    let path = temp_settings_file("api_url = [");
    let settings = load_settings_with(Some(&path), env_from(&[]));
    assert_eq!(settings.api_url, DEFAULT_API_URL);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");

    let missing = env::temp_dir().join("stryde_config_missing").join(SETTINGS_FILE_NAME);
    assert_eq!(
        load_settings_with(Some(&missing), env_from(&[])).api_url,
        DEFAULT_API_URL
    );
}

#[test]
fn normalizes_api_url() {
    assert_eq!(normalize_api_url(" http://a.example/ "), "http://a.example");
    assert_eq!(normalize_api_url("   "), DEFAULT_API_URL);
}

#[derive(Clone, Default)]
struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn zero_timeout_in_file_is_ignored_with_warning() {
    let path = temp_settings_file("request_timeout_secs = 0\n");
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let settings = tracing::subscriber::with_default(subscriber, || {
        load_settings_with(Some(&path), env_from(&[]))
    });
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");

    assert_eq!(
        settings.request_timeout,
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    );
    let output = String::from_utf8(logs.0.lock().expect("log buffer").clone()).expect("utf8");
    assert!(output.contains("ignoring invalid request timeout"));
    assert!(output.contains("request_timeout_secs"));
}
