use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod location;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{config, StrydeClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::location::{AppLocation, DEFAULT_LAUNCH_URL};
use crate::ui::{StartupConfig, StrydeApp};

#[derive(Parser, Debug)]
#[command(name = "stryde", about = "Stryde running coach desktop client")]
struct Args {
    /// Location the app was opened with; the OAuth return lands here as
    /// `?auth_success=true&state=<token>`.
    launch_url: Option<String>,
    /// Backend base URL; overrides the settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file to use instead of the default `stryde.toml` lookup.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => {
            config::load_settings_with(Some(path.as_path()), |name| std::env::var(name).ok())
        }
        None => config::load_settings(),
    };
    if let Some(api_url) = &args.api_url {
        settings.api_url = config::normalize_api_url(api_url);
    }

    let launch_url = args.launch_url.as_deref().unwrap_or(DEFAULT_LAUNCH_URL);
    let location = AppLocation::parse(launch_url)
        .with_context(|| format!("invalid launch url '{launch_url}'"))?;
    let client = StrydeClient::from_settings(&settings).context("failed to create backend client")?;
    tracing::info!(api_url = client.api_url(), "starting stryde desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let startup = StartupConfig {
        api_url: settings.api_url.clone(),
        location,
        failure_policy: settings.failure_policy.clone(),
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stryde")
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    let result = eframe::run_native(
        "Stryde",
        options,
        Box::new(move |_cc| Ok(Box::new(StrydeApp::bootstrap(cmd_tx, ui_rx, startup)))),
    );

    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    result.map_err(|err| anyhow::anyhow!("desktop ui failed: {err}"))
}
