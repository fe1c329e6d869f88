use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config, BackendApi, StrydeClient};
use shared::domain::{FitnessSnapshot, TrainingCalendar, UserProfile};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stryde-cli", about = "Talk to the Stryde backend from a terminal")]
struct Cli {
    /// Backend base URL; overrides `stryde.toml` and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Health check.
    Ping,
    /// Start the Strava OAuth flow and print where to go.
    Connect,
    Profile {
        #[arg(long)]
        state: String,
    },
    Volume {
        #[arg(long)]
        state: String,
        /// Print the snapshot as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Profile and training volume, fetched together.
    Status {
        #[arg(long)]
        state: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = &cli.api_url {
        settings.api_url = config::normalize_api_url(api_url);
    }
    let client = StrydeClient::from_settings(&settings)?;

    match cli.command {
        Command::Ping => {
            let pong = client.ping().await.context("backend health check failed")?;
            println!("{}", pong.message);
        }
        Command::Connect => {
            let auth = client
                .start_auth()
                .await
                .context("could not start Strava authorization")?;
            println!("Open this URL to connect Strava:\n  {}", auth.auth_url);
            println!("state={}", auth.state);
        }
        Command::Profile { state } => {
            let profile = client
                .user_profile(&state)
                .await
                .context("could not load profile")?;
            print!("{}", profile_summary(&profile));
        }
        Command::Volume { state, json } => {
            let snapshot = client
                .training_volume(&state)
                .await
                .context("could not load training volume")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", volume_summary(&snapshot));
            }
        }
        Command::Status { state } => {
            let (profile, snapshot) =
                tokio::join!(client.user_profile(&state), client.training_volume(&state));
            print!("{}", profile_summary(&profile.context("could not load profile")?));
            print!(
                "{}",
                volume_summary(&snapshot.context("could not load training volume")?)
            );
        }
    }

    Ok(())
}

fn profile_summary(profile: &UserProfile) -> String {
    let mut out = format!(
        "Welcome, {}!\nUsername: {}\nName: {} {}\n",
        profile.firstname, profile.username, profile.firstname, profile.lastname
    );
    if let Some(url) = profile.avatar_url() {
        out.push_str(&format!("Photo: {url}\n"));
    }
    out
}

fn volume_summary(snapshot: &FitnessSnapshot) -> String {
    let (runs, distance) = snapshot
        .current_week()
        .map(|week| (week.runs, week.distance_km))
        .unwrap_or((0, 0.0));
    let mut out = format!(
        "Total Activities: {}\nRuns This Week: {runs}\nDistance This Week: {distance:.1} km\n",
        snapshot.total_activities
    );

    out.push_str("\nWeekly volume:\n");
    for week in &snapshot.weekly_volume {
        out.push_str(&format!(
            "  {}  {:>3} runs  {:>7.1} km  {:>5.0} min\n",
            week.week_start, week.runs, week.distance_km, week.time_minutes
        ));
    }
    out.push_str("\nMonthly volume:\n");
    for month in &snapshot.monthly_volume {
        out.push_str(&format!(
            "  {}  {:>3} runs  {:>7.1} km  {:>5.0} min\n",
            month.month, month.runs, month.distance_km, month.time_minutes
        ));
    }

    out.push('\n');
    match &snapshot.calendar {
        TrainingCalendar::Ready(block) => {
            out.push_str(&format!("Training calendar, week of {}:\n", block.week_of));
            for day in &block.days {
                out.push_str(&format!("  {} {}: {}\n", day.day, day.date, day.workout));
                if !day.reason.is_empty() {
                    out.push_str(&format!("      {}\n", day.reason));
                }
            }
        }
        TrainingCalendar::Failed(failure) => {
            out.push_str(&format!("Training calendar unavailable: {}\n", failure.error));
            if let Some(message) = &failure.message {
                out.push_str(&format!("  {message}\n"));
            }
        }
        TrainingCalendar::Absent => out.push_str("No training calendar available\n"),
    }
    out
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
