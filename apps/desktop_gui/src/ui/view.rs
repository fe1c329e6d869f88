//! Render tree: a pure function from the session to what the window shows.
//! Painting lives in `panels`; nothing here touches egui.

use chrono::NaiveDate;
use shared::domain::{CalendarFailure, FitnessSnapshot, MonthBucket, TrainingCalendar, WeekBucket};

use crate::controller::events::UiEvent;
use crate::controller::reducer::{Session, ViewTab};

pub const APP_TITLE: &str = "Stryde";
pub const APP_SUBTITLE: &str = "Your Personal Running Coach";

/// Clickable things in the render tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Ping,
    Connect,
    SelectTab(ViewTab),
    DismissNotice,
}

impl UiAction {
    pub fn into_event(self) -> UiEvent {
        match self {
            Self::Ping => UiEvent::PingRequested,
            Self::Connect => UiEvent::ConnectRequested,
            Self::SelectTab(tab) => UiEvent::ViewChanged(tab),
            Self::DismissNotice => UiEvent::NoticeDismissed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Backend,
    Connect,
    Profile,
    Overview,
    Calendar,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Title(String),
    Subtitle(String),
    Notice {
        message: String,
        dismiss: UiAction,
    },
    Section {
        id: SectionId,
        children: Vec<Node>,
    },
    Heading(String),
    Text(String),
    Muted(String),
    LabeledValue {
        label: String,
        value: String,
    },
    Button {
        label: String,
        action: UiAction,
        enabled: bool,
    },
    Link {
        label: String,
        url: String,
    },
    Spinner(String),
    Tabs {
        selected: ViewTab,
    },
    Stats(Vec<Stat>),
    VolumeRow {
        label: String,
        runs: String,
        distance: String,
        time: String,
    },
    DayCard {
        day: String,
        date: String,
        workout: String,
        reason: String,
    },
    ErrorBox {
        title: String,
        message: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

pub fn render(session: &Session) -> Vec<Node> {
    let mut nodes = vec![
        Node::Title(APP_TITLE.to_string()),
        Node::Subtitle(APP_SUBTITLE.to_string()),
    ];

    if let Some(message) = &session.notice {
        nodes.push(Node::Notice {
            message: message.clone(),
            dismiss: UiAction::DismissNotice,
        });
    }

    nodes.push(backend_section(session));

    match &session.user {
        None => nodes.push(connect_section(session)),
        Some(user) => {
            let mut profile = vec![
                Node::Heading(format!("Welcome, {}!", user.firstname)),
                Node::LabeledValue {
                    label: "Username:".to_string(),
                    value: user.username.clone(),
                },
                Node::Text(format!("Name: {} {}", user.firstname, user.lastname)),
            ];
            if let Some(url) = user.avatar_url() {
                profile.push(Node::Link {
                    label: "Profile photo".to_string(),
                    url: url.to_string(),
                });
            }
            nodes.push(Node::Section {
                id: SectionId::Profile,
                children: profile,
            });
            nodes.push(Node::Tabs {
                selected: session.current_view,
            });
            nodes.push(tab_section(session));
        }
    }

    nodes
}

fn backend_section(session: &Session) -> Node {
    let label = if session.loading {
        "Loading..."
    } else {
        "Ping Backend"
    };
    Node::Section {
        id: SectionId::Backend,
        children: vec![
            Node::Button {
                label: label.to_string(),
                action: UiAction::Ping,
                enabled: !session.loading,
            },
            Node::LabeledValue {
                label: "Backend response:".to_string(),
                value: session.message.clone(),
            },
        ],
    }
}

fn connect_section(session: &Session) -> Node {
    let mut children = vec![
        Node::Button {
            label: "Connect with Strava".to_string(),
            action: UiAction::Connect,
            enabled: session.can_connect(),
        },
        Node::Muted("Connect your Strava account to get started".to_string()),
    ];
    if session.profile_pending() {
        children.push(Node::Spinner("Loading your profile...".to_string()));
    }
    Node::Section {
        id: SectionId::Connect,
        children,
    }
}

fn tab_section(session: &Session) -> Node {
    let id = match session.current_view {
        ViewTab::Overview => SectionId::Overview,
        ViewTab::Calendar => SectionId::Calendar,
    };

    let children = match (&session.fitness_data, session.fitness_loading) {
        (_, true) => vec![Node::Spinner("Loading training data...".to_string())],
        (None, false) => vec![Node::Muted("No training data available".to_string())],
        (Some(snapshot), false) => match session.current_view {
            ViewTab::Overview => overview(snapshot),
            ViewTab::Calendar => calendar(&snapshot.calendar),
        },
    };

    Node::Section { id, children }
}

fn overview(snapshot: &FitnessSnapshot) -> Vec<Node> {
    let (runs, distance) = snapshot
        .current_week()
        .map(|week| (week.runs, week.distance_km))
        .unwrap_or((0, 0.0));

    let mut nodes = vec![Node::Stats(vec![
        Stat {
            label: "Total Activities".to_string(),
            value: snapshot.total_activities.to_string(),
        },
        Stat {
            label: "Runs This Week".to_string(),
            value: runs.to_string(),
        },
        Stat {
            label: "Distance This Week".to_string(),
            value: format_distance(distance),
        },
    ])];

    nodes.push(Node::Heading("Weekly Volume".to_string()));
    if snapshot.weekly_volume.is_empty() {
        nodes.push(Node::Muted("No runs in the last 8 weeks".to_string()));
    }
    nodes.extend(snapshot.weekly_volume.iter().map(week_row));

    nodes.push(Node::Heading("Monthly Volume".to_string()));
    if snapshot.monthly_volume.is_empty() {
        nodes.push(Node::Muted("No runs in the last 6 months".to_string()));
    }
    nodes.extend(snapshot.monthly_volume.iter().map(month_row));

    nodes
}

fn week_row(week: &WeekBucket) -> Node {
    Node::VolumeRow {
        label: format!("Week of {}", day_label(&week.week_start)),
        runs: runs_label(week.runs),
        distance: format_distance(week.distance_km),
        time: format_minutes(week.time_minutes),
    }
}

fn month_row(month: &MonthBucket) -> Node {
    Node::VolumeRow {
        label: month_label(&month.month),
        runs: runs_label(month.runs),
        distance: format_distance(month.distance_km),
        time: format_minutes(month.time_minutes),
    }
}

fn calendar(calendar: &TrainingCalendar) -> Vec<Node> {
    match calendar {
        TrainingCalendar::Ready(block) => {
            let mut nodes = vec![Node::Heading(format!(
                "Week of {}",
                day_label(&block.week_of)
            ))];
            nodes.extend(block.days.iter().map(|day| Node::DayCard {
                day: day.day.clone(),
                date: day.date.clone(),
                workout: day.workout.clone(),
                reason: day.reason.clone(),
            }));
            nodes
        }
        TrainingCalendar::Failed(CalendarFailure { error, message }) => vec![Node::ErrorBox {
            title: error.clone(),
            message: message.clone(),
        }],
        TrainingCalendar::Absent => {
            vec![Node::Muted("No training calendar available".to_string())]
        }
    }
}

pub fn format_distance(km: f64) -> String {
    format!("{km:.1} km")
}

pub fn format_minutes(minutes: f64) -> String {
    format!("{minutes:.0} min")
}

fn runs_label(runs: u32) -> String {
    match runs {
        1 => "1 run".to_string(),
        n => format!("{n} runs"),
    }
}

/// `2024-03` becomes `Mar 2024`; anything unparseable is shown as sent.
pub fn month_label(raw: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `2024-03-04` becomes `Mar 4, 2024`; anything unparseable is shown as sent.
pub fn day_label(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
