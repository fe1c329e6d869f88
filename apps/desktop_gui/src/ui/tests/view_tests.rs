use super::*;
use client_core::FailurePolicy;
use shared::{
    domain::{CalendarBlock, DayPlan, UserProfile},
    protocol::AuthReturn,
};

use crate::controller::reducer::reduce;

fn texts(nodes: &[Node]) -> Vec<String> {
    let mut out = Vec::new();
    for node in nodes {
        collect_text(node, &mut out);
    }
    out
}

fn collect_text(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Title(text)
        | Node::Subtitle(text)
        | Node::Heading(text)
        | Node::Text(text)
        | Node::Muted(text)
        | Node::Spinner(text) => out.push(text.clone()),
        Node::Notice { message, .. } => out.push(message.clone()),
        Node::Section { children, .. } => {
            for child in children {
                collect_text(child, out);
            }
        }
        Node::LabeledValue { label, value } => {
            out.push(label.clone());
            out.push(value.clone());
        }
        Node::Button { label, .. } | Node::Link { label, .. } => out.push(label.clone()),
        Node::Tabs { .. } => out.extend(ViewTab::ALL.iter().map(|tab| tab.label().to_string())),
        Node::Stats(stats) => {
            for stat in stats {
                out.push(stat.label.clone());
                out.push(stat.value.clone());
            }
        }
        Node::VolumeRow {
            label,
            runs,
            distance,
            time,
        } => out.extend([label.clone(), runs.clone(), distance.clone(), time.clone()]),
        Node::DayCard {
            day,
            date,
            workout,
            reason,
        } => out.extend([day.clone(), date.clone(), workout.clone(), reason.clone()]),
        Node::ErrorBox { title, message } => {
            out.push(title.clone());
            out.extend(message.clone());
        }
    }
}

fn has_text(nodes: &[Node], needle: &str) -> bool {
    texts(nodes).iter().any(|text| text.contains(needle))
}

fn section_ids(nodes: &[Node]) -> Vec<SectionId> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Section { id, .. } => Some(*id),
            _ => None,
        })
        .collect()
}

fn find_button(nodes: &[Node], wanted: UiAction) -> Option<(String, bool)> {
    nodes.iter().find_map(|node| match node {
        Node::Button {
            label,
            action,
            enabled,
        } if *action == wanted => Some((label.clone(), *enabled)),
        Node::Section { children, .. } => find_button(children, wanted),
        _ => None,
    })
}

fn count_day_cards(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::DayCard { .. } => 1,
            Node::Section { children, .. } => count_day_cards(children),
            _ => 0,
        })
        .sum()
}

fn connected(snapshot: Option<FitnessSnapshot>) -> Session {
    let mut session = Session::new(FailurePolicy::silent());
    session.user = Some(UserProfile {
        firstname: "Jane".to_string(),
        lastname: "Doe".to_string(),
        username: "jdoe".to_string(),
        profile_medium: Some("https://cdn.example.test/jane.jpg".to_string()),
    });
    session.auth_state = Some("abc123".to_string());
    session.fitness_data = snapshot;
    session
}

fn snapshot_with(calendar: TrainingCalendar) -> FitnessSnapshot {
    FitnessSnapshot {
        total_activities: 40,
        weekly_volume: vec![
            WeekBucket {
                week_start: "2024-03-04".to_string(),
                runs: 1,
                distance_km: 12.345,
                time_minutes: 64.6,
            },
            WeekBucket {
                week_start: "2024-02-26".to_string(),
                runs: 4,
                distance_km: 30.0,
                time_minutes: 180.0,
            },
        ],
        monthly_volume: vec![MonthBucket {
            month: "2024-03".to_string(),
            runs: 5,
            distance_km: 42.3,
            time_minutes: 245.0,
        }],
        calendar,
    }
}

#[test]
fn logged_out_shows_header_backend_and_connect_prompt() {
    let session = Session::new(FailurePolicy::silent());
    let nodes = render(&session);

    assert_eq!(nodes[0], Node::Title("Stryde".to_string()));
    assert_eq!(
        nodes[1],
        Node::Subtitle("Your Personal Running Coach".to_string())
    );
    assert_eq!(
        section_ids(&nodes),
        vec![SectionId::Backend, SectionId::Connect]
    );
    assert!(has_text(&nodes, "Backend response:"));
    assert!(has_text(&nodes, "Connect your Strava account to get started"));
    assert_eq!(
        find_button(&nodes, UiAction::Connect),
        Some(("Connect with Strava".to_string(), true))
    );
    assert!(!nodes.iter().any(|node| matches!(node, Node::Tabs { .. })));
}

#[test]
fn ping_button_reflects_loading() {
    let mut session = Session::new(FailurePolicy::silent());
    assert_eq!(
        find_button(&render(&session), UiAction::Ping),
        Some(("Ping Backend".to_string(), true))
    );

    reduce(&mut session, UiEvent::PingRequested);
    assert_eq!(
        find_button(&render(&session), UiAction::Ping),
        Some(("Loading...".to_string(), false))
    );
}

#[test]
fn pending_oauth_return_shows_profile_spinner() {
    let mut session = Session::new(FailurePolicy::silent());
    reduce(
        &mut session,
        UiEvent::Mounted {
            auth_return: Some(AuthReturn {
                state: "abc123".to_string(),
            }),
        },
    );
    let nodes = render(&session);
    assert!(has_text(&nodes, "Loading your profile..."));
    assert_eq!(
        find_button(&nodes, UiAction::Connect),
        Some(("Connect with Strava".to_string(), false))
    );
}

#[test]
fn connected_user_sees_profile_and_exactly_one_tab_body() {
    let session = connected(Some(snapshot_with(TrainingCalendar::Absent)));
    let nodes = render(&session);

    assert!(has_text(&nodes, "Welcome, Jane!"));
    assert!(has_text(&nodes, "Username:"));
    assert!(has_text(&nodes, "jdoe"));
    assert!(has_text(&nodes, "Name: Jane Doe"));
    assert!(!has_text(&nodes, "Connect with Strava"));
    assert!(nodes.iter().any(|node| matches!(
        node,
        Node::Section { id: SectionId::Profile, children }
            if children.iter().any(|child| matches!(child, Node::Link { .. }))
    )));
    assert_eq!(
        section_ids(&nodes),
        vec![SectionId::Backend, SectionId::Profile, SectionId::Overview]
    );

    let mut calendar = session.clone();
    calendar.current_view = ViewTab::Calendar;
    assert_eq!(
        section_ids(&render(&calendar)),
        vec![SectionId::Backend, SectionId::Profile, SectionId::Calendar]
    );
}

#[test]
fn overview_shows_current_week_and_history() {
    let session = connected(Some(snapshot_with(TrainingCalendar::Absent)));
    let nodes = render(&session);

    let stats = nodes
        .iter()
        .find_map(|node| match node {
            Node::Section {
                id: SectionId::Overview,
                children,
            } => children.iter().find_map(|child| match child {
                Node::Stats(stats) => Some(stats.clone()),
                _ => None,
            }),
            _ => None,
        })
        .expect("stats row");
    let values: Vec<_> = stats
        .iter()
        .map(|stat| (stat.label.as_str(), stat.value.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("Total Activities", "40"),
            ("Runs This Week", "1"),
            ("Distance This Week", "12.3 km"),
        ]
    );

    assert!(has_text(&nodes, "Week of Mar 4, 2024"));
    assert!(has_text(&nodes, "1 run"));
    assert!(has_text(&nodes, "4 runs"));
    assert!(has_text(&nodes, "65 min"));
    assert!(has_text(&nodes, "Mar 2024"));
}

#[test]
fn empty_weekly_volume_falls_back_to_zero() {
    let snapshot = FitnessSnapshot {
        total_activities: 3,
        ..FitnessSnapshot::default()
    };
    let nodes = render(&connected(Some(snapshot)));

    assert!(has_text(&nodes, "0.0 km"));
    assert!(texts(&nodes).iter().any(|text| text == "0"));
    assert!(has_text(&nodes, "No runs in the last 8 weeks"));
    assert!(has_text(&nodes, "No runs in the last 6 months"));
}

#[test]
fn tab_body_reports_loading_and_missing_data() {
    let mut session = connected(None);
    assert!(has_text(&render(&session), "No training data available"));

    session.fitness_loading = true;
    let nodes = render(&session);
    assert!(has_text(&nodes, "Loading training data..."));
    assert!(!has_text(&nodes, "No training data available"));
}

#[test]
fn calendar_tab_lists_planned_days() {
    let block = CalendarBlock {
        week_of: "2024-03-11".to_string(),
        days: vec![
            DayPlan {
                day: "Monday".to_string(),
                date: "2024-03-11".to_string(),
                workout: "Easy 5 km".to_string(),
                reason: "Recovery after long run".to_string(),
            },
            DayPlan {
                day: "Tuesday".to_string(),
                date: "2024-03-12".to_string(),
                workout: "Rest".to_string(),
                reason: String::new(),
            },
        ],
    };
    let mut session = connected(Some(snapshot_with(TrainingCalendar::Ready(block))));
    session.current_view = ViewTab::Calendar;
    let nodes = render(&session);

    assert!(has_text(&nodes, "Week of Mar 11, 2024"));
    assert!(has_text(&nodes, "Easy 5 km"));
    assert_eq!(count_day_cards(&nodes), 2);
    assert!(!has_text(&nodes, "Total Activities"));
}

#[test]
fn calendar_failure_is_shown_instead_of_days() {
    let mut session = connected(Some(snapshot_with(TrainingCalendar::Failed(
        CalendarFailure {
            error: "no_data".to_string(),
            message: Some("x".to_string()),
        },
    ))));
    session.current_view = ViewTab::Calendar;
    let nodes = render(&session);

    assert!(has_text(&nodes, "no_data"));
    assert!(texts(&nodes).iter().any(|text| text == "x"));
    assert_eq!(count_day_cards(&nodes), 0);
}

#[test]
fn absent_calendar_has_placeholder() {
    let mut session = connected(Some(snapshot_with(TrainingCalendar::Absent)));
    session.current_view = ViewTab::Calendar;
    assert!(has_text(&render(&session), "No training calendar available"));
}

#[test]
fn notice_is_rendered_with_dismiss_action() {
    let mut session = Session::new(FailurePolicy::silent());
    session.notice = Some("Loading training data failed: boom".to_string());
    let nodes = render(&session);
    assert!(nodes.contains(&Node::Notice {
        message: "Loading training data failed: boom".to_string(),
        dismiss: UiAction::DismissNotice,
    }));
}

#[test]
fn labels_fall_back_to_raw_values() {
    assert_eq!(month_label("2024-11"), "Nov 2024");
    assert_eq!(month_label("late 2024"), "late 2024");
    assert_eq!(day_label("2024-03-04"), "Mar 4, 2024");
    assert_eq!(day_label("soon"), "soon");
    assert_eq!(format_distance(5.0), "5.0 km");
    assert_eq!(format_minutes(59.5), "60 min");
    assert_eq!(runs_label(0), "0 runs");
}
