use serde::{Deserialize, Deserializer, Serialize};

/// Athlete profile as relayed by the backend; fields are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_medium: Option<String>,
}

impl UserProfile {
    pub fn avatar_url(&self) -> Option<&str> {
        self.profile_medium
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub week_start: String,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub time_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub time_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub date: String,
    pub workout: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarBlock {
    pub week_of: String,
    pub days: Vec<DayPlan>,
}

/// Error block the backend returns in place of a calendar when generation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFailure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Generated training calendar. On the wire this is a bare object that is
/// either a calendar, an `{error, message}` block, or missing entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TrainingCalendar {
    Ready(CalendarBlock),
    Failed(CalendarFailure),
    #[default]
    Absent,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CalendarWire {
    Failed(CalendarFailure),
    Ready(CalendarBlock),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for TrainingCalendar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<CalendarWire>::deserialize(deserializer)? {
            Some(CalendarWire::Failed(failure)) => Self::Failed(failure),
            Some(CalendarWire::Ready(block)) => Self::Ready(block),
            Some(CalendarWire::Other(_)) | None => Self::Absent,
        })
    }
}

/// Training volume analysis for the connected athlete. Buckets are ordered
/// most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessSnapshot {
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub weekly_volume: Vec<WeekBucket>,
    #[serde(default)]
    pub monthly_volume: Vec<MonthBucket>,
    #[serde(default)]
    pub calendar: TrainingCalendar,
}

impl FitnessSnapshot {
    pub fn current_week(&self) -> Option<&WeekBucket> {
        self.weekly_volume.first()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
