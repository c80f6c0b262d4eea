//! Presentation events emitted by tracker operations

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{Incident, IntakeForm};

/// Counters shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub active_emergencies: u32,
    pub available_resources: i64,
    /// Minutes; the latest estimate, not an average
    pub average_response: u32,
}

/// Something the presentation layer must reflect, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// Re-render the dashboard counters
    DashboardRefreshed(DashboardSnapshot),

    /// Re-render the incident list, newest first
    ListChanged(Vec<Incident>),

    /// Show the intake form with these values
    FormShown(IntakeForm),

    /// Clear and hide the intake form
    FormCleared,

    /// Blocking notification for the operator
    Warning(String),

    /// A full session reset will follow after the delay
    ResetScheduled(#[serde(with = "duration_millis")] Duration),

    /// All in-memory state was discarded
    SessionReset,
}

impl TrackerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            TrackerEvent::DashboardRefreshed(_) => "dashboard_refreshed",
            TrackerEvent::ListChanged(_) => "list_changed",
            TrackerEvent::FormShown(_) => "form_shown",
            TrackerEvent::FormCleared => "form_cleared",
            TrackerEvent::Warning(_) => "warning",
            TrackerEvent::ResetScheduled(_) => "reset_scheduled",
            TrackerEvent::SessionReset => "session_reset",
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
