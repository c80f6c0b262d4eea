use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// A single reported emergency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique, time-ordered identifier
    pub id: Uuid,

    /// Kind of emergency; fixes the resource cost
    pub emergency_type: EmergencyType,

    /// Free-text location
    pub location: String,

    /// Free-text description
    pub description: String,

    /// Priority chosen at intake
    pub priority: Priority,

    /// Lifecycle status
    pub status: IncidentStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Incident {
    /// Create a new active incident
    pub fn new(
        emergency_type: EmergencyType,
        location: String,
        description: String,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            emergency_type,
            location,
            description,
            priority,
            status: IncidentStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Check if incident is active
    pub fn is_active(&self) -> bool {
        self.status == IncidentStatus::Active
    }

    /// Resources held by this incident while it is active
    pub fn cost(&self) -> i64 {
        self.emergency_type.cost()
    }

    /// Move the incident to its terminal state
    pub fn resolve(&mut self) -> Result<()> {
        if !self.is_active() {
            return Err(AppError::InvalidStateTransition(format!(
                "Incident {} is already {}",
                self.id, self.status
            )));
        }
        self.status = IncidentStatus::Resolved;
        Ok(())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmergencyType {
    Medical,
    Fire,
    Security,
    Natural,
}

impl EmergencyType {
    /// Fixed resource cost debited on creation and credited on resolution
    pub const fn cost(self) -> i64 {
        match self {
            EmergencyType::Medical => 15,
            EmergencyType::Fire => 25,
            EmergencyType::Security => 10,
            EmergencyType::Natural => 30,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EmergencyType::Medical => "Emergencia Médica",
            EmergencyType::Fire => "Incendio",
            EmergencyType::Security => "Emergencia de Seguridad",
            EmergencyType::Natural => "Desastre Natural",
        }
    }
}

/// Priority as selected on the intake form.
///
/// Codes outside the fixed set are kept verbatim in `Other`; they create an
/// incident like any other priority but carry no response estimate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn code(&self) -> &str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "Media",
            Priority::Low => "Baja",
            Priority::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Priority::Other(_))
    }
}

impl FromStr for Priority {
    type Err = Infallible;

    fn from_str(code: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match code {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            other => Priority::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Priority {
    fn from(code: String) -> Self {
        match code.parse() {
            Ok(priority) => priority,
            Err(never) => match never {},
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentStatus {
    Active,
    Resolved,
}

/// Label for a type code, echoing codes that are not known types
pub fn type_label(code: &str) -> String {
    code.parse::<EmergencyType>()
        .map(|t| t.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

/// Label for a priority code, echoing codes that are not known priorities
pub fn priority_label(code: &str) -> String {
    Priority::from(code.to_string()).label().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn create_test_incident() -> Incident {
        Incident::new(
            EmergencyType::Fire,
            "Main St".to_string(),
            "smoke reported".to_string(),
            Priority::High,
        )
    }

    #[test]
    fn test_incident_creation() {
        let incident = create_test_incident();

        assert_eq!(incident.status, IncidentStatus::Active);
        assert_eq!(incident.emergency_type, EmergencyType::Fire);
        assert_eq!(incident.cost(), 25);
        assert!(incident.is_active());
    }

    #[test]
    fn test_incident_ids_are_unique() {
        let first = create_test_incident();
        let second = create_test_incident();

        assert_ne!(first.id, second.id);
        assert_eq!(first.id.get_version_num(), 7);
    }

    #[test]
    fn test_resolve_is_terminal() {
        let mut incident = create_test_incident();
        incident.resolve().unwrap();
        assert_eq!(incident.status, IncidentStatus::Resolved);

        let err = incident.resolve().unwrap_err();
        assert!(matches!(err, AppError::InvalidStateTransition(_)));
        assert_eq!(incident.status, IncidentStatus::Resolved);
    }

    #[test]
    fn test_cost_table() {
        let costs: Vec<i64> = EmergencyType::iter().map(EmergencyType::cost).collect();
        assert_eq!(costs, vec![15, 25, 10, 30]);
    }

    #[test]
    fn test_codes_round_trip_through_strum() {
        assert_eq!("medical".parse::<EmergencyType>().unwrap(), EmergencyType::Medical);
        assert_eq!(EmergencyType::Natural.to_string(), "natural");
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!(Priority::Medium.to_string(), "medium");
        assert_eq!(IncidentStatus::Resolved.to_string(), "resolved");
        assert!("flood".parse::<EmergencyType>().is_err());
    }

    #[test]
    fn test_label_lookups_fall_back_to_code() {
        assert_eq!(type_label("security"), "Emergencia de Seguridad");
        assert_eq!(type_label("flood"), "flood");
        assert_eq!(priority_label("medium"), "Media");
        assert_eq!(priority_label("urgent"), "urgent");
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        let json = serde_json::to_value(create_test_incident()).unwrap();
        assert_eq!(json["emergency_type"], "fire");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_unknown_priority_keeps_its_code() {
        let priority: Priority = "urgent".parse().unwrap();
        assert_eq!(priority, Priority::Other("urgent".to_string()));
        assert!(!priority.is_known());
        assert_eq!(priority.label(), "urgent");
        assert_eq!(priority.to_string(), "urgent");

        let incident = Incident::new(
            EmergencyType::Medical,
            "Ward 3".to_string(),
            String::new(),
            priority,
        );
        let json = serde_json::to_value(&incident).unwrap();
        assert_eq!(json["priority"], "urgent");
        let back: Incident = serde_json::from_value(json).unwrap();
        assert_eq!(back.priority, Priority::Other("urgent".to_string()));
    }
}
