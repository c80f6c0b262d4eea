use serde::{Deserialize, Serialize};

use super::incident::{EmergencyType, Incident, Priority};
use crate::error::{AppError, Result};

/// Intake form contents as submitted by the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeForm {
    /// Emergency type code
    pub emergency_type: String,

    /// Free text, accepted as given
    pub location: String,

    /// Free text, accepted as given
    pub description: String,

    /// Priority code
    pub priority: String,
}

/// A request to register an incident with its codes resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRequest {
    pub emergency_type: EmergencyType,
    pub location: String,
    pub description: String,
    pub priority: Priority,
}

impl IntakeForm {
    pub fn new(
        emergency_type: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            emergency_type: emergency_type.into(),
            location: location.into(),
            description: description.into(),
            priority: priority.into(),
        }
    }

    /// Blank form with only the type preselected
    pub fn for_type(emergency_type: EmergencyType) -> Self {
        Self {
            emergency_type: emergency_type.to_string(),
            ..Default::default()
        }
    }

    /// Form prefilled with the current field values of an incident
    pub fn from_incident(incident: &Incident) -> Self {
        Self {
            emergency_type: incident.emergency_type.to_string(),
            location: incident.location.clone(),
            description: incident.description.clone(),
            priority: incident.priority.to_string(),
        }
    }

    /// Resolve the form's codes into typed values.
    ///
    /// Only the type code can fail: without a known type there is no cost
    /// to check against the pool. Priority codes outside the fixed set are
    /// carried through as `Priority::Other`.
    pub fn parse(&self) -> Result<IncidentRequest> {
        let emergency_type = self
            .emergency_type
            .trim()
            .parse::<EmergencyType>()
            .map_err(|_| {
                AppError::Validation(format!("Unknown emergency type '{}'", self.emergency_type))
            })?;

        Ok(IncidentRequest {
            emergency_type,
            location: self.location.clone(),
            description: self.description.clone(),
            priority: Priority::from(self.priority.trim().to_string()),
        })
    }
}

impl From<IncidentRequest> for Incident {
    fn from(request: IncidentRequest) -> Self {
        Incident::new(
            request.emergency_type,
            request.location,
            request.description,
            request.priority,
        )
    }
}
