//! Incident tracker state machine

use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::events::{DashboardSnapshot, TrackerEvent};
use super::resources::{response_estimate_for_code, ResourcePool};
use crate::config::TrackerConfig;
use crate::error::{AppError, Result};
use crate::models::{EmergencyType, Incident, IntakeForm};

/// Settings that survive a session reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Pool balance at session start
    pub initial_resources: i64,

    /// Whether resolving an incident schedules a full reset
    pub reset_on_resolve: bool,

    /// Delay before the scheduled reset
    pub reset_delay: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            initial_resources: 100,
            reset_on_resolve: true,
            reset_delay: Duration::from_millis(500),
        }
    }
}

impl From<&TrackerConfig> for TrackerSettings {
    fn from(config: &TrackerConfig) -> Self {
        Self {
            initial_resources: config.initial_resources,
            reset_on_resolve: config.reset_on_resolve,
            reset_delay: Duration::from_millis(config.reset_delay_ms),
        }
    }
}

/// Result of a successful tracker operation
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T = ()> {
    pub output: T,
    pub events: Vec<TrackerEvent>,
}

impl<T> Transition<T> {
    fn new(output: T, events: Vec<TrackerEvent>) -> Self {
        Self { output, events }
    }
}

/// Owns the incident list and the dashboard counters.
///
/// Every operation either applies completely or returns an error with the
/// tracker untouched. Presentation is never touched directly; callers apply
/// the returned events.
#[derive(Debug, Clone)]
pub struct IncidentTracker {
    settings: TrackerSettings,
    /// Newest first
    incidents: Vec<Incident>,
    active_count: u32,
    pool: ResourcePool,
    response_estimate: u32,
}

impl IncidentTracker {
    pub fn new(settings: TrackerSettings) -> Self {
        let pool = ResourcePool::new(settings.initial_resources);
        Self {
            settings,
            incidents: Vec::new(),
            active_count: 0,
            pool,
            response_estimate: 0,
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            active_emergencies: self.active_count,
            available_resources: self.pool.available(),
            average_response: self.response_estimate,
        }
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn get_incident(&self, id: &Uuid) -> Option<&Incident> {
        self.incidents.iter().find(|incident| incident.id == *id)
    }

    /// Prepare the intake form for a type. Creates nothing.
    pub fn open_form(&mut self, emergency_type: EmergencyType) -> Transition {
        self.pool.clamp_non_negative();
        self.response_estimate = 0;

        debug!(emergency_type = %emergency_type, "Intake form opened");

        Transition::new(
            (),
            vec![
                TrackerEvent::FormShown(IntakeForm::for_type(emergency_type)),
                self.dashboard_event(),
            ],
        )
    }

    /// Register a new incident and debit its cost from the pool
    pub fn submit_incident(&mut self, form: &IntakeForm) -> Result<Transition<Uuid>> {
        let request = form.parse()?;

        if !self.pool.can_afford(request.emergency_type) {
            warn!(
                emergency_type = %request.emergency_type,
                required = request.emergency_type.cost(),
                available = self.pool.available(),
                "Rejected incident: insufficient resources"
            );
            return Err(AppError::InsufficientResources {
                emergency_type: request.emergency_type,
                required: request.emergency_type.cost(),
                available: self.pool.available(),
            });
        }

        self.response_estimate = response_estimate_for_code(request.priority.code());
        self.pool.debit(request.emergency_type);

        let incident = Incident::from(request);
        let id = incident.id;

        info!(
            incident_id = %id,
            emergency_type = %incident.emergency_type,
            priority = %incident.priority,
            available_resources = self.pool.available(),
            "Incident registered"
        );

        self.incidents.insert(0, incident);
        self.active_count += 1;

        Ok(Transition::new(
            id,
            vec![
                self.dashboard_event(),
                self.render_list(),
                TrackerEvent::FormCleared,
            ],
        ))
    }

    /// Resolve an active incident and credit its cost back to the pool
    pub fn resolve_incident(&mut self, id: &Uuid) -> Result<Transition> {
        let incident = self
            .incidents
            .iter_mut()
            .find(|incident| incident.id == *id)
            .ok_or_else(|| AppError::incident_not_found(id))?;

        incident.resolve()?;
        let emergency_type = incident.emergency_type;

        self.active_count -= 1;
        self.pool.credit(emergency_type);

        info!(
            incident_id = %id,
            emergency_type = %emergency_type,
            available_resources = self.pool.available(),
            "Incident resolved"
        );

        let mut events = vec![self.dashboard_event(), self.render_list()];
        if self.settings.reset_on_resolve {
            events.push(TrackerEvent::ResetScheduled(self.settings.reset_delay));
        }

        Ok(Transition::new((), events))
    }

    /// Show an existing incident in the intake form. Changes no state.
    pub fn load_incident_into_form(&self, id: &Uuid) -> Result<Transition<IntakeForm>> {
        let incident = self
            .get_incident(id)
            .ok_or_else(|| AppError::incident_not_found(id))?;
        let form = IntakeForm::from_incident(incident);

        Ok(Transition::new(
            form.clone(),
            vec![TrackerEvent::FormShown(form)],
        ))
    }

    /// Current list for rendering, active and resolved, newest first
    pub fn render_list(&self) -> TrackerEvent {
        TrackerEvent::ListChanged(self.incidents.clone())
    }

    pub fn dashboard_event(&self) -> TrackerEvent {
        TrackerEvent::DashboardRefreshed(self.snapshot())
    }

    /// Discard all in-memory state, as a page reload would
    pub fn reset(&mut self) -> Transition {
        info!(
            discarded_incidents = self.incidents.len(),
            "Session state reset"
        );
        *self = Self::new(self.settings.clone());

        Transition::new(
            (),
            vec![
                TrackerEvent::SessionReset,
                self.dashboard_event(),
                self.render_list(),
                TrackerEvent::FormCleared,
            ],
        )
    }
}

impl Default for IncidentTracker {
    fn default() -> Self {
        Self::new(TrackerSettings::default())
    }
}
