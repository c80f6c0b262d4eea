//! UI-binding layer
//!
//! A [`Session`] owns the [`IncidentTracker`] and applies [`UiAction`]s one
//! at a time from a queue. Each action runs to completion before the next
//! is taken, so the tracker needs no locking. Resulting events are published
//! on a broadcast channel for renderers to consume.

use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{EmergencyType, IntakeForm};
use crate::tracker::{IncidentTracker, TrackerEvent, TrackerSettings};

/// Default event channel capacity
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Input from the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Type button clicked
    OpenForm(EmergencyType),

    /// Intake form submitted
    Submit(IntakeForm),

    /// Resolve affordance clicked
    Resolve(Uuid),

    /// Existing incident selected for viewing in the form
    LoadIntoForm(Uuid),

    /// Re-render the incident list
    ShowList,

    /// Re-render the dashboard counters
    ShowDashboard,

    /// Discard all state
    Reset,
}

/// Cloneable handle used to feed actions into a running session
#[derive(Clone)]
pub struct SessionHandle {
    actions: mpsc::UnboundedSender<UiAction>,
    events: broadcast::Sender<TrackerEvent>,
}

impl SessionHandle {
    /// Queue an action for the session
    pub fn dispatch(&self, action: UiAction) -> Result<()> {
        self.actions
            .send(action)
            .map_err(|_| AppError::Internal("Session is no longer running".to_string()))
    }

    /// Subscribe to presentation events
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }
}

/// Single-threaded session state machine
pub struct Session {
    tracker: IncidentTracker,
    actions_rx: mpsc::UnboundedReceiver<UiAction>,
    /// Weak so pending reset timers do not keep the session alive
    actions_tx: mpsc::WeakUnboundedSender<UiAction>,
    events: broadcast::Sender<TrackerEvent>,
}

impl Session {
    /// Create a session and the handle that drives it
    pub fn new(settings: TrackerSettings) -> (Self, SessionHandle) {
        Self::with_capacity(settings, DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_capacity(settings: TrackerSettings, capacity: usize) -> (Self, SessionHandle) {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(capacity);

        let session = Self {
            tracker: IncidentTracker::new(settings),
            actions_rx,
            actions_tx: actions_tx.downgrade(),
            events: events.clone(),
        };
        let handle = SessionHandle {
            actions: actions_tx,
            events,
        };

        (session, handle)
    }

    pub fn tracker(&self) -> &IncidentTracker {
        &self.tracker
    }

    /// Process actions until every handle is dropped
    pub async fn run(mut self) {
        info!("Session started");

        while let Some(action) = self.actions_rx.recv().await {
            self.handle(action);
        }

        info!("Session stopped");
    }

    /// Apply one action, publish its events and return them
    pub fn handle(&mut self, action: UiAction) -> Vec<TrackerEvent> {
        debug!(action = ?action, "Handling UI action");

        let outcome = match action {
            UiAction::OpenForm(emergency_type) => {
                Ok(self.tracker.open_form(emergency_type).events)
            }
            UiAction::Submit(form) => self.tracker.submit_incident(&form).map(|t| t.events),
            UiAction::Resolve(id) => self.tracker.resolve_incident(&id).map(|t| t.events),
            UiAction::LoadIntoForm(id) => {
                self.tracker.load_incident_into_form(&id).map(|t| t.events)
            }
            UiAction::ShowList => Ok(vec![self.tracker.render_list()]),
            UiAction::ShowDashboard => Ok(vec![self.tracker.dashboard_event()]),
            UiAction::Reset => Ok(self.tracker.reset().events),
        };

        let events = match outcome {
            Ok(events) => events,
            Err(err) => self.report(err),
        };

        for event in &events {
            if let TrackerEvent::ResetScheduled(delay) = event {
                self.schedule_reset(*delay);
            }
            self.publish(event.clone());
        }

        events
    }

    fn report(&self, err: AppError) -> Vec<TrackerEvent> {
        match err {
            err if err.is_user_facing() => {
                warn!(error_code = err.error_code(), "{}", err);
                vec![TrackerEvent::Warning(err.to_string())]
            }
            AppError::NotFound(_) | AppError::InvalidStateTransition(_) => {
                debug!(error_code = err.error_code(), "Ignored action: {}", err);
                Vec::new()
            }
            err => {
                error!(error_code = err.error_code(), "Action failed: {}", err);
                Vec::new()
            }
        }
    }

    fn publish(&self, event: TrackerEvent) {
        let event_type = event.event_type();
        if self.events.send(event).is_err() {
            debug!(event_type, "No subscribers for event");
        }
    }

    /// One-shot timer feeding a reset back into the action queue
    fn schedule_reset(&self, delay: Duration) {
        let actions = self.actions_tx.clone();

        debug!(delay_ms = delay.as_millis() as u64, "Session reset scheduled");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match actions.upgrade() {
                Some(tx) => {
                    if tx.send(UiAction::Reset).is_err() {
                        debug!("Session closed before scheduled reset");
                    }
                }
                None => debug!("Session closed before scheduled reset"),
            }
        });
    }
}
