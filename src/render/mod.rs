//! Presentation adapters turning tracker events into output

pub mod html;
pub mod text;

pub use html::HtmlRenderer;
pub use text::TextRenderer;

use crate::config::OutputFormat;
use crate::models::{Incident, IntakeForm};
use crate::tracker::{DashboardSnapshot, TrackerEvent};

/// Timestamp format used for the "reported" line
pub const REPORTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders tracker state for one output medium
pub trait Renderer: Send + Sync {
    fn dashboard(&self, snapshot: &DashboardSnapshot) -> String;

    fn incident_list(&self, incidents: &[Incident]) -> String;

    fn form(&self, form: &IntakeForm) -> String;

    fn form_cleared(&self) -> String;

    fn warning(&self, message: &str) -> String;

    fn session_reset(&self) -> String;
}

/// Build the renderer for a configured output format
pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Html => Box::new(HtmlRenderer),
    }
}

/// Output for an event, if it has a visible effect
pub fn render_event(renderer: &dyn Renderer, event: &TrackerEvent) -> Option<String> {
    match event {
        TrackerEvent::DashboardRefreshed(snapshot) => Some(renderer.dashboard(snapshot)),
        TrackerEvent::ListChanged(incidents) => Some(renderer.incident_list(incidents)),
        TrackerEvent::FormShown(form) => Some(renderer.form(form)),
        TrackerEvent::FormCleared => Some(renderer.form_cleared()),
        TrackerEvent::Warning(message) => Some(renderer.warning(message)),
        TrackerEvent::SessionReset => Some(renderer.session_reset()),
        TrackerEvent::ResetScheduled(_) => None,
    }
}
