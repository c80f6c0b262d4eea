//! Pure incident-tracking state core
//!
//! The tracker owns the incident list, the active counter, the shared
//! resource pool and the latest response estimate. Operations are
//! synchronous and report what changed as [`TrackerEvent`]s instead of
//! touching the presentation layer.

pub mod core;
pub mod events;
pub mod resources;

pub use self::core::{IncidentTracker, TrackerSettings, Transition};
pub use events::{DashboardSnapshot, TrackerEvent};
pub use resources::{response_estimate, response_estimate_for_code, ResourcePool};
