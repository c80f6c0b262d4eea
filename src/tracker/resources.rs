//! Shared response resource pool and response-time estimates

use serde::{Deserialize, Serialize};

use crate::models::{EmergencyType, Priority};

/// Process-wide resource budget shared by all incidents.
///
/// The balance is signed: only `clamp_non_negative` ever floors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    available: i64,
}

impl ResourcePool {
    pub fn new(available: i64) -> Self {
        Self { available }
    }

    pub fn available(&self) -> i64 {
        self.available
    }

    pub fn can_afford(&self, emergency_type: EmergencyType) -> bool {
        self.available >= emergency_type.cost()
    }

    pub fn debit(&mut self, emergency_type: EmergencyType) {
        self.available -= emergency_type.cost();
    }

    pub fn credit(&mut self, emergency_type: EmergencyType) {
        self.available += emergency_type.cost();
    }

    pub fn clamp_non_negative(&mut self) {
        self.available = self.available.max(0);
    }
}

/// Expected response time in minutes for a priority
pub fn response_estimate(priority: &Priority) -> u32 {
    match priority {
        Priority::High => 5,
        Priority::Medium => 10,
        Priority::Low => 15,
        Priority::Other(_) => 0,
    }
}

/// Expected response time for a raw priority code; unknown codes map to 0
pub fn response_estimate_for_code(code: &str) -> u32 {
    response_estimate(&Priority::from(code.to_string()))
}
