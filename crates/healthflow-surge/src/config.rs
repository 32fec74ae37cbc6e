//! Surge engine configuration.

use healthflow_core::models::emergency::Severity;

/// Configuration for the reallocation engine.
#[derive(Debug, Clone)]
pub struct SurgeConfig {
    /// Share of each resource's total capacity released during a surge,
    /// in whole percent (default: 20).
    pub surge_percent: u32,
    /// Severity recorded on events opened by emergency activation.
    pub activation_severity: Severity,
    /// Title recorded on events opened by emergency activation.
    pub activation_title: String,
    /// `affected_resources` recorded on events opened by activation.
    pub affected_resources: String,
    /// Write a dashboard notification on activation and apply.
    pub notify: bool,
}

impl Default for SurgeConfig {
    fn default() -> Self {
        Self {
            surge_percent: 20,
            activation_severity: Severity::High,
            activation_title: "Emergency Mode Activated".into(),
            affected_resources: "All departments".into(),
            notify: true,
        }
    }
}
