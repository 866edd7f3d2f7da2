//! Centralized configuration for Airwave.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Airwave components.
///
/// Groups related configuration settings into logical sections.
#[derive(Debug, Clone, Default)]
pub struct AirwaveConfig {
    pub scheduler: SchedulerConfig,
}

/// Schedule engine and sweep configuration.
///
/// Controls the actor command channel and the cadence of the periodic
/// sweep that transitions due slots to aired.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Interval between automatic sweep passes.
    ///
    /// A tuning parameter, not a correctness requirement: the sweep never
    /// transitions a slot before its scheduled time, and a shorter interval
    /// only tightens the bound on how late the transition lands.
    pub sweep_interval: Duration,
    /// Whether the engine actor runs the periodic sweep at all. Disabled
    /// in tests that drive sweeps explicitly.
    pub auto_sweep: bool,
    /// Capacity of the engine actor command channel.
    pub command_buffer: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(60),
            auto_sweep: true,
            command_buffer: 100,
        }
    }
}

impl SchedulerConfig {
    /// Configuration for tests that call `sweep` themselves.
    pub fn manual_sweep() -> Self {
        Self {
            auto_sweep: false,
            ..Self::default()
        }
    }
}
