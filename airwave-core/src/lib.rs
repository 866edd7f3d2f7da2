//! Airwave Core - Rights-aware broadcast scheduling
//!
//! This crate provides the scheduling engine for a broadcast back office:
//! license validity checks, the broadcast slot lifecycle (scheduled to
//! aired), capability-based permission gating, and the periodic sweep that
//! auto-transitions due slots.

pub mod auth;
pub mod clock;
pub mod config;
pub mod engine;
pub mod model;
pub mod repository;
pub mod rights;

// Re-export main types for convenient access
pub use auth::{Actor, Capability, CapabilitySet, Role, SessionContext};
pub use clock::{Clock, SystemClock};
pub use config::AirwaveConfig;
pub use engine::{ScheduleEngineHandle, ScheduleError, spawn_schedule_engine};
pub use model::{AssetId, BroadcastSlot, ContentAsset, LicenseGrant, SlotId, SlotStatus};
pub use repository::{InMemoryRepository, Repository, RepositoryError};
pub use rights::RightsViolation;

/// Core errors that can bubble up from any Airwave subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AirwaveError {
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

impl AirwaveError {
    /// Returns a user-friendly error message suitable for display.
    ///
    /// Rejections name the specific rule that was violated (which capability
    /// was missing, which rights check failed) rather than a generic failure.
    pub fn user_message(&self) -> String {
        match self {
            AirwaveError::Schedule(e) => match e {
                ScheduleError::PermissionDenied { capability } => {
                    format!("Permission denied: role lacks the {capability} capability")
                }
                ScheduleError::RightsInvalid {
                    asset_id,
                    violation,
                } => {
                    format!("Asset {asset_id} cannot be scheduled: {violation}")
                }
                ScheduleError::AlreadyAired { slot_id } => {
                    format!("Slot {slot_id} has already aired and is immutable")
                }
                ScheduleError::SlotNotFound { slot_id } => {
                    format!("Broadcast slot {slot_id} not found")
                }
                ScheduleError::AssetNotFound { asset_id } => {
                    format!("Content asset {asset_id} not found")
                }
                _ => "Scheduling error occurred".to_string(),
            },
            AirwaveError::Repository(_) => "Storage error occurred".to_string(),
            AirwaveError::Configuration { reason } => {
                format!("Configuration error: {reason}")
            }
        }
    }

    /// Checks if this error is due to a rejected user action rather than
    /// an internal failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AirwaveError::Schedule(
                ScheduleError::PermissionDenied { .. }
                    | ScheduleError::RightsInvalid { .. }
                    | ScheduleError::AlreadyAired { .. }
            )
        )
    }
}

pub type Result<T> = std::result::Result<T, AirwaveError>;
