//! Broadcast slots and their derived display status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AssetId, SlotId};

/// A planned or completed airing of one asset at one timestamp.
///
/// The persisted lifecycle has exactly two states: scheduled
/// (`aired == false`) and aired (`aired == true`, terminal). There is no
/// cancellation state; removal is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastSlot {
    pub id: SlotId,
    /// Asset this slot airs. A weak reference: the slot never owns the
    /// asset, it only looks it up.
    pub asset_id: AssetId,
    /// When the airing is planned to start.
    pub scheduled_at: DateTime<Utc>,
    /// Whether the airing has happened. Flipping this to true consumes one
    /// showing on the asset.
    pub aired: bool,
    /// Free-text annotations for the planner.
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl BroadcastSlot {
    /// Display status derived from the persisted state and the current
    /// time. Presentation logic only; it never adds a third stored state.
    pub fn status(&self, now: DateTime<Utc>) -> SlotStatus {
        if self.aired {
            SlotStatus::Aired
        } else if self.scheduled_at <= now {
            SlotStatus::OnAir
        } else {
            SlotStatus::Planned
        }
    }
}

/// Read-only slot status for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Scheduled in the future.
    Planned,
    /// Scheduled time has passed but the sweep has not transitioned it yet.
    OnAir,
    /// Terminal: the airing happened.
    Aired,
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SlotStatus::Planned => "planned",
            SlotStatus::OnAir => "on air",
            SlotStatus::Aired => "aired",
        };
        write!(f, "{label}")
    }
}
