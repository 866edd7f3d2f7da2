//! Command definitions for the schedule engine actor model.

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use super::ScheduleError;
use crate::auth::Actor;
use crate::model::{AssetId, BroadcastSlot, SlotId};

/// Commands that can be sent to the schedule engine actor.
///
/// Each command carries an operation request along with a response channel
/// for the actor to send back results. Mutations that a person triggers
/// carry the acting principal explicitly; the sweep path is system-triggered
/// and carries none.
pub enum ScheduleCommand {
    /// Schedule a new broadcast slot for an asset.
    Create {
        asset_id: AssetId,
        scheduled_at: DateTime<Utc>,
        notes: String,
        actor: Actor,
        responder: oneshot::Sender<Result<BroadcastSlot, ScheduleError>>,
    },
    /// Reschedule or annotate an existing, un-aired slot.
    Edit {
        slot_id: SlotId,
        scheduled_at: DateTime<Utc>,
        notes: String,
        actor: Actor,
        responder: oneshot::Sender<Result<BroadcastSlot, ScheduleError>>,
    },
    /// Remove a slot from the schedule.
    Delete {
        slot_id: SlotId,
        actor: Actor,
        responder: oneshot::Sender<Result<(), ScheduleError>>,
    },
    /// Manually transition a slot to aired, gated by ManageSchedule.
    MarkAired {
        slot_id: SlotId,
        actor: Actor,
        responder: oneshot::Sender<Result<AiringOutcome, ScheduleError>>,
    },
    /// Run one sweep pass over due slots at the engine clock's now.
    Sweep {
        responder: oneshot::Sender<SweepOutcome>,
    },
    /// Read the slots scheduled in an inclusive time range.
    ScheduleBetween {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        responder: oneshot::Sender<Result<Vec<BroadcastSlot>, ScheduleError>>,
    },
    /// Shutdown the engine actor gracefully.
    Shutdown { responder: oneshot::Sender<()> },
}

/// Result of one attempted scheduled-to-aired transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiringOutcome {
    /// The slot transitioned and one showing was consumed.
    Transitioned,
    /// The slot had already aired; nothing changed.
    AlreadyAired,
    /// No such slot; nothing changed.
    Missing,
}

/// Summary of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Slots transitioned to aired in this pass.
    pub transitioned: usize,
    /// Due slots that needed no transition (already aired or gone by the
    /// time they were processed).
    pub skipped: usize,
    /// Slots whose transition attempt failed; failures are isolated per
    /// slot and logged, never aborting the rest of the batch.
    pub failed: usize,
}

impl SweepOutcome {
    /// Total slots examined in the pass.
    pub fn examined(&self) -> usize {
        self.transitioned + self.skipped + self.failed
    }
}
