//! Handle for communicating with the schedule engine actor.

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};

use super::commands::{AiringOutcome, ScheduleCommand, SweepOutcome};
use super::ScheduleError;
use crate::auth::Actor;
use crate::model::{AssetId, BroadcastSlot, SlotId};

/// Handle for communicating with the schedule engine actor.
///
/// Provides an ergonomic async API for sending commands to the engine
/// actor. It can be cloned and shared across threads safely; the actor
/// processes commands one at a time.
#[derive(Clone)]
pub struct ScheduleEngineHandle {
    sender: mpsc::Sender<ScheduleCommand>,
}

impl ScheduleEngineHandle {
    /// Creates a new handle with the given command sender.
    pub fn new(sender: mpsc::Sender<ScheduleCommand>) -> Self {
        Self { sender }
    }

    async fn send(&self, command: ScheduleCommand) -> Result<(), ScheduleError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| ScheduleError::EngineShutdown)
    }

    /// Schedules a new broadcast slot for an asset, acting as `actor`.
    ///
    /// # Errors
    /// - `ScheduleError::PermissionDenied` - Role lacks ManageSchedule
    /// - `ScheduleError::RightsInvalid` - Asset fails the rights check today
    /// - `ScheduleError::AssetNotFound` - No such asset
    pub async fn create(
        &self,
        asset_id: AssetId,
        scheduled_at: DateTime<Utc>,
        notes: impl Into<String>,
        actor: &Actor,
    ) -> Result<BroadcastSlot, ScheduleError> {
        let (responder, rx) = oneshot::channel();
        self.send(ScheduleCommand::Create {
            asset_id,
            scheduled_at,
            notes: notes.into(),
            actor: actor.clone(),
            responder,
        })
        .await?;
        rx.await.map_err(|_| ScheduleError::EngineShutdown)?
    }

    /// Updates the scheduled time and notes of an un-aired slot.
    ///
    /// # Errors
    /// - `ScheduleError::PermissionDenied` - Role lacks ManageSchedule
    /// - `ScheduleError::AlreadyAired` - Aired slots are immutable
    /// - `ScheduleError::SlotNotFound` - No such slot
    pub async fn edit(
        &self,
        slot_id: SlotId,
        scheduled_at: DateTime<Utc>,
        notes: impl Into<String>,
        actor: &Actor,
    ) -> Result<BroadcastSlot, ScheduleError> {
        let (responder, rx) = oneshot::channel();
        self.send(ScheduleCommand::Edit {
            slot_id,
            scheduled_at,
            notes: notes.into(),
            actor: actor.clone(),
            responder,
        })
        .await?;
        rx.await.map_err(|_| ScheduleError::EngineShutdown)?
    }

    /// Removes a slot from the schedule.
    ///
    /// # Errors
    /// - `ScheduleError::PermissionDenied` - Role lacks ManageSchedule
    pub async fn delete(&self, slot_id: SlotId, actor: &Actor) -> Result<(), ScheduleError> {
        let (responder, rx) = oneshot::channel();
        self.send(ScheduleCommand::Delete {
            slot_id,
            actor: actor.clone(),
            responder,
        })
        .await?;
        rx.await.map_err(|_| ScheduleError::EngineShutdown)?
    }

    /// Manually transitions a slot to aired.
    ///
    /// Idempotent on already-aired or missing slots; the outcome reports
    /// which case applied.
    ///
    /// # Errors
    /// - `ScheduleError::PermissionDenied` - Role lacks ManageSchedule
    pub async fn mark_aired(
        &self,
        slot_id: SlotId,
        actor: &Actor,
    ) -> Result<AiringOutcome, ScheduleError> {
        let (responder, rx) = oneshot::channel();
        self.send(ScheduleCommand::MarkAired {
            slot_id,
            actor: actor.clone(),
            responder,
        })
        .await?;
        rx.await.map_err(|_| ScheduleError::EngineShutdown)?
    }

    /// Runs one sweep pass immediately, in addition to the periodic ones.
    pub async fn sweep(&self) -> Result<SweepOutcome, ScheduleError> {
        let (responder, rx) = oneshot::channel();
        self.send(ScheduleCommand::Sweep { responder }).await?;
        rx.await.map_err(|_| ScheduleError::EngineShutdown)
    }

    /// Reads the slots scheduled in the inclusive range.
    pub async fn schedule_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BroadcastSlot>, ScheduleError> {
        let (responder, rx) = oneshot::channel();
        self.send(ScheduleCommand::ScheduleBetween {
            from,
            to,
            responder,
        })
        .await?;
        rx.await.map_err(|_| ScheduleError::EngineShutdown)?
    }

    /// Shuts the engine actor down gracefully, waiting for it to stop.
    pub async fn shutdown(&self) -> Result<(), ScheduleError> {
        let (responder, rx) = oneshot::channel();
        self.send(ScheduleCommand::Shutdown { responder }).await?;
        rx.await.map_err(|_| ScheduleError::EngineShutdown)
    }
}
