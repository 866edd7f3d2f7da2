//! Broadcast schedule engine.
//!
//! Owns the slot lifecycle: permission-gated creation and editing, the
//! scheduled-to-aired transition with its showing consumption side effect,
//! and the periodic sweep that transitions due slots. The engine runs as an
//! actor processing commands sequentially; callers talk to it through a
//! clonable [`ScheduleEngineHandle`].

pub mod actor;
pub mod commands;
pub mod core;
pub mod handle;

#[cfg(test)]
mod test_mocks;

pub use actor::spawn_schedule_engine;
pub use commands::{AiringOutcome, ScheduleCommand, SweepOutcome};
pub use handle::ScheduleEngineHandle;
pub use self::core::ScheduleEngine;

use crate::auth::Capability;
use crate::model::{AssetId, SlotId};
use crate::repository::RepositoryError;
use crate::rights::RightsViolation;

/// Errors surfaced by schedule engine operations.
///
/// Every rejection names the specific rule that was violated. None of these
/// are retried by the engine; repository failures pass through unmodified.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The acting role lacks the capability the operation requires.
    #[error("permission denied: role lacks {capability}")]
    PermissionDenied { capability: Capability },

    /// The asset failed the rights check at scheduling time.
    #[error("asset {asset_id} failed rights check: {violation}")]
    RightsInvalid {
        asset_id: AssetId,
        violation: RightsViolation,
    },

    /// Aired slots are terminal and immutable.
    #[error("slot {slot_id} has already aired")]
    AlreadyAired { slot_id: SlotId },

    #[error("slot {slot_id} not found")]
    SlotNotFound { slot_id: SlotId },

    #[error("asset {asset_id} not found")]
    AssetNotFound { asset_id: AssetId },

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The engine actor is gone; its command channel is closed.
    #[error("schedule engine has shut down")]
    EngineShutdown,
}
