//! Durable storage contract consumed by the schedule engine.
//!
//! The engine treats persistence as an external collaborator behind this
//! trait. Implementations handle backend details; repository failures
//! propagate to the engine's callers unmodified, with no implicit retry.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::InMemoryRepository;

use crate::model::{AssetId, BroadcastSlot, ContentAsset, SlotId};

/// Storage operations for assets and broadcast slots.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Loads an asset by id, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Backend` - If the storage backend failed
    async fn asset(&self, id: AssetId) -> Result<Option<ContentAsset>, RepositoryError>;

    /// Persists an updated asset.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Conflict` - If the asset row no longer exists
    async fn update_asset(&self, asset: &ContentAsset) -> Result<(), RepositoryError>;

    /// Loads a slot by id, `None` if it does not exist.
    async fn slot(&self, id: SlotId) -> Result<Option<BroadcastSlot>, RepositoryError>;

    /// Persists a new slot, assigning and returning its id.
    async fn insert_slot(&self, slot: &BroadcastSlot) -> Result<SlotId, RepositoryError>;

    /// Persists an updated slot.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Conflict` - If the slot row no longer exists
    async fn update_slot(&self, slot: &BroadcastSlot) -> Result<(), RepositoryError>;

    /// Slots with `scheduled_at` in the inclusive range, ordered by
    /// scheduled time.
    async fn slots_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BroadcastSlot>, RepositoryError>;

    /// Un-aired slots whose scheduled time is at or before `now`: the
    /// sweep's work list.
    async fn due_slots(&self, now: DateTime<Utc>) -> Result<Vec<BroadcastSlot>, RepositoryError>;

    /// Atomically persists a slot's transition to aired together with the
    /// consumed showing on its asset, iff the stored slot is still
    /// un-aired.
    ///
    /// Returns `false` and writes nothing when the stored slot is missing
    /// or already aired. This single conditional write is what makes the
    /// aired transition at-most-once under concurrent callers and keeps a
    /// crash from separating the flag flip from the showing decrement.
    async fn commit_airing(
        &self,
        slot: &BroadcastSlot,
        asset: &ContentAsset,
    ) -> Result<bool, RepositoryError>;

    /// Deletes a slot. Deleting a missing slot is a no-op.
    async fn delete_slot(&self, id: SlotId) -> Result<(), RepositoryError>;
}

/// Errors that occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A write raced with a conflicting change or referenced a missing row.
    #[error("Storage conflict: {reason}")]
    Conflict { reason: String },

    /// Backend-specific failure (connection, constraint, corruption).
    #[error("Storage backend error: {message}")]
    Backend { message: String },

    /// Standard I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
