//! Mock collaborators for testing the schedule engine.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::model::{AssetId, BroadcastSlot, ContentAsset, SlotId};
use crate::repository::{InMemoryRepository, Repository, RepositoryError};

/// Repository wrapper that fails `commit_airing` for designated slots.
///
/// Used to verify that sweep failures stay isolated per slot.
pub struct FailingRepository {
    inner: InMemoryRepository,
    failing_commits: Mutex<HashSet<SlotId>>,
}

impl FailingRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRepository::new(),
            failing_commits: Mutex::new(HashSet::new()),
        }
    }

    /// The wrapped repository, for seeding and inspection.
    pub fn inner(&self) -> &InMemoryRepository {
        &self.inner
    }

    /// Makes every `commit_airing` for this slot fail with a backend error.
    pub fn fail_commit_for(&self, slot_id: SlotId) {
        self.failing_commits.lock().insert(slot_id);
    }
}

#[async_trait]
impl Repository for FailingRepository {
    async fn asset(&self, id: AssetId) -> Result<Option<ContentAsset>, RepositoryError> {
        self.inner.asset(id).await
    }

    async fn update_asset(&self, asset: &ContentAsset) -> Result<(), RepositoryError> {
        self.inner.update_asset(asset).await
    }

    async fn slot(&self, id: SlotId) -> Result<Option<BroadcastSlot>, RepositoryError> {
        self.inner.slot(id).await
    }

    async fn insert_slot(&self, slot: &BroadcastSlot) -> Result<SlotId, RepositoryError> {
        self.inner.insert_slot(slot).await
    }

    async fn update_slot(&self, slot: &BroadcastSlot) -> Result<(), RepositoryError> {
        self.inner.update_slot(slot).await
    }

    async fn slots_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BroadcastSlot>, RepositoryError> {
        self.inner.slots_between(from, to).await
    }

    async fn due_slots(&self, now: DateTime<Utc>) -> Result<Vec<BroadcastSlot>, RepositoryError> {
        self.inner.due_slots(now).await
    }

    async fn commit_airing(
        &self,
        slot: &BroadcastSlot,
        asset: &ContentAsset,
    ) -> Result<bool, RepositoryError> {
        if self.failing_commits.lock().contains(&slot.id) {
            return Err(RepositoryError::Backend {
                message: format!("injected commit failure for slot {}", slot.id),
            });
        }
        self.inner.commit_airing(slot, asset).await
    }

    async fn delete_slot(&self, id: SlotId) -> Result<(), RepositoryError> {
        self.inner.delete_slot(id).await
    }
}
