//! In-memory repository used by tests and the CLI.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{Repository, RepositoryError};
use crate::model::{
    AssetId, BroadcastSlot, ContactId, ContentAsset, DistributorContact, GrantId, LicenseGrant,
    SlotId,
};

#[derive(Debug, Default)]
struct State {
    assets: BTreeMap<AssetId, ContentAsset>,
    grants: BTreeMap<GrantId, LicenseGrant>,
    contacts: BTreeMap<ContactId, DistributorContact>,
    slots: BTreeMap<SlotId, BroadcastSlot>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Reference [`Repository`] backed by process memory.
///
/// All operations run under one mutex, which gives `commit_airing` its
/// transactional all-or-nothing behavior for free. Ids are assigned
/// monotonically from a shared counter.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a grant, assigning its id. Seeding helper for callers that
    /// own the surrounding CRUD flow.
    pub fn insert_grant(&self, mut grant: LicenseGrant) -> LicenseGrant {
        let mut state = self.state.lock();
        grant.id = GrantId(state.next_id());
        state.grants.insert(grant.id, grant.clone());
        grant
    }

    /// Stores a distributor contact, assigning its id.
    pub fn insert_contact(&self, mut contact: DistributorContact) -> DistributorContact {
        let mut state = self.state.lock();
        contact.id = ContactId(state.next_id());
        state.contacts.insert(contact.id, contact.clone());
        contact
    }

    /// Stores an asset, assigning its id.
    pub fn insert_asset(&self, mut asset: ContentAsset) -> ContentAsset {
        let mut state = self.state.lock();
        asset.id = AssetId(state.next_id());
        state.assets.insert(asset.id, asset.clone());
        asset
    }

    /// All slots, ordered by id. Listing helper for callers.
    pub fn all_slots(&self) -> Vec<BroadcastSlot> {
        self.state.lock().slots.values().cloned().collect()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn asset(&self, id: AssetId) -> Result<Option<ContentAsset>, RepositoryError> {
        Ok(self.state.lock().assets.get(&id).cloned())
    }

    async fn update_asset(&self, asset: &ContentAsset) -> Result<(), RepositoryError> {
        let mut state = self.state.lock();
        match state.assets.get_mut(&asset.id) {
            Some(stored) => {
                *stored = asset.clone();
                Ok(())
            }
            None => Err(RepositoryError::Conflict {
                reason: format!("asset {} does not exist", asset.id),
            }),
        }
    }

    async fn slot(&self, id: SlotId) -> Result<Option<BroadcastSlot>, RepositoryError> {
        Ok(self.state.lock().slots.get(&id).cloned())
    }

    async fn insert_slot(&self, slot: &BroadcastSlot) -> Result<SlotId, RepositoryError> {
        let mut state = self.state.lock();
        let id = SlotId(state.next_id());
        let mut slot = slot.clone();
        slot.id = id;
        state.slots.insert(id, slot);
        Ok(id)
    }

    async fn update_slot(&self, slot: &BroadcastSlot) -> Result<(), RepositoryError> {
        let mut state = self.state.lock();
        match state.slots.get_mut(&slot.id) {
            Some(stored) => {
                *stored = slot.clone();
                Ok(())
            }
            None => Err(RepositoryError::Conflict {
                reason: format!("slot {} does not exist", slot.id),
            }),
        }
    }

    async fn slots_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BroadcastSlot>, RepositoryError> {
        let state = self.state.lock();
        let mut slots: Vec<_> = state
            .slots
            .values()
            .filter(|s| s.scheduled_at >= from && s.scheduled_at <= to)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.scheduled_at);
        Ok(slots)
    }

    async fn due_slots(&self, now: DateTime<Utc>) -> Result<Vec<BroadcastSlot>, RepositoryError> {
        let state = self.state.lock();
        Ok(state
            .slots
            .values()
            .filter(|s| !s.aired && s.scheduled_at <= now)
            .cloned()
            .collect())
    }

    async fn commit_airing(
        &self,
        slot: &BroadcastSlot,
        asset: &ContentAsset,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock();

        // Re-check under the lock: only a still-scheduled slot transitions.
        match state.slots.get(&slot.id) {
            Some(stored) if !stored.aired => {}
            _ => return Ok(false),
        }
        if !state.assets.contains_key(&asset.id) {
            return Err(RepositoryError::Conflict {
                reason: format!("asset {} does not exist", asset.id),
            });
        }

        state.slots.insert(slot.id, slot.clone());
        state.assets.insert(asset.id, asset.clone());
        Ok(true)
    }

    async fn delete_slot(&self, id: SlotId) -> Result<(), RepositoryError> {
        self.state.lock().slots.remove(&id);
        Ok(())
    }
}
