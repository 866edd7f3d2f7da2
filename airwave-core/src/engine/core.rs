//! Core schedule engine implementation for the actor model.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::commands::{AiringOutcome, SweepOutcome};
use super::ScheduleError;
use crate::auth::{Actor, Capability};
use crate::clock::Clock;
use crate::model::{AssetId, BroadcastSlot, SlotId};
use crate::repository::Repository;
use crate::rights;

/// Core schedule engine implementation.
///
/// This is the private implementation that runs inside the actor. It is
/// single-threaded and processes commands sequentially, which serializes
/// every showing consumption per asset and makes overlapping sweeps
/// impossible by construction.
pub struct ScheduleEngine<R: Repository, C: Clock> {
    /// Durable storage collaborator.
    repository: Arc<R>,
    /// Injected time source.
    clock: C,
}

impl<R: Repository, C: Clock> ScheduleEngine<R, C> {
    /// Creates a new engine over the given repository and clock.
    pub fn new(repository: Arc<R>, clock: C) -> Self {
        Self { repository, clock }
    }

    /// Current instant from the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn require(actor: &Actor, capability: Capability) -> Result<(), ScheduleError> {
        if actor.allows(capability) {
            Ok(())
        } else {
            Err(ScheduleError::PermissionDenied { capability })
        }
    }

    /// Schedules a new broadcast slot for an asset.
    ///
    /// Rights are validated here, at creation time, and deliberately not
    /// re-checked when the slot later airs: eligibility is locked in at
    /// scheduling time, matching the system this engine replaces. A slot
    /// whose asset's rights lapse after scheduling still transitions.
    ///
    /// # Errors
    ///
    /// - `ScheduleError::PermissionDenied` - Actor's role lacks ManageSchedule
    /// - `ScheduleError::AssetNotFound` - No such asset
    /// - `ScheduleError::RightsInvalid` - Asset is expired or out of showings
    pub async fn create(
        &self,
        asset_id: AssetId,
        scheduled_at: DateTime<Utc>,
        notes: String,
        actor: &Actor,
    ) -> Result<BroadcastSlot, ScheduleError> {
        Self::require(actor, Capability::ManageSchedule)?;

        let asset = self
            .repository
            .asset(asset_id)
            .await?
            .ok_or(ScheduleError::AssetNotFound { asset_id })?;

        rights::check_usable(&asset, self.clock.today())
            .map_err(|violation| ScheduleError::RightsInvalid { asset_id, violation })?;

        let mut slot = BroadcastSlot {
            id: SlotId(0),
            asset_id,
            scheduled_at,
            aired: false,
            notes,
            created_at: self.clock.now(),
        };
        slot.id = self.repository.insert_slot(&slot).await?;

        tracing::info!(
            slot_id = %slot.id,
            asset_id = %asset_id,
            scheduled_at = %scheduled_at,
            actor = %actor.login,
            "broadcast slot scheduled"
        );
        Ok(slot)
    }

    /// Updates the scheduled time and notes of an un-aired slot.
    ///
    /// # Errors
    ///
    /// - `ScheduleError::PermissionDenied` - Actor's role lacks ManageSchedule
    /// - `ScheduleError::SlotNotFound` - No such slot
    /// - `ScheduleError::AlreadyAired` - Aired slots are immutable
    pub async fn edit(
        &self,
        slot_id: SlotId,
        scheduled_at: DateTime<Utc>,
        notes: String,
        actor: &Actor,
    ) -> Result<BroadcastSlot, ScheduleError> {
        Self::require(actor, Capability::ManageSchedule)?;

        let mut slot = self
            .repository
            .slot(slot_id)
            .await?
            .ok_or(ScheduleError::SlotNotFound { slot_id })?;
        if slot.aired {
            return Err(ScheduleError::AlreadyAired { slot_id });
        }

        slot.scheduled_at = scheduled_at;
        slot.notes = notes;
        self.repository.update_slot(&slot).await?;
        Ok(slot)
    }

    /// Removes a slot from the schedule. Removal is deletion; there is no
    /// cancelled state. Deleting a missing slot is a no-op.
    ///
    /// # Errors
    ///
    /// - `ScheduleError::PermissionDenied` - Actor's role lacks ManageSchedule
    pub async fn delete(&self, slot_id: SlotId, actor: &Actor) -> Result<(), ScheduleError> {
        Self::require(actor, Capability::ManageSchedule)?;
        self.repository.delete_slot(slot_id).await?;
        Ok(())
    }

    /// Manual aired transition, gated by ManageSchedule.
    ///
    /// # Errors
    ///
    /// - `ScheduleError::PermissionDenied` - Actor's role lacks ManageSchedule
    pub async fn mark_aired_by(
        &self,
        slot_id: SlotId,
        actor: &Actor,
    ) -> Result<AiringOutcome, ScheduleError> {
        Self::require(actor, Capability::ManageSchedule)?;
        self.mark_aired(slot_id).await
    }

    /// The core transition: flips the slot to aired and consumes one
    /// showing on its asset, persisted as one logical unit.
    ///
    /// Idempotent: a missing or already-aired slot is left untouched and
    /// reported through the outcome. The repository re-checks the stored
    /// state inside `commit_airing`, so the transition is applied at most
    /// once even if a concurrent caller got there first.
    ///
    /// Ungated: this is the system-triggered path the sweep uses.
    pub async fn mark_aired(&self, slot_id: SlotId) -> Result<AiringOutcome, ScheduleError> {
        let Some(slot) = self.repository.slot(slot_id).await? else {
            return Ok(AiringOutcome::Missing);
        };
        if slot.aired {
            return Ok(AiringOutcome::AlreadyAired);
        }

        let asset_id = slot.asset_id;
        let asset = self
            .repository
            .asset(asset_id)
            .await?
            .ok_or(ScheduleError::AssetNotFound { asset_id })?;

        let mut aired_slot = slot;
        aired_slot.aired = true;
        let consumed = rights::consume(&asset);

        if !self.repository.commit_airing(&aired_slot, &consumed).await? {
            // Lost the race: the stored slot transitioned under us.
            return Ok(AiringOutcome::AlreadyAired);
        }

        tracing::info!(
            slot_id = %slot_id,
            asset_id = %asset_id,
            remaining_showings = consumed.remaining_showings,
            "slot aired, showing consumed"
        );
        Ok(AiringOutcome::Transitioned)
    }

    /// One sweep pass: transitions every slot due at `now`.
    ///
    /// Never transitions a slot scheduled after `now`. Each slot's attempt
    /// is independent; a failure is logged and counted but never aborts the
    /// rest of the batch.
    pub async fn sweep(&self, now: DateTime<Utc>) -> SweepOutcome {
        let due = match self.repository.due_slots(now).await {
            Ok(due) => due,
            Err(error) => {
                tracing::warn!(%error, "sweep could not query due slots");
                return SweepOutcome::default();
            }
        };

        let mut outcome = SweepOutcome::default();
        for slot in due {
            // The repository contract already filters on scheduled time;
            // hold the invariant even against a loose implementation.
            if slot.scheduled_at > now {
                continue;
            }
            match self.mark_aired(slot.id).await {
                Ok(AiringOutcome::Transitioned) => outcome.transitioned += 1,
                Ok(_) => outcome.skipped += 1,
                Err(error) => {
                    outcome.failed += 1;
                    tracing::warn!(slot_id = %slot.id, %error, "sweep transition failed");
                }
            }
        }

        if outcome.examined() > 0 {
            tracing::debug!(
                transitioned = outcome.transitioned,
                skipped = outcome.skipped,
                failed = outcome.failed,
                "sweep pass complete"
            );
        }
        outcome
    }

    /// Slots scheduled in the inclusive range, for display.
    pub async fn schedule_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BroadcastSlot>, ScheduleError> {
        Ok(self.repository.slots_between(from, to).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::auth::{CapabilitySet, Role};
    use crate::clock::FixedClock;
    use crate::model::{ActorId, ContentAsset, GrantId, RoleId};
    use crate::repository::InMemoryRepository;
    use crate::rights::RightsViolation;

    fn scheduler_actor() -> Actor {
        Actor {
            id: ActorId(1),
            login: "planner".to_string(),
            role: Role {
                id: RoleId(1),
                name: "Planner".to_string(),
                description: String::new(),
                capabilities: CapabilitySet::of(&[
                    Capability::ManageSchedule,
                    Capability::ViewSchedule,
                ]),
            },
        }
    }

    fn viewer_actor() -> Actor {
        Actor {
            id: ActorId(2),
            login: "viewer".to_string(),
            role: Role {
                id: RoleId(2),
                name: "Viewer".to_string(),
                description: String::new(),
                capabilities: CapabilitySet::of(&[Capability::ViewSchedule]),
            },
        }
    }

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    fn asset_with(
        remaining_showings: u32,
        rights_expiration: Option<chrono::NaiveDate>,
    ) -> ContentAsset {
        ContentAsset {
            id: AssetId(0),
            title: "Mirror".to_string(),
            age_rating: "12+".to_string(),
            duration_minutes: 108,
            file_path: "/media/mirror.mkv".to_string(),
            purchase_date: None,
            rights_expiration,
            remaining_showings,
            added_at: test_now(),
            grant_id: GrantId(1),
        }
    }

    fn engine_with_repo() -> (
        ScheduleEngine<InMemoryRepository, FixedClock>,
        Arc<InMemoryRepository>,
    ) {
        let repository = Arc::new(InMemoryRepository::new());
        let engine = ScheduleEngine::new(Arc::clone(&repository), FixedClock::at(test_now()));
        (engine, repository)
    }

    #[tokio::test]
    async fn create_persists_scheduled_slot() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(3, None));

        let slot = engine
            .create(asset.id, test_now(), "prime time".to_string(), &scheduler_actor())
            .await
            .unwrap();

        assert!(!slot.aired);
        assert_eq!(slot.created_at, test_now());
        let stored = repo.slot(slot.id).await.unwrap().unwrap();
        assert_eq!(stored, slot);
    }

    #[tokio::test]
    async fn create_without_capability_writes_nothing() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(3, None));

        let result = engine
            .create(asset.id, test_now(), String::new(), &viewer_actor())
            .await;
        assert!(matches!(
            result,
            Err(ScheduleError::PermissionDenied {
                capability: Capability::ManageSchedule
            })
        ));
        assert!(repo.all_slots().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_expired_rights_with_the_date() {
        let (engine, repo) = engine_with_repo();
        let yesterday = test_now().date_naive() - chrono::Duration::days(1);
        let asset = repo.insert_asset(asset_with(5, Some(yesterday)));

        let result = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await;
        match result {
            Err(ScheduleError::RightsInvalid { violation, .. }) => {
                assert_eq!(
                    violation,
                    RightsViolation::RightsExpired {
                        expired_on: yesterday
                    }
                );
            }
            other => panic!("expected RightsInvalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_rejects_zero_showings_regardless_of_expiration() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(0, None));

        let result = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await;
        assert!(matches!(
            result,
            Err(ScheduleError::RightsInvalid {
                violation: RightsViolation::NoShowingsRemaining,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn create_rejects_missing_asset() {
        let (engine, _repo) = engine_with_repo();
        let result = engine
            .create(AssetId(999), test_now(), String::new(), &scheduler_actor())
            .await;
        assert!(matches!(result, Err(ScheduleError::AssetNotFound { .. })));
    }

    #[tokio::test]
    async fn edit_updates_time_and_notes_in_place() {
        let (engine, _repo) = engine_with_repo();
        let repo = &engine.repository;
        let asset = repo.insert_asset(asset_with(3, None));
        let slot = engine
            .create(asset.id, test_now(), "old".to_string(), &scheduler_actor())
            .await
            .unwrap();

        let later = test_now() + chrono::Duration::hours(3);
        let edited = engine
            .edit(slot.id, later, "new".to_string(), &scheduler_actor())
            .await
            .unwrap();
        assert_eq!(edited.scheduled_at, later);
        assert_eq!(edited.notes, "new");
        assert_eq!(edited.id, slot.id);
    }

    #[tokio::test]
    async fn edit_rejects_aired_slot_even_with_capability() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(3, None));
        let slot = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();
        engine.mark_aired(slot.id).await.unwrap();

        let result = engine
            .edit(slot.id, test_now(), String::new(), &scheduler_actor())
            .await;
        assert!(matches!(result, Err(ScheduleError::AlreadyAired { .. })));
    }

    #[tokio::test]
    async fn mark_aired_consumes_exactly_one_showing() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(2, None));
        let slot = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();

        let outcome = engine.mark_aired(slot.id).await.unwrap();
        assert_eq!(outcome, AiringOutcome::Transitioned);
        assert!(repo.slot(slot.id).await.unwrap().unwrap().aired);
        assert_eq!(
            repo.asset(asset.id).await.unwrap().unwrap().remaining_showings,
            1
        );
    }

    #[tokio::test]
    async fn mark_aired_twice_is_idempotent() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(2, None));
        let slot = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();

        assert_eq!(
            engine.mark_aired(slot.id).await.unwrap(),
            AiringOutcome::Transitioned
        );
        assert_eq!(
            engine.mark_aired(slot.id).await.unwrap(),
            AiringOutcome::AlreadyAired
        );
        // The showing was consumed exactly once.
        assert_eq!(
            repo.asset(asset.id).await.unwrap().unwrap().remaining_showings,
            1
        );
        assert!(repo.slot(slot.id).await.unwrap().unwrap().aired);
    }

    #[tokio::test]
    async fn mark_aired_on_missing_slot_is_a_no_op() {
        let (engine, _repo) = engine_with_repo();
        assert_eq!(
            engine.mark_aired(SlotId(42)).await.unwrap(),
            AiringOutcome::Missing
        );
    }

    #[tokio::test]
    async fn manual_mark_aired_is_gated_but_sweep_path_is_not() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(2, None));
        let slot = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();

        let denied = engine.mark_aired_by(slot.id, &viewer_actor()).await;
        assert!(matches!(
            denied,
            Err(ScheduleError::PermissionDenied { .. })
        ));
        // The system path has no gate.
        assert_eq!(
            engine.mark_aired(slot.id).await.unwrap(),
            AiringOutcome::Transitioned
        );
    }

    #[tokio::test]
    async fn sweep_never_transitions_future_slots() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(5, None));
        let future = test_now() + chrono::Duration::minutes(1);
        let slot = engine
            .create(asset.id, future, String::new(), &scheduler_actor())
            .await
            .unwrap();

        let outcome = engine.sweep(test_now()).await;
        assert_eq!(outcome, SweepOutcome::default());
        assert!(!repo.slot(slot.id).await.unwrap().unwrap().aired);
    }

    #[tokio::test]
    async fn sweep_transitions_due_slot_and_is_stable_afterwards() {
        // Scenario: one showing left, slot due exactly at T.
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(1, None));
        let slot = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();

        let outcome = engine.sweep(test_now()).await;
        assert_eq!(outcome.transitioned, 1);
        assert!(repo.slot(slot.id).await.unwrap().unwrap().aired);
        assert_eq!(
            repo.asset(asset.id).await.unwrap().unwrap().remaining_showings,
            0
        );

        // A later sweep leaves both unchanged.
        let again = engine.sweep(test_now() + chrono::Duration::seconds(1)).await;
        assert_eq!(again, SweepOutcome::default());
        assert_eq!(
            repo.asset(asset.id).await.unwrap().unwrap().remaining_showings,
            0
        );
    }

    #[tokio::test]
    async fn two_due_slots_on_one_showing_both_air_and_count_floors_at_zero() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(1, None));
        let first = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();
        let second = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();

        let outcome = engine.sweep(test_now()).await;
        assert_eq!(outcome.transitioned, 2);
        assert!(repo.slot(first.id).await.unwrap().unwrap().aired);
        assert!(repo.slot(second.id).await.unwrap().unwrap().aired);
        assert_eq!(
            repo.asset(asset.id).await.unwrap().unwrap().remaining_showings,
            0
        );
    }

    #[tokio::test]
    async fn rights_are_not_rechecked_at_air_time() {
        // Rights valid when scheduled, lapsed before airing: the slot still
        // transitions. Locked-in eligibility, preserved from the original.
        let (engine, repo) = engine_with_repo();
        let today = test_now().date_naive();
        let asset = repo.insert_asset(asset_with(1, Some(today)));
        let slot = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();

        engine.clock.advance(chrono::Duration::days(2));
        let outcome = engine.sweep(engine.now()).await;
        assert_eq!(outcome.transitioned, 1);
        assert!(repo.slot(slot.id).await.unwrap().unwrap().aired);
    }

    #[tokio::test]
    async fn delete_requires_capability_and_is_idempotent() {
        let (engine, repo) = engine_with_repo();
        let asset = repo.insert_asset(asset_with(3, None));
        let slot = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();

        assert!(matches!(
            engine.delete(slot.id, &viewer_actor()).await,
            Err(ScheduleError::PermissionDenied { .. })
        ));
        engine.delete(slot.id, &scheduler_actor()).await.unwrap();
        engine.delete(slot.id, &scheduler_actor()).await.unwrap();
        assert!(repo.slot(slot.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sweep_failures_are_isolated_per_slot() {
        use crate::engine::test_mocks::FailingRepository;

        let repository = Arc::new(FailingRepository::new());
        let asset = repository.inner().insert_asset(asset_with(5, None));
        let engine = ScheduleEngine::new(Arc::clone(&repository), FixedClock::at(test_now()));

        let healthy = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();
        let poisoned = engine
            .create(asset.id, test_now(), String::new(), &scheduler_actor())
            .await
            .unwrap();
        repository.fail_commit_for(poisoned.id);

        let outcome = engine.sweep(test_now()).await;
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.transitioned, 1);
        assert!(
            repository
                .inner()
                .slot(healthy.id)
                .await
                .unwrap()
                .unwrap()
                .aired
        );
        assert!(
            !repository
                .inner()
                .slot(poisoned.id)
                .await
                .unwrap()
                .unwrap()
                .aired
        );
    }
}
