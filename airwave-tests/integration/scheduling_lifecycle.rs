//! End-to-end slot lifecycle scenarios: schedule, sweep, air, consume.

use airwave_core::engine::AiringOutcome;
use airwave_core::model::SlotStatus;
use airwave_core::repository::Repository;
use airwave_core::rights::RightsViolation;
use airwave_core::{Clock, ScheduleError};

use crate::common::{asset, boot, planner, test_now};

#[tokio::test]
async fn single_showing_airs_once_and_stays_settled() {
    // Asset with one showing and no expiration; slot due at T.
    let (handle, repository, clock) = boot();
    let film = asset(&repository, 1, None);

    let slot = handle
        .create(film.id, test_now(), "scenario a", &planner())
        .await
        .unwrap();

    let outcome = handle.sweep().await.unwrap();
    assert_eq!(outcome.transitioned, 1);
    let stored = repository.slot(slot.id).await.unwrap().unwrap();
    assert!(stored.aired);
    assert_eq!(stored.status(test_now()), SlotStatus::Aired);
    assert_eq!(
        repository.asset(film.id).await.unwrap().unwrap().remaining_showings,
        0
    );

    // A second sweep at T+1 leaves slot and asset unchanged.
    clock.advance(chrono::Duration::seconds(1));
    let second = handle.sweep().await.unwrap();
    assert_eq!(second.transitioned, 0);
    assert_eq!(
        repository.asset(film.id).await.unwrap().unwrap().remaining_showings,
        0
    );
    assert!(repository.slot(slot.id).await.unwrap().unwrap().aired);
}

#[tokio::test]
async fn expired_rights_block_scheduling_despite_showings() {
    // Rights expired yesterday, five showings left: still unusable.
    let (handle, repository, _clock) = boot();
    let yesterday = test_now().date_naive() - chrono::Duration::days(1);
    let film = asset(&repository, 5, Some(yesterday));

    let result = handle
        .create(film.id, test_now(), "scenario b", &planner())
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
    assert!(repository.all_slots().is_empty());
}

#[tokio::test]
async fn shared_asset_at_one_showing_airs_both_slots_flooring_at_zero() {
    // Scenario D: two due slots reference the same one-showing asset.
    let (handle, repository, _clock) = boot();
    let film = asset(&repository, 1, None);

    let first = handle
        .create(film.id, test_now(), "", &planner())
        .await
        .unwrap();
    let second = handle
        .create(film.id, test_now(), "", &planner())
        .await
        .unwrap();

    let outcome = handle.sweep().await.unwrap();
    assert_eq!(outcome.transitioned, 2);
    assert!(repository.slot(first.id).await.unwrap().unwrap().aired);
    assert!(repository.slot(second.id).await.unwrap().unwrap().aired);
    // The counter floors at zero, never negative.
    assert_eq!(
        repository.asset(film.id).await.unwrap().unwrap().remaining_showings,
        0
    );
}

#[tokio::test]
async fn sweep_waits_for_scheduled_time() {
    let (handle, repository, clock) = boot();
    let film = asset(&repository, 2, None);

    let slot = handle
        .create(
            film.id,
            test_now() + chrono::Duration::minutes(30),
            "late night",
            &planner(),
        )
        .await
        .unwrap();

    assert_eq!(handle.sweep().await.unwrap().examined(), 0);
    let stored = repository.slot(slot.id).await.unwrap().unwrap();
    assert_eq!(stored.status(clock.now()), SlotStatus::Planned);

    clock.advance(chrono::Duration::minutes(30));
    assert_eq!(handle.sweep().await.unwrap().transitioned, 1);
}

#[tokio::test]
async fn aired_slots_reject_edits_but_tolerate_repeat_airing() {
    let (handle, repository, _clock) = boot();
    let film = asset(&repository, 3, None);

    let slot = handle
        .create(film.id, test_now(), "", &planner())
        .await
        .unwrap();
    assert_eq!(
        handle.mark_aired(slot.id, &planner()).await.unwrap(),
        AiringOutcome::Transitioned
    );

    // Terminal state: even a capable actor cannot edit.
    let edit = handle
        .edit(slot.id, test_now(), "moved", &planner())
        .await;
    assert!(matches!(edit, Err(ScheduleError::AlreadyAired { .. })));

    // Repeat manual airing is a harmless no-op.
    assert_eq!(
        handle.mark_aired(slot.id, &planner()).await.unwrap(),
        AiringOutcome::AlreadyAired
    );
    assert_eq!(
        repository.asset(film.id).await.unwrap().unwrap().remaining_showings,
        2
    );
}

#[tokio::test]
async fn edit_before_airing_moves_the_slot() {
    let (handle, repository, clock) = boot();
    let film = asset(&repository, 1, None);

    let slot = handle
        .create(film.id, test_now() + chrono::Duration::hours(1), "", &planner())
        .await
        .unwrap();
    let moved = handle
        .edit(
            slot.id,
            test_now() + chrono::Duration::hours(2),
            "pushed back",
            &planner(),
        )
        .await
        .unwrap();
    assert_eq!(moved.notes, "pushed back");

    // Sweeping at the original time must not transition the moved slot.
    clock.advance(chrono::Duration::hours(1));
    assert_eq!(handle.sweep().await.unwrap().examined(), 0);

    clock.advance(chrono::Duration::hours(1));
    assert_eq!(handle.sweep().await.unwrap().transitioned, 1);
    assert!(repository.slot(slot.id).await.unwrap().unwrap().aired);
}
