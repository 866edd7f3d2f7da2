//! Capability gating across the engine surface.

use airwave_core::repository::Repository;
use airwave_core::{Capability, ScheduleError, SessionContext};

use crate::common::{asset, boot, planner, test_now, viewer};

#[tokio::test]
async fn viewer_cannot_create_and_repository_stays_untouched() {
    // Scenario C: role lacks ManageSchedule; no write reaches storage.
    let (handle, repository, _clock) = boot();
    let film = asset(&repository, 3, None);

    let result = handle
        .create(film.id, test_now(), "denied", &viewer())
        .await;
    match result {
        Err(ScheduleError::PermissionDenied { capability }) => {
            assert_eq!(capability, Capability::ManageSchedule);
        }
        other => panic!("expected PermissionDenied, got {other:?}"),
    }
    assert!(repository.all_slots().is_empty());
    assert_eq!(
        repository.asset(film.id).await.unwrap().unwrap().remaining_showings,
        3
    );
}

#[tokio::test]
async fn every_mutation_is_gated_for_a_viewer() {
    let (handle, repository, _clock) = boot();
    let film = asset(&repository, 3, None);
    let slot = handle
        .create(film.id, test_now(), "", &planner())
        .await
        .unwrap();

    fn assert_denied<T: std::fmt::Debug>(result: Result<T, ScheduleError>) {
        assert!(matches!(
            result,
            Err(ScheduleError::PermissionDenied {
                capability: Capability::ManageSchedule
            })
        ));
    }

    assert_denied(handle.edit(slot.id, test_now(), "moved", &viewer()).await);
    assert_denied(handle.mark_aired(slot.id, &viewer()).await);
    assert_denied(handle.delete(slot.id, &viewer()).await);
    assert!(!repository.slot(slot.id).await.unwrap().unwrap().aired);
}

#[tokio::test]
async fn session_context_fails_closed_and_feeds_the_engine() {
    let (handle, repository, _clock) = boot();
    let film = asset(&repository, 3, None);

    let session = SessionContext::new();
    assert!(!session.allows(Capability::ManageSchedule));

    // Login binds the planner; the caller threads the bound actor into
    // engine operations explicitly.
    session.bind(planner());
    assert!(session.allows(Capability::ManageSchedule));
    let actor = session.current_actor().unwrap();
    let slot = handle
        .create(film.id, test_now(), "via session", &actor)
        .await
        .unwrap();
    assert_eq!(repository.all_slots(), vec![slot]);

    // Logout: checks fail closed again.
    session.unbind();
    assert!(!session.allows(Capability::ManageSchedule));
    assert!(session.current_actor().is_none());
}

#[tokio::test]
async fn derived_predicates_come_from_one_place() {
    let session = SessionContext::new();
    assert!(!session.can_edit_any_asset_info());
    assert!(!session.has_admin_access());

    let mut editor = viewer();
    editor.role.capabilities = editor
        .role
        .capabilities
        .with(Capability::EditAssetRightsInfo);
    session.bind(editor);
    assert!(session.can_edit_any_asset_info());
    assert!(!session.has_admin_access());
}
