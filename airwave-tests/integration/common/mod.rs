//! Shared fixtures for integration tests.

use std::sync::Arc;

use airwave_core::clock::FixedClock;
use airwave_core::config::AirwaveConfig;
use airwave_core::model::{ActorId, AssetId, ContentAsset, GrantId, RoleId};
use airwave_core::{
    Actor, Capability, CapabilitySet, InMemoryRepository, Role, ScheduleEngineHandle,
    spawn_schedule_engine,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// A fixed "now" every scenario starts from.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
}

/// Actor whose role may manage the schedule.
pub fn planner() -> Actor {
    actor_with(1, "planner", &[Capability::ManageSchedule, Capability::ViewSchedule])
}

/// Actor whose role may only view.
pub fn viewer() -> Actor {
    actor_with(2, "viewer", &[Capability::ViewSchedule])
}

fn actor_with(id: i64, login: &str, capabilities: &[Capability]) -> Actor {
    Actor {
        id: ActorId(id),
        login: login.to_string(),
        role: Role {
            id: RoleId(id),
            name: login.to_string(),
            description: String::new(),
            capabilities: CapabilitySet::of(capabilities),
        },
    }
}

/// Asset seed with the given license state.
pub fn asset(
    repository: &InMemoryRepository,
    remaining_showings: u32,
    rights_expiration: Option<NaiveDate>,
) -> ContentAsset {
    repository.insert_asset(ContentAsset {
        id: AssetId(0),
        title: "Ivan's Childhood".to_string(),
        age_rating: "16+".to_string(),
        duration_minutes: 95,
        file_path: "/media/ivan.mkv".to_string(),
        purchase_date: None,
        rights_expiration,
        remaining_showings,
        added_at: test_now(),
        grant_id: GrantId(1),
    })
}

/// Engine with manual sweeps over a fresh repository and a fixed clock.
pub fn boot() -> (
    ScheduleEngineHandle,
    Arc<InMemoryRepository>,
    Arc<FixedClock>,
) {
    let repository = Arc::new(InMemoryRepository::new());
    let clock = Arc::new(FixedClock::at(test_now()));
    let mut config = AirwaveConfig::default();
    config.scheduler.auto_sweep = false;
    let handle = spawn_schedule_engine(config, Arc::clone(&repository), Arc::clone(&clock));
    (handle, repository, clock)
}
