//! CLI command implementations

use std::sync::Arc;
use std::time::Duration;

use airwave_core::clock::SystemClock;
use airwave_core::config::AirwaveConfig;
use airwave_core::model::{
    ActorId, AssetId, ContactId, ContentAsset, DistributorContact, GrantId, LicenseGrant, RoleId,
    SlotId,
};
use airwave_core::{
    Actor, Capability, CapabilitySet, InMemoryRepository, Role, ScheduleEngineHandle,
    SessionContext, spawn_schedule_engine,
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Schedule a slot for an asset in the demo library
    Schedule {
        /// Asset id to air
        asset: i64,
        /// Scheduled time, RFC 3339 (e.g. 2026-09-01T20:00:00Z)
        at: String,
        /// Free-text notes for the slot
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Mark a slot aired manually
    Air {
        /// Slot id to transition
        slot: i64,
    },
    /// List the demo schedule with derived statuses
    List,
    /// Run the engine with the periodic sweep until interrupted
    Run {
        /// Sweep interval in seconds
        #[arg(long, default_value = "60")]
        sweep_interval: u64,
    },
}

/// Handle the CLI command
///
/// Every command boots a fresh in-memory demo library; the CLI exists to
/// exercise the engine, not to persist a catalog.
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let (handle, repository, session) = boot_demo_engine(match &command {
        Commands::Run { sweep_interval } => Some(Duration::from_secs(*sweep_interval)),
        _ => None,
    });
    let actor = session
        .current_actor()
        .context("no authenticated actor bound to the session")?;

    match command {
        Commands::Schedule { asset, at, notes } => {
            let scheduled_at: DateTime<Utc> = at
                .parse()
                .with_context(|| format!("invalid RFC 3339 timestamp: {at}"))?;
            let slot = handle
                .create(AssetId(asset), scheduled_at, notes, &actor)
                .await?;
            println!("{}", serde_json::to_string_pretty(&slot)?);
        }
        Commands::Air { slot } => {
            let outcome = handle.mark_aired(SlotId(slot), &actor).await?;
            println!("slot {slot}: {outcome:?}");
        }
        Commands::List => {
            list_schedule(&repository).await;
        }
        Commands::Run { sweep_interval } => {
            println!("sweeping every {sweep_interval}s, Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
            handle.shutdown().await?;
        }
    }

    Ok(())
}

/// Seeds the in-memory library and spawns the engine.
///
/// The session is bound to a demo planner actor; in the real deployment
/// the login collaborator does this after checking credentials.
fn boot_demo_engine(
    sweep_interval: Option<Duration>,
) -> (
    ScheduleEngineHandle,
    Arc<InMemoryRepository>,
    SessionContext,
) {
    let repository = Arc::new(InMemoryRepository::new());
    seed_library(&repository);

    let mut config = AirwaveConfig::default();
    if let Some(interval) = sweep_interval {
        config.scheduler.sweep_interval = interval;
    } else {
        config.scheduler.auto_sweep = false;
    }
    let handle = spawn_schedule_engine(config, Arc::clone(&repository), SystemClock);

    let session = SessionContext::new();
    session.bind(Actor {
        id: ActorId(1),
        login: "planner".to_string(),
        role: Role {
            id: RoleId(1),
            name: "Planner".to_string(),
            description: "Plans the broadcast schedule".to_string(),
            capabilities: CapabilitySet::of(&[
                Capability::ManageSchedule,
                Capability::ViewSchedule,
                Capability::ViewContent,
            ]),
        },
    });

    (handle, repository, session)
}

fn seed_library(repository: &InMemoryRepository) {
    let now = Utc::now();
    let contact = repository.insert_contact(DistributorContact {
        id: ContactId(0),
        company_name: "Mosfilm Distribution".to_string(),
        phone: "+7 495 000 00 00".to_string(),
        email: "sales@example.com".to_string(),
        address: "Mosfilmovskaya 1, Moscow".to_string(),
        contact_person: "K. Shakhnazarov".to_string(),
        notes: String::new(),
    });
    let grant = repository.insert_grant(LicenseGrant {
        id: GrantId(0),
        name: "Mosfilm".to_string(),
        description: "Classic catalog".to_string(),
        contact_id: Some(contact.id),
        added_at: now,
    });

    for (title, duration_minutes, remaining_showings) in [
        ("Solaris", 167, 3),
        ("Stalker", 162, 1),
        ("Mirror", 108, 0),
    ] {
        repository.insert_asset(ContentAsset {
            id: AssetId(0),
            title: title.to_string(),
            age_rating: "12+".to_string(),
            duration_minutes,
            file_path: format!("/media/{}.mkv", title.to_lowercase()),
            purchase_date: None,
            rights_expiration: None,
            remaining_showings,
            added_at: now,
            grant_id: grant.id,
        });
    }
}

async fn list_schedule(repository: &InMemoryRepository) {
    let now = Utc::now();
    for slot in repository.all_slots() {
        println!(
            "slot {} asset {} at {} [{}] {}",
            slot.id,
            slot.asset_id,
            slot.scheduled_at,
            slot.status(now),
            slot.notes
        );
    }
}
