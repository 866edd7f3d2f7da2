//! Actor implementation for the schedule engine.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::commands::ScheduleCommand;
use super::core::ScheduleEngine;
use super::handle::ScheduleEngineHandle;
use crate::clock::Clock;
use crate::config::AirwaveConfig;
use crate::repository::Repository;

/// Spawns the schedule engine actor and returns its handle.
///
/// The actor processes commands sequentially, so every slot transition and
/// showing consumption is serialized without locks. When `auto_sweep` is
/// enabled the actor also ticks itself at the configured sweep interval and
/// runs a sweep pass between commands; since the tick shares the loop with
/// commands, sweep passes can never overlap each other.
pub fn spawn_schedule_engine<R, C>(
    config: AirwaveConfig,
    repository: Arc<R>,
    clock: C,
) -> ScheduleEngineHandle
where
    R: Repository + 'static,
    C: Clock + 'static,
{
    let (sender, receiver) = mpsc::channel(config.scheduler.command_buffer);
    let engine = ScheduleEngine::new(repository, clock);

    tokio::spawn(async move {
        run_actor_loop(engine, receiver, &config).await;
    });

    ScheduleEngineHandle::new(sender)
}

/// Runs the main actor message processing loop.
///
/// Processes commands one by one in order until the command channel is
/// closed or a shutdown command is received, interleaving periodic sweep
/// ticks when configured.
async fn run_actor_loop<R, C>(
    engine: ScheduleEngine<R, C>,
    mut receiver: mpsc::Receiver<ScheduleCommand>,
    config: &AirwaveConfig,
) where
    R: Repository + 'static,
    C: Clock + 'static,
{
    tracing::debug!("schedule engine actor started");

    let auto_sweep = config.scheduler.auto_sweep;
    let mut ticker = tokio::time::interval(config.scheduler.sweep_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            command = receiver.recv() => {
                match command {
                    Some(command) => {
                        if !handle_command(&engine, command).await {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = ticker.tick(), if auto_sweep => {
                engine.sweep(engine.now()).await;
            }
        }
    }

    tracing::debug!("schedule engine actor stopped");
}

/// Handles a single command for the schedule engine.
/// Returns true to continue processing, false to shutdown.
async fn handle_command<R, C>(engine: &ScheduleEngine<R, C>, command: ScheduleCommand) -> bool
where
    R: Repository + 'static,
    C: Clock + 'static,
{
    match command {
        ScheduleCommand::Create {
            asset_id,
            scheduled_at,
            notes,
            actor,
            responder,
        } => {
            let result = engine.create(asset_id, scheduled_at, notes, &actor).await;
            let _ = responder.send(result);
        }

        ScheduleCommand::Edit {
            slot_id,
            scheduled_at,
            notes,
            actor,
            responder,
        } => {
            let result = engine.edit(slot_id, scheduled_at, notes, &actor).await;
            let _ = responder.send(result);
        }

        ScheduleCommand::Delete {
            slot_id,
            actor,
            responder,
        } => {
            let result = engine.delete(slot_id, &actor).await;
            let _ = responder.send(result);
        }

        ScheduleCommand::MarkAired {
            slot_id,
            actor,
            responder,
        } => {
            let result = engine.mark_aired_by(slot_id, &actor).await;
            let _ = responder.send(result);
        }

        ScheduleCommand::Sweep { responder } => {
            let outcome = engine.sweep(engine.now()).await;
            let _ = responder.send(outcome);
        }

        ScheduleCommand::ScheduleBetween {
            from,
            to,
            responder,
        } => {
            let result = engine.schedule_between(from, to).await;
            let _ = responder.send(result);
        }

        ScheduleCommand::Shutdown { responder } => {
            let _ = responder.send(());
            return false;
        }
    }

    true
}
