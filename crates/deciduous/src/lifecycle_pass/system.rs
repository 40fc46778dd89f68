//! ECS systems and plugin for the lifecycle pass.

use bevy::prelude::*;

use crate::climate::{current_season, Climate};
use crate::config::DeciduousConfig;
use crate::mutation_log::ReplayLog;
use crate::records::{Updated, VisualRefresh};
use crate::safe_removal::SafeRemovalCommand;
use crate::scheduler;
use crate::time_of_day::GameClock;
use crate::TickCounter;

use super::chunks::{evaluate_chunks, CHUNK_SIZE};
use super::filter::{collect_bucket, RecordData, RecordFilter};
use super::stats::{DeciduousPassStats, PassSummary, TransitionCounts};

/// Scheduled seasonal pass over one update bucket.
#[allow(clippy::too_many_arguments)]
pub fn run_lifecycle_pass(
    tick: Res<TickCounter>,
    clock: Res<GameClock>,
    climate: Option<Res<Climate>>,
    config: Res<DeciduousConfig>,
    records: Query<RecordData, RecordFilter>,
    mut commands: Commands,
    mut safe_removal: EventWriter<SafeRemovalCommand>,
    mut stats: ResMut<DeciduousPassStats>,
) {
    let Some(bucket) = scheduler::active_bucket(tick.0) else {
        return;
    };
    let Some(season) = current_season(climate.as_deref(), &clock) else {
        stats.skipped_no_climate += 1;
        debug!(
            "Lifecycle pass at tick {}: no climate loaded, skipping bucket {}",
            tick.0, bucket
        );
        return;
    };

    #[cfg(feature = "trace")]
    let _span = bevy::log::info_span!("deciduous_lifecycle_pass").entered();

    let snapshots = collect_bucket(&records, bucket);
    let outcomes = evaluate_chunks(&snapshots, season, CHUNK_SIZE);

    let mut counts = TransitionCounts::default();
    let chunks = outcomes.len() as u32;
    let logs: Vec<_> = outcomes
        .into_iter()
        .map(|outcome| {
            counts.merge(&outcome.counts);
            outcome.log
        })
        .collect();
    let replay = ReplayLog::merge(logs);
    let mutations = replay.len() as u32;
    replay.replay(&mut commands);

    if !config.use_dead_model_in_winter {
        safe_removal.send(SafeRemovalCommand::Enable);
    }

    let summary = PassSummary {
        tick: tick.0,
        pass_index: scheduler::pass_index(tick.0),
        bucket,
        season,
        evaluated: snapshots.len() as u32,
        chunks,
        mutations,
        counts,
    };
    debug!(
        "Lifecycle pass {} ({}, {}, bucket {}): {} records in {} chunks, {} mutations \
         (forced dead {}, restored {}, released {}, reconciled {})",
        summary.pass_index,
        clock.formatted(),
        season.name(),
        bucket,
        summary.evaluated,
        chunks,
        mutations,
        counts.forced_dead,
        counts.restored,
        counts.released,
        counts.reconciled,
    );
    stats.record_pass(summary);
}

/// Remove output tags written by the previous tick's pass.
pub fn clear_refresh_tags(
    mut commands: Commands,
    tagged: Query<Entity, Or<(With<VisualRefresh>, With<Updated>)>>,
) {
    for entity in &tagged {
        commands.entity(entity).remove::<(VisualRefresh, Updated)>();
    }
}

pub struct LifecyclePassPlugin;

impl Plugin for LifecyclePassPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DeciduousPassStats>()
            .add_systems(
                FixedUpdate,
                clear_refresh_tags
                    .after(crate::time_of_day::tick_game_clock)
                    .in_set(crate::SimulationSet::PreSim),
            )
            .add_systems(
                FixedUpdate,
                run_lifecycle_pass.in_set(crate::SimulationSet::Simulation),
            );
    }
}
