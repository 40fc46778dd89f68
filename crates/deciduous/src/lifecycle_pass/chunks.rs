//! Chunk-parallel evaluation of the transition rules.

use bevy::log::trace;
use bevy::tasks::{ComputeTaskPool, TaskPool};

use crate::climate::Season;
use crate::mutation_log::MutationLog;
use crate::transition::transition;

use super::filter::RecordSnapshot;
use super::stats::TransitionCounts;

/// Records per worker chunk.
pub const CHUNK_SIZE: usize = 256;

/// What one chunk produced.
#[derive(Debug)]
pub struct ChunkOutcome {
    pub log: MutationLog,
    pub counts: TransitionCounts,
}

/// Run the transition rules over one chunk. Touches nothing outside `chunk`
/// and the returned log.
pub fn evaluate_chunk(index: usize, chunk: &[RecordSnapshot], season: Season) -> ChunkOutcome {
    let mut log = MutationLog::with_capacity(index, chunk.len());
    let mut counts = TransitionCounts::default();
    for record in chunk {
        let t = transition(
            record.state,
            record.tracking,
            season,
            record.harvest_owned,
        );
        counts.record(t.kind);
        if !t.is_noop() {
            trace!("{:?}: {:?} ({:?})", record.entity, t.kind, record.state);
        }
        t.emit(record.entity, &mut log);
    }
    ChunkOutcome { log, counts }
}

/// Split `snapshots` into contiguous chunks of `chunk_size` and evaluate them
/// on the compute pool. Outcomes come back in chunk order.
pub fn evaluate_chunks(
    snapshots: &[RecordSnapshot],
    season: Season,
    chunk_size: usize,
) -> Vec<ChunkOutcome> {
    let chunk_size = chunk_size.max(1);
    if snapshots.is_empty() {
        return Vec::new();
    }
    if snapshots.len() <= chunk_size {
        // Not worth a scope for a single chunk.
        return vec![evaluate_chunk(0, snapshots, season)];
    }

    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    pool.scope(|scope| {
        for (index, chunk) in snapshots.chunks(chunk_size).enumerate() {
            scope.spawn(async move { evaluate_chunk(index, chunk, season) });
        }
    })
}
