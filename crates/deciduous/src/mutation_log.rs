//! Deferred mutation log.
//!
//! Workers of the lifecycle pass never touch the ECS. Each chunk appends the
//! mutations it decides on to its own `MutationLog`; once every chunk has
//! finished, the logs are merged by chunk index and replayed in order through
//! `Commands`. Bevy applies the command queue sequentially, so the record
//! store is only ever written from one thread.

use bevy::prelude::*;

use crate::records::{DeciduousTracking, LifecycleState, Updated, VisualRefresh};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    SetState(LifecycleState),
    SetTracking(DeciduousTracking),
    RemoveTracking,
    AddVisualRefresh,
    AddUpdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub entity: Entity,
    pub op: MutationOp,
}

/// Append-only mutation buffer owned by one chunk.
#[derive(Debug, Default)]
pub struct MutationLog {
    chunk: usize,
    entries: Vec<Mutation>,
}

impl MutationLog {
    pub fn new(chunk: usize) -> Self {
        Self {
            chunk,
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(chunk: usize, capacity: usize) -> Self {
        Self {
            chunk,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Index of the chunk that produced this log.
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    #[inline]
    pub fn push(&mut self, entity: Entity, op: MutationOp) {
        self.entries.push(Mutation { entity, op });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mutation> {
        self.entries.iter()
    }
}

/// All chunk logs of one pass, flattened into replay order.
#[derive(Debug, Default)]
pub struct ReplayLog {
    entries: Vec<Mutation>,
}

impl ReplayLog {
    /// Merge chunk logs into chunk-major order. Within a chunk, emission order
    /// is kept; the order in which workers finished is irrelevant.
    pub fn merge(mut logs: Vec<MutationLog>) -> Self {
        logs.sort_by_key(MutationLog::chunk);
        debug_assert!(
            logs.windows(2).all(|w| w[0].chunk != w[1].chunk),
            "ReplayLog::merge: duplicate chunk index"
        );
        let total = logs.iter().map(MutationLog::len).sum();
        let mut entries = Vec::with_capacity(total);
        for log in logs {
            entries.extend(log.entries);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mutation> {
        self.entries.iter()
    }

    /// Queue every mutation on `commands`, in replay order.
    ///
    /// Inserts are fallible: a record despawned after it was snapshotted is
    /// skipped instead of aborting the rest of the pass.
    pub fn replay(self, commands: &mut Commands) {
        for Mutation { entity, op } in self.entries {
            let Some(mut entity_commands) = commands.get_entity(entity) else {
                continue;
            };
            match op {
                MutationOp::SetState(state) => {
                    entity_commands.try_insert(state);
                }
                MutationOp::SetTracking(tracking) => {
                    entity_commands.try_insert(tracking);
                }
                MutationOp::RemoveTracking => {
                    entity_commands.remove::<DeciduousTracking>();
                }
                MutationOp::AddVisualRefresh => {
                    entity_commands.try_insert(VisualRefresh);
                }
                MutationOp::AddUpdated => {
                    entity_commands.try_insert(Updated);
                }
            }
        }
    }
}
