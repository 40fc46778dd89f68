//! Record selection for one pass.

use bevy::prelude::*;

use crate::records::{
    DeciduousTracking, Deleted, HarvestOwned, LifecycleState, Overridden, Transient, UpdateGroup,
};

/// Components read from each candidate record.
pub type RecordData = (
    Entity,
    &'static LifecycleState,
    &'static DeciduousTracking,
    &'static UpdateGroup,
    Has<HarvestOwned>,
);

/// Records that are being deleted, are placement previews, or are overridden
/// this tick are invisible to the pass.
pub type RecordFilter = (Without<Deleted>, Without<Transient>, Without<Overridden>);

/// Immutable copy of the fields the transition rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSnapshot {
    pub entity: Entity,
    pub state: LifecycleState,
    pub tracking: DeciduousTracking,
    pub harvest_owned: bool,
}

/// Snapshot every eligible record in `bucket`, in query iteration order.
pub fn collect_bucket(
    records: &Query<RecordData, RecordFilter>,
    bucket: u8,
) -> Vec<RecordSnapshot> {
    records
        .iter()
        .filter(|(_, _, _, group, _)| group.0 == bucket)
        .map(|(entity, state, tracking, _, harvest_owned)| RecordSnapshot {
            entity,
            state: *state,
            tracking: *tracking,
            harvest_owned,
        })
        .collect()
}
