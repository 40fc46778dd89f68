//! Planting helpers for `TestForest`.

use bevy::prelude::*;

use crate::records::{DeciduousTracking, DeciduousTree, LifecycleState, UpdateGroup};

use super::TestForest;

impl TestForest {
    /// Plant a tree the way the host's placement tool would. Tracking and an
    /// update group are attached on the next tick.
    pub fn plant(&mut self, state: LifecycleState) -> Entity {
        self.app.world_mut().spawn((DeciduousTree, state)).id()
    }

    /// Plant a tree in a chosen bucket; tracking is attached on the next tick.
    pub fn plant_in_group(&mut self, state: LifecycleState, group: u8) -> Entity {
        self.app
            .world_mut()
            .spawn((DeciduousTree, state, UpdateGroup(group)))
            .id()
    }

    /// Spawn a record that is already tracked, bypassing placement.
    pub fn spawn_tracked(
        &mut self,
        state: LifecycleState,
        tracking: DeciduousTracking,
        group: u8,
    ) -> Entity {
        self.app
            .world_mut()
            .spawn((DeciduousTree, state, tracking, UpdateGroup(group)))
            .id()
    }

    /// Spawn a tracked record in the bucket the next pass will evaluate.
    pub fn spawn_due(&mut self, state: LifecycleState, tracking: DeciduousTracking) -> Entity {
        let group = self.next_bucket();
        self.spawn_tracked(state, tracking, group)
    }

    /// Spawn `n` tracked trees spread round-robin over every bucket.
    pub fn spawn_forest(&mut self, n: usize, state: LifecycleState) -> Vec<Entity> {
        (0..n)
            .map(|i| {
                let group = (i % crate::scheduler::UPDATE_GROUP_COUNT as usize) as u8;
                self.spawn_tracked(state, DeciduousTracking::new(state), group)
            })
            .collect()
    }

    /// Insert components on a record, as an external subsystem would.
    pub fn insert<B: Bundle>(&mut self, entity: Entity, bundle: B) {
        self.app.world_mut().entity_mut(entity).insert(bundle);
    }

    pub fn remove<B: Bundle>(&mut self, entity: Entity) {
        self.app.world_mut().entity_mut(entity).remove::<B>();
    }

    /// Overwrite the displayed state, as disease/growth systems would.
    pub fn set_state(&mut self, entity: Entity, state: LifecycleState) {
        self.insert(entity, state);
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.app.world_mut().despawn(entity);
    }
}
