//! Tick and inspection methods for `TestForest`.

use bevy::prelude::*;

use crate::lifecycle_pass::DeciduousPassStats;
use crate::records::{DeciduousTracking, LifecycleState};
use crate::safe_removal::SafeRemovalController;
use crate::scheduler;
use crate::time_of_day::GameClock;
use crate::TickCounter;

use super::TestForest;

impl TestForest {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed ticks by executing `FixedUpdate` directly, independent of
    /// wall-clock time.
    pub fn tick(&mut self, n: u64) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    /// Bucket the next scheduled pass will evaluate.
    pub fn next_bucket(&self) -> u8 {
        let next = scheduler::next_pass_tick(self.tick_count());
        scheduler::bucket_for_pass(scheduler::pass_index(next))
    }

    /// Tick up to and including the next pass; returns the bucket it covered.
    /// Output tags written by that pass are still present afterwards.
    pub fn run_pass(&mut self) -> u8 {
        let now = self.tick_count();
        let next = scheduler::next_pass_tick(now);
        let bucket = self.next_bucket();
        self.tick(next - now);
        bucket
    }

    pub fn run_passes(&mut self, n: u32) {
        for _ in 0..n {
            self.run_pass();
        }
    }

    /// Run passes until the record's bucket has been evaluated once.
    pub fn run_until_evaluated(&mut self, entity: Entity) {
        let group = self
            .app
            .world()
            .get::<crate::records::UpdateGroup>(entity)
            .map(|g| g.0)
            .expect("record has no update group");
        for _ in 0..scheduler::UPDATE_GROUP_COUNT {
            if self.run_pass() == group {
                return;
            }
        }
        panic!("bucket {} never came up in a full rotation", group);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn state(&self, entity: Entity) -> Option<LifecycleState> {
        self.app.world().get::<LifecycleState>(entity).copied()
    }

    pub fn tracking(&self, entity: Entity) -> Option<DeciduousTracking> {
        self.app.world().get::<DeciduousTracking>(entity).copied()
    }

    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        self.app.world().get::<C>(entity).is_some()
    }

    pub fn stats(&self) -> &DeciduousPassStats {
        self.app.world().resource::<DeciduousPassStats>()
    }

    pub fn safe_removal(&self) -> &SafeRemovalController {
        self.app.world().resource::<SafeRemovalController>()
    }

    pub fn clock(&self) -> &GameClock {
        self.app.world().resource::<GameClock>()
    }

    /// Count records currently carrying component `C`.
    pub fn count_with<C: Component>(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query_filtered::<Entity, With<C>>().iter(world).count()
    }
}
