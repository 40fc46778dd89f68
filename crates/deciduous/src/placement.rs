//! Hands newly placed deciduous trees over to the lifecycle engine.
//!
//! Placement itself (tool input, species/age randomization) belongs to the
//! host. Once a record carries the `DeciduousTree` marker and a
//! `LifecycleState`, this module attaches `DeciduousTracking` and, if the
//! placer did not pick one, an `UpdateGroup`. A group outside
//! `0..UPDATE_GROUP_COUNT` would never come up in the rotation, so it is
//! wrapped into range.

use bevy::prelude::*;

use crate::records::{DeciduousTracking, DeciduousTree, HarvestOwned, LifecycleState, UpdateGroup};
use crate::scheduler::UPDATE_GROUP_COUNT;
use crate::sim_rng::SimRng;

/// Untracked deciduous records. Matching on presence rather than `Added`
/// picks up a record whose state arrives after the marker.
type AwaitingTracking = (
    With<DeciduousTree>,
    Without<DeciduousTracking>,
    Without<HarvestOwned>,
);

pub fn attach_deciduous_tracking(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    placed: Query<(Entity, &LifecycleState, Option<&UpdateGroup>), AwaitingTracking>,
) {
    let mut attached = 0u32;
    for (entity, state, group) in &placed {
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert(DeciduousTracking::new(*state));
        match group {
            None => {
                entity_commands.insert(rng.next_group());
            }
            Some(&UpdateGroup(g)) if g >= UPDATE_GROUP_COUNT => {
                let wrapped = UpdateGroup(g % UPDATE_GROUP_COUNT);
                warn!(
                    "{:?}: update group {} out of range, using {}",
                    entity, g, wrapped.0
                );
                entity_commands.insert(wrapped);
            }
            Some(_) => {}
        }
        attached += 1;
    }
    if attached > 0 {
        trace!("Attached deciduous tracking to {} placed trees", attached);
    }
}

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            attach_deciduous_tracking
                .after(crate::lifecycle_pass::clear_refresh_tags)
                .in_set(crate::SimulationSet::PreSim),
        );
    }
}
