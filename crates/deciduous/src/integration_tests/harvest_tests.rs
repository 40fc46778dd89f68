//! Harvest takeover: once the harvesting subsystem owns a record, the engine
//! undoes any seasonal death and lets go of it for good.

use crate::climate::Season;
use crate::records::{
    DeciduousTracking, DeciduousTree, HarvestOwned, LifecycleState, Updated, VisualRefresh,
};
use crate::test_harness::TestForest;

use LifecycleState::*;

#[test]
fn test_harvest_during_forced_death_restores_and_releases() {
    let mut forest = TestForest::new().with_season(Season::Winter);
    let tree = forest.spawn_due(Adult, DeciduousTracking::new(Adult));
    forest.run_pass();
    assert_eq!(forest.state(tree), Some(Dead));

    forest.insert(tree, HarvestOwned);
    forest.run_until_evaluated(tree);

    assert_eq!(forest.state(tree), Some(Adult));
    assert!(forest.tracking(tree).is_none());
    assert!(forest.has::<VisualRefresh>(tree));
    assert!(!forest.has::<Updated>(tree));
    assert_eq!(forest.stats().last_pass.map(|p| p.counts.released), Some(1));
}

#[test]
fn test_harvest_of_living_tree_only_drops_tracking() {
    let mut forest = TestForest::new().with_season(Season::Summer);
    let tree = forest.spawn_due(Teen, DeciduousTracking::new(Teen));
    forest.insert(tree, HarvestOwned);

    forest.run_pass();

    assert_eq!(forest.state(tree), Some(Teen));
    assert!(forest.tracking(tree).is_none());
    assert!(!forest.has::<VisualRefresh>(tree));
}

#[test]
fn test_harvest_is_final_across_seasons() {
    let mut forest = TestForest::new().with_season(Season::Winter);
    let tree = forest.spawn_due(Elderly, DeciduousTracking::new(Elderly));
    forest.insert(tree, HarvestOwned);
    forest.run_pass();
    assert!(forest.tracking(tree).is_none());

    for season in Season::ALL {
        forest.set_season(season);
        forest.run_until_evaluated(tree);
        assert!(
            forest.tracking(tree).is_none(),
            "tracking came back in {}",
            season.name()
        );
        assert_eq!(forest.state(tree), Some(Elderly));
    }
    assert_eq!(forest.stats().totals.released, 1);
}

#[test]
fn test_harvest_owned_placement_is_never_tracked() {
    let mut forest = TestForest::new().with_season(Season::Winter);
    let tree = forest
        .world_mut()
        .spawn((DeciduousTree, Adult, HarvestOwned))
        .id();

    forest.tick(1);
    assert!(forest.tracking(tree).is_none());

    forest.run_passes(32);
    assert!(forest.tracking(tree).is_none());
    assert_eq!(forest.state(tree), Some(Adult));
}
