use crate::climate::*;
use crate::time_of_day::GameClock;
use crate::Saveable;

#[test]
fn test_northern_season_boundaries() {
    let climate = Climate::default();
    assert_eq!(climate.current_season(1), Season::Spring);
    assert_eq!(climate.current_season(90), Season::Spring);
    assert_eq!(climate.current_season(91), Season::Summer);
    assert_eq!(climate.current_season(180), Season::Summer);
    assert_eq!(climate.current_season(181), Season::Fall);
    assert_eq!(climate.current_season(270), Season::Fall);
    assert_eq!(climate.current_season(271), Season::Winter);
    assert_eq!(climate.current_season(360), Season::Winter);
    assert_eq!(climate.current_season(361), Season::Spring); // wraps
}

#[test]
fn test_day_zero_is_first_day() {
    let climate = Climate::default();
    assert_eq!(climate.current_season(0), Season::Spring);
}

#[test]
fn test_southern_hemisphere_is_out_of_phase() {
    let climate = Climate {
        hemisphere: Hemisphere::Southern,
        ..Default::default()
    };
    assert_eq!(climate.current_season(1), Season::Fall);
    assert_eq!(climate.current_season(91), Season::Winter);
    assert_eq!(climate.current_season(181), Season::Spring);
    assert_eq!(climate.current_season(271), Season::Summer);
}

#[test]
fn test_first_day_of_round_trips() {
    for hemisphere in [Hemisphere::Northern, Hemisphere::Southern] {
        let climate = Climate {
            hemisphere,
            days_per_season: 12,
        };
        for season in Season::ALL {
            let day = climate.first_day_of(season);
            assert!(day >= 1);
            assert_eq!(
                climate.current_season(day),
                season,
                "{:?} first day {} should be {}",
                hemisphere,
                day,
                season.name()
            );
        }
    }
}

#[test]
fn test_zero_length_seasons_do_not_divide_by_zero() {
    let climate = Climate {
        hemisphere: Hemisphere::Northern,
        days_per_season: 0,
    };
    assert_eq!(climate.days_per_year(), 4);
    assert_eq!(climate.current_season(4), Season::Winter);
    assert_eq!(climate.current_season(5), Season::Spring);
}

#[test]
fn test_current_season_without_climate_is_none() {
    let clock = GameClock::default();
    assert_eq!(current_season(None, &clock), None);
}

#[test]
fn test_current_season_reads_clock_day() {
    let climate = Climate::default();
    let clock = GameClock {
        day: 300,
        ..Default::default()
    };
    assert_eq!(current_season(Some(&climate), &clock), Some(Season::Winter));
}

#[test]
fn test_season_shift_wraps() {
    assert_eq!(Season::Winter.shifted(1), Season::Spring);
    assert_eq!(Season::Summer.shifted(2), Season::Winter);
    assert_eq!(Season::Fall.shifted(4), Season::Fall);
}

#[test]
fn test_climate_save_roundtrip() {
    let climate = Climate {
        hemisphere: Hemisphere::Southern,
        days_per_season: 30,
    };
    let bytes = climate.save_to_bytes().expect("climate always saves");
    assert_eq!(Climate::load_from_bytes(&bytes), climate);
}

#[test]
fn test_climate_load_garbage_falls_back_to_default() {
    let restored = Climate::load_from_bytes(&[]);
    assert_eq!(restored, Climate::default());
}

#[test]
fn test_registry_reset_unloads_climate() {
    let mut world = bevy::prelude::World::new();
    world.insert_resource(Climate::default());
    let mut registry = crate::SaveableRegistry::default();
    registry.register::<Climate>();

    registry.reset_all(&mut world);
    assert!(world.get_resource::<Climate>().is_none());

    // A saved climate still loads back in.
    let bytes = Climate::default().save_to_bytes().expect("climate always saves");
    let saved = std::collections::BTreeMap::from([("climate".to_string(), bytes)]);
    registry.load_all(&mut world, &saved);
    assert_eq!(world.get_resource::<Climate>(), Some(&Climate::default()));
}
