//! # TestForest: headless harness for the deciduous lifecycle engine
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `DeciduousPlugin` so
//! tests can plant trees, pick a season, drive fixed ticks and inspect the
//! resulting components without a window or renderer.

mod queries;
mod spawning;

use bevy::prelude::*;

use crate::climate::{Climate, Season};
use crate::config::DeciduousConfig;
use crate::sim_rng::SimRng;
use crate::time_of_day::GameClock;
use crate::DeciduousPlugin;

/// A headless App running only the deciduous engine.
///
/// Builder methods configure climate, season and config; `run_pass()` then
/// advances fixed ticks up to and including the next scheduled pass.
pub struct TestForest {
    app: App,
}

impl Default for TestForest {
    fn default() -> Self {
        Self::new()
    }
}

impl TestForest {
    /// Temperate northern climate, clock paused on the first day of spring.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DeciduousPlugin);
        app.insert_resource(Climate::default());

        // Run Startup once; fixed ticks are driven manually afterwards.
        app.update();

        let mut forest = Self { app };
        forest.set_season(Season::Spring);
        forest
    }

    /// Remove the climate so every scheduled pass is skipped.
    pub fn without_climate(mut self) -> Self {
        self.app.world_mut().remove_resource::<Climate>();
        self
    }

    pub fn with_climate(mut self, climate: Climate) -> Self {
        self.app.insert_resource(climate);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.set_season(season);
        self
    }

    pub fn with_config(mut self, config: DeciduousConfig) -> Self {
        self.app.insert_resource(config);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    /// Move the calendar to the first day of `season` and pause it there so
    /// long tick runs do not drift into the next season.
    pub fn set_season(&mut self, season: Season) {
        let world = self.app.world_mut();
        let day = world
            .get_resource::<Climate>()
            .cloned()
            .unwrap_or_default()
            .first_day_of(season);
        let mut clock = world.resource_mut::<GameClock>();
        clock.day = day;
        clock.paused = true;
    }
}
