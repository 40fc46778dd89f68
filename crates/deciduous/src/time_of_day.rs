use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Simulation calendar. The season oracle reads `day`.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    pub day: u32,
    pub hour: f32,
    pub paused: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            day: 1,
            hour: 6.0, // start at 6 AM
            paused: false,
        }
    }
}

impl GameClock {
    /// Minutes of game time per fixed tick.
    const MINUTES_PER_TICK: f32 = 1.0;

    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.hour += Self::MINUTES_PER_TICK / 60.0;
        if self.hour >= 24.0 {
            self.hour -= 24.0;
            self.day += 1;
        }
    }

    pub fn formatted(&self) -> String {
        let h = self.hour as u32;
        let m = ((self.hour - h as f32) * 60.0) as u32;
        format!("Day {} {:02}:{:02}", self.day, h, m)
    }
}

pub fn tick_game_clock(mut clock: ResMut<GameClock>) {
    clock.tick();
}

pub struct TimeOfDayPlugin;

impl Plugin for TimeOfDayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameClock>().add_systems(
            FixedUpdate,
            tick_game_clock
                .after(crate::tick_counter)
                .in_set(crate::SimulationSet::PreSim),
        );
    }
}
