use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::time_of_day::GameClock;
use crate::Saveable;

use super::types::{Hemisphere, Season};

/// Default season length: a 360-day year of four 90-day seasons.
pub const DAYS_PER_SEASON: u32 = 90;

/// Calendar layout of the loaded map's climate.
#[derive(
    Resource, Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub struct Climate {
    pub hemisphere: Hemisphere,
    /// Length of every season in days. Zero is treated as one.
    pub days_per_season: u32,
}

impl Default for Climate {
    fn default() -> Self {
        Self {
            hemisphere: Hemisphere::Northern,
            days_per_season: DAYS_PER_SEASON,
        }
    }
}

impl Climate {
    pub fn days_per_year(&self) -> u32 {
        self.days_per_season.max(1) * Season::ALL.len() as u32
    }

    /// Season for a 1-based calendar day. Day 0 is treated as day 1.
    pub fn current_season(&self, day: u32) -> Season {
        let per_season = self.days_per_season.max(1);
        let day_of_year = day.saturating_sub(1) % self.days_per_year();
        let northern = Season::ALL[(day_of_year / per_season) as usize];
        match self.hemisphere {
            Hemisphere::Northern => northern,
            Hemisphere::Southern => northern.shifted(2),
        }
    }

    /// First calendar day (>= 1) of the first year on which `season` holds.
    pub fn first_day_of(&self, season: Season) -> u32 {
        let per_season = self.days_per_season.max(1);
        let northern = match self.hemisphere {
            Hemisphere::Northern => season,
            Hemisphere::Southern => season.shifted(2),
        };
        northern.index() as u32 * per_season + 1
    }
}

/// Resolve the season for the clock's current day, or `None` when no climate
/// is loaded.
pub fn current_season(climate: Option<&Climate>, clock: &GameClock) -> Option<Season> {
    climate.map(|c| c.current_season(clock.day))
}

impl Saveable for Climate {
    const SAVE_KEY: &'static str = "climate";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }

    /// Back to "no map loaded": only the host inserts a climate.
    fn reset(world: &mut World) {
        world.remove_resource::<Climate>();
    }
}
