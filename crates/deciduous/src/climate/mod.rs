//! Season oracle.
//!
//! Derives the current `Season` from the calendar day in `GameClock` and the
//! season layout stored in the `Climate` resource. The `Climate` resource is
//! owned by the host (it is inserted when a map is loaded); while it is
//! absent `current_season` returns `None` and the lifecycle pass idles.

pub mod oracle;
#[cfg(test)]
mod tests_oracle;
pub mod types;

pub use oracle::{current_season, Climate, DAYS_PER_SEASON};
pub use types::{Hemisphere, Season};

use bevy::prelude::*;

/// Registers `Climate` for saving. A registry reset removes the resource
/// instead of inserting a default, so the lifecycle pass idles until the
/// host loads a map again.
pub struct ClimatePlugin;

impl Plugin for ClimatePlugin {
    fn build(&self, app: &mut App) {
        // No init_resource: a missing Climate is a meaningful state.
        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<Climate>();
    }
}
