//! Player-facing configuration of the deciduous lifecycle engine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Saveable;

/// Settings read by the lifecycle pass.
#[derive(
    Resource, Debug, Clone, Serialize, Deserialize, bitcode::Encode, bitcode::Decode, PartialEq,
)]
pub struct DeciduousConfig {
    /// Show bare "dead" models for deciduous trees during winter. When off,
    /// the safe-removal subsystem is enabled instead.
    pub use_dead_model_in_winter: bool,
}

impl Default for DeciduousConfig {
    fn default() -> Self {
        Self {
            use_dead_model_in_winter: true,
        }
    }
}

impl Saveable for DeciduousConfig {
    const SAVE_KEY: &'static str = "deciduous_config";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Defaults are not worth a slot in the save file.
        if *self == Self::default() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

/// Log whenever the configuration is inserted or edited.
pub fn report_config_changes(config: Res<DeciduousConfig>) {
    if !config.is_changed() {
        return;
    }
    info!(
        "Deciduous config: dead model in winter {}",
        if config.use_dead_model_in_winter {
            "enabled"
        } else {
            "disabled (safe removal takes over)"
        }
    );
}

pub struct DeciduousConfigPlugin;

impl Plugin for DeciduousConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DeciduousConfig>().add_systems(
            FixedUpdate,
            report_config_changes.in_set(crate::SimulationSet::PostSim),
        );

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<DeciduousConfig>();
    }
}
