//! Controller for the safe-removal subsystem.
//!
//! Safe removal hides deciduous trees that would otherwise show a dead model.
//! Other subsystems never flip its state directly; they send a
//! `SafeRemovalCommand` and the controller applies it.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeRemovalCommand {
    Enable,
    Disable,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeRemovalController {
    enabled: bool,
    /// Commands applied since startup, including redundant ones.
    pub commands_applied: u64,
}

impl SafeRemovalController {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Apply one command. Returns `true` when the enabled state flipped.
    pub fn apply(&mut self, command: SafeRemovalCommand) -> bool {
        self.commands_applied += 1;
        let enabled = command == SafeRemovalCommand::Enable;
        let flipped = enabled != self.enabled;
        self.enabled = enabled;
        flipped
    }
}

pub fn apply_safe_removal_commands(
    mut commands: EventReader<SafeRemovalCommand>,
    mut controller: ResMut<SafeRemovalController>,
) {
    for command in commands.read() {
        if controller.apply(*command) {
            info!(
                "Safe removal {}",
                if controller.is_enabled() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
    }
}

pub struct SafeRemovalPlugin;

impl Plugin for SafeRemovalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SafeRemovalController>()
            .add_event::<SafeRemovalCommand>()
            .add_systems(
                FixedUpdate,
                apply_safe_removal_commands.in_set(crate::SimulationSet::PostSim),
            );
    }
}
