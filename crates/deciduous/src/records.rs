//! ECS components that make up a vegetation record.
//!
//! A record is any entity carrying the `DeciduousTree` marker. The lifecycle
//! engine reads `LifecycleState`, `DeciduousTracking`, `UpdateGroup` and the
//! presence of `HarvestOwned`; it writes `LifecycleState`,
//! `DeciduousTracking` and the two output tags `VisualRefresh` / `Updated`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Life-cycle state
// =============================================================================

/// Life stage of a vegetation record.
///
/// Only the `Dead` / not-`Dead` split matters to the seasonal engine; the
/// living stages are carried through transitions untouched.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    Child,
    Teen,
    Adult,
    Elderly,
    Dead,
    Stump,
}

impl LifecycleState {
    #[inline]
    pub fn is_dead(self) -> bool {
        self == LifecycleState::Dead
    }

    pub fn name(self) -> &'static str {
        match self {
            LifecycleState::Child => "Child",
            LifecycleState::Teen => "Teen",
            LifecycleState::Adult => "Adult",
            LifecycleState::Elderly => "Elderly",
            LifecycleState::Dead => "Dead",
            LifecycleState::Stump => "Stump",
        }
    }

    /// The stages a freshly placed tree can start in.
    pub fn living() -> &'static [LifecycleState] {
        &[
            LifecycleState::Child,
            LifecycleState::Teen,
            LifecycleState::Adult,
            LifecycleState::Elderly,
        ]
    }
}

// =============================================================================
// Tracking
// =============================================================================

/// Seasonal bookkeeping attached while the engine owns a record's life-cycle.
///
/// `previous_state` is the stage restored when winter ends. `technically_dead`
/// marks a death that did not come from the seasonal rule, so that a later
/// change away from `Dead` by another actor can be reconciled.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeciduousTracking {
    pub previous_state: LifecycleState,
    pub technically_dead: bool,
}

impl DeciduousTracking {
    /// Tracking for a record that has just been placed in `state`.
    pub fn new(state: LifecycleState) -> Self {
        Self {
            previous_state: state,
            technically_dead: false,
        }
    }
}

// =============================================================================
// Scheduling
// =============================================================================

/// Update bucket of a record, in `0..UPDATE_GROUP_COUNT`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateGroup(pub u8);

// =============================================================================
// Markers
// =============================================================================

/// Marks an entity as deciduous vegetation managed by the seasonal engine.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DeciduousTree;

/// The harvesting subsystem has taken permanent ownership of this record.
/// Inserted and removed only by that subsystem.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HarvestOwned;

/// Record is scheduled for deletion this tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Deleted;

/// Record is a preview/pending placement, not yet part of the world.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Transient;

/// Another subsystem has overridden this record for the current tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Overridden;

// =============================================================================
// Output tags
// =============================================================================

/// The record's visual model must be rebuilt (alive <-> dead mesh swap).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct VisualRefresh;

/// Generic "record changed this tick" tag for downstream listeners.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Updated;
