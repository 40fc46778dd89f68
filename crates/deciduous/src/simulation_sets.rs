//! Ordering of the engine's systems inside `FixedUpdate`.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – tick counter, calendar, clearing last tick's output tags,
//!   attaching tracking to freshly placed trees.
//! * **Simulation** – the lifecycle pass.
//! * **PostSim** – reacting to what the pass emitted (safe-removal commands,
//!   config change reporting). Never mutates records.
//!
//! Host plugins that insert `HarvestOwned` or change `LifecycleState` should
//! run before `Simulation` so the pass observes their writes on the same
//! tick.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}
