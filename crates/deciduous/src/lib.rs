use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod climate;
pub mod config;
pub mod lifecycle_pass;
pub mod mutation_log;
pub mod placement;
pub mod records;
pub mod safe_removal;
pub mod scheduler;
pub mod sim_rng;
pub mod simulation_sets;
pub mod time_of_day;
pub mod transition;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Saveable resources
// ---------------------------------------------------------------------------

/// A resource the host's save layer can persist without knowing its type.
///
/// Implementors pick a stable `SAVE_KEY` and their own encoding; registering
/// with `SaveableRegistry::register` is all a plugin has to do.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Key in the save file's extension map. Never rename once shipped.
    const SAVE_KEY: &'static str;

    /// `None` skips the entry (e.g. nothing differs from the default).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    fn load_from_bytes(bytes: &[u8]) -> Self;

    /// What `SaveableRegistry::reset_all` does for this resource.
    fn reset(world: &mut World) {
        world.insert_resource(Self::default());
    }
}

/// `bitcode::decode`, or `T::default()` with a warning when the bytes are
/// unreadable.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "Saveable {}: cannot decode {} bytes, using default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

pub struct SaveableEntry {
    pub key: &'static str,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Every `Saveable` registered by the engine's plugins.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register `T`. A second registration of the same key is ignored with a
    /// warning (and trips a debug assertion).
    pub fn register<T: Saveable>(&mut self) {
        if self.entries.iter().any(|e| e.key == T::SAVE_KEY) {
            warn!(
                "SaveableRegistry: '{}' registered twice, keeping the first",
                T::SAVE_KEY
            );
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", T::SAVE_KEY);
            return;
        }
        self.entries.push(SaveableEntry {
            key: T::SAVE_KEY,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(Saveable::save_to_bytes)
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                world.insert_resource(T::load_from_bytes(bytes));
            }),
            reset_fn: Box::new(|world: &mut World| T::reset(world)),
        });
    }

    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        self.entries
            .iter()
            .filter_map(|entry| (entry.save_fn)(world).map(|bytes| (entry.key.to_string(), bytes)))
            .collect()
    }

    /// Entries missing from `extensions` keep their current value.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Fixed ticks since startup. Drives the pass scheduler; unaffected by game
/// speed or a paused calendar.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Seasonal life-cycle engine for deciduous vegetation.
///
/// The host is expected to insert a `Climate` once a map is loaded; until
/// then the lifecycle pass idles.
pub struct DeciduousPlugin;

impl Plugin for DeciduousPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::PreSim,
                    SimulationSet::Simulation,
                    SimulationSet::PostSim,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, tick_counter.in_set(SimulationSet::PreSim));

        app.add_plugins((
            sim_rng::SimRngPlugin,
            time_of_day::TimeOfDayPlugin,
            climate::ClimatePlugin,
            config::DeciduousConfigPlugin,
            safe_removal::SafeRemovalPlugin,
            placement::PlacementPlugin,
            lifecycle_pass::LifecyclePassPlugin,
        ));
    }
}
