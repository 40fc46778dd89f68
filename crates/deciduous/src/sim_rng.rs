//! Seeded randomness for placement-time decisions.
//!
//! Update groups are drawn from a `ChaCha8Rng` so that two runs from the same
//! seed spread the same trees over the same buckets on every platform.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::records::UpdateGroup;
use crate::scheduler::UPDATE_GROUP_COUNT;

const DEFAULT_SEED: u64 = 0x5EA5_0A1;

/// Full generator position, so a reload continues the exact sequence.
#[derive(Encode, Decode)]
struct RngState {
    seed: [u8; 32],
    stream: u64,
    word_pos: u128,
}

impl RngState {
    fn capture(rng: &ChaCha8Rng) -> Self {
        Self {
            seed: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: rng.get_word_pos(),
        }
    }
}

impl Default for RngState {
    /// Start of the default-seeded sequence.
    fn default() -> Self {
        Self::capture(&SimRng::default().0)
    }
}

#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniformly random update bucket.
    pub fn next_group(&mut self) -> UpdateGroup {
        UpdateGroup(self.0.gen_range(0..UPDATE_GROUP_COUNT))
    }
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(&RngState::capture(&self.0)))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        let state: RngState = crate::decode_or_warn(Self::SAVE_KEY, bytes);
        let mut rng = ChaCha8Rng::from_seed(state.seed);
        rng.set_stream(state.stream);
        rng.set_word_pos(state.word_pos);
        Self(rng)
    }
}

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>();
        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<SimRng>();
    }
}
