//! Update scheduler for the lifecycle pass.
//!
//! The vegetation population is split into `UPDATE_GROUP_COUNT` buckets by
//! each record's `UpdateGroup`. A pass runs every `PASS_INTERVAL_TICKS` fixed
//! ticks and evaluates one bucket, so per-pass work is a fixed fraction of the
//! population no matter how large it grows.
//!
//! Buckets are visited in a fixed rotation of period 32: the 16 even buckets
//! in ascending stride-2 order, then the 16 odd ones. Neighbouring buckets
//! therefore sit half a rotation apart, and every bucket is visited exactly
//! once per 32 consecutive passes.

/// Number of update buckets a population is split into.
pub const UPDATE_GROUP_COUNT: u8 = 32;

/// Fixed ticks between two lifecycle passes.
pub const PASS_INTERVAL_TICKS: u64 = 512;

const HALF_ROTATION: u64 = UPDATE_GROUP_COUNT as u64 / 2;

/// Bucket evaluated by the `pass_index`-th pass.
pub fn bucket_for_pass(pass_index: u64) -> u8 {
    let step = pass_index % HALF_ROTATION;
    let phase = (pass_index / HALF_ROTATION) % 2;
    ((2 * step + phase) % UPDATE_GROUP_COUNT as u64) as u8
}

/// `true` when a pass is due on this tick.
#[inline]
pub fn is_pass_tick(tick: u64) -> bool {
    tick.is_multiple_of(PASS_INTERVAL_TICKS)
}

/// Index of the pass that runs on `tick` (meaningful only on pass ticks).
#[inline]
pub fn pass_index(tick: u64) -> u64 {
    tick / PASS_INTERVAL_TICKS
}

/// The bucket to evaluate on `tick`, or `None` between passes.
pub fn active_bucket(tick: u64) -> Option<u8> {
    is_pass_tick(tick).then(|| bucket_for_pass(pass_index(tick)))
}

/// First pass tick strictly after `tick`.
pub fn next_pass_tick(tick: u64) -> u64 {
    (pass_index(tick) + 1) * PASS_INTERVAL_TICKS
}
