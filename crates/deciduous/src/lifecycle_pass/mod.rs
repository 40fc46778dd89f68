//! The seasonal lifecycle pass.
//!
//! Every `PASS_INTERVAL_TICKS` fixed ticks, `run_lifecycle_pass`:
//!
//! 1. asks the scheduler which update bucket is due,
//! 2. resolves the season (no climate loaded means no pass),
//! 3. snapshots the bucket's eligible records in query order,
//! 4. evaluates the transition rules over fixed-size chunks in parallel on
//!    the `ComputeTaskPool`, each chunk writing its own `MutationLog`,
//! 5. merges the logs by chunk index and replays them through `Commands`,
//! 6. nudges the safe-removal controller when the dead winter model is
//!    disabled, and publishes `DeciduousPassStats`.
//!
//! `clear_refresh_tags` strips the `VisualRefresh` / `Updated` output tags at
//! the start of the following tick, so listeners see each tag for one tick.

pub mod chunks;
pub mod filter;
pub mod stats;
mod system;


pub use chunks::{evaluate_chunk, evaluate_chunks, ChunkOutcome, CHUNK_SIZE};
pub use filter::{collect_bucket, RecordData, RecordFilter, RecordSnapshot};
pub use stats::{DeciduousPassStats, PassSummary, TransitionCounts};
pub use system::{clear_refresh_tags, run_lifecycle_pass, LifecyclePassPlugin};
