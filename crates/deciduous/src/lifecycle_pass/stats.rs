use bevy::prelude::*;

use crate::climate::Season;
use crate::transition::TransitionKind;

/// Per-kind transition tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionCounts {
    pub released: u32,
    pub forced_dead: u32,
    pub restored: u32,
    pub reconciled: u32,
    pub bookkeeping: u32,
    pub unchanged: u32,
}

impl TransitionCounts {
    pub fn record(&mut self, kind: TransitionKind) {
        let slot = match kind {
            TransitionKind::Released => &mut self.released,
            TransitionKind::ForcedDead => &mut self.forced_dead,
            TransitionKind::Restored => &mut self.restored,
            TransitionKind::Reconciled => &mut self.reconciled,
            TransitionKind::Bookkeeping => &mut self.bookkeeping,
            TransitionKind::Unchanged => &mut self.unchanged,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn merge(&mut self, other: &TransitionCounts) {
        self.released = self.released.saturating_add(other.released);
        self.forced_dead = self.forced_dead.saturating_add(other.forced_dead);
        self.restored = self.restored.saturating_add(other.restored);
        self.reconciled = self.reconciled.saturating_add(other.reconciled);
        self.bookkeeping = self.bookkeeping.saturating_add(other.bookkeeping);
        self.unchanged = self.unchanged.saturating_add(other.unchanged);
    }

    /// Records evaluated.
    pub fn total(&self) -> u32 {
        self.changed().saturating_add(self.unchanged)
    }

    /// Records that emitted at least one mutation.
    pub fn changed(&self) -> u32 {
        self.released
            .saturating_add(self.forced_dead)
            .saturating_add(self.restored)
            .saturating_add(self.reconciled)
            .saturating_add(self.bookkeeping)
    }
}

/// Summary of one executed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub tick: u64,
    pub pass_index: u64,
    pub bucket: u8,
    pub season: Season,
    pub evaluated: u32,
    pub chunks: u32,
    pub mutations: u32,
    pub counts: TransitionCounts,
}

/// Running statistics of the lifecycle pass, for diagnostics and tests.
#[derive(Resource, Debug, Clone, Default)]
pub struct DeciduousPassStats {
    /// Passes that reached the transition phase.
    pub passes_run: u64,
    /// Scheduled passes skipped because no climate was loaded.
    pub skipped_no_climate: u64,
    /// Transition tallies across every pass since startup.
    pub totals: TransitionCounts,
    pub last_pass: Option<PassSummary>,
}

impl DeciduousPassStats {
    pub fn record_pass(&mut self, summary: PassSummary) {
        self.passes_run += 1;
        self.totals.merge(&summary.counts);
        self.last_pass = Some(summary);
    }
}
