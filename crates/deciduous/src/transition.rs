//! Per-record seasonal state machine.
//!
//! `transition` is a pure function of a record's current state, its tracking
//! data, the season and whether the harvesting subsystem owns it. It never
//! touches the ECS; the caller turns the returned `Transition` into deferred
//! mutations with `Transition::emit`.
//!
//! Rules, first match decides unless noted:
//!
//! 1. Harvest takeover: restore a seasonally dead record and drop tracking.
//! 2. Stale-flag reconciliation: a "technically dead" record that is no longer
//!    `Dead` forgets the flag. Evaluation continues with the updated tracking.
//! 3. Winter: snapshot the living stage and force `Dead`.
//! 4. Other seasons: undo a seasonal death, or record a stage change (marking
//!    a non-seasonal death as technically dead), or do nothing.

use bevy::prelude::*;

use crate::climate::Season;
use crate::mutation_log::{MutationLog, MutationOp};
use crate::records::{DeciduousTracking, LifecycleState};

/// What the state machine decided for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Harvest subsystem took over; tracking dropped.
    Released,
    /// Winter forced the record to `Dead`.
    ForcedDead,
    /// A seasonal death was undone.
    Restored,
    /// A stale technically-dead flag was cleared.
    Reconciled,
    /// Tracking caught up with a stage change made elsewhere.
    Bookkeeping,
    /// Fixed point, nothing emitted.
    Unchanged,
}

/// How the record's tracking component changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingChange {
    Keep,
    Set(DeciduousTracking),
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    /// New life-cycle state, if it changes.
    pub state: Option<LifecycleState>,
    pub tracking: TrackingChange,
    pub visual_refresh: bool,
    pub updated: bool,
}

impl Transition {
    const UNCHANGED: Transition = Transition {
        kind: TransitionKind::Unchanged,
        state: None,
        tracking: TrackingChange::Keep,
        visual_refresh: false,
        updated: false,
    };

    pub fn is_noop(&self) -> bool {
        self.state.is_none()
            && self.tracking == TrackingChange::Keep
            && !self.visual_refresh
            && !self.updated
    }

    /// Append this transition's mutations for `entity` to `log`.
    ///
    /// Order is fixed: state, then tracking, then tags, so a refresh tag is
    /// never applied ahead of the data it refers to.
    pub fn emit(&self, entity: Entity, log: &mut MutationLog) {
        if let Some(state) = self.state {
            log.push(entity, MutationOp::SetState(state));
        }
        match self.tracking {
            TrackingChange::Keep => {}
            TrackingChange::Set(tracking) => log.push(entity, MutationOp::SetTracking(tracking)),
            TrackingChange::Remove => log.push(entity, MutationOp::RemoveTracking),
        }
        if self.visual_refresh {
            log.push(entity, MutationOp::AddVisualRefresh);
        }
        if self.updated {
            log.push(entity, MutationOp::AddUpdated);
        }
    }
}

/// Evaluate the seasonal rules for one record.
pub fn transition(
    state: LifecycleState,
    tracking: DeciduousTracking,
    season: Season,
    harvest_owned: bool,
) -> Transition {
    if harvest_owned {
        let restore = state.is_dead() && !tracking.previous_state.is_dead();
        return Transition {
            kind: TransitionKind::Released,
            state: restore.then_some(tracking.previous_state),
            tracking: TrackingChange::Remove,
            visual_refresh: restore,
            updated: false,
        };
    }

    let mut tracking = tracking;
    let mut result = Transition::UNCHANGED;

    if tracking.technically_dead && !state.is_dead() {
        tracking.technically_dead = false;
        tracking.previous_state = state;
        result.kind = TransitionKind::Reconciled;
        result.tracking = TrackingChange::Set(tracking);
    }

    if season.is_winter() {
        if !tracking.technically_dead && !state.is_dead() {
            // The flag stays clear: a winter death is tracked by state and
            // previous_state alone.
            tracking.previous_state = state;
            return Transition {
                kind: TransitionKind::ForcedDead,
                state: Some(LifecycleState::Dead),
                tracking: TrackingChange::Set(tracking),
                visual_refresh: true,
                updated: false,
            };
        }
        return result;
    }

    if state.is_dead() && !tracking.technically_dead && !tracking.previous_state.is_dead() {
        // Also fires for a fresh non-seasonal death that has not been flagged
        // yet; that record is resurrected too.
        let restored = tracking.previous_state;
        return Transition {
            kind: TransitionKind::Restored,
            state: Some(restored),
            tracking: TrackingChange::Set(DeciduousTracking::new(restored)),
            visual_refresh: true,
            updated: true,
        };
    }

    if tracking.previous_state != state {
        tracking.previous_state = state;
        if state.is_dead() {
            tracking.technically_dead = true;
        }
        if result.kind == TransitionKind::Unchanged {
            result.kind = TransitionKind::Bookkeeping;
        }
        result.tracking = TrackingChange::Set(tracking);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleState::*;

    fn tracked(previous_state: LifecycleState, technically_dead: bool) -> DeciduousTracking {
        DeciduousTracking {
            previous_state,
            technically_dead,
        }
    }

    fn ops(t: &Transition) -> Vec<MutationOp> {
        let mut log = MutationLog::new(0);
        t.emit(Entity::from_raw(7), &mut log);
        log.iter().map(|m| m.op).collect()
    }

    // -------------------------------------------------------------------------
    // Harvest takeover
    // -------------------------------------------------------------------------

    #[test]
    fn test_harvest_restores_forced_dead_and_releases() {
        for season in Season::ALL {
            let t = transition(Dead, tracked(Adult, false), season, true);
            assert_eq!(t.kind, TransitionKind::Released);
            assert_eq!(t.state, Some(Adult));
            assert_eq!(t.tracking, TrackingChange::Remove);
            assert!(t.visual_refresh);
            assert!(!t.updated);
        }
    }

    #[test]
    fn test_harvest_of_living_record_only_releases() {
        let t = transition(Teen, tracked(Teen, false), Season::Winter, true);
        assert_eq!(t.state, None);
        assert_eq!(t.tracking, TrackingChange::Remove);
        assert!(!t.visual_refresh);
        assert_eq!(ops(&t), vec![MutationOp::RemoveTracking]);
    }

    #[test]
    fn test_harvest_keeps_genuinely_dead_record_dead() {
        let t = transition(Dead, tracked(Dead, true), Season::Spring, true);
        assert_eq!(t.state, None);
        assert_eq!(t.tracking, TrackingChange::Remove);
    }

    #[test]
    fn test_harvest_skips_reconciliation() {
        // Rule 1 short-circuits: the stale flag is irrelevant once released.
        let t = transition(Adult, tracked(Elderly, true), Season::Summer, true);
        assert_eq!(t.kind, TransitionKind::Released);
        assert_eq!(ops(&t), vec![MutationOp::RemoveTracking]);
    }

    // -------------------------------------------------------------------------
    // Stale-flag reconciliation
    // -------------------------------------------------------------------------

    #[test]
    fn test_stale_flag_is_cleared_outside_winter() {
        let t = transition(Adult, tracked(Dead, true), Season::Summer, false);
        assert_eq!(t.kind, TransitionKind::Reconciled);
        assert_eq!(t.state, None);
        assert_eq!(t.tracking, TrackingChange::Set(tracked(Adult, false)));
        assert!(!t.visual_refresh);
    }

    #[test]
    fn test_stale_flag_then_winter_forces_dead() {
        let t = transition(Adult, tracked(Dead, true), Season::Winter, false);
        assert_eq!(t.kind, TransitionKind::ForcedDead);
        assert_eq!(t.state, Some(Dead));
        assert_eq!(t.tracking, TrackingChange::Set(tracked(Adult, false)));
        assert!(t.visual_refresh);
    }

    // -------------------------------------------------------------------------
    // Winter
    // -------------------------------------------------------------------------

    #[test]
    fn test_winter_forces_dead() {
        let t = transition(Adult, tracked(Adult, false), Season::Winter, false);
        assert_eq!(t.kind, TransitionKind::ForcedDead);
        assert_eq!(t.state, Some(Dead));
        assert_eq!(t.tracking, TrackingChange::Set(tracked(Adult, false)));
        assert!(t.visual_refresh);
        assert!(!t.updated);
    }

    #[test]
    fn test_winter_snapshots_current_stage_not_stale_previous() {
        // Stage advanced since the last pass: winter remembers the new stage.
        let t = transition(Elderly, tracked(Adult, false), Season::Winter, false);
        assert_eq!(t.tracking, TrackingChange::Set(tracked(Elderly, false)));
    }

    #[test]
    fn test_winter_leaves_dead_records_alone() {
        assert!(transition(Dead, tracked(Adult, false), Season::Winter, false).is_noop());
        assert!(transition(Dead, tracked(Dead, true), Season::Winter, false).is_noop());
    }

    // -------------------------------------------------------------------------
    // Other seasons
    // -------------------------------------------------------------------------

    #[test]
    fn test_spring_restores_winter_death() {
        let t = transition(Dead, tracked(Adult, false), Season::Spring, false);
        assert_eq!(t.kind, TransitionKind::Restored);
        assert_eq!(t.state, Some(Adult));
        assert_eq!(t.tracking, TrackingChange::Set(tracked(Adult, false)));
        assert!(t.visual_refresh);
        assert!(t.updated);
    }

    #[test]
    fn test_non_winter_external_death_is_resurrected() {
        // A disease/destruction death outside winter that the engine has not
        // flagged yet looks identical to a winter death and is undone.
        let t = transition(Dead, tracked(Elderly, false), Season::Summer, false);
        assert_eq!(t.kind, TransitionKind::Restored);
        assert_eq!(t.state, Some(Elderly));
    }

    #[test]
    fn test_stage_change_is_recorded() {
        let t = transition(Adult, tracked(Teen, false), Season::Fall, false);
        assert_eq!(t.kind, TransitionKind::Bookkeeping);
        assert_eq!(t.state, None);
        assert_eq!(t.tracking, TrackingChange::Set(tracked(Adult, false)));
        assert!(!t.visual_refresh);
    }

    #[test]
    fn test_flagged_death_catches_previous_state_up() {
        let t = transition(Dead, tracked(Adult, true), Season::Spring, false);
        assert_eq!(t.kind, TransitionKind::Bookkeeping);
        assert_eq!(t.state, None);
        assert_eq!(t.tracking, TrackingChange::Set(tracked(Dead, true)));
    }

    #[test]
    fn test_dead_stump_memory_is_restored() {
        let t = transition(Dead, tracked(Stump, false), Season::Spring, false);
        assert_eq!(t.kind, TransitionKind::Restored);
        assert_eq!(t.state, Some(Stump));
    }

    #[test]
    fn test_unflagged_dead_previous_is_stable() {
        assert!(transition(Dead, tracked(Dead, false), Season::Spring, false).is_noop());
    }

    #[test]
    fn test_flagged_death_stays_dead_outside_winter() {
        let t = transition(Dead, tracked(Dead, true), Season::Summer, false);
        assert!(t.is_noop());
        assert_eq!(t.kind, TransitionKind::Unchanged);
    }

    #[test]
    fn test_steady_state_is_fixed_point() {
        for state in LifecycleState::living() {
            for season in [Season::Spring, Season::Summer, Season::Fall] {
                let t = transition(*state, tracked(*state, false), season, false);
                assert!(t.is_noop(), "{:?} in {:?} should be stable", state, season);
            }
        }
    }

    #[test]
    fn test_winter_then_spring_round_trip() {
        let winter = transition(Adult, tracked(Adult, false), Season::Winter, false);
        let TrackingChange::Set(after_winter) = winter.tracking else {
            panic!("winter should persist tracking");
        };
        let spring = transition(Dead, after_winter, Season::Spring, false);
        assert_eq!(spring.state, Some(Adult));
        assert_eq!(spring.tracking, TrackingChange::Set(tracked(Adult, false)));
    }

    // -------------------------------------------------------------------------
    // Emission
    // -------------------------------------------------------------------------

    #[test]
    fn test_emit_order_state_tracking_tags() {
        let t = transition(Dead, tracked(Adult, false), Season::Spring, false);
        assert_eq!(
            ops(&t),
            vec![
                MutationOp::SetState(Adult),
                MutationOp::SetTracking(tracked(Adult, false)),
                MutationOp::AddVisualRefresh,
                MutationOp::AddUpdated,
            ]
        );
    }

    #[test]
    fn test_emit_noop_writes_nothing() {
        let t = transition(Adult, tracked(Adult, false), Season::Summer, false);
        assert!(ops(&t).is_empty());
    }
}
