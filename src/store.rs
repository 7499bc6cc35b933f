//! Ballot State Store
//!
//! One reactive store per ranking ballot, created when the ballot mounts
//! and dropped with it. Uses Leptos reactive_stores for fine-grained reactivity.

use reactive_stores::Store;

use crate::models::{RankEntry, RankOrder};
use crate::ranking::{move_row, recompute_order, Recomputed};
use crate::sync::{AutoSaveEvent, AutoSaveGate, AutoSavePhase, Dispatch, FinalOutcome, FinalPhase};

/// State of a single ballot with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BallotState {
    /// Rows in display order
    pub rows: Vec<RankEntry>,
    /// Labels and order from the last walk over `rows`
    pub recomputed: Recomputed,
    pub auto_save: AutoSavePhase,
    pub final_phase: FinalPhase,
    pub gate: AutoSaveGate,
}

/// What the ballot should do after a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSavePlan {
    /// Nothing ranked: warn instead of saving
    SkipEmpty,
    Send(u64, RankOrder),
    /// Sent later, once the save in flight lands
    Queued,
}

/// What the ballot should do once an auto-save lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveSettle {
    /// Newer order waiting to go out
    pub next: Option<(u64, RankOrder)>,
    /// Surface a failure toast (only for the newest save)
    pub report_failure: bool,
}

impl BallotState {
    pub fn new(rows: Vec<RankEntry>) -> Self {
        let recomputed = recompute_order(&rows);
        Self {
            rows,
            recomputed,
            ..Default::default()
        }
    }

    pub fn order(&self) -> &RankOrder {
        &self.recomputed.order
    }

    pub fn row_keys(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.row_key).collect()
    }

    pub fn begin_drag(&mut self) {
        self.auto_save = self.auto_save.on_event(AutoSaveEvent::DragStarted);
    }

    pub fn cancel_drag(&mut self) {
        self.auto_save = self.auto_save.on_event(AutoSaveEvent::DragCancelled);
    }

    /// Move one row and relabel the whole list
    pub fn apply_drop(&mut self, from: usize, to: usize) -> bool {
        let moved = move_row(&mut self.rows, from, to);
        self.relabel();
        moved
    }

    /// Drop that left the order as it was; labels are still refreshed
    pub fn relabel(&mut self) {
        self.recomputed = recompute_order(&self.rows);
        self.auto_save = self.auto_save.on_event(AutoSaveEvent::Dropped);
    }

    pub fn plan_auto_save(&mut self) -> AutoSavePlan {
        if self.recomputed.is_empty() {
            self.auto_save = self.auto_save.on_event(AutoSaveEvent::SaveSkipped);
            return AutoSavePlan::SkipEmpty;
        }
        self.auto_save = self.auto_save.on_event(AutoSaveEvent::SaveDispatched);
        match self.gate.request(self.recomputed.order.clone()) {
            Dispatch::Send(seq, order) => AutoSavePlan::Send(seq, order),
            Dispatch::Queued => AutoSavePlan::Queued,
        }
    }

    pub fn settle_auto_save(&mut self, seq: u64, ok: bool) -> AutoSaveSettle {
        let report_failure = !ok && self.gate.is_latest(seq);
        let next = self.gate.complete(seq);
        if next.is_none() {
            self.auto_save = self.auto_save.on_event(AutoSaveEvent::SaveSettled);
        }
        AutoSaveSettle { next, report_failure }
    }

    /// Returns false when a submission is already running or the page is leaving
    pub fn begin_final(&mut self) -> bool {
        if !self.final_phase.can_submit() {
            return false;
        }
        self.final_phase = FinalPhase::SubmittingFinal;
        true
    }

    pub fn settle_final(&mut self, outcome: Result<&FinalOutcome, String>) {
        self.final_phase = match outcome {
            Ok(outcome) => FinalPhase::from(outcome),
            Err(message) => FinalPhase::Failed(message),
        };
    }
}

/// Type alias for the store
pub type BallotStore = Store<BallotState>;

pub fn create_ballot_store(rows: Vec<RankEntry>) -> BallotStore {
    Store::new(BallotState::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionId;
    use crate::ranking::{assign_row_keys, RowMark};

    fn state(ids: &[&str]) -> BallotState {
        let mut rows: Vec<RankEntry> = ids
            .iter()
            .map(|id| RankEntry {
                submission_id: SubmissionId::from(*id),
                title: id.to_string(),
                artist: None,
                thumbnail_url: None,
                row_key: 0,
            })
            .collect();
        assign_row_keys(&mut rows);
        BallotState::new(rows)
    }

    #[test]
    fn test_initial_labels_without_save() {
        let s = state(&["B", "A", "C"]);
        assert_eq!(s.order().serialize(), "B,A,C");
        assert_eq!(s.auto_save, AutoSavePhase::Idle);
        assert_eq!(s.gate.in_flight(), None);
    }

    #[test]
    fn test_drag_b_a_c_to_a_b_c_fires_auto_save() {
        let mut s = state(&["B", "A", "C"]);
        s.begin_drag();
        assert_eq!(s.auto_save, AutoSavePhase::Reordering);

        assert!(s.apply_drop(1, 0));
        assert_eq!(s.auto_save, AutoSavePhase::Recomputed);
        assert_eq!(s.order().serialize(), "A,B,C");
        let a_key = s.rows[0].row_key;
        assert_eq!(s.recomputed.mark(a_key).map(|m| m.label()), Some("1st Place".to_string()));

        let plan = s.plan_auto_save();
        let AutoSavePlan::Send(seq, order) = plan else {
            panic!("expected a request, got {:?}", plan);
        };
        assert_eq!(order.serialize(), "A,B,C");
        assert_eq!(s.auto_save, AutoSavePhase::AutoSaving);

        let settle = s.settle_auto_save(seq, true);
        assert_eq!(settle, AutoSaveSettle { next: None, report_failure: false });
        assert_eq!(s.auto_save, AutoSavePhase::Idle);
    }

    #[test]
    fn test_failed_save_returns_to_idle_and_reports() {
        let mut s = state(&["A", "B"]);
        s.apply_drop(0, 1);
        let AutoSavePlan::Send(seq, _) = s.plan_auto_save() else { panic!() };
        let settle = s.settle_auto_save(seq, false);
        assert!(settle.report_failure);
        assert_eq!(s.auto_save, AutoSavePhase::Idle);
    }

    #[test]
    fn test_superseded_failure_is_silent_and_newest_goes_out() {
        let mut s = state(&["A", "B", "C"]);
        s.apply_drop(0, 2);
        let AutoSavePlan::Send(first, _) = s.plan_auto_save() else { panic!() };
        s.apply_drop(0, 1);
        assert_eq!(s.plan_auto_save(), AutoSavePlan::Queued);

        let settle = s.settle_auto_save(first, false);
        assert!(!settle.report_failure);
        let (_, next) = settle.next.unwrap();
        assert_eq!(next, s.order().clone());
        assert_eq!(s.auto_save, AutoSavePhase::AutoSaving);
    }

    #[test]
    fn test_empty_ballot_skips_save() {
        let mut s = state(&[]);
        s.apply_drop(0, 0);
        assert_eq!(s.plan_auto_save(), AutoSavePlan::SkipEmpty);
        assert_eq!(s.auto_save, AutoSavePhase::Idle);
    }

    #[test]
    fn test_duplicate_row_stays_flagged_after_moves() {
        let mut s = state(&["X", "A", "X"]);
        s.apply_drop(2, 0);
        assert_eq!(s.rows.len(), 3);
        assert_eq!(s.order().serialize(), "X,A");
        // The moved copy is now first, so the other copy is the duplicate
        assert_eq!(s.recomputed.mark(0), Some(RowMark::Duplicate));
        assert_eq!(s.recomputed.mark(2), Some(RowMark::Ranked(1)));
    }

    #[test]
    fn test_final_submission_phases() {
        let mut s = state(&["A"]);
        assert!(s.begin_final());
        assert!(!s.begin_final());
        s.settle_final(Ok(&FinalOutcome::Failed(500)));
        assert!(s.begin_final());
        s.settle_final(Ok(&FinalOutcome::Redirected("/done".to_string())));
        assert!(s.final_phase.is_terminal());
        assert!(!s.begin_final());
    }
}
