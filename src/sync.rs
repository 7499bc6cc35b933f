//! Ranking Sync State
//!
//! Per-list state machines for auto-save and final submission, and the
//! sequencing gate that keeps auto-saves last-write-wins by dispatch order.

use crate::models::RankOrder;

/// Auto-save lifecycle of one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSavePhase {
    #[default]
    Idle,
    Reordering,
    Recomputed,
    AutoSaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveEvent {
    DragStarted,
    /// Released outside any drop target
    DragCancelled,
    Dropped,
    /// A request went out (or was queued behind one in flight)
    SaveDispatched,
    /// Nothing to send, e.g. empty list
    SaveSkipped,
    /// Request finished, success or not
    SaveSettled,
}

impl AutoSavePhase {
    pub fn on_event(self, event: AutoSaveEvent) -> Self {
        use AutoSaveEvent::*;
        use AutoSavePhase::*;
        match (self, event) {
            (_, DragStarted) => Reordering,
            (Reordering, DragCancelled) => Idle,
            (_, Dropped) => Recomputed,
            (Recomputed, SaveDispatched) => AutoSaving,
            (Recomputed, SaveSkipped) => Idle,
            (AutoSaving, SaveSettled) => Idle,
            // A settle landing while the user already started a new drag
            (phase, _) => phase,
        }
    }
}

/// Final submission lifecycle of one list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FinalPhase {
    #[default]
    Idle,
    SubmittingFinal,
    Redirected(String),
    Acknowledged,
    Failed(String),
}

impl FinalPhase {
    /// Whether a new submission may start
    pub fn can_submit(&self) -> bool {
        !matches!(self, FinalPhase::SubmittingFinal | FinalPhase::Redirected(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FinalPhase::Redirected(_))
    }
}

/// How the server answered a final submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalOutcome {
    Redirected(String),
    Acknowledged,
    Failed(u16),
}

impl From<&FinalOutcome> for FinalPhase {
    fn from(outcome: &FinalOutcome) -> Self {
        match outcome {
            FinalOutcome::Redirected(url) => FinalPhase::Redirected(url.clone()),
            FinalOutcome::Acknowledged => FinalPhase::Acknowledged,
            FinalOutcome::Failed(status) => FinalPhase::Failed(format!("Server returned {}", status)),
        }
    }
}

/// Classify a settled final-submit response.
///
/// `fetch` follows redirects itself, so a redirect shows up as `redirected`
/// with the landing URL rather than as a 3xx status.
pub fn classify_final(status: u16, redirected: bool, url: &str) -> FinalOutcome {
    if redirected && !url.is_empty() && (200..300).contains(&status) {
        FinalOutcome::Redirected(url.to_string())
    } else if (200..300).contains(&status) {
        FinalOutcome::Acknowledged
    } else {
        FinalOutcome::Failed(status)
    }
}

/// What to do with a freshly recomputed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Send now with this sequence number
    Send(u64, RankOrder),
    /// Another save is in flight; this order waits as the newest pending one
    Queued,
}

/// Serializes auto-saves of one list.
///
/// At most one request is in flight. Orders arriving meanwhile replace each
/// other as "pending" and only the newest is sent once the flight lands, so
/// the server's last write is always the last order the user produced.
#[derive(Debug, Clone, Default)]
pub struct AutoSaveGate {
    last_seq: u64,
    in_flight: Option<u64>,
    pending: Option<RankOrder>,
}

impl AutoSaveGate {
    pub fn request(&mut self, order: RankOrder) -> Dispatch {
        if self.in_flight.is_some() {
            self.pending = Some(order);
            return Dispatch::Queued;
        }
        let seq = self.issue();
        Dispatch::Send(seq, order)
    }

    /// Mark `seq` as landed; returns the pending order to send next, if any
    pub fn complete(&mut self, seq: u64) -> Option<(u64, RankOrder)> {
        if self.in_flight != Some(seq) {
            return None;
        }
        self.in_flight = None;
        let order = self.pending.take()?;
        let next = self.issue();
        Some((next, order))
    }

    /// True when nothing newer has been dispatched or queued after `seq`
    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.last_seq && self.pending.is_none()
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    fn issue(&mut self) -> u64 {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);
        self.last_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionId;

    fn order(ids: &str) -> RankOrder {
        ids.split(',').map(SubmissionId::from).collect()
    }

    #[test]
    fn test_auto_save_cycle_returns_to_idle() {
        let phase = AutoSavePhase::Idle
            .on_event(AutoSaveEvent::DragStarted)
            .on_event(AutoSaveEvent::Dropped);
        assert_eq!(phase, AutoSavePhase::Recomputed);
        let phase = phase.on_event(AutoSaveEvent::SaveDispatched);
        assert_eq!(phase, AutoSavePhase::AutoSaving);
        assert_eq!(phase.on_event(AutoSaveEvent::SaveSettled), AutoSavePhase::Idle);
    }

    #[test]
    fn test_empty_list_skips_save() {
        let phase = AutoSavePhase::Reordering
            .on_event(AutoSaveEvent::Dropped)
            .on_event(AutoSaveEvent::SaveSkipped);
        assert_eq!(phase, AutoSavePhase::Idle);
    }

    #[test]
    fn test_settle_during_new_drag_keeps_reordering() {
        let phase = AutoSavePhase::AutoSaving
            .on_event(AutoSaveEvent::DragStarted)
            .on_event(AutoSaveEvent::SaveSettled);
        assert_eq!(phase, AutoSavePhase::Reordering);
    }

    #[test]
    fn test_cancelled_drag_is_idle() {
        let phase = AutoSavePhase::Idle
            .on_event(AutoSaveEvent::DragStarted)
            .on_event(AutoSaveEvent::DragCancelled);
        assert_eq!(phase, AutoSavePhase::Idle);
        assert_eq!(AutoSavePhase::AutoSaving.on_event(AutoSaveEvent::DragCancelled), AutoSavePhase::AutoSaving);
    }

    #[test]
    fn test_classify_final() {
        assert_eq!(
            classify_final(200, true, "/judges/thanks"),
            FinalOutcome::Redirected("/judges/thanks".to_string())
        );
        assert_eq!(classify_final(200, false, "/rank"), FinalOutcome::Acknowledged);
        assert_eq!(classify_final(204, false, ""), FinalOutcome::Acknowledged);
        assert_eq!(classify_final(400, false, "/rank"), FinalOutcome::Failed(400));
        // Redirected onto an error page is still a failure
        assert_eq!(classify_final(500, true, "/error"), FinalOutcome::Failed(500));
    }

    #[test]
    fn test_final_phase_terminal_on_redirect() {
        let phase = FinalPhase::from(&FinalOutcome::Redirected("/done".to_string()));
        assert!(phase.is_terminal());
        assert!(!phase.can_submit());
        assert!(FinalPhase::from(&FinalOutcome::Failed(500)).can_submit());
        assert!(!FinalPhase::SubmittingFinal.can_submit());
    }

    #[test]
    fn test_gate_sends_when_idle() {
        let mut gate = AutoSaveGate::default();
        assert_eq!(gate.request(order("A,B")), Dispatch::Send(1, order("A,B")));
        assert_eq!(gate.in_flight(), Some(1));
        assert!(gate.is_latest(1));
        assert_eq!(gate.complete(1), None);
        assert_eq!(gate.in_flight(), None);
    }

    #[test]
    fn test_gate_coalesces_to_newest_pending() {
        let mut gate = AutoSaveGate::default();
        let Dispatch::Send(first, _) = gate.request(order("B,A,C")) else {
            panic!("first save should send");
        };
        assert_eq!(gate.request(order("A,B,C")), Dispatch::Queued);
        assert_eq!(gate.request(order("A,C,B")), Dispatch::Queued);
        assert!(!gate.is_latest(first));

        let (second, next) = gate.complete(first).unwrap();
        assert_eq!(next, order("A,C,B"));
        assert!(second > first);
        assert!(gate.is_latest(second));
        assert_eq!(gate.complete(second), None);
    }

    #[test]
    fn test_gate_ignores_unknown_completion() {
        let mut gate = AutoSaveGate::default();
        gate.request(order("A"));
        gate.request(order("B"));
        assert_eq!(gate.complete(7), None);
        assert_eq!(gate.in_flight(), Some(1));
    }
}
