//! Cancellable scheduled-save slot behind the wizard's auto-save.
//!
//! The slot is a plain state machine over an injected [`Instant`]; it owns
//! no timer. Whoever drives the wizard (the CLI loop here, an event loop in
//! any other front end) sleeps until [`DebounceSlot::next_deadline`] and
//! then polls. Keeping the clock external makes the
//! cancel-then-flush-on-navigation invariant a single code path and the
//! whole thing deterministic under test.

use crate::types::{StepPayload, WizardStep};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub step: WizardStep,
    pub payload: StepPayload,
}

#[derive(Debug, Default)]
pub struct DebounceSlot {
    pending: Option<PendingSave>,
    deadline: Option<Instant>,
}

impl DebounceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers a payload and (re)arms the timer.
    ///
    /// Re-arming for the same step replaces the buffered payload and pushes
    /// the deadline out, so a burst of edits produces one save. Arming for
    /// a *different* step displaces the old pending save, which is returned
    /// and must be flushed immediately by the caller — a stale payload must
    /// never sit behind a fresher one.
    #[must_use]
    pub fn arm(&mut self, payload: StepPayload, now: Instant, window: Duration) -> Option<PendingSave> {
        let step = payload.step();
        let displaced = match &self.pending {
            Some(p) if p.step != step => self.pending.take(),
            _ => None,
        };
        self.pending = Some(PendingSave { step, payload });
        self.deadline = Some(now + window);
        displaced
    }

    /// Cancels the timer and yields the pending save for an immediate
    /// flush. Used on navigation and teardown.
    pub fn take(&mut self) -> Option<PendingSave> {
        self.deadline = None;
        self.pending.take()
    }

    /// Yields the pending save only once its quiet interval has elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Option<PendingSave> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.take(),
            _ => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Step3Data, Step4Data};

    const WINDOW: Duration = Duration::from_millis(500);

    fn hours(h: u8) -> StepPayload {
        StepPayload::WeeklyHours(Step3Data { weekly_hours: h })
    }

    #[test]
    fn rapid_edits_collapse_to_last_payload() {
        let mut slot = DebounceSlot::new();
        let t0 = Instant::now();

        assert!(slot.arm(hours(10), t0, WINDOW).is_none());
        assert!(slot.arm(hours(12), t0 + Duration::from_millis(200), WINDOW).is_none());
        assert!(slot.arm(hours(15), t0 + Duration::from_millis(400), WINDOW).is_none());

        // Not yet due right after the last edit.
        assert_eq!(slot.poll_due(t0 + Duration::from_millis(400)), None);

        // Due exactly one window after the last edit, with only the final value.
        let due = slot.poll_due(t0 + Duration::from_millis(900)).unwrap();
        assert_eq!(due.payload, hours(15));

        // Nothing left to fire.
        assert_eq!(slot.poll_due(t0 + Duration::from_secs(10)), None);
    }

    #[test]
    fn take_cancels_the_timer() {
        let mut slot = DebounceSlot::new();
        let t0 = Instant::now();
        assert!(slot.arm(hours(15), t0, WINDOW).is_none());

        let taken = slot.take().unwrap();
        assert_eq!(taken.step, WizardStep::WeeklyHours);
        assert!(!slot.is_armed());
        assert_eq!(slot.next_deadline(), None);
        assert_eq!(slot.poll_due(t0 + Duration::from_secs(10)), None);
    }

    #[test]
    fn arming_a_different_step_displaces_the_old_save() {
        let mut slot = DebounceSlot::new();
        let t0 = Instant::now();
        assert!(slot.arm(hours(15), t0, WINDOW).is_none());

        let displaced = slot
            .arm(StepPayload::SkillsToSkip(Step4Data::default()), t0, WINDOW)
            .unwrap();
        assert_eq!(displaced.step, WizardStep::WeeklyHours);
        assert_eq!(slot.take().unwrap().step, WizardStep::SkillsToSkip);
    }

    #[test]
    fn empty_slot_is_inert() {
        let mut slot = DebounceSlot::new();
        assert!(!slot.is_armed());
        assert_eq!(slot.take(), None);
        assert_eq!(slot.poll_due(Instant::now()), None);
    }
}
