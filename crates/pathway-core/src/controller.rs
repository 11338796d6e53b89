//! The wizard controller: single owner of [`WizardState`], driver of all
//! step transitions, auto-save, and submission.
//!
//! Local state is authoritative for the UI. Saves are optimistic and
//! last-write-wins: a failed persistence call surfaces a retryable message
//! but never rolls `data` back — the next flush re-sends the latest
//! payload. Any pending auto-save is cancelled and flushed before a
//! navigation or submission proceeds, so no two saves for one step are
//! ever in flight with out-of-order payloads.

use crate::backend::{OnboardingBackend, RoadmapReceipt};
use crate::catalog;
use crate::debounce::{DebounceSlot, PendingSave};
use crate::error::{PathwayError, Result};
use crate::summary::SummaryView;
use crate::types::{Step3Data, StepPayload, WizardData, WizardStep};
use crate::validate;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// WizardState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub data: WizardData,
    pub is_loading: bool,
    pub is_saving: bool,
    /// Human-readable error for display; validation and network failures
    /// both land here, never as panics.
    pub error: Option<String>,
    /// Set when generation was attempted while required steps were
    /// missing; the summary screen uses it to highlight them.
    pub generate_attempted: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        WizardState {
            current_step: WizardStep::CurrentRole,
            data: WizardData::default(),
            is_loading: false,
            is_saving: false,
            error: None,
            generate_attempted: false,
        }
    }
}

// ---------------------------------------------------------------------------
// WizardController
// ---------------------------------------------------------------------------

pub struct WizardController<B> {
    backend: B,
    state: WizardState,
    autosave: DebounceSlot,
    debounce_window: Duration,
}

impl<B: OnboardingBackend> WizardController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_debounce_window(backend, catalog::DEBOUNCE_WINDOW)
    }

    pub fn with_debounce_window(backend: B, debounce_window: Duration) -> Self {
        WizardController {
            backend,
            state: WizardState::default(),
            autosave: DebounceSlot::new(),
            debounce_window,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn data(&self) -> &WizardData {
        &self.state.data
    }

    pub fn summary(&self) -> SummaryView {
        SummaryView::project(&self.state.data)
    }

    // ---------------------------------------------------------------------------
    // Hydration
    // ---------------------------------------------------------------------------

    /// Loads a previously persisted session, if any.
    ///
    /// No session (404) is a fresh start, not an error. A real failure
    /// leaves the wizard on a page-level error that the caller may retry.
    pub async fn hydrate(&mut self) -> Result<()> {
        self.state.is_loading = true;
        let result = self.backend.fetch_status().await;
        self.state.is_loading = false;

        match result {
            Ok(Some(snapshot)) => {
                debug!(step = %snapshot.step(), "resuming onboarding session");
                self.state.current_step = snapshot.step();
                self.state.data = snapshot.data;
                self.state.error = None;
                Ok(())
            }
            Ok(None) => {
                debug!("no onboarding session yet, starting fresh");
                self.reset_onboarding();
                Ok(())
            }
            Err(e) => {
                let message = format!("Couldn't load your onboarding status: {e}");
                self.state.error = Some(message);
                Err(PathwayError::Hydrate(e.message))
            }
        }
    }

    // ---------------------------------------------------------------------------
    // Step data
    // ---------------------------------------------------------------------------

    /// Records a selection: the in-memory aggregate is updated before any
    /// await so the UI reflects it immediately, then a debounced save is
    /// scheduled. Out-of-range weekly hours are rejected outright.
    pub async fn save_step_data(&mut self, payload: StepPayload) -> Result<()> {
        if let StepPayload::WeeklyHours(d) = &payload {
            if !validate::step3_complete(d) {
                return Err(PathwayError::HoursOutOfRange {
                    got: d.weekly_hours,
                    min: catalog::MIN_WEEKLY_HOURS,
                    max: catalog::MAX_WEEKLY_HOURS,
                });
            }
        }

        self.state.data.apply(payload.clone());
        let displaced = self
            .autosave
            .arm(payload, Instant::now(), self.debounce_window);

        // A payload for another step cannot wait behind the new one.
        if let Some(save) = displaced {
            self.send_save(save).await?;
        }
        Ok(())
    }

    /// Cancels the debounce timer and persists the pending payload now.
    /// Called before every navigation and on teardown.
    pub async fn flush_pending(&mut self) -> Result<()> {
        match self.autosave.take() {
            Some(save) => self.send_save(save).await,
            None => Ok(()),
        }
    }

    /// Persists the pending payload if its quiet interval has elapsed.
    pub async fn flush_due(&mut self, now: Instant) -> Result<()> {
        match self.autosave.poll_due(now) {
            Some(save) => self.send_save(save).await,
            None => Ok(()),
        }
    }

    /// Deadline the driving loop should sleep until, if a save is pending.
    pub fn next_autosave_deadline(&self) -> Option<Instant> {
        self.autosave.next_deadline()
    }

    async fn send_save(&mut self, save: PendingSave) -> Result<()> {
        debug!(step = %save.step, "persisting step data");
        self.state.is_saving = true;
        let result = self.backend.save_step(save.step, &save.payload).await;
        self.state.is_saving = false;

        match result {
            Ok(()) => {
                self.state.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(step = %save.step, error = %e, "step save failed, keeping local data");
                self.state.error = Some(format!(
                    "Couldn't save your progress: {e}. Your answers are kept and will be re-sent."
                ));
                Err(PathwayError::SaveFailed {
                    step: save.step,
                    message: e.message,
                })
            }
        }
    }

    // ---------------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------------

    /// Gated forward transition: flushes any pending save, then refuses to
    /// advance while the current step is incomplete.
    pub async fn go_to_next_step(&mut self) -> Result<WizardStep> {
        let flushed = self.flush_pending().await;

        let current = self.state.current_step;
        if let Some(reason) = validate::step_incomplete_reason(&self.state.data, current) {
            self.state.error = Some(reason.clone());
            return Err(PathwayError::IncompleteStep { step: current, reason });
        }

        if let Some(next) = current.next() {
            self.state.current_step = next;
            // The time-budget slider starts at the default; holding it in
            // the aggregate keeps the step answerable without an edit.
            if next == WizardStep::WeeklyHours && self.state.data.step3.is_none() {
                self.state.data.step3 = Some(Step3Data::default());
            }
        }
        // A save failure stays visible; only validation errors are cleared
        // by a successful advance.
        if flushed.is_ok() {
            self.state.error = None;
        }
        Ok(self.state.current_step)
    }

    /// Ungated backward transition. A failed flush is surfaced but never
    /// blocks going back.
    pub async fn go_to_previous_step(&mut self) -> WizardStep {
        let _ = self.flush_pending().await;
        if let Some(previous) = self.state.current_step.previous() {
            self.state.current_step = previous;
        }
        self.state.current_step
    }

    /// Ungated jump, clamped into the valid range. Used by summary edit
    /// links; validation is deliberately skipped.
    pub async fn go_to_step(&mut self, n: i64) -> WizardStep {
        let _ = self.flush_pending().await;
        self.state.current_step = WizardStep::from_index(n);
        self.state.current_step
    }

    /// Clears all answers and returns to the first step. Pending edits are
    /// discarded, not flushed: a reset means "start over".
    pub fn reset_onboarding(&mut self) {
        self.autosave.take();
        self.state = WizardState::default();
    }

    // ---------------------------------------------------------------------------
    // Submission
    // ---------------------------------------------------------------------------

    /// Validates the aggregate and calls the roadmap-generation endpoint.
    ///
    /// When required steps are missing the endpoint is not called; the
    /// attempted-but-blocked state is recorded for the summary screen. On
    /// success the wizard state is reset — generation exits the machine.
    pub async fn generate(&mut self) -> Result<RoadmapReceipt> {
        let _ = self.flush_pending().await;

        let validation = validate::validate_summary(&self.state.data);
        if !validation.is_valid {
            self.state.generate_attempted = true;
            self.state.error =
                validate::step_incomplete_reason(&self.state.data, WizardStep::Summary);
            return Err(PathwayError::MissingSteps(validation.missing_steps));
        }

        self.state.is_loading = true;
        let result = self.backend.generate_roadmap(&self.state.data).await;
        self.state.is_loading = false;

        match result {
            Ok(receipt) => {
                debug!(roadmap_id = %receipt.roadmap_id, "roadmap generated");
                self.reset_onboarding();
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "roadmap generation failed");
                self.state.error = Some(format!("Couldn't generate your roadmap: {e}"));
                Err(PathwayError::GenerateFailed(e.message))
            }
        }
    }

    /// Re-onboarding: pushes the full aggregate to the preferences
    /// endpoint outside the initial wizard flow.
    pub async fn submit_preferences(&mut self) -> Result<()> {
        let _ = self.flush_pending().await;

        self.state.is_saving = true;
        let result = self.backend.update_preferences(&self.state.data).await;
        self.state.is_saving = false;

        match result {
            Ok(()) => {
                self.state.error = None;
                Ok(())
            }
            Err(e) => {
                self.state.error = Some(format!("Couldn't update your preferences: {e}"));
                Err(PathwayError::PreferencesFailed(e.message))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
