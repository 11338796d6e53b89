//! Per-step completeness checks and field-level validators.
//!
//! Everything in this module is pure: functions over step data and the
//! static catalog, no controller state, no I/O. Forward navigation and
//! submission gating are built entirely on these predicates.

use crate::catalog;
use crate::types::{
    CurrentRole, Step1Data, Step2Data, Step3Data, Step4Data, WizardData, WizardStep,
};
use serde::Serialize;

/// Minimum length of a trimmed custom role description.
const MIN_CUSTOM_ROLE_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Step completeness
// ---------------------------------------------------------------------------

/// Step 1 is complete once a role is selected, except `other`, which also
/// needs a custom description of at least two characters.
pub fn step1_complete(data: &Step1Data) -> bool {
    match data.current_role {
        CurrentRole::Other => data
            .custom_role_text
            .as_deref()
            .map(|t| t.trim().len() >= MIN_CUSTOM_ROLE_LEN)
            .unwrap_or(false),
        _ => true,
    }
}

/// Step 2 is complete only for roles the catalog marks available; "coming
/// soon" roles are display-only.
pub fn step2_complete(data: &Step2Data) -> bool {
    catalog::is_target_role_available(data.target_role)
}

/// Step 3 is complete iff the held value is in `[MIN, MAX]` weekly hours.
pub fn step3_complete(data: &Step3Data) -> bool {
    (catalog::MIN_WEEKLY_HOURS..=catalog::MAX_WEEKLY_HOURS).contains(&data.weekly_hours)
}

/// Step 4 is optional; zero, some, or all skills are all valid.
pub fn step4_complete(_data: &Step4Data) -> bool {
    true
}

// ---------------------------------------------------------------------------
// Field-level validators
// ---------------------------------------------------------------------------

pub fn custom_role_error(data: &Step1Data) -> Option<String> {
    if step1_complete(data) {
        None
    } else {
        Some(format!(
            "Describe your current role in at least {} characters",
            MIN_CUSTOM_ROLE_LEN
        ))
    }
}

pub fn target_role_error(data: &Step2Data) -> Option<String> {
    if step2_complete(data) {
        None
    } else {
        let info = catalog::target_role_info(data.target_role);
        Some(format!("{} is coming soon and cannot be selected yet", info.display_name))
    }
}

pub fn weekly_hours_error(hours: u8) -> Option<String> {
    if (catalog::MIN_WEEKLY_HOURS..=catalog::MAX_WEEKLY_HOURS).contains(&hours) {
        None
    } else {
        Some(format!(
            "Weekly hours must be between {} and {}",
            catalog::MIN_WEEKLY_HOURS,
            catalog::MAX_WEEKLY_HOURS
        ))
    }
}

/// True for the hours band surfaced to the user as the sweet spot.
pub fn is_in_recommended_range(hours: u8) -> bool {
    (catalog::RECOMMENDED_MIN_HOURS..=catalog::RECOMMENDED_MAX_HOURS).contains(&hours)
}

// ---------------------------------------------------------------------------
// Aggregate-level checks
// ---------------------------------------------------------------------------

/// Completeness of one step as held in the aggregate. A `None` slot is
/// incomplete for the required steps 1–3 and complete for the optional
/// step 4; the summary step itself reports aggregate validity.
pub fn is_step_complete(data: &WizardData, step: WizardStep) -> bool {
    match step {
        WizardStep::CurrentRole => data.step1.as_ref().map(step1_complete).unwrap_or(false),
        WizardStep::TargetRole => data.step2.as_ref().map(step2_complete).unwrap_or(false),
        WizardStep::WeeklyHours => data.step3.as_ref().map(step3_complete).unwrap_or(false),
        WizardStep::SkillsToSkip => true,
        WizardStep::Summary => validate_summary(data).is_valid,
    }
}

/// User-facing reason a step blocks forward navigation, or `None` when it
/// does not.
pub fn step_incomplete_reason(data: &WizardData, step: WizardStep) -> Option<String> {
    match step {
        WizardStep::CurrentRole => match &data.step1 {
            None => Some("Select your current role to continue".to_string()),
            Some(d) => custom_role_error(d),
        },
        WizardStep::TargetRole => match &data.step2 {
            None => Some("Select a target role to continue".to_string()),
            Some(d) => target_role_error(d),
        },
        WizardStep::WeeklyHours => match &data.step3 {
            None => Some("Choose your weekly time budget to continue".to_string()),
            Some(d) => weekly_hours_error(d.weekly_hours),
        },
        WizardStep::SkillsToSkip => None,
        WizardStep::Summary => {
            let v = validate_summary(data);
            if v.is_valid {
                None
            } else {
                Some(format!(
                    "Complete step(s) {} before generating your roadmap",
                    v.missing_steps
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Summary validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryValidation {
    pub is_valid: bool,
    /// Required steps (1–3) that are absent or incomplete, ascending.
    /// Step 4 never appears here.
    pub missing_steps: Vec<u8>,
}

pub fn validate_summary(data: &WizardData) -> SummaryValidation {
    let mut missing = Vec::new();
    for step in [
        WizardStep::CurrentRole,
        WizardStep::TargetRole,
        WizardStep::WeeklyHours,
    ] {
        if !is_step_complete(data, step) {
            missing.push(step.index());
        }
    }
    SummaryValidation {
        is_valid: missing.is_empty(),
        missing_steps: missing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
