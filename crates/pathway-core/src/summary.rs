//! Read-only projection of the aggregate for the review screen.
//!
//! Derived on demand from [`WizardData`] and the static catalog; never
//! persisted.

use crate::catalog;
use crate::estimate;
use crate::types::{CurrentRole, WizardData};
use crate::validate::{self, SummaryValidation};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    /// Display name of the current role, or the custom text for `other`.
    pub current_role: Option<String>,
    pub target_role: Option<String>,
    pub weekly_hours: Option<u8>,
    pub weekly_hours_text: Option<String>,
    pub skipped_skills: Vec<String>,
    /// `"—"` until both a target role and a time budget are held.
    pub estimated_duration: String,
    pub validation: SummaryValidation,
}

impl SummaryView {
    pub fn project(data: &WizardData) -> SummaryView {
        let current_role = data.step1.as_ref().map(|s| match s.current_role {
            CurrentRole::Other => s
                .custom_role_text
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or("Other")
                .to_string(),
            role => catalog::current_role_display_name(role).to_string(),
        });

        let target_role = data
            .step2
            .as_ref()
            .map(|s| catalog::target_role_info(s.target_role).display_name.to_string());

        let weekly_hours = data.step3.as_ref().map(|s| s.weekly_hours);
        let weekly_hours_text = weekly_hours.map(|h| {
            if validate::is_in_recommended_range(h) {
                format!("{h} hours / week (recommended pace)")
            } else {
                format!("{h} hours / week")
            }
        });

        let skipped_skills = data
            .step4
            .as_ref()
            .map(|s| {
                s.skills_to_skip
                    .iter()
                    .map(|id| {
                        catalog::skill_display_name(id)
                            .map(str::to_string)
                            .unwrap_or_else(|| id.to_string())
                    })
                    .collect()
            })
            .unwrap_or_default();

        let estimated_duration = match (&data.step2, weekly_hours) {
            (Some(step2), Some(hours)) => {
                let base = catalog::target_role_info(step2.target_role).base_hours;
                let skipped = data
                    .step4
                    .as_ref()
                    .map(|s| s.skills_to_skip.len())
                    .unwrap_or(0);
                let total = estimate::adjusted_total_hours(base, skipped);
                let weeks = estimate::completion_weeks(hours as u32, total);
                estimate::format_duration(weeks)
            }
            _ => estimate::format_duration(0),
        };

        SummaryView {
            current_role,
            target_role,
            weekly_hours,
            weekly_hours_text,
            skipped_skills,
            estimated_duration,
            validation: validate::validate_summary(data),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
