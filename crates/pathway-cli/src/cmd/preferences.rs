use crate::config::CliConfig;
use crate::output::{print_fields, print_json};
use anyhow::bail;
use pathway_core::{SkillId, Step3Data, Step4Data, StepPayload, WizardController};

/// Re-onboarding: adjust the time budget and/or skipped skills of an
/// existing session and push the full aggregate in one call.
pub async fn run(
    config: &CliConfig,
    hours: Option<u8>,
    skips: &[String],
    clear_skips: bool,
    json: bool,
) -> anyhow::Result<()> {
    if hours.is_none() && skips.is_empty() && !clear_skips {
        bail!("nothing to update: pass --hours, --skip, or --clear-skips");
    }

    let client = super::api_client(config)?;
    let mut wizard = WizardController::with_debounce_window(client, config.debounce());
    wizard.hydrate().await?;
    if wizard.data().is_empty() {
        bail!("no onboarding session to update: run `pathway start` first");
    }

    if let Some(h) = hours {
        wizard
            .save_step_data(StepPayload::WeeklyHours(Step3Data { weekly_hours: h }))
            .await?;
    }

    if clear_skips || !skips.is_empty() {
        let mut step4 = if clear_skips {
            Step4Data::default()
        } else {
            wizard.data().step4.clone().unwrap_or_default()
        };
        for id in skips {
            step4.skills_to_skip.insert(SkillId::new(id.clone()));
        }
        wizard.save_step_data(StepPayload::SkillsToSkip(step4)).await?;
    }

    wizard.submit_preferences().await?;

    let summary = wizard.summary();
    if json {
        return print_json(&summary);
    }
    println!("Preferences updated.");
    let mut rows = Vec::new();
    if let Some(text) = &summary.weekly_hours_text {
        rows.push(("Time budget", text.clone()));
    }
    if !summary.skipped_skills.is_empty() {
        rows.push(("Skipping", summary.skipped_skills.join(", ")));
    }
    rows.push(("Estimated", summary.estimated_duration.clone()));
    print_fields(&rows);
    Ok(())
}
