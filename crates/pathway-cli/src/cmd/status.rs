use crate::config::CliConfig;
use crate::output::{print_fields, print_json};
use pathway_core::SummaryView;

pub async fn run(config: &CliConfig, json: bool) -> anyhow::Result<()> {
    let client = super::api_client(config)?;
    let snapshot = client.onboarding_status().await?;

    let Some(snapshot) = snapshot else {
        if json {
            return print_json(&serde_json::json!({ "session": null }));
        }
        println!("No onboarding session yet — run `pathway start` to begin.");
        return Ok(());
    };

    if json {
        return print_json(&snapshot);
    }

    let summary = SummaryView::project(&snapshot.data);
    let mut rows = vec![(
        "Step",
        format!("{} of 5 ({})", snapshot.current_step, snapshot.step()),
    )];
    if let Some(role) = &summary.current_role {
        rows.push(("Current role", role.clone()));
    }
    if let Some(role) = &summary.target_role {
        rows.push(("Target role", role.clone()));
    }
    if let Some(text) = &summary.weekly_hours_text {
        rows.push(("Time budget", text.clone()));
    }
    if !summary.skipped_skills.is_empty() {
        rows.push(("Skipping", summary.skipped_skills.join(", ")));
    }
    rows.push(("Estimated", summary.estimated_duration.clone()));
    if let Some(updated) = snapshot.updated_at {
        rows.push(("Updated", updated.to_rfc3339()));
    }
    print_fields(&rows);
    Ok(())
}
