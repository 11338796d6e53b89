use crate::config::CliConfig;
use crate::output::print_fields;
use pathway_client::ApiClient;
use pathway_core::{
    catalog, CurrentRole, SkillId, Step1Data, Step2Data, Step3Data, Step4Data, StepPayload,
    WizardController, WizardStep,
};
use std::io::Write;

/// Runs the five-step wizard interactively until the roadmap is generated
/// or the user quits. Enter `b` to go back, `q` to quit; answers are
/// auto-saved, so quitting mid-flow resumes later.
pub async fn run(config: &CliConfig, fresh: bool) -> anyhow::Result<()> {
    let client = super::api_client(config)?;
    let mut wizard = WizardController::with_debounce_window(client, config.debounce());

    if fresh {
        wizard.reset_onboarding();
    } else {
        hydrate_with_retry(&mut wizard).await?;
        if wizard.current_step() != WizardStep::CurrentRole || !wizard.data().is_empty() {
            println!("Resuming your onboarding at step {} of 5.\n", wizard.current_step().index());
        }
    }

    loop {
        let quit = match wizard.current_step() {
            WizardStep::CurrentRole => step_current_role(&mut wizard).await?,
            WizardStep::TargetRole => step_target_role(&mut wizard).await?,
            WizardStep::WeeklyHours => step_weekly_hours(&mut wizard).await?,
            WizardStep::SkillsToSkip => step_skills(&mut wizard).await?,
            WizardStep::Summary => step_summary(&mut wizard).await?,
        };
        if quit {
            // Teardown guarantee: no edit is lost on the way out.
            let _ = wizard.flush_pending().await;
            return Ok(());
        }
    }
}

async fn hydrate_with_retry(wizard: &mut WizardController<ApiClient>) -> anyhow::Result<()> {
    loop {
        match wizard.hydrate().await {
            Ok(()) => return Ok(()),
            Err(e) => {
                eprintln!("{e}");
                let answer = prompt("Press Enter to retry, or type 'fresh' to start over")?;
                if answer.eq_ignore_ascii_case("fresh") {
                    wizard.reset_onboarding();
                    return Ok(());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

async fn step_current_role(wizard: &mut WizardController<ApiClient>) -> anyhow::Result<bool> {
    println!("Step 1 of 5 — What best describes you today?");
    let roles = CurrentRole::all();
    for (i, role) in roles.iter().enumerate() {
        println!("  {}. {}", i + 1, catalog::current_role_display_name(*role));
    }

    let input = prompt("Pick a number")?;
    match nav(&input) {
        Some(Nav::Back) => {
            wizard.go_to_previous_step().await;
            return Ok(false);
        }
        Some(Nav::Quit) => return Ok(true),
        None => {}
    }

    let Some(role) = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| roles.get(i).copied())
    else {
        println!("Enter a number between 1 and {}.\n", roles.len());
        return Ok(false);
    };

    let custom_role_text = if role == CurrentRole::Other {
        Some(prompt("Describe your current role")?)
    } else {
        None
    };

    wizard
        .save_step_data(StepPayload::CurrentRole(Step1Data {
            current_role: role,
            custom_role_text,
        }))
        .await?;
    advance(wizard).await;
    Ok(false)
}

async fn step_target_role(wizard: &mut WizardController<ApiClient>) -> anyhow::Result<bool> {
    println!("Step 2 of 5 — Where do you want to go?");
    let roles = catalog::target_roles();
    for (i, info) in roles.iter().enumerate() {
        let suffix = if info.available { "" } else { "  (coming soon)" };
        println!("  {}. {}{}", i + 1, info.display_name, suffix);
    }

    let input = prompt("Pick a number")?;
    match nav(&input) {
        Some(Nav::Back) => {
            wizard.go_to_previous_step().await;
            return Ok(false);
        }
        Some(Nav::Quit) => return Ok(true),
        None => {}
    }

    let Some(info) = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| roles.get(i))
    else {
        println!("Enter a number between 1 and {}.\n", roles.len());
        return Ok(false);
    };

    wizard
        .save_step_data(StepPayload::TargetRole(Step2Data { target_role: info.role }))
        .await?;
    advance(wizard).await;
    Ok(false)
}

async fn step_weekly_hours(wizard: &mut WizardController<ApiClient>) -> anyhow::Result<bool> {
    let current = wizard
        .data()
        .step3
        .as_ref()
        .map(|s| s.weekly_hours)
        .unwrap_or(catalog::DEFAULT_WEEKLY_HOURS);
    println!("Step 3 of 5 — How many hours per week can you commit?");
    println!(
        "  {}–{} hours; {}–{} is the recommended pace.",
        catalog::MIN_WEEKLY_HOURS,
        catalog::MAX_WEEKLY_HOURS,
        catalog::RECOMMENDED_MIN_HOURS,
        catalog::RECOMMENDED_MAX_HOURS
    );

    let input = prompt(&format!("Hours per week [{current}]"))?;
    match nav(&input) {
        Some(Nav::Back) => {
            wizard.go_to_previous_step().await;
            return Ok(false);
        }
        Some(Nav::Quit) => return Ok(true),
        None => {}
    }

    let hours = if input.is_empty() {
        current
    } else {
        match input.parse::<u8>() {
            Ok(h) => h,
            Err(_) => {
                println!("Enter a whole number of hours.\n");
                return Ok(false);
            }
        }
    };

    if let Err(e) = wizard
        .save_step_data(StepPayload::WeeklyHours(Step3Data { weekly_hours: hours }))
        .await
    {
        println!("{e}\n");
        return Ok(false);
    }
    advance(wizard).await;
    Ok(false)
}

async fn step_skills(wizard: &mut WizardController<ApiClient>) -> anyhow::Result<bool> {
    println!("Step 4 of 5 — Which of these do you already know? (optional)");
    let skills = catalog::all_skills();
    let selected = wizard.data().step4.clone().unwrap_or_default();
    for (i, skill) in skills.iter().enumerate() {
        let mark = if selected.skills_to_skip.contains(&SkillId::new(skill.id)) {
            "x"
        } else {
            " "
        };
        println!("  [{}] {}. {}", mark, i + 1, skill.display_name);
    }

    let input = prompt("Numbers to toggle (comma-separated), or Enter to continue")?;
    match nav(&input) {
        Some(Nav::Back) => {
            wizard.go_to_previous_step().await;
            return Ok(false);
        }
        Some(Nav::Quit) => return Ok(true),
        None => {}
    }

    if input.is_empty() {
        // Skipping nothing is a valid answer.
        wizard
            .save_step_data(StepPayload::SkillsToSkip(selected))
            .await?;
        advance(wizard).await;
        return Ok(false);
    }

    let mut step4 = selected;
    for part in input.split(',') {
        let Some(skill) = part
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| skills.get(i))
        else {
            println!("'{}' is not a skill number.\n", part.trim());
            return Ok(false);
        };
        let id = SkillId::new(skill.id);
        if !step4.skills_to_skip.remove(&id) {
            step4.skills_to_skip.insert(id);
        }
    }
    wizard.save_step_data(StepPayload::SkillsToSkip(step4)).await?;
    Ok(false)
}

async fn step_summary(wizard: &mut WizardController<ApiClient>) -> anyhow::Result<bool> {
    println!("Step 5 of 5 — Review your plan");
    let summary = wizard.summary();
    let mut rows = Vec::new();
    rows.push(("Current role", summary.current_role.clone().unwrap_or_else(|| "—".into())));
    rows.push(("Target role", summary.target_role.clone().unwrap_or_else(|| "—".into())));
    rows.push(("Time budget", summary.weekly_hours_text.clone().unwrap_or_else(|| "—".into())));
    rows.push((
        "Skipping",
        if summary.skipped_skills.is_empty() {
            "nothing".to_string()
        } else {
            summary.skipped_skills.join(", ")
        },
    ));
    rows.push(("Estimated", summary.estimated_duration.clone()));
    print_fields(&rows);

    if !summary.validation.is_valid {
        let missing: Vec<String> = summary
            .validation
            .missing_steps
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!("\nStill missing: step(s) {}.", missing.join(", "));
    }

    let input = prompt("[g]enerate roadmap, [e]dit step N (e.g. e2), [q]uit")?;
    match nav(&input) {
        Some(Nav::Back) => {
            wizard.go_to_previous_step().await;
            return Ok(false);
        }
        Some(Nav::Quit) => return Ok(true),
        None => {}
    }

    if let Some(rest) = input.strip_prefix('e') {
        let Ok(n) = rest.trim().parse::<i64>() else {
            println!("Use e1..e4 to edit a step.\n");
            return Ok(false);
        };
        wizard.go_to_step(n).await;
        return Ok(false);
    }

    if input.eq_ignore_ascii_case("g") {
        match wizard.generate().await {
            Ok(receipt) => {
                println!("\nYour roadmap is ready: {}", receipt.roadmap_id);
                println!("Open the app to start learning.");
                return Ok(true);
            }
            Err(_) => {
                // Both blocked-validation and endpoint failures land in
                // state.error as displayable text; stay on the summary.
                if let Some(error) = &wizard.state().error {
                    println!("\n{error}\n");
                }
                return Ok(false);
            }
        }
    }

    println!("Unrecognized input.\n");
    Ok(false)
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

enum Nav {
    Back,
    Quit,
}

fn nav(input: &str) -> Option<Nav> {
    match input {
        "b" | "back" => Some(Nav::Back),
        "q" | "quit" => Some(Nav::Quit),
        _ => None,
    }
}

async fn advance(wizard: &mut WizardController<ApiClient>) {
    if wizard.go_to_next_step().await.is_err() {
        if let Some(error) = &wizard.state().error {
            println!("{error}\n");
        }
    } else {
        println!();
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
