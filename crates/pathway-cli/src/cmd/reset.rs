use crate::config::CliConfig;
use pathway_core::WizardController;
use std::io::Write;

/// Clears all answers and pushes the empty aggregate to the preferences
/// endpoint, overwriting the saved session (last write wins).
pub async fn run(config: &CliConfig, yes: bool) -> anyhow::Result<()> {
    if !yes {
        print!("This discards all onboarding answers. Type 'reset' to confirm: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        if line.trim() != "reset" {
            println!("Aborted.");
            return Ok(());
        }
    }

    let client = super::api_client(config)?;
    let mut wizard = WizardController::with_debounce_window(client, config.debounce());
    wizard.reset_onboarding();
    wizard.submit_preferences().await?;
    println!("Onboarding reset — run `pathway start` to begin again.");
    Ok(())
}
