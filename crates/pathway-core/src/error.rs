use crate::types::WizardStep;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathwayError {
    #[error("invalid step: {0}")]
    InvalidStep(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("step {step} is incomplete: {reason}")]
    IncompleteStep { step: WizardStep, reason: String },

    #[error("weekly hours must be between {min} and {max}, got {got}")]
    HoursOutOfRange { got: u8, min: u8, max: u8 },

    #[error("cannot generate roadmap: step(s) {} missing", format_steps(.0))]
    MissingSteps(Vec<u8>),

    #[error("failed to load onboarding status: {0}")]
    Hydrate(String),

    #[error("failed to save step {step}: {message}")]
    SaveFailed { step: WizardStep, message: String },

    #[error("roadmap generation failed: {0}")]
    GenerateFailed(String),

    #[error("failed to update preferences: {0}")]
    PreferencesFailed(String),
}

fn format_steps(steps: &[u8]) -> String {
    steps
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, PathwayError>;
