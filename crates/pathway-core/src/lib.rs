//! Onboarding wizard core for pathway: step data models, validation
//! rules, the wizard state machine, debounced auto-save, and the summary
//! projection. Transport lives in `pathway-client`; rendering lives in the
//! front end.

pub mod backend;
pub mod catalog;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod estimate;
pub mod summary;
pub mod types;
pub mod validate;

pub use backend::{BackendError, OnboardingBackend, RoadmapReceipt};
pub use controller::{WizardController, WizardState};
pub use error::{PathwayError, Result};
pub use summary::SummaryView;
pub use types::{
    CurrentRole, SessionSnapshot, SkillId, Step1Data, Step2Data, Step3Data, Step4Data,
    StepPayload, TargetRole, WizardData, WizardStep,
};
