//! The persistence boundary the wizard controller is written against.
//!
//! Every network failure crosses this boundary as a human-readable
//! message: the controller stores it for display and never sees a raw
//! transport error.

use crate::types::{SessionSnapshot, StepPayload, WizardData, WizardStep};
use serde::Deserialize;
use std::future::Future;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        BackendError { message: message.into() }
    }
}

/// Acknowledgement from the roadmap-generation endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapReceipt {
    pub roadmap_id: Uuid,
}

/// The four backend operations the wizard depends on.
///
/// Implemented over HTTP by `pathway-client`; controller tests inject an
/// in-memory recording implementation. Always taken generically, never as
/// `dyn`, so plain `async fn` suffices.
pub trait OnboardingBackend {
    /// `Ok(None)` means no session exists yet (a fresh start), distinct
    /// from a failure.
    fn fetch_status(
        &self,
    ) -> impl Future<Output = Result<Option<SessionSnapshot>, BackendError>> + Send;

    fn save_step(
        &self,
        step: WizardStep,
        payload: &StepPayload,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn generate_roadmap(
        &self,
        data: &WizardData,
    ) -> impl Future<Output = Result<RoadmapReceipt, BackendError>> + Send;

    /// Full-aggregate update used by the re-onboarding ("edit
    /// preferences") flow outside the initial wizard.
    fn update_preferences(
        &self,
        data: &WizardData,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}
