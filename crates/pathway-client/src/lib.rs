//! HTTP implementation of the pathway onboarding backend.
//!
//! Wraps the four endpoints the wizard depends on — status fetch, per-step
//! persistence, roadmap generation, and the full-aggregate preferences
//! update — behind [`pathway_core::OnboardingBackend`]. All requests carry
//! a bearer credential supplied by the caller.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
