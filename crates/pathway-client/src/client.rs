use crate::error::{ApiError, Result};
use chrono::{DateTime, Utc};
use pathway_core::backend::{OnboardingBackend, RoadmapReceipt};
use pathway_core::{BackendError, SessionSnapshot, StepPayload, WizardData, WizardStep};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer credential supplied by the surrounding auth context; this
    /// client never acquires or refreshes it.
    pub bearer_token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// `GET /onboarding` body: `response` is `null` until a session exists.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusWire {
    #[serde(default)]
    response: Option<SessionWire>,
    #[serde(default)]
    current_step: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionWire {
    #[serde(default)]
    session_id: Option<Uuid>,
    #[serde(default)]
    data: WizardData,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::BaseUrl("empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(ApiClient { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Converts a non-2xx response into [`ApiError::Api`], preferring the
    /// server's `{ message }` body over the bare status line.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let fallback = format!("HTTP {status}");
        let message = match response.json::<ErrorBody>().await {
            Ok(body) if !body.message.trim().is_empty() => body.message,
            _ => fallback,
        };
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetches the persisted onboarding session; `Ok(None)` for 404 or a
    /// `null` response body (no session yet).
    pub async fn onboarding_status(&self) -> Result<Option<SessionSnapshot>> {
        let url = self.url("onboarding");
        debug!(%url, "fetching onboarding status");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let wire: StatusWire = Self::check(response).await?.json().await?;
        let Some(session) = wire.response else {
            return Ok(None);
        };
        Ok(Some(SessionSnapshot {
            session_id: session.session_id,
            current_step: wire.current_step.unwrap_or(1),
            data: session.data,
            updated_at: session.updated_at,
        }))
    }

    /// `PATCH /onboarding/step/:n` with the bare step-shaped body.
    pub async fn save_step(&self, step: WizardStep, payload: &StepPayload) -> Result<()> {
        let url = self.url(&format!("onboarding/step/{}", step.index()));
        debug!(%url, step = %step, "persisting step");
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.config.bearer_token)
            .json(payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Submits the complete aggregate for roadmap generation.
    pub async fn generate_roadmap(&self, data: &WizardData) -> Result<RoadmapReceipt> {
        let url = self.url("roadmap/generate");
        debug!(%url, "requesting roadmap generation");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.bearer_token)
            .json(data)
            .send()
            .await?;
        let receipt = Self::check(response).await?.json().await?;
        Ok(receipt)
    }

    /// Full-aggregate preferences update for the re-onboarding flow.
    pub async fn update_preferences(&self, data: &WizardData) -> Result<()> {
        let url = self.url("onboarding/preferences");
        debug!(%url, "updating preferences");
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.config.bearer_token)
            .json(data)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

impl OnboardingBackend for ApiClient {
    async fn fetch_status(&self) -> std::result::Result<Option<SessionSnapshot>, BackendError> {
        self.onboarding_status().await.map_err(Into::into)
    }

    async fn save_step(
        &self,
        step: WizardStep,
        payload: &StepPayload,
    ) -> std::result::Result<(), BackendError> {
        ApiClient::save_step(self, step, payload)
            .await
            .map_err(Into::into)
    }

    async fn generate_roadmap(
        &self,
        data: &WizardData,
    ) -> std::result::Result<RoadmapReceipt, BackendError> {
        ApiClient::generate_roadmap(self, data)
            .await
            .map_err(Into::into)
    }

    async fn update_preferences(&self, data: &WizardData) -> std::result::Result<(), BackendError> {
        ApiClient::update_preferences(self, data)
            .await
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::{Step3Data, WizardStep};

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(ApiConfig::new(server.url(), "sekrit")).unwrap()
    }

    #[tokio::test]
    async fn status_maps_session_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/onboarding")
            .match_header("authorization", "Bearer sekrit")
            .with_status(200)
            .with_body(
                r#"{
                    "response": {
                        "sessionId": "7c7bf4b4-9a4b-4e06-8c2f-0f2f8a3a1b11",
                        "data": { "step3": { "weeklyHours": 12 } },
                        "updatedAt": "2026-08-01T10:00:00Z"
                    },
                    "currentStep": 3
                }"#,
            )
            .create_async()
            .await;

        let snapshot = client_for(&server).onboarding_status().await.unwrap().unwrap();
        assert_eq!(snapshot.step(), WizardStep::WeeklyHours);
        assert_eq!(snapshot.data.step3, Some(Step3Data { weekly_hours: 12 }));
        assert!(snapshot.session_id.is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn status_404_means_no_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/onboarding")
            .with_status(404)
            .with_body(r#"{"message":"no onboarding session"}"#)
            .create_async()
            .await;

        let snapshot = client_for(&server).onboarding_status().await.unwrap();
        assert_eq!(snapshot, None);
    }

    #[tokio::test]
    async fn status_null_response_means_no_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/onboarding")
            .with_status(200)
            .with_body(r#"{"response": null, "currentStep": 1}"#)
            .create_async()
            .await;

        let snapshot = client_for(&server).onboarding_status().await.unwrap();
        assert_eq!(snapshot, None);
    }

    #[tokio::test]
    async fn save_step_patches_step_shaped_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/onboarding/step/3")
            .match_header("authorization", "Bearer sekrit")
            .match_body(mockito::Matcher::Json(serde_json::json!({ "weeklyHours": 15 })))
            .with_status(200)
            .create_async()
            .await;

        let payload = StepPayload::WeeklyHours(Step3Data { weekly_hours: 15 });
        client_for(&server)
            .save_step(WizardStep::WeeklyHours, &payload)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/onboarding/step/3")
            .with_status(500)
            .with_body(r#"{"message":"database unavailable"}"#)
            .create_async()
            .await;

        let payload = StepPayload::WeeklyHours(Step3Data { weekly_hours: 15 });
        let err = client_for(&server)
            .save_step(WizardStep::WeeklyHours, &payload)
            .await
            .unwrap_err();
        let ApiError::Api { status, message } = err else {
            panic!("expected Api error")
        };
        assert_eq!(status, 500);
        assert_eq!(message, "database unavailable");
    }

    #[tokio::test]
    async fn missing_error_body_falls_back_to_status_line() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/onboarding")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = client_for(&server).onboarding_status().await.unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn generate_posts_aggregate_and_parses_receipt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/roadmap/generate")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "step3": { "weeklyHours": 10 }
            })))
            .with_status(200)
            .with_body(r#"{"roadmapId":"5b4f9d7e-31a8-4f4c-bd35-2f11a3b4c5d6"}"#)
            .create_async()
            .await;

        let data = WizardData {
            step3: Some(Step3Data { weekly_hours: 10 }),
            ..Default::default()
        };
        let receipt = client_for(&server).generate_roadmap(&data).await.unwrap();
        assert_eq!(
            receipt.roadmap_id.to_string(),
            "5b4f9d7e-31a8-4f4c-bd35-2f11a3b4c5d6"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn preferences_patch_full_aggregate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/onboarding/preferences")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "step3": { "weeklyHours": 8 }
            })))
            .with_status(200)
            .create_async()
            .await;

        let data = WizardData {
            step3: Some(Step3Data { weekly_hours: 8 }),
            ..Default::default()
        };
        client_for(&server).update_preferences(&data).await.unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = ApiClient::new(ApiConfig::new("  ", "t")).unwrap_err();
        assert!(matches!(err, ApiError::BaseUrl(_)));
    }

    #[test]
    fn url_joining_tolerates_trailing_slash() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:9000/", "t")).unwrap();
        assert_eq!(client.url("/onboarding"), "http://localhost:9000/onboarding");
        assert_eq!(client.url("onboarding"), "http://localhost:9000/onboarding");
    }
}
