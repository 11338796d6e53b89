use crate::error::{PathwayError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// WizardStep
// ---------------------------------------------------------------------------

/// The five fixed stages of the onboarding wizard.
///
/// Steps are 1-indexed on the wire (`currentStep`) and in user-facing text.
/// Invalid step numbers are unrepresentable: [`WizardStep::from_index`]
/// clamps rather than fails, because summary edit links may carry arbitrary
/// indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    CurrentRole,
    TargetRole,
    WeeklyHours,
    SkillsToSkip,
    Summary,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::CurrentRole,
            WizardStep::TargetRole,
            WizardStep::WeeklyHours,
            WizardStep::SkillsToSkip,
            WizardStep::Summary,
        ]
    }

    /// 1-based index, matching the wire protocol and UI numbering.
    pub fn index(self) -> u8 {
        self as u8 + 1
    }

    /// Clamps any integer into the valid step range.
    pub fn from_index(n: i64) -> WizardStep {
        let clamped = n.clamp(1, WizardStep::all().len() as i64);
        WizardStep::all()[(clamped - 1) as usize]
    }

    pub fn next(self) -> Option<WizardStep> {
        WizardStep::all().get(self as usize + 1).copied()
    }

    pub fn previous(self) -> Option<WizardStep> {
        (self as usize).checked_sub(1).map(|i| WizardStep::all()[i])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::CurrentRole => "current_role",
            WizardStep::TargetRole => "target_role",
            WizardStep::WeeklyHours => "weekly_hours",
            WizardStep::SkillsToSkip => "skills_to_skip",
            WizardStep::Summary => "summary",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WizardStep {
    type Err = PathwayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "current_role" => Ok(WizardStep::CurrentRole),
            "target_role" => Ok(WizardStep::TargetRole),
            "weekly_hours" => Ok(WizardStep::WeeklyHours),
            "skills_to_skip" => Ok(WizardStep::SkillsToSkip),
            "summary" => Ok(WizardStep::Summary),
            _ => Err(PathwayError::InvalidStep(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CurrentRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentRole {
    Student,
    SoftwareEngineer,
    DataAnalyst,
    ProductManager,
    CareerChanger,
    Other,
}

impl CurrentRole {
    pub fn all() -> &'static [CurrentRole] {
        &[
            CurrentRole::Student,
            CurrentRole::SoftwareEngineer,
            CurrentRole::DataAnalyst,
            CurrentRole::ProductManager,
            CurrentRole::CareerChanger,
            CurrentRole::Other,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CurrentRole::Student => "student",
            CurrentRole::SoftwareEngineer => "software_engineer",
            CurrentRole::DataAnalyst => "data_analyst",
            CurrentRole::ProductManager => "product_manager",
            CurrentRole::CareerChanger => "career_changer",
            CurrentRole::Other => "other",
        }
    }
}

impl fmt::Display for CurrentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CurrentRole {
    type Err = PathwayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "student" => Ok(CurrentRole::Student),
            "software_engineer" => Ok(CurrentRole::SoftwareEngineer),
            "data_analyst" => Ok(CurrentRole::DataAnalyst),
            "product_manager" => Ok(CurrentRole::ProductManager),
            "career_changer" => Ok(CurrentRole::CareerChanger),
            "other" => Ok(CurrentRole::Other),
            _ => Err(PathwayError::InvalidRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TargetRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    MlEngineer,
    AiEngineer,
    DataScientist,
    MlopsEngineer,
}

impl TargetRole {
    pub fn all() -> &'static [TargetRole] {
        &[
            TargetRole::MlEngineer,
            TargetRole::AiEngineer,
            TargetRole::DataScientist,
            TargetRole::MlopsEngineer,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetRole::MlEngineer => "ml_engineer",
            TargetRole::AiEngineer => "ai_engineer",
            TargetRole::DataScientist => "data_scientist",
            TargetRole::MlopsEngineer => "mlops_engineer",
        }
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetRole {
    type Err = PathwayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ml_engineer" => Ok(TargetRole::MlEngineer),
            "ai_engineer" => Ok(TargetRole::AiEngineer),
            "data_scientist" => Ok(TargetRole::DataScientist),
            "mlops_engineer" => Ok(TargetRole::MlopsEngineer),
            _ => Err(PathwayError::InvalidRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SkillId
// ---------------------------------------------------------------------------

/// Identifier of a prerequisite skill from the static catalog.
///
/// Unknown ids round-trip untouched so hydrating an old session never
/// fails; the catalog lookup simply yields no display name for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        SkillId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Step payloads
// ---------------------------------------------------------------------------

/// Step 1 — where the user is today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step1Data {
    pub current_role: CurrentRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_role_text: Option<String>,
}

/// Step 2 — where the user wants to go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step2Data {
    pub target_role: TargetRole,
}

/// Step 3 — weekly time budget in hours, always within `[5, 20]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step3Data {
    pub weekly_hours: u8,
}

impl Default for Step3Data {
    fn default() -> Self {
        Step3Data {
            weekly_hours: crate::catalog::DEFAULT_WEEKLY_HOURS,
        }
    }
}

/// Step 4 — prerequisite skills the user already knows. Optional: an empty
/// set means "skip nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step4Data {
    #[serde(default)]
    pub skills_to_skip: BTreeSet<SkillId>,
}

// ---------------------------------------------------------------------------
// StepPayload
// ---------------------------------------------------------------------------

/// One data-bearing step's payload, tagged by step.
///
/// Serializes untagged: the wire body of `PATCH /onboarding/step/:n` is the
/// bare step shape, with the step number carried in the path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepPayload {
    CurrentRole(Step1Data),
    TargetRole(Step2Data),
    WeeklyHours(Step3Data),
    SkillsToSkip(Step4Data),
}

impl StepPayload {
    pub fn step(&self) -> WizardStep {
        match self {
            StepPayload::CurrentRole(_) => WizardStep::CurrentRole,
            StepPayload::TargetRole(_) => WizardStep::TargetRole,
            StepPayload::WeeklyHours(_) => WizardStep::WeeklyHours,
            StepPayload::SkillsToSkip(_) => WizardStep::SkillsToSkip,
        }
    }
}

// ---------------------------------------------------------------------------
// WizardData
// ---------------------------------------------------------------------------

/// The aggregate of all four data-bearing steps.
///
/// A step's slot is `None` until the user makes a selection there; earlier
/// answers are never dropped when moving forward, so back-navigation always
/// shows them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step1: Option<Step1Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step2: Option<Step2Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step3: Option<Step3Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step4: Option<Step4Data>,
}

impl WizardData {
    pub fn is_empty(&self) -> bool {
        self.step1.is_none() && self.step2.is_none() && self.step3.is_none() && self.step4.is_none()
    }

    /// Stores a payload into its slot, overwriting any previous answer.
    pub fn apply(&mut self, payload: StepPayload) {
        match payload {
            StepPayload::CurrentRole(d) => self.step1 = Some(d),
            StepPayload::TargetRole(d) => self.step2 = Some(d),
            StepPayload::WeeklyHours(d) => self.step3 = Some(d),
            StepPayload::SkillsToSkip(d) => self.step4 = Some(d),
        }
    }

    /// Reads back the payload currently held for a data-bearing step.
    pub fn payload_for(&self, step: WizardStep) -> Option<StepPayload> {
        match step {
            WizardStep::CurrentRole => self.step1.clone().map(StepPayload::CurrentRole),
            WizardStep::TargetRole => self.step2.clone().map(StepPayload::TargetRole),
            WizardStep::WeeklyHours => self.step3.clone().map(StepPayload::WeeklyHours),
            WizardStep::SkillsToSkip => self.step4.clone().map(StepPayload::SkillsToSkip),
            WizardStep::Summary => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// A previously persisted onboarding session, as returned by the status
/// endpoint. Used to hydrate a fresh controller mid-flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub current_step: u8,
    #[serde(default)]
    pub data: WizardData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn step(&self) -> WizardStep {
        WizardStep::from_index(self.current_step as i64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_index_is_one_based() {
        assert_eq!(WizardStep::CurrentRole.index(), 1);
        assert_eq!(WizardStep::Summary.index(), 5);
    }

    #[test]
    fn from_index_clamps_out_of_range() {
        assert_eq!(WizardStep::from_index(0), WizardStep::CurrentRole);
        assert_eq!(WizardStep::from_index(-3), WizardStep::CurrentRole);
        assert_eq!(WizardStep::from_index(6), WizardStep::Summary);
        assert_eq!(WizardStep::from_index(99), WizardStep::Summary);
        assert_eq!(WizardStep::from_index(3), WizardStep::WeeklyHours);
    }

    #[test]
    fn next_stops_at_summary() {
        assert_eq!(WizardStep::SkillsToSkip.next(), Some(WizardStep::Summary));
        assert_eq!(WizardStep::Summary.next(), None);
    }

    #[test]
    fn previous_stops_at_first_step() {
        assert_eq!(WizardStep::TargetRole.previous(), Some(WizardStep::CurrentRole));
        assert_eq!(WizardStep::CurrentRole.previous(), None);
    }

    #[test]
    fn roles_round_trip_as_snake_case() {
        for role in CurrentRole::all() {
            let parsed: CurrentRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, *role);
        }
        let json = serde_json::to_string(&TargetRole::MlEngineer).unwrap();
        assert_eq!(json, "\"ml_engineer\"");
    }

    #[test]
    fn step_payload_serializes_bare_step_shape() {
        let payload = StepPayload::WeeklyHours(Step3Data { weekly_hours: 12 });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "weeklyHours": 12 }));

        let payload = StepPayload::CurrentRole(Step1Data {
            current_role: CurrentRole::Other,
            custom_role_text: Some("Project Manager".to_string()),
        });
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currentRole": "other",
                "customRoleText": "Project Manager"
            })
        );
    }

    #[test]
    fn apply_then_payload_for_round_trips() {
        let mut data = WizardData::default();
        let payload = StepPayload::SkillsToSkip(Step4Data {
            skills_to_skip: [SkillId::new("sql"), SkillId::new("git")].into_iter().collect(),
        });
        data.apply(payload.clone());
        assert_eq!(data.payload_for(WizardStep::SkillsToSkip), Some(payload));
        assert_eq!(data.payload_for(WizardStep::Summary), None);
    }

    #[test]
    fn snapshot_step_is_clamped() {
        let snap = SessionSnapshot {
            session_id: None,
            current_step: 9,
            data: WizardData::default(),
            updated_at: None,
        };
        assert_eq!(snap.step(), WizardStep::Summary);
    }
}
