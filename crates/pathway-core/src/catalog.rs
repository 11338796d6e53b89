//! Static metadata backing the wizard: role display names, target-role
//! availability and roadmap sizing, and the prerequisite skill catalog.
//!
//! Everything here is compile-time data; the roadmap backend owns the real
//! curriculum, these tables only drive selection UI and the completion
//! estimate.

use crate::types::{CurrentRole, SkillId, TargetRole};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

pub const MIN_WEEKLY_HOURS: u8 = 5;
pub const MAX_WEEKLY_HOURS: u8 = 20;
pub const DEFAULT_WEEKLY_HOURS: u8 = 10;

/// Band shown to the user as the sweet spot for steady progress.
pub const RECOMMENDED_MIN_HOURS: u8 = 10;
pub const RECOMMENDED_MAX_HOURS: u8 = 15;

/// Hours credited back for each prerequisite skill the user already knows.
pub const ASSUMED_HOURS_PER_SKILL: u32 = 10;

/// The estimate never drops below this, no matter how many skills are
/// skipped. Keeps the projection honest for users who tick everything.
pub const MIN_ADJUSTED_HOURS: u32 = 40;

/// Quiet interval before a pending edit is persisted.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Target-role metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct TargetRoleInfo {
    pub role: TargetRole,
    pub display_name: &'static str,
    /// Roles not yet backed by a curriculum are display-only ("coming
    /// soon") and can never complete step 2.
    pub available: bool,
    /// Nominal size of the full roadmap, before skip credit.
    pub base_hours: u32,
}

const TARGET_ROLES: &[TargetRoleInfo] = &[
    TargetRoleInfo {
        role: TargetRole::MlEngineer,
        display_name: "Machine Learning Engineer",
        available: true,
        base_hours: 240,
    },
    TargetRoleInfo {
        role: TargetRole::AiEngineer,
        display_name: "AI Engineer",
        available: true,
        base_hours: 200,
    },
    TargetRoleInfo {
        role: TargetRole::DataScientist,
        display_name: "Data Scientist",
        available: false,
        base_hours: 220,
    },
    TargetRoleInfo {
        role: TargetRole::MlopsEngineer,
        display_name: "MLOps Engineer",
        available: false,
        base_hours: 180,
    },
];

pub fn target_roles() -> &'static [TargetRoleInfo] {
    TARGET_ROLES
}

pub fn target_role_info(role: TargetRole) -> &'static TargetRoleInfo {
    TARGET_ROLES
        .iter()
        .find(|info| info.role == role)
        .expect("every TargetRole variant has a catalog entry")
}

pub fn is_target_role_available(role: TargetRole) -> bool {
    target_role_info(role).available
}

// ---------------------------------------------------------------------------
// Current-role display names
// ---------------------------------------------------------------------------

pub fn current_role_display_name(role: CurrentRole) -> &'static str {
    match role {
        CurrentRole::Student => "Student",
        CurrentRole::SoftwareEngineer => "Software Engineer",
        CurrentRole::DataAnalyst => "Data Analyst",
        CurrentRole::ProductManager => "Product Manager",
        CurrentRole::CareerChanger => "Career Changer",
        CurrentRole::Other => "Other",
    }
}

// ---------------------------------------------------------------------------
// Skill catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SkillInfo {
    pub id: &'static str,
    pub display_name: &'static str,
}

const SKILLS: &[SkillInfo] = &[
    SkillInfo { id: "python_basics", display_name: "Python basics" },
    SkillInfo { id: "git", display_name: "Git & version control" },
    SkillInfo { id: "sql", display_name: "SQL" },
    SkillInfo { id: "linear_algebra", display_name: "Linear algebra" },
    SkillInfo { id: "statistics", display_name: "Statistics & probability" },
    SkillInfo { id: "pandas", display_name: "Pandas & data wrangling" },
    SkillInfo { id: "ml_fundamentals", display_name: "ML fundamentals" },
    SkillInfo { id: "deep_learning", display_name: "Deep learning basics" },
];

pub fn all_skills() -> &'static [SkillInfo] {
    SKILLS
}

/// Display name for a skill id, or `None` for ids outside the catalog
/// (e.g. carried over from an older session).
pub fn skill_display_name(id: &SkillId) -> Option<&'static str> {
    SKILLS
        .iter()
        .find(|s| s.id == id.as_str())
        .map(|s| s.display_name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
