//! Completion-time heuristic shown on the summary screen.
//!
//! Deliberately approximate: a UX estimate, not a scheduling guarantee.

use crate::catalog::{ASSUMED_HOURS_PER_SKILL, MIN_ADJUSTED_HOURS};

/// Roadmap hours after crediting skipped prerequisite skills, floored at
/// [`MIN_ADJUSTED_HOURS`].
pub fn adjusted_total_hours(base_hours: u32, skipped_skills: usize) -> u32 {
    let credit = skipped_skills as u32 * ASSUMED_HOURS_PER_SKILL;
    base_hours.saturating_sub(credit).max(MIN_ADJUSTED_HOURS)
}

/// `ceil(total_hours / weekly_hours)`, or `0` when either input is
/// non-positive.
pub fn completion_weeks(weekly_hours: u32, total_hours: u32) -> u32 {
    if weekly_hours == 0 || total_hours == 0 {
        return 0;
    }
    total_hours.div_ceil(weekly_hours)
}

/// Human-readable duration: weeks below two months, rounded months after.
///
/// `0` weeks renders as an em-dash placeholder, matching the summary card
/// before step 3 is answered.
pub fn format_duration(weeks: u32) -> String {
    if weeks == 0 {
        return "—".to_string();
    }
    if weeks < 8 {
        return format!("~{} {}", weeks, if weeks == 1 { "week" } else { "weeks" });
    }
    // Round to the nearest 4-week month; weeks >= 8 always yields plural.
    let months = (weeks + 2) / 4;
    format!("~{months} months")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjusted_hours_credits_skips() {
        assert_eq!(adjusted_total_hours(240, 0), 240);
        assert_eq!(adjusted_total_hours(240, 3), 210);
    }

    #[test]
    fn adjusted_hours_never_drops_below_floor() {
        assert_eq!(adjusted_total_hours(60, 8), MIN_ADJUSTED_HOURS);
        assert_eq!(adjusted_total_hours(10, 0), MIN_ADJUSTED_HOURS);
    }

    #[test]
    fn completion_weeks_is_ceiling_division() {
        assert_eq!(completion_weeks(10, 100), 10);
        assert_eq!(completion_weeks(10, 101), 11);
        assert_eq!(completion_weeks(15, 240), 16);
        assert_eq!(completion_weeks(7, 1), 1);
    }

    #[test]
    fn completion_weeks_zero_on_non_positive_input() {
        assert_eq!(completion_weeks(0, 100), 0);
        assert_eq!(completion_weeks(10, 0), 0);
        assert_eq!(completion_weeks(0, 0), 0);
    }

    #[test]
    fn short_durations_format_as_weeks() {
        assert_eq!(format_duration(0), "—");
        assert_eq!(format_duration(1), "~1 week");
        assert_eq!(format_duration(7), "~7 weeks");
    }

    #[test]
    fn long_durations_format_as_rounded_months() {
        assert_eq!(format_duration(8), "~2 months");
        assert_eq!(format_duration(30), "~8 months");
        assert_eq!(format_duration(10), "~3 months");
    }
}
