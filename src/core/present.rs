//! Display-ready projections of a score and the fix list. Nothing here may
//! change a numeric output of the score engine.

use crate::core::harness::{FixRecord, FixStatus};
use crate::core::score::{
    COMMIT_THRESHOLD, PENALTY_PER_EXCESS_COMMIT, RunMetrics, SPEED_BONUS, SPEED_THRESHOLD_SECS,
    ScoreResult,
};
use serde::Serialize;

/// Formats seconds as `M:SS`; minutes are unbounded.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Whole percent of `score` against `max_score`, rounded half up.
pub fn percent_of(score: u32, max_score: u32) -> u8 {
    if max_score == 0 {
        return 0;
    }
    let score = u64::from(score.min(max_score));
    let max_score = u64::from(max_score);
    ((score * 100 + max_score / 2) / max_score) as u8
}

pub fn bar_fill_ratio(value: f64, max_value: f64) -> f64 {
    if !max_value.is_finite() || max_value <= 0.0 || value.is_nan() {
        return 0.0;
    }
    (value.abs() / max_value).min(1.0)
}

pub fn render_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayFlags {
    pub under_speed_threshold: bool,
    pub under_commit_limit: bool,
    pub bonus_earned: bool,
}

impl DisplayFlags {
    pub fn from_metrics(metrics: &RunMetrics) -> Self {
        let under_speed_threshold = metrics.under_speed_threshold();
        Self {
            under_speed_threshold,
            under_commit_limit: metrics.commit_count <= COMMIT_THRESHOLD,
            bonus_earned: metrics.tests_passed && under_speed_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Destructive,
}

pub fn badge_for(status: FixStatus) -> (BadgeVariant, &'static str) {
    match status {
        FixStatus::Fixed => (BadgeVariant::Default, "Fixed"),
        FixStatus::Failed => (BadgeVariant::Destructive, "Failed"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Primary,
    Destructive,
}

pub fn score_tone(result: &ScoreResult) -> Tone {
    if result.passed() {
        Tone::Primary
    } else {
        Tone::Destructive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    RootCause,
    Description,
    ErrorMessage,
    CommitMessage,
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayText<'a> {
    pub source: SummarySource,
    pub text: &'a str,
}

type SummaryAccessor = fn(&FixRecord) -> Option<&str>;

/// Summary candidates in priority order.
const SUMMARY_ACCESSORS: [(SummarySource, SummaryAccessor); 4] = [
    (SummarySource::RootCause, FixRecord::root_cause),
    (SummarySource::Description, description),
    (SummarySource::ErrorMessage, error_message),
    (SummarySource::CommitMessage, commit_message),
];

fn description(fix: &FixRecord) -> Option<&str> {
    fix.description.as_deref()
}

fn error_message(fix: &FixRecord) -> Option<&str> {
    fix.error_message.as_deref()
}

fn commit_message(fix: &FixRecord) -> Option<&str> {
    fix.commit_message.as_deref()
}

pub fn resolve_summary<'a>(fix: &'a FixRecord, placeholder: &'a str) -> DisplayText<'a> {
    SUMMARY_ACCESSORS
        .iter()
        .find_map(|(source, accessor)| {
            accessor(fix)
                .filter(|text| !text.is_empty())
                .map(|text| DisplayText {
                    source: *source,
                    text,
                })
        })
        .unwrap_or(DisplayText {
            source: SummarySource::Placeholder,
            text: placeholder,
        })
}

pub fn signed_bonus(result: &ScoreResult) -> String {
    format!("+{}", result.speed_bonus)
}

pub fn signed_penalty(result: &ScoreResult) -> String {
    format!("-{}", result.efficiency_penalty)
}

pub fn signed_base(result: &ScoreResult) -> String {
    format!("+{}", result.base_score)
}

pub fn speed_caption(flags: &DisplayFlags) -> String {
    let minutes = SPEED_THRESHOLD_SECS / 60;
    if flags.bonus_earned {
        format!("Completed in under {minutes} minutes!")
    } else {
        format!("Complete in < {minutes} min for +{SPEED_BONUS}")
    }
}

pub fn penalty_caption(result: &ScoreResult, metrics: &RunMetrics) -> String {
    if result.efficiency_penalty > 0 {
        format!(
            "{} commits over limit (-{} each)",
            result.excess_commits(),
            PENALTY_PER_EXCESS_COMMIT
        )
    } else {
        format!("{}/{} commits used", metrics.commit_count, COMMIT_THRESHOLD)
    }
}

/// `base [+ bonus] [- penalty] = final`, zero terms omitted.
pub fn calculation_line(result: &ScoreResult) -> String {
    let mut line = result.base_score.to_string();
    if result.speed_bonus > 0 {
        line.push_str(&format!(" + {}", result.speed_bonus));
    }
    if result.efficiency_penalty > 0 {
        line.push_str(&format!(" - {}", result.efficiency_penalty));
    }
    line.push_str(&format!(" = {}", result.final_score));
    line
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixCounts {
    pub fixed: usize,
    pub failed: usize,
    pub total: usize,
}

impl FixCounts {
    pub fn from_fixes(fixes: &[FixRecord]) -> Self {
        let mut counts = Self::default();
        for fix in fixes {
            match fix.status {
                FixStatus::Fixed => counts.fixed += 1,
                FixStatus::Failed => counts.failed += 1,
            }
        }
        counts.total = fixes.len();
        counts
    }
}
