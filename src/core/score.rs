use serde::Serialize;
use thiserror::Error;

/// Runs strictly under this many seconds earn the speed bonus.
pub const SPEED_THRESHOLD_SECS: u64 = 300;
pub const SPEED_BONUS: u32 = 10;
/// Commits beyond this budget are penalised.
pub const COMMIT_THRESHOLD: u64 = 20;
pub const PENALTY_PER_EXCESS_COMMIT: u64 = 2;
pub const BASE_SCORE: u32 = 100;
pub const MAX_POSSIBLE_SCORE: u32 = BASE_SCORE + SPEED_BONUS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("invalid metrics: {field} must be non-negative, got {value}")]
    InvalidMetrics { field: &'static str, value: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunMetrics {
    pub tests_passed: bool,
    pub elapsed_seconds: u64,
    pub commit_count: u64,
}

impl RunMetrics {
    pub fn new(tests_passed: bool, elapsed_seconds: u64, commit_count: u64) -> Self {
        Self {
            tests_passed,
            elapsed_seconds,
            commit_count,
        }
    }

    /// Validates signed values coming from the harness boundary.
    pub fn from_signed(
        tests_passed: bool,
        elapsed_seconds: i64,
        commit_count: i64,
    ) -> Result<Self, ScoreError> {
        let elapsed_seconds = non_negative("elapsed_seconds", elapsed_seconds)?;
        let commit_count = non_negative("commit_count", commit_count)?;
        Ok(Self::new(tests_passed, elapsed_seconds, commit_count))
    }

    pub fn score(&self) -> ScoreResult {
        compute_score(self.tests_passed, self.elapsed_seconds, self.commit_count)
    }

    pub fn under_speed_threshold(&self) -> bool {
        self.elapsed_seconds < SPEED_THRESHOLD_SECS
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, ScoreError> {
    u64::try_from(value).map_err(|_| ScoreError::InvalidMetrics { field, value })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub base_score: u32,
    pub speed_bonus: u32,
    pub efficiency_penalty: u64,
    pub final_score: u32,
    pub max_possible_score: u32,
}

pub fn compute_score(tests_passed: bool, elapsed_seconds: u64, commit_count: u64) -> ScoreResult {
    let speed_bonus = if elapsed_seconds < SPEED_THRESHOLD_SECS {
        SPEED_BONUS
    } else {
        0
    };

    let excess_commits = commit_count.saturating_sub(COMMIT_THRESHOLD);
    let efficiency_penalty = excess_commits.saturating_mul(PENALTY_PER_EXCESS_COMMIT);

    // lower clamp only; the upper bound is implied by the constants.
    let raw_score = u64::from(BASE_SCORE + speed_bonus).saturating_sub(efficiency_penalty) as u32;

    if !tests_passed {
        return ScoreResult {
            base_score: 0,
            speed_bonus: 0,
            efficiency_penalty: 0,
            final_score: 0,
            max_possible_score: MAX_POSSIBLE_SCORE,
        };
    }

    ScoreResult {
        base_score: BASE_SCORE,
        speed_bonus,
        efficiency_penalty,
        final_score: raw_score.min(MAX_POSSIBLE_SCORE),
        max_possible_score: MAX_POSSIBLE_SCORE,
    }
}

impl ScoreResult {
    pub fn passed(&self) -> bool {
        self.base_score > 0
    }

    pub fn excess_commits(&self) -> u64 {
        self.efficiency_penalty / PENALTY_PER_EXCESS_COMMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn fast_clean_run_gets_full_marks() {
        let result = compute_score(true, 120, 5);
        assert_eq!(result.speed_bonus, 10);
        assert_eq!(result.efficiency_penalty, 0);
        assert_eq!(result.final_score, 110);
        assert_eq!(result.max_possible_score, 110);
    }

    #[test]
    fn slow_run_with_extra_commits() {
        let result = compute_score(true, 400, 25);
        assert_eq!(result.speed_bonus, 0);
        assert_eq!(result.efficiency_penalty, 10);
        assert_eq!(result.final_score, 90);
    }

    #[test]
    fn heavy_penalty_still_leaves_positive_score() {
        let result = compute_score(true, 400, 60);
        assert_eq!(result.efficiency_penalty, 80);
        assert_eq!(result.final_score, 20);
    }

    #[test]
    fn penalty_beyond_base_clamps_to_zero() {
        let result = compute_score(true, 400, 100);
        assert_eq!(result.efficiency_penalty, 160);
        assert_eq!(result.final_score, 0);
    }

    #[test]
    fn failing_suite_voids_everything() {
        let result = compute_score(false, 10, 0);
        assert_eq!(
            result,
            ScoreResult {
                base_score: 0,
                speed_bonus: 0,
                efficiency_penalty: 0,
                final_score: 0,
                max_possible_score: 110,
            }
        );
        assert!(!result.passed());
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(compute_score(true, 299, 0).speed_bonus, 10);
        assert_eq!(compute_score(true, 300, 0).speed_bonus, 0);
        assert_eq!(compute_score(true, 0, 20).efficiency_penalty, 0);
        assert_eq!(compute_score(true, 0, 21).efficiency_penalty, 2);
    }

    #[test]
    fn huge_commit_count_does_not_overflow() {
        let result = compute_score(true, 0, u64::MAX);
        assert_eq!(result.final_score, 0);
        assert_eq!(result.efficiency_penalty, u64::MAX);
    }

    #[test]
    fn rejects_negative_metrics() {
        assert_eq!(
            RunMetrics::from_signed(true, -1, 3),
            Err(ScoreError::InvalidMetrics {
                field: "elapsed_seconds",
                value: -1
            })
        );
        assert_eq!(
            RunMetrics::from_signed(true, 3, -7),
            Err(ScoreError::InvalidMetrics {
                field: "commit_count",
                value: -7
            })
        );
        assert_eq!(
            RunMetrics::from_signed(false, 0, 0),
            Ok(RunMetrics::new(false, 0, 0))
        );
    }

    #[test]
    fn excess_commits_matches_penalty() {
        let metrics = RunMetrics::new(true, 10, 27);
        assert_eq!(metrics.score().excess_commits(), 7);
        assert_eq!(RunMetrics::new(false, 10, 27).score().excess_commits(), 0);
    }

    proptest! {
        #[test]
        fn no_penalty_within_budget(elapsed in 0u64..10_000, commits in 0u64..=20) {
            prop_assert_eq!(compute_score(true, elapsed, commits).efficiency_penalty, 0);
        }

        #[test]
        fn penalty_is_two_per_excess_commit(k in 1u64..1_000) {
            prop_assert_eq!(compute_score(true, 0, 20 + k).efficiency_penalty, 2 * k);
        }

        #[test]
        fn bonus_follows_speed_threshold(elapsed in 0u64..100_000) {
            let expected = if elapsed < 300 { 10 } else { 0 };
            prop_assert_eq!(compute_score(true, elapsed, 0).speed_bonus, expected);
        }

        #[test]
        fn failure_always_scores_zero(elapsed in any::<u64>(), commits in any::<u64>()) {
            let result = compute_score(false, elapsed, commits);
            prop_assert_eq!(result.final_score, 0);
            prop_assert_eq!(result.base_score, 0);
            prop_assert_eq!(result.speed_bonus, 0);
            prop_assert_eq!(result.efficiency_penalty, 0);
        }

        #[test]
        fn passing_score_is_clamped_sum(elapsed in 0u64..1_000, commits in 0u64..200) {
            let result = compute_score(true, elapsed, commits);
            let expected = (100 + i64::from(result.speed_bonus) - result.efficiency_penalty as i64)
                .clamp(0, 110) as u32;
            prop_assert_eq!(result.final_score, expected);
        }

        #[test]
        fn final_score_in_range(passed in any::<bool>(), elapsed in any::<u64>(), commits in any::<u64>()) {
            let result = compute_score(passed, elapsed, commits);
            prop_assert!(result.final_score <= 110);
        }
    }
}
