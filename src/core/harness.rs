use crate::core::score::{RunMetrics, ScoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result document emitted by the evaluation harness.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessResult {
    #[serde(alias = "testsPassed", alias = "tests_passed")]
    pub passed: bool,
    #[serde(
        alias = "timeTakenSeconds",
        alias = "elapsedSeconds",
        alias = "elapsed_seconds"
    )]
    pub time_taken_seconds: i64,
    #[serde(
        alias = "totalCommits",
        alias = "commitCount",
        alias = "commit_count"
    )]
    pub total_commits: i64,
    #[serde(default)]
    pub fixes: Vec<FixRecord>,
}

impl HarnessResult {
    pub fn metrics(&self) -> Result<RunMetrics, ScoreError> {
        RunMetrics::from_signed(self.passed, self.time_taken_seconds, self.total_commits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixStatus {
    Fixed,
    Failed,
}

impl fmt::Display for FixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Explanation {
    #[serde(default, alias = "rootCause")]
    pub root_cause: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixRecord {
    pub file: String,
    #[serde(alias = "bugType")]
    pub bug_type: String,
    pub status: FixStatus,
    #[serde(default)]
    pub explanation: Option<Explanation>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "errorMessage")]
    pub error_message: Option<String>,
    #[serde(default, alias = "commitMessage")]
    pub commit_message: Option<String>,
}

impl FixRecord {
    pub fn root_cause(&self) -> Option<&str> {
        self.explanation
            .as_ref()
            .and_then(|explanation| explanation.root_cause.as_deref())
    }
}

#[cfg(test)]
impl FixRecord {
    pub fn new(file: impl Into<String>, bug_type: impl Into<String>, status: FixStatus) -> Self {
        Self {
            file: file.into(),
            bug_type: bug_type.into(),
            status,
            explanation: None,
            description: None,
            error_message: None,
            commit_message: None,
        }
    }

    pub fn with_root_cause(mut self, root_cause: impl Into<String>) -> Self {
        self.explanation = Some(Explanation {
            root_cause: Some(root_cause.into()),
        });
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }
}

pub fn parse_harness_result(content: &str) -> serde_json::Result<HarnessResult> {
    serde_json::from_str(content)
}
