pub mod harness;
pub mod present;
pub mod report;
pub mod score;

use crate::config::Config;
use crate::core::harness::{FixRecord, HarnessResult};
use crate::core::report::FinalReport;
use crate::core::score::RunMetrics;
use crate::utils::fs as fs_utils;
use anyhow::{Context, Result};
use std::path::Path;

pub enum RunSource<'a> {
    Harness(&'a Path),
    Metrics(RunMetrics),
}

pub fn load_harness_result(path: &Path) -> Result<HarnessResult> {
    let content = fs_utils::read_input(path)?;
    let result = harness::parse_harness_result(&content).with_context(|| {
        format!(
            "failed parsing harness result {}",
            fs_utils::display_path(path)
        )
    })?;
    tracing::debug!(
        input = %fs_utils::display_path(path),
        fixes = result.fixes.len(),
        "loaded harness result"
    );
    Ok(result)
}

pub fn run_report(source: RunSource<'_>, cfg: &Config) -> Result<FinalReport> {
    let (metrics, fixes): (RunMetrics, Vec<FixRecord>) = match source {
        RunSource::Harness(path) => {
            let result = load_harness_result(path)?;
            let metrics = result.metrics()?;
            (metrics, result.fixes)
        }
        RunSource::Metrics(metrics) => (metrics, Vec::new()),
    };

    let report = report::build_report(metrics, &fixes, cfg);
    tracing::info!(
        passed = metrics.tests_passed,
        elapsed_seconds = metrics.elapsed_seconds,
        commits = metrics.commit_count,
        final_score = report.score.final_score,
        "computed score"
    );
    for row in report
        .rows
        .iter()
        .filter(|row| row.summary_source == present::SummarySource::Placeholder)
    {
        tracing::warn!(file = %row.file, status = %row.status, "fix record has no summary text");
    }

    Ok(report)
}
