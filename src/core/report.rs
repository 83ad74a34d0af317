use crate::config::Config;
use crate::core::harness::{FixRecord, FixStatus};
use crate::core::present::{self, BadgeVariant, DisplayFlags, FixCounts, SummarySource, Tone};
use crate::core::score::{RunMetrics, ScoreResult};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct FixRow {
    pub file: String,
    pub bug_type: String,
    pub status: FixStatus,
    pub badge: BadgeVariant,
    pub label: &'static str,
    pub summary: String,
    pub summary_source: SummarySource,
}

impl FixRow {
    pub fn from_fix(fix: &FixRecord, placeholder: &str) -> Self {
        let (badge, label) = present::badge_for(fix.status);
        let summary = present::resolve_summary(fix, placeholder);
        Self {
            file: fix.file.clone(),
            bug_type: fix.bug_type.clone(),
            status: fix.status,
            badge,
            label,
            summary: summary.text.to_string(),
            summary_source: summary.source,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub metrics: RunMetrics,
    pub score: ScoreResult,
    pub percent: u8,
    pub tone: Tone,
    pub flags: DisplayFlags,
    pub duration: String,
    pub calculation: String,
    pub rows: Vec<FixRow>,
    pub counts: FixCounts,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub metrics: RunMetrics,
    pub duration: String,
    pub score: ScoreResult,
    pub percent: u8,
    pub tone: Tone,
    pub flags: DisplayFlags,
    pub calculation: String,
    pub fixes: Vec<FixRow>,
    pub counts: FixCounts,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        Self {
            metrics: report.metrics,
            duration: report.duration.clone(),
            score: report.score,
            percent: report.percent,
            tone: report.tone,
            flags: report.flags,
            calculation: report.calculation.clone(),
            fixes: report.rows.clone(),
            counts: report.counts,
        }
    }
}

pub fn build_report(metrics: RunMetrics, fixes: &[FixRecord], cfg: &Config) -> FinalReport {
    let score = metrics.score();
    let rows = fixes
        .iter()
        .map(|fix| FixRow::from_fix(fix, &cfg.display.summary_placeholder))
        .collect();

    FinalReport {
        metrics,
        score,
        percent: present::percent_of(score.final_score, score.max_possible_score),
        tone: present::score_tone(&score),
        flags: DisplayFlags::from_metrics(&metrics),
        duration: present::format_duration(metrics.elapsed_seconds),
        calculation: present::calculation_line(&score),
        rows,
        counts: FixCounts::from_fixes(fixes),
        exit: evaluate_exit(&score, cfg),
    }
}

pub fn evaluate_exit(score: &ScoreResult, cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();

    if score.final_score < cfg.general.min_score {
        reasons.push(format!(
            "score {} is below min_score {}",
            score.final_score, cfg.general.min_score
        ));
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

fn toned(text: &str, tone: Tone) -> String {
    match tone {
        Tone::Primary => text.green().bold().to_string(),
        Tone::Destructive => text.red().bold().to_string(),
    }
}

fn badge(row: &FixRow) -> String {
    match row.badge {
        BadgeVariant::Default => row.label.green().bold().to_string(),
        BadgeVariant::Destructive => row.label.red().bold().to_string(),
    }
}

pub fn print_human(report: &FinalReport, cfg: &Config) {
    print!("{}", render_human(report, cfg));
}

pub fn render_human(report: &FinalReport, cfg: &Config) -> String {
    // colored already honours NO_COLOR and non-tty output; config can only turn it off.
    if !cfg.display.color {
        colored::control::set_override(false);
    }

    let mut out = String::new();
    let score = &report.score;
    let headline = format!("{}/{}", score.final_score, score.max_possible_score);
    let _ = writeln!(out, "Score Breakdown: {}", toned(&headline, report.tone));
    let _ = writeln!(
        out,
        "time: {}  commits: {}  tests: {}",
        report.duration,
        report.metrics.commit_count,
        if report.metrics.tests_passed {
            "passed"
        } else {
            "failed"
        }
    );

    let progress = present::bar_fill_ratio(
        f64::from(score.final_score),
        f64::from(score.max_possible_score),
    );
    let _ = writeln!(
        out,
        "{} {}%",
        present::render_bar(progress, cfg.display.bar_width),
        report.percent
    );

    // pad before colouring so escape codes don't count toward the width.
    let base = format!("{:>6}", present::signed_base(score));
    let bonus = format!("{:>6}", present::signed_bonus(score));
    let bonus = if score.speed_bonus > 0 {
        bonus.green().to_string()
    } else {
        bonus.dimmed().to_string()
    };
    let penalty = format!("{:>6}", present::signed_penalty(score));
    let penalty = if score.efficiency_penalty > 0 {
        penalty.red().to_string()
    } else {
        penalty.dimmed().to_string()
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<20} {}  Starting points", "Base Score", base);
    let _ = writeln!(
        out,
        "{:<20} {}  {}",
        "Speed Bonus",
        bonus,
        present::speed_caption(&report.flags)
    );
    let _ = writeln!(
        out,
        "{:<20} {}  {}",
        "Efficiency Penalty",
        penalty,
        present::penalty_caption(score, &report.metrics)
    );
    if score.efficiency_penalty > 0 {
        let ratio = present::bar_fill_ratio(
            score.efficiency_penalty as f64,
            cfg.display.penalty_bar_max as f64,
        );
        let _ = writeln!(
            out,
            "{:<20} {}",
            "",
            present::render_bar(ratio, cfg.display.bar_width)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Final Score: {}  ({})",
        toned(&format!("{} points", score.final_score), report.tone),
        report.calculation
    );

    if !report.rows.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Fixes ({} fixed, {} failed)",
            report.counts.fixed, report.counts.failed
        );
        for row in &report.rows {
            let _ = writeln!(
                out,
                "[{}] ({}) {}",
                badge(row),
                row.bug_type.to_uppercase(),
                row.file
            );
            let _ = writeln!(out, "-> {}", row.summary);
        }
    }

    let _ = writeln!(out);
    if report.exit.ok {
        let _ = writeln!(out, "exit: OK");
    } else {
        let _ = writeln!(out, "exit: FAILED ({})", report.exit.reason_line());
    }
    out
}
