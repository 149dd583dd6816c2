//! Benchmark output
//!
//! Two formats:
//! - `Human` → per-run progress lines and an averages footer (default)
//! - `Json` → a single JSON document once all runs have finished
//!
//! The human format is line-for-line what the benchmark has always printed,
//! including the `µs` unit suffix.

use crate::driver::Summary;
use crate::trial::TrialResult;
use serde::Serialize;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Human,
    Json,
}

// =============================================================================
// Human format
// =============================================================================

/// Announce a run before it starts (1-based)
pub fn write_run_header(out: &mut impl Write, run: u32) -> std::io::Result<()> {
    writeln!(out, "Run #{}...", run)
}

pub fn write_trial(out: &mut impl Write, result: &TrialResult) -> std::io::Result<()> {
    writeln!(
        out,
        "  Messages: {}, Send Latency: {:.3} µs, Receive Latency: {:.3} µs",
        result.messages, result.send_latency_us, result.receive_latency_us
    )
}

pub fn write_summary(out: &mut impl Write, summary: &Summary) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "===== Average Results over {} runs =====",
        summary.runs
    )?;
    writeln!(out, "Average Messages: {}", summary.average_messages())?;
    writeln!(
        out,
        "Average Send Latency: {:.3} µs",
        summary.average_send_latency_us()
    )?;
    writeln!(
        out,
        "Average Receive Latency: {:.3} µs",
        summary.average_receive_latency_us()
    )
}

// =============================================================================
// JSON format
// =============================================================================

#[derive(Debug, Serialize)]
struct JsonAverage {
    messages: u64,
    send_latency_us: f64,
    receive_latency_us: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    runs: u32,
    duration_ms: u64,
    trials: &'a [TrialResult],
    average: JsonAverage,
}

pub fn format_json(summary: &Summary) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        runs: summary.runs,
        duration_ms: summary.duration.as_millis() as u64,
        trials: &summary.trials,
        average: JsonAverage {
            messages: summary.average_messages(),
            send_latency_us: summary.average_send_latency_us(),
            receive_latency_us: summary.average_receive_latency_us(),
        },
    };
    serde_json::to_string_pretty(&report)
}
