//! Driver: runs the configured number of trials back to back and reports
//!
//! Trials never overlap. Each one gets a fresh channel and fresh strands, and
//! nothing but its [`TrialResult`] survives into the [`Summary`].

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::report::{self, ReportFormat};
use crate::trial::{TrialResult, run_trial};
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// Running totals across trials
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub runs: u32,
    pub duration: Duration,
    pub total_messages: u64,
    pub total_send_latency_us: f64,
    pub total_receive_latency_us: f64,
    pub trials: Vec<TrialResult>,
}

impl Summary {
    pub fn new(duration: Duration) -> Self {
        Self {
            runs: 0,
            duration,
            total_messages: 0,
            total_send_latency_us: 0.0,
            total_receive_latency_us: 0.0,
            trials: Vec::new(),
        }
    }

    pub fn record(&mut self, result: TrialResult) {
        self.runs += 1;
        self.total_messages += result.messages;
        self.total_send_latency_us += result.send_latency_us;
        self.total_receive_latency_us += result.receive_latency_us;
        self.trials.push(result);
    }

    /// Mean message count, truncated toward zero
    pub fn average_messages(&self) -> u64 {
        if self.runs == 0 {
            return 0;
        }
        self.total_messages / u64::from(self.runs)
    }

    pub fn average_send_latency_us(&self) -> f64 {
        self.mean(self.total_send_latency_us)
    }

    pub fn average_receive_latency_us(&self) -> f64 {
        self.mean(self.total_receive_latency_us)
    }

    fn mean(&self, total: f64) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        total / f64::from(self.runs)
    }
}

/// Run every trial in `config` and write the report to `out`
pub fn run_benchmark(config: &BenchConfig, out: &mut impl Write) -> Result<Summary, BenchError> {
    config.validate()?;
    info!(
        runs = config.runs,
        duration_ms = config.duration.as_millis() as u64,
        "starting benchmark"
    );

    let mut summary = Summary::new(config.duration);
    for run in 1..=config.runs {
        if config.format == ReportFormat::Human {
            report::write_run_header(out, run)?;
            out.flush()?;
        }

        let result = run_trial(config.duration)?;

        if config.format == ReportFormat::Human {
            report::write_trial(out, &result)?;
        }
        summary.record(result);
    }

    match config.format {
        ReportFormat::Human => report::write_summary(out, &summary)?,
        ReportFormat::Json => writeln!(out, "{}", report::format_json(&summary)?)?,
    }
    out.flush()?;

    info!(
        average_messages = summary.average_messages(),
        "benchmark finished"
    );
    Ok(summary)
}
