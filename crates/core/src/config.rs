//! Benchmark and scheduler configuration
//!
//! Defaults reproduce the fixed benchmark: 10 sequential trials of one
//! second each, human-readable output, May's default worker count.
//!
//! The scheduler can be tuned through the environment when the caller does
//! not set a value explicitly:
//!
//! - `CHANBENCH_STACK_SIZE`: coroutine stack size in bytes
//! - `CHANBENCH_WORKERS`: number of May worker threads

use crate::error::BenchError;
use crate::report::ReportFormat;
use std::time::Duration;
use tracing::warn;

/// Number of trials run by default
pub const RUNS: u32 = 10;

/// Wall-clock length of each trial by default
pub const TRIAL_DURATION: Duration = Duration::from_secs(1);

/// Default coroutine stack size: 128KB (0x20000 bytes)
///
/// Producer and consumer strands keep almost nothing on their stacks.
pub const DEFAULT_STACK_SIZE: usize = 0x20000;

/// What the driver runs and how it reports
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub runs: u32,
    pub duration: Duration,
    pub format: ReportFormat,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: RUNS,
            duration: TRIAL_DURATION,
            format: ReportFormat::Human,
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Reject configurations whose averages are undefined
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.runs == 0 {
            return Err(BenchError::InvalidConfig(
                "run count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// May scheduler settings applied once per process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Worker threads; `None` keeps May's default (one per CPU)
    pub workers: Option<usize>,
    pub stack_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: None,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl SchedulerConfig {
    /// Build from `CHANBENCH_STACK_SIZE` / `CHANBENCH_WORKERS`
    pub fn from_env() -> Self {
        Self {
            workers: parse_workers(std::env::var("CHANBENCH_WORKERS").ok()),
            stack_size: parse_stack_size(std::env::var("CHANBENCH_STACK_SIZE").ok()),
        }
    }
}

/// Parse stack size from an optional string value.
/// Returns the parsed size, or DEFAULT_STACK_SIZE if the value is missing, zero, or invalid.
pub fn parse_stack_size(env_value: Option<String>) -> usize {
    match env_value {
        Some(val) => match val.parse::<usize>() {
            Ok(0) => {
                warn!(
                    "CHANBENCH_STACK_SIZE=0 is invalid, using default {}",
                    DEFAULT_STACK_SIZE
                );
                DEFAULT_STACK_SIZE
            }
            Ok(size) => size,
            Err(_) => {
                warn!(
                    "CHANBENCH_STACK_SIZE='{}' is not a valid number, using default {}",
                    val, DEFAULT_STACK_SIZE
                );
                DEFAULT_STACK_SIZE
            }
        },
        None => DEFAULT_STACK_SIZE,
    }
}

/// Parse the worker count; zero or garbage falls back to May's default.
pub fn parse_workers(env_value: Option<String>) -> Option<usize> {
    let val = env_value?;
    match val.parse::<usize>() {
        Ok(0) | Err(_) => {
            warn!(
                "CHANBENCH_WORKERS='{}' is not a positive number, using May's default",
                val
            );
            None
        }
        Ok(n) => Some(n),
    }
}
