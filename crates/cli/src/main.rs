//! Chanbench CLI
//!
//! Measures how many integers one coroutine can hand to another through an
//! unbuffered channel in a fixed window, and how long each side waits.
//! With no arguments it runs 10 trials of 1 second each.

use chanbench_core::config::DEFAULT_STACK_SIZE;
use chanbench_core::{
    BenchConfig, RUNS, ReportFormat, SchedulerConfig, TRIAL_DURATION, run_benchmark,
    scheduler_init,
};
use clap::{Parser, ValueEnum};
use std::io;
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "chanbench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Benchmark an unbuffered single-producer/single-consumer coroutine channel", long_about = None)]
struct Cli {
    /// Number of sequential trials
    #[arg(long, default_value_t = RUNS)]
    runs: u32,

    /// Length of each trial in milliseconds
    #[arg(long, value_name = "MS", default_value_t = TRIAL_DURATION.as_millis() as u64)]
    duration_ms: u64,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Human)]
    format: Format,

    /// May worker threads (defaults to CHANBENCH_WORKERS, then one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Coroutine stack size in bytes (defaults to CHANBENCH_STACK_SIZE, then 128KB)
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..))]
    stack_size: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => ReportFormat::Human,
            Format::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    fn scheduler_config(&self) -> SchedulerConfig {
        let from_env = SchedulerConfig::from_env();
        SchedulerConfig {
            workers: self.workers.filter(|&n| n > 0).or(from_env.workers),
            stack_size: self
                .stack_size
                .map(|n| usize::try_from(n).unwrap_or(DEFAULT_STACK_SIZE))
                .unwrap_or(from_env.stack_size),
        }
    }

    fn bench_config(&self) -> BenchConfig {
        BenchConfig::new()
            .with_runs(self.runs)
            .with_duration(Duration::from_millis(self.duration_ms))
            .with_format(self.format.into())
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chanbench=warn".parse().expect("static directive")),
        )
        .with_writer(io::stderr)
        .init();

    scheduler_init(&cli.scheduler_config());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run_benchmark(&cli.bench_config(), &mut out) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
