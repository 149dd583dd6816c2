//! Chanbench Core: throughput and latency of an unbuffered coroutine channel
//!
//! One producer strand pushes integers through a rendezvous channel to one
//! consumer strand for a fixed wall-clock window, then sends a sentinel.
//! Both sides time how long they spend blocked in the channel.
//!
//! # Modules
//!
//! - `channel`: Zero-buffer rendezvous channel on May's MPMC lanes
//! - `strand`: Scheduler setup, strand spawn and join
//! - `trial`: One timed producer/consumer run
//! - `driver`: Sequential trials and running totals
//! - `report`: Human and JSON output
//! - `config`: Benchmark and scheduler settings
//! - `error`: Error type for faults outside the measured path

pub mod channel;
pub mod config;
pub mod driver;
pub mod error;
pub mod report;
pub mod strand;
pub mod trial;

pub use channel::{ChannelError, RendezvousReceiver, RendezvousSender, rendezvous};
pub use config::{BenchConfig, RUNS, SchedulerConfig, TRIAL_DURATION};
pub use driver::{Summary, run_benchmark};
pub use error::BenchError;
pub use report::ReportFormat;
pub use strand::{Strand, scheduler_init, spawn_strand};
pub use trial::{PAYLOAD, SENTINEL, TrialResult, run_trial};
