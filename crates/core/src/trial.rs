//! Trial runner: one timed producer/consumer run over a rendezvous channel
//!
//! The producer sends `PAYLOAD` until the trial deadline passes, then sends a
//! single `SENTINEL`. The consumer receives until it sees the sentinel. Each
//! side times how long it spends blocked in the channel and hands the total
//! back through its strand's join.
//!
//! Both averages divide by the producer's message counter. With one producer,
//! one consumer and no buffering, every send pairs with exactly one receive,
//! so that counter is also the number of receives.

use crate::channel::{ChannelError, RendezvousReceiver, RendezvousSender, rendezvous};
use crate::error::BenchError;
use crate::strand::spawn_strand;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Ordinary message value
pub const PAYLOAD: i64 = 1;

/// End-of-stream marker, always the last value sent in a trial
pub const SENTINEL: i64 = 0;

/// Outcome of a single trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialResult {
    /// Messages sent, sentinel included
    pub messages: u64,
    /// Mean time blocked per send, in microseconds
    pub send_latency_us: f64,
    /// Mean time blocked per receive, in microseconds
    pub receive_latency_us: f64,
}

/// What the producer strand hands back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTally {
    pub messages: u64,
    pub blocked: Duration,
}

/// Run one trial of the given wall-clock length
///
/// The deadline only stops the producer from starting new payload sends; the
/// sentinel handoff after it is still timed and counted.
pub fn run_trial(duration: Duration) -> Result<TrialResult, BenchError> {
    let (tx, rx) = rendezvous::<i64>();

    let consumer = spawn_strand("consumer", move || consume(&rx));
    let producer = spawn_strand("producer", move || produce(&tx, duration));

    // Barrier: neither accumulator is read until both strands have exited.
    let tally = producer.join()??;
    let receive_blocked = consumer.join()??;

    let result = TrialResult {
        messages: tally.messages,
        send_latency_us: average_us(tally.blocked, tally.messages),
        receive_latency_us: average_us(receive_blocked, tally.messages),
    };
    debug!(
        messages = result.messages,
        send_latency_us = result.send_latency_us,
        receive_latency_us = result.receive_latency_us,
        "trial finished"
    );
    Ok(result)
}

/// Producer body: timed payload sends until `duration` elapses, then the sentinel
pub fn produce(tx: &RendezvousSender<i64>, duration: Duration) -> Result<SendTally, ChannelError> {
    let end = Instant::now() + duration;
    let mut tally = SendTally {
        messages: 0,
        blocked: Duration::ZERO,
    };

    while Instant::now() < end {
        let start = Instant::now();
        tx.send(PAYLOAD)?;
        tally.blocked += start.elapsed();
        tally.messages += 1;
    }

    let start = Instant::now();
    tx.send(SENTINEL)?;
    tally.blocked += start.elapsed();
    tally.messages += 1;

    Ok(tally)
}

/// Consumer body: timed receives until the sentinel arrives
///
/// The receive that yields the sentinel is timed like any other; nothing is
/// received after it.
pub fn consume(rx: &RendezvousReceiver<i64>) -> Result<Duration, ChannelError> {
    let mut blocked = Duration::ZERO;
    loop {
        let start = Instant::now();
        let value = rx.recv()?;
        blocked += start.elapsed();
        if value == SENTINEL {
            return Ok(blocked);
        }
    }
}

/// Whole microseconds of `total` spread over `count` operations
fn average_us(total: Duration, count: u64) -> f64 {
    total.as_micros() as f64 / count as f64
}
