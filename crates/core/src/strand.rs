//! Strands - lightweight tasks on May coroutines
//!
//! Each benchmark trial runs exactly two strands, a producer and a consumer.
//! A strand hands its result back through [`Strand::join`], which doubles as
//! the completion barrier: the trial runner joins both before touching any
//! accumulated timings.
//!
//! ## Panic Behavior
//!
//! A panic inside a strand is caught by May and surfaces from `join` as
//! [`BenchError::StrandPanicked`] rather than tearing down the process.

use crate::config::SchedulerConfig;
use crate::error::{BenchError, format_panic_payload};
use may::coroutine;
use std::sync::Once;
use tracing::debug;

static SCHEDULER_INIT: Once = Once::new();

/// Initialize the scheduler.
///
/// Idempotent: only the first call configures May, later calls are no-ops.
/// Must run before the first strand is spawned for the settings to apply.
pub fn scheduler_init(config: &SchedulerConfig) {
    SCHEDULER_INIT.call_once(|| {
        let may_config = may::config();
        may_config.set_stack_size(config.stack_size);
        if let Some(workers) = config.workers {
            may_config.set_workers(workers);
        }
        debug!(
            stack_size = config.stack_size,
            workers = ?config.workers,
            "scheduler initialized"
        );
    });
}

/// Handle to a running strand
pub struct Strand<T> {
    name: &'static str,
    handle: coroutine::JoinHandle<T>,
}

/// Spawn `f` on a new May coroutine
pub fn spawn_strand<F, T>(name: &'static str, f: F) -> Strand<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    // SAFETY: strand bodies only block through May primitives (rendezvous
    // channel lanes) and hold no thread-local state across those yields.
    let handle = unsafe { coroutine::spawn(f) };
    Strand { name, handle }
}

impl<T> Strand<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wait for the strand to finish and take its result
    pub fn join(self) -> Result<T, BenchError> {
        let name = self.name;
        self.handle
            .join()
            .map_err(|payload| BenchError::StrandPanicked {
                strand: name,
                message: format_panic_payload(&payload),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_scheduler_init_idempotent() {
        scheduler_init(&SchedulerConfig::default());
        scheduler_init(&SchedulerConfig::default());
        // Should not crash
    }

    #[test]
    fn test_join_returns_strand_result() {
        scheduler_init(&SchedulerConfig::default());
        let strand = spawn_strand("adder", || 40 + 2);
        assert_eq!(strand.name(), "adder");
        assert_eq!(strand.join().expect("adder strand"), 42);
    }

    #[test]
    fn test_join_waits_for_all_work() {
        scheduler_init(&SchedulerConfig::default());
        let counter = Arc::new(AtomicU32::new(0));

        let strands: Vec<_> = (0..100)
            .map(|_| {
                let counter = Arc::clone(&counter);
                spawn_strand("increment", move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        for strand in strands {
            strand.join().expect("increment strand");
        }
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_panicking_strand_reported() {
        scheduler_init(&SchedulerConfig::default());
        let strand = spawn_strand("doomed", || -> u32 { panic!("strand blew up") });

        match strand.join() {
            Err(BenchError::StrandPanicked { strand, message }) => {
                assert_eq!(strand, "doomed");
                assert_eq!(message, "strand blew up");
            }
            other => panic!("expected StrandPanicked, got {:?}", other.map(|_| ())),
        }
    }
}
