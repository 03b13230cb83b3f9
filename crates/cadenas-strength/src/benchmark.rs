//! Local hash-rate benchmark.
//!
//! Measures how many SHA-1 digests per second this machine can sustain, to
//! calibrate the "on your computer" crack-time estimate. The measurement
//! runs once per process on a background thread: fill a 64-byte buffer with
//! pseudo-random bytes, hash it, discard the digest, count. A watchdog
//! requests abort after 3 seconds so the UI never waits for the full
//! 5-second budget; the worker observes the flag within one iteration.
//!
//! The single result crosses back to the owning thread through a one-shot
//! mpsc channel — the send happens before the worker exits, so the reader
//! always observes a fully published value, never a torn or polled one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use sha1::{Digest, Sha1};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bytes hashed per iteration (one SHA-1 input block).
const DIGEST_INPUT_LEN: usize = 64;

/// Wall-clock budget for the measurement loop.
const MEASUREMENT_BUDGET: Duration = Duration::from_secs(5);

/// The watchdog requests abort after this much time, bounding worst-case
/// latency below the full measurement budget.
const WATCHDOG_BUDGET: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// A local hashing-throughput sample.
///
/// `Unmeasured` is the "not known yet" sentinel — callers surface it as
/// "calculating …" and must never conflate it with an infinite crack time.
/// Once measured, a sample is immutable for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HashRateSample {
    /// No measurement has been published (yet, or ever for this session).
    Unmeasured,
    /// Measured throughput in hashes per second, always positive.
    Measured(f64),
}

impl HashRateSample {
    /// Whether a measurement has been published.
    #[must_use]
    pub const fn is_measured(self) -> bool {
        matches!(self, Self::Measured(_))
    }

    /// The measured rate, or `None` while unmeasured.
    #[must_use]
    pub const fn hashes_per_sec(self) -> Option<f64> {
        match self {
            Self::Unmeasured => None,
            Self::Measured(rate) => Some(rate),
        }
    }
}

// ---------------------------------------------------------------------------
// Benchmark handle
// ---------------------------------------------------------------------------

/// Handle to the one-per-session background benchmark.
///
/// The owning thread polls [`sample`](Self::sample) (e.g. when refreshing a
/// tooltip) and latches the result on first receipt. Dropping the handle
/// aborts the worker and joins it, so nothing the worker captured outlives
/// the owner.
#[derive(Debug)]
pub struct HashRateBenchmark {
    abort: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    result_rx: mpsc::Receiver<f64>,
    sample: HashRateSample,
}

impl HashRateBenchmark {
    /// Start the measurement worker and its watchdog.
    #[must_use]
    pub fn spawn() -> Self {
        let abort = Arc::new(AtomicBool::new(false));
        let (result_tx, result_rx) = mpsc::channel();

        let worker_abort = Arc::clone(&abort);
        let worker = thread::spawn(move || {
            if let Some(rate) = measure_hash_rate(&worker_abort, MEASUREMENT_BUDGET) {
                log::debug!("hash-rate benchmark finished: {rate:.0} hashes/s");
                // The receiver may already be gone on early shutdown.
                let _ = result_tx.send(rate);
            }
        });

        // Watchdog: request abort after the short budget. Monotonic flag,
        // nothing to clean up — the thread owns only its Arc.
        let watchdog_abort = Arc::clone(&abort);
        thread::spawn(move || {
            thread::sleep(WATCHDOG_BUDGET);
            watchdog_abort.store(true, Ordering::Relaxed);
        });

        Self {
            abort,
            worker: Some(worker),
            result_rx,
            sample: HashRateSample::Unmeasured,
        }
    }

    /// The current sample, latching the worker's result on first receipt.
    ///
    /// Returns [`HashRateSample::Unmeasured`] until the worker has published
    /// — and permanently, if the measurement degraded (no re-runs within a
    /// session).
    pub fn sample(&mut self) -> HashRateSample {
        if !self.sample.is_measured() {
            if let Ok(rate) = self.result_rx.try_recv() {
                self.sample = HashRateSample::Measured(rate);
            }
        }
        self.sample
    }

    /// Request early termination. The flag is monotonic — once set it is
    /// never cleared — so a benign race with the worker's read is harmless.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    /// Block until the worker has actually terminated.
    pub fn wait(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("hash-rate benchmark worker panicked; sample stays unmeasured");
            }
        }
    }
}

impl Drop for HashRateBenchmark {
    fn drop(&mut self) {
        self.abort();
        self.wait();
    }
}

// ---------------------------------------------------------------------------
// Measurement loop
// ---------------------------------------------------------------------------

/// Run the measurement loop until `abort` is observed or `budget` elapses.
///
/// Returns the extrapolated full-machine rate, or `None` when the run was
/// anomalous (zero elapsed time or zero iterations) — a zero or garbage
/// throughput is never published.
#[allow(clippy::cast_precision_loss)] // iteration/core counts are far below 2^52
fn measure_hash_rate(abort: &AtomicBool, budget: Duration) -> Option<f64> {
    // A seeded PRNG keeps the loop measuring hashing, not OS entropy calls.
    let mut rng = SmallRng::from_entropy();
    let mut buf = [0u8; DIGEST_INPUT_LEN];
    let started = Instant::now();
    let mut iterations: u64 = 0;

    while !abort.load(Ordering::Relaxed) && started.elapsed() < budget {
        rng.fill_bytes(&mut buf);
        let digest = Sha1::digest(buf);
        std::hint::black_box(digest);
        iterations = iterations.saturating_add(1);
    }

    let elapsed_nanos = started.elapsed().as_nanos();
    if elapsed_nanos == 0 || iterations == 0 {
        log::warn!(
            "hash-rate benchmark anomaly ({iterations} iterations in {elapsed_nanos} ns), \
             publishing nothing"
        );
        return None;
    }

    // Extrapolate to full-machine parallelism: the loop is single-threaded,
    // but an attacker would use every core.
    let cores = thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    Some(iterations as f64 * cores as f64 * 1e9 / elapsed_nanos as f64)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_measurement_yields_positive_rate() {
        let abort = AtomicBool::new(false);
        let rate = measure_hash_rate(&abort, Duration::from_millis(50))
            .expect("unaborted run must publish");
        assert!(rate > 0.0);
        assert!(rate.is_finite());
    }

    #[test]
    fn abort_before_first_iteration_publishes_nothing() {
        let abort = AtomicBool::new(true);
        assert_eq!(measure_hash_rate(&abort, MEASUREMENT_BUDGET), None);
    }

    #[test]
    fn sample_starts_unmeasured() {
        assert!(!HashRateSample::Unmeasured.is_measured());
        assert_eq!(HashRateSample::Unmeasured.hashes_per_sec(), None);
    }

    #[test]
    fn measured_sample_exposes_rate() {
        let sample = HashRateSample::Measured(12.5);
        assert!(sample.is_measured());
        assert_eq!(sample.hashes_per_sec(), Some(12.5));
    }

    #[test]
    fn unmeasured_is_distinct_from_infinite() {
        // The "not yet known" sentinel is not a number at all — it can never
        // be mistaken for an infinite crack time.
        assert_ne!(
            HashRateSample::Unmeasured,
            HashRateSample::Measured(f64::INFINITY)
        );
        assert_eq!(HashRateSample::Unmeasured.hashes_per_sec(), None);
    }
}
