//! `cadenas-strength` — Crack-time estimation engine for CADENAS.
//!
//! Answers one question at every point of the password parameter picker:
//! how long would a brute-force attacker need? Two calibration points are
//! offered — a fixed published supercomputer hash rate for comparable,
//! machine-independent figures, and the local machine's own SHA-1
//! throughput, measured once per session on a background thread.
//!
//! Zero I/O beyond that one worker thread, zero async, zero UI dependencies.
//!
//! ```
//! use cadenas_strength::{ComplexityLevel, CrackTimeEstimator, HashRateBenchmark};
//! use cadenas_strength::format_local_crack_duration;
//!
//! let mut benchmark = HashRateBenchmark::spawn();
//! let mut estimator = CrackTimeEstimator::new();
//!
//! // Later, e.g. when refreshing a tooltip:
//! estimator.calibrate(benchmark.sample());
//! let level = ComplexityLevel::new(2)?;
//! let local = estimator.local_estimate(16, level);
//! println!("{}", format_local_crack_duration(local)); // "calculating ..." until measured
//! # Ok::<(), cadenas_strength::StrengthError>(())
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod complexity;

pub mod estimator;

pub mod benchmark;

pub mod format;

pub use benchmark::{HashRateBenchmark, HashRateSample};
pub use complexity::{
    CharacterClasses, ComplexityLevel, DEFAULT_EXTRA_CHARACTERS, DIGITS, LOWERCASE, UPPERCASE,
};
pub use error::StrengthError;
pub use estimator::{
    crack_seconds, CrackTimeEstimator, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
    REFERENCE_HASHES_PER_SEC,
};
pub use format::{format_crack_duration, format_local_crack_duration};
