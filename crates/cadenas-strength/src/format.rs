//! Human-readable crack-duration formatting.
//!
//! Buckets a duration in seconds into the coarse units a tooltip shows.
//! Each boundary belongs to the larger unit: exactly one second reads
//! "~ 1 seconds", not "< 1 second".

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const SECS_PER_MINUTE: f64 = 60.0;
const SECS_PER_HOUR: f64 = 60.0 * 60.0;
const SECS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

/// Threshold below which a duration still reads in days.
const DAYS_THRESHOLD_SECS: f64 = SECS_PER_DAY * 365.24;

/// Gregorian year length used for the years bucket.
const SECS_PER_GREGORIAN_YEAR: f64 = SECS_PER_DAY * 365.2425;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Format a crack duration for display.
///
/// Sub-second durations collapse to "< 1 microsecond" / "< 1 millisecond"
/// below their unit; everything else rounds to the largest fitting unit.
/// Years are given to two significant figures. Non-finite input (the
/// zero-attacker-rate estimate) reads "forever".
#[must_use]
pub fn format_crack_duration(secs: f64) -> String {
    if !secs.is_finite() {
        return "forever".to_string();
    }
    if secs < 1e-6 {
        "< 1 microsecond".to_string()
    } else if secs < 1e-3 {
        "< 1 millisecond".to_string()
    } else if secs < 1.0 {
        format!("~ {} milliseconds", (1e3 * secs).round())
    } else if secs < SECS_PER_MINUTE {
        format!("~ {} seconds", secs.round())
    } else if secs < SECS_PER_HOUR {
        format!("~ {} minutes", (secs / SECS_PER_MINUTE).round())
    } else if secs < SECS_PER_DAY {
        format!("~ {} hours", (secs / SECS_PER_HOUR).round())
    } else if secs < DAYS_THRESHOLD_SECS {
        format!("~ {} days", (secs / SECS_PER_DAY).round())
    } else {
        format!(
            "~ {} years",
            two_significant_figures(secs / SECS_PER_GREGORIAN_YEAR)
        )
    }
}

/// Format the local-machine estimate, which may still be unknown.
///
/// `None` (hash rate not yet measured) reads "calculating ..." — never a
/// numeric duration, and never conflated with the infinite estimate.
#[must_use]
pub fn format_local_crack_duration(secs: Option<f64>) -> String {
    secs.map_or_else(|| "calculating ...".to_string(), format_crack_duration)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render a positive value at two significant figures, shortest form.
fn two_significant_figures(value: f64) -> String {
    if value < 10.0 {
        return format!("{value:.1}");
    }
    let magnitude = value.log10().floor();
    if magnitude >= 6.0 {
        return format!("{value:.1e}");
    }
    let scale = 10f64.powf(magnitude - 1.0);
    let rounded = (value / scale).round() * scale;
    format!("{rounded:.0}")
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
