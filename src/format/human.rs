//! Human-readable byte counts (`1.9Gi`, `2.0G`) with one fractional digit.

use std::fmt;

use crate::format::units::UnitSystem;

/// A byte count scaled to the magnitude that keeps the mantissa in `[1, base)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Humanized {
    mantissa: f64,
    magnitude: usize,
    suffix: &'static str,
}

impl Humanized {
    const ZERO: Humanized = Humanized {
        mantissa: 0.0,
        magnitude: 0,
        suffix: "B",
    };

    pub fn mantissa(&self) -> f64 {
        self.mantissa
    }

    pub fn magnitude(&self) -> usize {
        self.magnitude
    }

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }
}

impl fmt::Display for Humanized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ZERO {
            return f.write_str("0B");
        }
        write!(f, "{:.1}{}", self.mantissa, self.suffix)
    }
}

/// Scale `raw_bytes` to one decimal digit with the matching suffix.
///
/// A mantissa that rounds up to exactly `base` (1023.96Ki -> 1024.0Ki) is
/// carried into the next magnitude (1.0Mi). Counts past the largest suffix
/// are clamped to it.
pub fn humanize(raw_bytes: u64, system: UnitSystem) -> Humanized {
    if raw_bytes == 0 {
        return Humanized::ZERO;
    }

    let base = system.base() as f64;
    let suffixes = system.suffixes();
    let last = suffixes.len() - 1;

    let estimate = ((raw_bytes as f64).log10() / base.log10()).floor() as usize;
    let mut magnitude = exact_magnitude(raw_bytes, system.base(), estimate).min(last);

    let mut mantissa = round_tenth(raw_bytes as f64 / base.powi(magnitude as i32));
    if mantissa >= base && magnitude < last {
        magnitude += 1;
        mantissa = round_tenth(mantissa / base);
    }

    Humanized {
        mantissa,
        magnitude,
        suffix: suffixes[magnitude],
    }
}

/// The log-derived estimate can land one off near exact powers
/// (log10(2^20) / log10(1024) = 1.999...); settle it against integer powers
/// so that `base^m <= raw < base^(m+1)`.
fn exact_magnitude(raw_bytes: u64, base: u64, estimate: usize) -> usize {
    let raw = u128::from(raw_bytes);
    let base = u128::from(base);
    let pow = |m: usize| base.checked_pow(m as u32).unwrap_or(u128::MAX);

    let mut magnitude = estimate;
    while magnitude > 0 && pow(magnitude) > raw {
        magnitude -= 1;
    }
    while pow(magnitude + 1) <= raw {
        magnitude += 1;
    }
    magnitude
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
