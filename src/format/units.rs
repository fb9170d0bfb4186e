//! Fixed-unit conversion: decimal (powers of 1000) and binary (powers of 1024)
//! byte units, and integer division of a raw byte count by a unit's size.

use std::fmt;
use std::num::NonZeroU64;

use crate::error::FreeError;

/// Largest magnitude index with a suffix (yotta / yobi)
pub const MAX_MAGNITUDE: usize = 8;

const DECIMAL_SUFFIXES: [&str; MAX_MAGNITUDE + 1] = ["B", "K", "M", "G", "T", "P", "E", "Z", "Y"];
const BINARY_SUFFIXES: [&str; MAX_MAGNITUDE + 1] =
    ["B", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];

const DECIMAL_NAMES: [&str; MAX_MAGNITUDE + 1] =
    ["bytes", "kilo", "mega", "giga", "tera", "peta", "exa", "zetta", "yotta"];
const BINARY_NAMES: [&str; MAX_MAGNITUDE + 1] =
    ["bytes", "kibi", "mebi", "gibi", "tebi", "pebi", "exbi", "zebi", "yobi"];

/// Numbering system used to scale byte counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Powers of 1000: K, M, G, ...
    Decimal,
    /// Powers of 1024: Ki, Mi, Gi, ...
    #[default]
    Binary,
}

impl UnitSystem {
    pub const fn base(self) -> u64 {
        match self {
            UnitSystem::Decimal => 1000,
            UnitSystem::Binary => 1024,
        }
    }

    pub(crate) fn suffixes(self) -> &'static [&'static str; MAX_MAGNITUDE + 1] {
        match self {
            UnitSystem::Decimal => &DECIMAL_SUFFIXES,
            UnitSystem::Binary => &BINARY_SUFFIXES,
        }
    }

    fn names(self) -> &'static [&'static str; MAX_MAGNITUDE + 1] {
        match self {
            UnitSystem::Decimal => &DECIMAL_NAMES,
            UnitSystem::Binary => &BINARY_NAMES,
        }
    }

    /// Suffix for `base^magnitude`, or `MagnitudeOutOfRange` past yotta/yobi.
    pub fn suffix(self, magnitude: usize) -> Result<&'static str, FreeError> {
        self.suffixes()
            .get(magnitude)
            .copied()
            .ok_or(FreeError::MagnitudeOutOfRange {
                exponent: magnitude,
                max: MAX_MAGNITUDE,
            })
    }
}

/// A fixed display unit: `system.base()^exponent` bytes.
///
/// Construction guarantees the byte size fits in a `u64` and is never zero,
/// so every `Unit` is a valid divisor for [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    system: UnitSystem,
    exponent: usize,
    byte_size: NonZeroU64,
}

impl Unit {
    pub const BYTES: Unit = Unit {
        system: UnitSystem::Binary,
        exponent: 0,
        byte_size: NonZeroU64::MIN,
    };

    /// The first step above bytes: kilo or kibi
    pub const fn step(system: UnitSystem) -> Unit {
        let byte_size = match NonZeroU64::new(system.base()) {
            Some(size) => size,
            None => NonZeroU64::MIN,
        };
        Unit {
            system,
            exponent: 1,
            byte_size,
        }
    }

    pub fn new(system: UnitSystem, exponent: usize) -> Result<Self, FreeError> {
        system.suffix(exponent)?;
        let byte_size = u32::try_from(exponent)
            .ok()
            .and_then(|exp| system.base().checked_pow(exp))
            .and_then(NonZeroU64::new)
            .ok_or_else(|| FreeError::UnsupportedUnit(system.names()[exponent].to_string()))?;

        Ok(Self {
            system,
            exponent,
            byte_size,
        })
    }

    /// Look up a unit by its long name (`kilo`, `gibi`, ...). `mibi`, `tibi`
    /// and `pibi` are accepted as alternate spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = match name {
            "mibi" => "mebi",
            "tibi" => "tebi",
            "pibi" => "pebi",
            other => other,
        };
        if name == "bytes" {
            return Some(Self::BYTES);
        }
        [UnitSystem::Decimal, UnitSystem::Binary]
            .into_iter()
            .find_map(|system| {
                let exponent = system.names().iter().position(|n| *n == name)?;
                Self::new(system, exponent).ok()
            })
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    pub fn exponent(&self) -> usize {
        self.exponent
    }

    pub fn byte_size(&self) -> NonZeroU64 {
        self.byte_size
    }

    pub fn name(&self) -> &'static str {
        self.system.names()[self.exponent]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whole number of `unit_byte_size` units in `raw_bytes` (floor division).
pub fn convert(raw_bytes: u64, unit_byte_size: NonZeroU64) -> u64 {
    raw_bytes / unit_byte_size
}
