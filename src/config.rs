//! Run configuration: an immutable [`Config`] resolved once from the command
//! line and an optional htoprc-style defaults file (key=value).
//!
//! The defaults file lives at `$XDG_CONFIG_HOME/free/freerc`, falling back to
//! `$HOME/.config/free/freerc`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::error::FreeError;
use crate::format::{Unit, UnitSystem};

/// Delay between cycles when only `--count` is given
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// How each figure is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Integer count of a fixed unit
    Fixed(Unit),
    /// Scaled value with one decimal and an automatic suffix
    Human(UnitSystem),
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Fixed(Unit::step(UnitSystem::Binary))
    }
}

/// How many cycles to print and how far apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Once,
    Forever { interval: Duration },
    Times { count: u32, interval: Duration },
}

impl RepeatMode {
    /// Number of cycles, or `None` to run until interrupted
    pub fn cycles(&self) -> Option<u64> {
        match self {
            RepeatMode::Once => Some(1),
            RepeatMode::Forever { .. } => None,
            RepeatMode::Times { count, .. } => Some(u64::from(*count)),
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            RepeatMode::Once => Duration::ZERO,
            RepeatMode::Forever { interval } | RepeatMode::Times { interval, .. } => *interval,
        }
    }
}

/// Everything the reporting loop needs, fixed for the life of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub mode: DisplayMode,
    pub show_total: bool,
    pub repeat: RepeatMode,
}

impl Config {
    /// Command-line flags win over the defaults file
    pub fn resolve(cli: &Cli, rc: &FreeRc) -> Self {
        let decimal = cli.decimal || rc.decimal;
        let system = if decimal {
            UnitSystem::Decimal
        } else {
            UnitSystem::Binary
        };

        let mode = if let Some(unit) = cli.units.selected() {
            DisplayMode::Fixed(unit)
        } else if cli.human {
            DisplayMode::Human(system)
        } else if let Some(unit) = rc.unit {
            DisplayMode::Fixed(unit)
        } else if rc.human {
            DisplayMode::Human(system)
        } else {
            DisplayMode::Fixed(Unit::step(system))
        };

        let repeat = match (cli.secs, cli.count) {
            (None, None) => RepeatMode::Once,
            (Some(secs), None) => RepeatMode::Forever {
                interval: Duration::from_secs(secs),
            },
            (secs, Some(count)) => RepeatMode::Times {
                count,
                interval: secs.map(Duration::from_secs).unwrap_or(DEFAULT_INTERVAL),
            },
        };

        Self {
            mode,
            show_total: cli.total || rc.total,
            repeat,
        }
    }
}

/// Get the defaults file path
pub fn config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("free").join("freerc"))
}

/// Persisted defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreeRc {
    pub human: bool,
    pub decimal: bool,
    pub total: bool,
    pub unit: Option<Unit>,
}

impl FreeRc {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self, FreeError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, FreeError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                log::debug!("loading defaults from {}", path.display());
                Ok(Self::parse(&content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(FreeError::Config {
                path: path.to_path_buf(),
                detail: e.to_string(),
            }),
        }
    }

    pub fn parse(content: &str) -> Self {
        let mut rc = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("freerc: ignoring line without '=': {line}");
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "human" => rc.human = value == "1",
                "decimal" => rc.decimal = value == "1",
                "total" => rc.total = value == "1",
                "unit" => match Unit::from_name(value) {
                    Some(unit) => rc.unit = Some(unit),
                    None => log::warn!("freerc: unknown unit {value:?}"),
                },
                _ => {} // Ignore unknown keys
            }
        }

        rc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("free").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn default_is_kibibytes_once() {
        let config = Config::resolve(&cli(&[]), &FreeRc::default());
        assert_eq!(config.mode, DisplayMode::Fixed(Unit::step(UnitSystem::Binary)));
        assert_eq!(config.repeat, RepeatMode::Once);
        assert!(!config.show_total);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn decimal_switches_default_unit_and_human_base() {
        let config = Config::resolve(&cli(&["--decimal"]), &FreeRc::default());
        assert_eq!(config.mode, DisplayMode::Fixed(Unit::step(UnitSystem::Decimal)));

        let config = Config::resolve(&cli(&["-h", "--decimal"]), &FreeRc::default());
        assert_eq!(config.mode, DisplayMode::Human(UnitSystem::Decimal));
    }

    #[test]
    fn repeat_modes() {
        let forever = Config::resolve(&cli(&["-s", "3"]), &FreeRc::default()).repeat;
        assert_eq!(forever.cycles(), None);
        assert_eq!(forever.interval(), Duration::from_secs(3));

        let counted = Config::resolve(&cli(&["-c", "4"]), &FreeRc::default()).repeat;
        assert_eq!(counted.cycles(), Some(4));
        assert_eq!(counted.interval(), DEFAULT_INTERVAL);

        let both = Config::resolve(&cli(&["-c", "2", "-s", "5"]), &FreeRc::default()).repeat;
        assert_eq!(
            both,
            RepeatMode::Times {
                count: 2,
                interval: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn rc_parsing() {
        let rc = FreeRc::parse(
            "# defaults\n\
             human=1\n\
             total = 1\n\
             unit=gibi\n\
             colour=blue\n\
             garbage line\n",
        );
        assert!(rc.human);
        assert!(rc.total);
        assert!(!rc.decimal);
        assert_eq!(rc.unit, Unit::from_name("gibi"));

        assert_eq!(FreeRc::parse("unit=parsec\n").unit, None);
    }

    #[test]
    fn flags_override_rc() {
        let rc = FreeRc {
            human: true,
            decimal: false,
            total: true,
            unit: Unit::from_name("mega"),
        };
        // rc unit beats rc human
        let config = Config::resolve(&cli(&[]), &rc);
        assert_eq!(config.mode, DisplayMode::Fixed(Unit::from_name("mega").unwrap()));
        assert!(config.show_total);

        let config = Config::resolve(&cli(&["-h"]), &rc);
        assert_eq!(config.mode, DisplayMode::Human(UnitSystem::Binary));

        let config = Config::resolve(&cli(&["--tebi"]), &rc);
        assert_eq!(config.mode, DisplayMode::Fixed(Unit::from_name("tebi").unwrap()));
    }

    #[test]
    fn missing_rc_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let rc = FreeRc::load_from(&dir.path().join("freerc")).unwrap();
        assert_eq!(rc, FreeRc::default());
    }

    #[test]
    fn rc_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freerc");
        fs::write(&path, "decimal=1\nhuman=1\n").unwrap();
        let rc = FreeRc::load_from(&path).unwrap();
        assert!(rc.decimal && rc.human);
    }

    #[test]
    fn unreadable_rc_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        let err = FreeRc::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, FreeError::Config { .. }));
    }
}
