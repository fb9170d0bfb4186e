use clap::{ArgAction, Args, Parser};

use crate::format::Unit;

/// Longest accepted `--secs` (60 hours)
pub const MAX_SECS: u64 = 216_000;
/// Largest accepted `--count`
pub const MAX_COUNT: u32 = 100;

#[derive(Parser, Debug)]
#[command(
    name = "free",
    version,
    about = "Display the amount of space for RAM and swap",
    disable_help_flag = true
)]
pub struct Cli {
    #[command(flatten)]
    pub units: UnitArgs,

    /// Show the output in human readable form, e.g. 2.3Gi
    #[arg(short = 'h', long, conflicts_with = "unit")]
    pub human: bool,

    /// Use powers of 1000 instead of 1024 for -h and the default unit
    #[arg(long)]
    pub decimal: bool,

    /// Show the sum of RAM and swap for total, free and used
    #[arg(short, long)]
    pub total: bool,

    /// Continue printing every N seconds
    #[arg(short, long, value_name = "N", value_parser = validate_secs)]
    pub secs: Option<u64>,

    /// Print N times, then exit
    #[arg(short, long, value_name = "N", value_parser = validate_count)]
    pub count: Option<u32>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Fixed output units; at most one may be given.
#[derive(Args, Debug, Clone, Default)]
#[group(id = "unit", multiple = false)]
pub struct UnitArgs {
    /// Show the output in bytes
    #[arg(short = 'b', long)]
    pub bytes: bool,
    /// Show the output in kilobytes
    #[arg(long)]
    pub kilo: bool,
    /// Show the output in megabytes
    #[arg(long)]
    pub mega: bool,
    /// Show the output in gigabytes
    #[arg(long)]
    pub giga: bool,
    /// Show the output in terabytes
    #[arg(long)]
    pub tera: bool,
    /// Show the output in petabytes
    #[arg(long)]
    pub peta: bool,
    /// Show the output in exabytes
    #[arg(long)]
    pub exa: bool,
    /// Show the output in kibibytes
    #[arg(long)]
    pub kibi: bool,
    /// Show the output in mebibytes
    #[arg(long, alias = "mibi")]
    pub mebi: bool,
    /// Show the output in gibibytes
    #[arg(long)]
    pub gibi: bool,
    /// Show the output in tebibytes
    #[arg(long, alias = "tibi")]
    pub tebi: bool,
    /// Show the output in pebibytes
    #[arg(long, alias = "pibi")]
    pub pebi: bool,
    /// Show the output in exbibytes
    #[arg(long)]
    pub exbi: bool,
}

impl UnitArgs {
    /// The unit picked on the command line, if any
    pub fn selected(&self) -> Option<Unit> {
        [
            (self.bytes, "bytes"),
            (self.kilo, "kilo"),
            (self.mega, "mega"),
            (self.giga, "giga"),
            (self.tera, "tera"),
            (self.peta, "peta"),
            (self.exa, "exa"),
            (self.kibi, "kibi"),
            (self.mebi, "mebi"),
            (self.gibi, "gibi"),
            (self.tebi, "tebi"),
            (self.pebi, "pebi"),
            (self.exbi, "exbi"),
        ]
        .into_iter()
        .find(|(set, _)| *set)
        .and_then(|(_, name)| Unit::from_name(name))
    }
}

fn validate_secs(s: &str) -> Result<u64, String> {
    let val: u64 = s
        .parse()
        .map_err(|_| format!("expected an integer but found '{s}'"))?;
    if val < 1 {
        Err("seconds must not be smaller than 1".to_string())
    } else if val > MAX_SECS {
        Err(format!("seconds must not be larger than {MAX_SECS}"))
    } else {
        Ok(val)
    }
}

fn validate_count(s: &str) -> Result<u32, String> {
    let val: u32 = s
        .parse()
        .map_err(|_| format!("expected an integer but found '{s}'"))?;
    if val < 1 {
        Err("count must not be smaller than 1".to_string())
    } else if val > MAX_COUNT {
        Err(format!("count must not be larger than {MAX_COUNT}"))
    } else {
        Ok(val)
    }
}
