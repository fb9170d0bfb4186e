//! free: display the amount of space for RAM and swap.
//!
//! Options mirror the classic BSD/Linux tool: fixed units (`--kilo`,
//! `--gibi`, ...), `-h` for human-readable output, `--decimal` for powers of
//! 1000, `-t` for a RAM + swap total row, and `-s`/`-c` to repeat.

use std::io;

use anyhow::Result;
use clap::Parser;

use memfree::app;
use memfree::cli::Cli;
use memfree::config::{Config, FreeRc};
use memfree::system::collector::Collector;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let rc = FreeRc::load()?;
    let config = Config::resolve(cli, &rc);
    log::debug!("resolved config: {:?}", config);

    let mut collector = Collector::new();
    let mut stdout = io::stdout().lock();
    app::run(&config, &mut collector, &mut stdout, std::thread::sleep)
}
