use std::io::{self, ErrorKind, Write};
use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::system::collector::MemorySource;
use crate::ui;

/// Main reporting loop: collect, render and print one table per cycle,
/// sleeping `config.repeat.interval()` between cycles.
///
/// A closed stdout (e.g. `free -s 1 | head`) ends the loop without error.
pub fn run<S, W, F>(config: &Config, source: &mut S, out: &mut W, mut sleep: F) -> Result<()>
where
    S: MemorySource,
    W: Write,
    F: FnMut(Duration),
{
    match run_cycles(config, source, out, &mut sleep) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            log::debug!("stdout closed, stopping");
            Ok(())
        }
        other => Ok(other?),
    }
}

fn run_cycles<S, W, F>(config: &Config, source: &mut S, out: &mut W, sleep: &mut F) -> io::Result<()>
where
    S: MemorySource,
    W: Write,
    F: FnMut(Duration),
{
    let cycles = config.repeat.cycles();
    let interval = config.repeat.interval();
    let mut done: u64 = 0;

    loop {
        let info = source.collect();
        log::debug!("cycle {}: {:?}", done + 1, info);

        out.write_all(ui::render(&info, config).as_bytes())?;
        out.flush()?;
        done += 1;

        if cycles.is_some_and(|total| done >= total) {
            return Ok(());
        }

        sleep(interval);
        writeln!(out)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayMode, RepeatMode};
    use crate::format::UnitSystem;
    use crate::system::memory::MemoryInfo;

    /// Hands out a growing total so each cycle is distinguishable
    struct Counting {
        calls: u64,
    }

    impl MemorySource for Counting {
        fn collect(&mut self) -> MemoryInfo {
            self.calls += 1;
            MemoryInfo {
                total_mem: Some(self.calls * 1024),
                free_mem: Some(0),
                buffered_mem: Some(0),
                shared_ceiling: Some(0),
                total_swap: Some(0),
                used_swap: Some(0),
            }
        }
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn single_cycle_never_sleeps() {
        let mut source = Counting { calls: 0 };
        let mut out = Vec::new();
        let mut sleeps = Vec::new();
        run(&Config::default(), &mut source, &mut out, |d| sleeps.push(d)).unwrap();

        assert_eq!(source.calls, 1);
        assert!(sleeps.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn counted_cycles_are_separated_and_requeried() {
        let config = Config {
            mode: DisplayMode::Human(UnitSystem::Binary),
            show_total: true,
            repeat: RepeatMode::Times {
                count: 3,
                interval: Duration::from_secs(2),
            },
        };
        let mut source = Counting { calls: 0 };
        let mut out = Vec::new();
        let mut sleeps = Vec::new();
        run(&config, &mut source, &mut out, |d| sleeps.push(d)).unwrap();

        assert_eq!(source.calls, 3);
        assert_eq!(sleeps, vec![Duration::from_secs(2); 2]);

        let text = String::from_utf8(out).unwrap();
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].contains("1.0Ki"));
        assert!(blocks[1].contains("2.0Ki"));
        assert!(blocks[2].contains("3.0Ki"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn broken_pipe_ends_quietly() {
        let config = Config {
            repeat: RepeatMode::Forever {
                interval: Duration::from_secs(1),
            },
            ..Config::default()
        };
        let mut source = Counting { calls: 0 };
        run(&config, &mut source, &mut ClosedPipe, |_| {}).unwrap();
        assert_eq!(source.calls, 1);
    }
}
