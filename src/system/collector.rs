use sysinfo::System;

use crate::system::memory::MemoryInfo;

/// Anything that can produce one cycle's worth of memory figures
pub trait MemorySource {
    fn collect(&mut self) -> MemoryInfo;
}

/// System data collector using the `sysinfo` crate, with kernel files for
/// the figures `sysinfo` does not expose
pub struct Collector {
    sys: System,
}

impl Collector {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource for Collector {
    fn collect(&mut self) -> MemoryInfo {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            log::warn!("sysinfo does not support this platform; reporting nothing");
            return MemoryInfo::new();
        }

        // Only memory; CPU and process lists are never read here
        self.sys.refresh_memory();

        let info = MemoryInfo {
            total_mem: Some(self.sys.total_memory()),
            free_mem: Some(self.sys.free_memory()),
            buffered_mem: read_buffered(),
            shared_ceiling: read_shared_ceiling(),
            total_swap: Some(self.sys.total_swap()),
            used_swap: Some(self.sys.used_swap()),
        };

        let missing = info.unavailable();
        if !missing.is_empty() {
            log::warn!("unavailable on this system: {}", missing.join(", "));
        }
        info
    }
}

#[cfg(target_os = "linux")]
fn read_buffered() -> Option<u64> {
    let content = std::fs::read_to_string("/proc/meminfo")
        .map_err(|e| log::debug!("reading /proc/meminfo: {e}"))
        .ok()?;
    meminfo_bytes(&content, "Buffers")
}

#[cfg(not(target_os = "linux"))]
fn read_buffered() -> Option<u64> {
    None
}

#[cfg(target_os = "linux")]
const SHMMAX_PATH: &str = "/proc/sys/kernel/shmmax";

#[cfg(target_os = "linux")]
fn read_shared_ceiling() -> Option<u64> {
    let content = std::fs::read_to_string(SHMMAX_PATH)
        .map_err(|e| log::debug!("reading {SHMMAX_PATH}: {e}"))
        .ok()?;
    parse_shmmax(&content)
}

#[cfg(not(target_os = "linux"))]
fn read_shared_ceiling() -> Option<u64> {
    None
}

/// Value of a `Key:   1234 kB` line from `/proc/meminfo`, in bytes
pub fn meminfo_bytes(content: &str, key: &str) -> Option<u64> {
    content.lines().find_map(|line| {
        let (name, rest) = line.split_once(':')?;
        if name.trim() != key {
            return None;
        }
        let mut parts = rest.split_whitespace();
        let value: u64 = parts.next()?.parse().ok()?;
        match parts.next() {
            Some("kB") => value.checked_mul(1024),
            None => Some(value),
            Some(_) => None,
        }
    })
}

pub fn parse_shmmax(content: &str) -> Option<u64> {
    content.trim().parse().ok()
}
