/// Memory and swap figures for one reporting cycle, in bytes.
///
/// `None` means the OS query for that figure failed or is not supported on
/// this platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total_mem: Option<u64>,
    pub free_mem: Option<u64>,
    pub buffered_mem: Option<u64>,
    /// Kernel ceiling for a single shared-memory segment (`shmmax`). This is
    /// a tunable limit, not the amount of memory currently shared.
    pub shared_ceiling: Option<u64>,
    pub total_swap: Option<u64>,
    pub used_swap: Option<u64>,
}

impl MemoryInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total minus free
    pub fn used_mem(&self) -> Option<u64> {
        Some(self.total_mem?.saturating_sub(self.free_mem?))
    }

    /// Total swap minus used swap
    pub fn free_swap(&self) -> Option<u64> {
        Some(self.total_swap?.saturating_sub(self.used_swap?))
    }

    pub fn mem_row(&self) -> MemRow {
        MemRow {
            total: self.total_mem,
            free: self.free_mem,
            used: self.used_mem(),
            buffer: self.buffered_mem,
            shared: self.shared_ceiling,
        }
    }

    pub fn swap_row(&self) -> SwapRow {
        SwapRow {
            total: self.total_swap,
            free: self.free_swap(),
            used: self.used_swap,
        }
    }

    /// RAM + swap for the total, free and used columns
    pub fn total_row(&self) -> SwapRow {
        let mem = self.mem_row();
        let swap = self.swap_row();
        SwapRow {
            total: sum(mem.total, swap.total),
            free: sum(mem.free, swap.free),
            used: sum(mem.used, swap.used),
        }
    }

    /// Names of the figures the OS could not supply
    pub fn unavailable(&self) -> Vec<&'static str> {
        [
            ("total memory", self.total_mem),
            ("free memory", self.free_mem),
            ("buffer memory", self.buffered_mem),
            ("shared memory ceiling", self.shared_ceiling),
            ("total swap", self.total_swap),
            ("used swap", self.used_swap),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// `Mem:` row cells in column order: total, free, used, buffer, shared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemRow {
    pub total: Option<u64>,
    pub free: Option<u64>,
    pub used: Option<u64>,
    pub buffer: Option<u64>,
    pub shared: Option<u64>,
}

impl MemRow {
    pub fn cells(&self) -> [Option<u64>; 5] {
        [self.total, self.free, self.used, self.buffer, self.shared]
    }
}

/// `Swap:` / `Total:` row cells in column order: total, free, used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRow {
    pub total: Option<u64>,
    pub free: Option<u64>,
    pub used: Option<u64>,
}

impl SwapRow {
    pub fn cells(&self) -> [Option<u64>; 3] {
        [self.total, self.free, self.used]
    }
}

fn sum(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    Some(a?.saturating_add(b?))
}
