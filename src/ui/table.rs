use unicode_width::UnicodeWidthStr;

use crate::config::{Config, DisplayMode};
use crate::format::{convert, humanize};
use crate::system::memory::MemoryInfo;

/// Column headers, in the order the row cells are produced
pub const HEADERS: [&str; 5] = ["total", "free", "used", "buffer", "shared"];

/// Display column at which each cell ends (right-aligned)
const COLUMN_ENDS: [usize; 5] = [20, 32, 44, 58, 71];

/// Shown in place of a figure the OS could not supply
pub const UNAVAILABLE: &str = "-";

/// Render one cycle's table: header, `Mem:`, `Swap:` and optionally `Total:`
pub fn render(info: &MemoryInfo, config: &Config) -> String {
    let mode = config.mode;
    let cells = |values: &[Option<u64>]| -> Vec<String> {
        values.iter().map(|v| format_cell(*v, mode)).collect()
    };

    let mut out = String::new();
    push_line(&mut out, "", &HEADERS.map(String::from));
    push_line(&mut out, "Mem:", &cells(&info.mem_row().cells()));
    push_line(&mut out, "Swap:", &cells(&info.swap_row().cells()));
    if config.show_total {
        push_line(&mut out, "Total:", &cells(&info.total_row().cells()));
    }
    out
}

/// A single cell: an integer count of the fixed unit, or a human string
pub fn format_cell(value: Option<u64>, mode: DisplayMode) -> String {
    match (value, mode) {
        (None, _) => UNAVAILABLE.to_string(),
        (Some(raw), DisplayMode::Fixed(unit)) => convert(raw, unit.byte_size()).to_string(),
        (Some(raw), DisplayMode::Human(system)) => humanize(raw, system).to_string(),
    }
}

fn push_line(out: &mut String, label: &str, cells: &[String]) {
    out.push_str(label);
    let mut width = label.width();
    for (cell, end) in cells.iter().zip(COLUMN_ENDS) {
        let cell_width = cell.width();
        // overlong cells still get one separating space
        let pad = end.saturating_sub(width + cell_width).max(1);
        out.extend(std::iter::repeat(' ').take(pad));
        out.push_str(cell);
        width += pad + cell_width;
    }
    out.push('\n');
}
