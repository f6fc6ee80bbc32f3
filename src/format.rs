use std::fmt;

use chrono::{DateTime, Local};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::system::snapshot::Report;

const GB: f64 = 1024.0 * 1024.0 * 1024.0;

pub const NO_DATA: &str = "no data";

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GB)
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}%")
}

pub fn format_rate(kbs: f64) -> String {
    format!("{kbs:.2} KB/s")
}

/// `ctime(3)` layout, e.g. `Thu Jan 15 09:04:05 2026`.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// The clear-and-print screen for one cycle.
pub fn render_report(report: &Report) -> String {
    PlainScreen(report).to_string()
}

/// Text layout of one report, one family per paragraph.
pub struct PlainScreen<'a>(pub &'a Report);

impl fmt::Display for PlainScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "--- System Resource Monitor ---")?;
        writeln!(f, "Timestamp: {}", format_timestamp(&report.taken_at))?;
        writeln!(f)?;

        match report.cpu_percent {
            Some(percent) => writeln!(f, "CPU Usage: {}", format_percent(percent))?,
            None => writeln!(f, "CPU Usage: {NO_DATA}")?,
        }
        writeln!(f)?;

        match &report.memory {
            Some(mem) => {
                writeln!(f, "Memory Usage: {}", format_percent(mem.percent_used()))?;
                write_breakdown(f, mem.total_bytes, mem.used_bytes, mem.free_bytes)?;
            }
            None => writeln!(f, "Memory Usage: {NO_DATA}")?,
        }
        writeln!(f)?;

        match &report.disk {
            Some(disk) => {
                writeln!(
                    f,
                    "Storage Space ({}): {}",
                    disk.path.display(),
                    format_percent(disk.percent_used())
                )?;
                write_breakdown(f, disk.total_bytes, disk.used_bytes, disk.free_bytes)?;
            }
            None => writeln!(f, "Storage Space: {NO_DATA}")?,
        }
        writeln!(f)?;

        match &report.network {
            Some(rates) => {
                writeln!(f, "Network Activity (Total):")?;
                writeln!(f, " - Download Speed: {}", format_rate(rates.download_kbs))?;
                writeln!(f, " - Upload Speed: {}", format_rate(rates.upload_kbs))?;
            }
            None => writeln!(f, "Network Activity (Total): {NO_DATA}")?,
        }
        writeln!(f)?;
        writeln!(f, "Press Ctrl+C to exit...")
    }
}

fn write_breakdown(f: &mut fmt::Formatter<'_>, total: u64, used: u64, free: u64) -> fmt::Result {
    writeln!(f, " - Total: {}", format_gb(total))?;
    writeln!(f, " - Used: {}", format_gb(used))?;
    writeln!(f, " - Free: {}", format_gb(free))
}
