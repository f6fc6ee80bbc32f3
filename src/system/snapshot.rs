use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::sampler::NetRates;

/// Values presented for one refresh cycle. A `None` family failed to sample
/// this cycle (or has no baseline yet) and is shown as "no data".
#[derive(Clone, Debug)]
pub struct Report {
    pub taken_at: DateTime<Local>,
    pub cpu_percent: Option<f64>,
    pub memory: Option<MemoryUsage>,
    pub disk: Option<DiskUsage>,
    pub network: Option<NetRates>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl MemoryUsage {
    /// Used memory is whatever is not available for new allocations. Hosts
    /// that cannot estimate available memory report 0, and free memory is
    /// used instead.
    pub fn from_totals(total_bytes: u64, available_bytes: u64, free_bytes: u64) -> Self {
        let free = if available_bytes > 0 {
            available_bytes
        } else {
            free_bytes
        };
        MemoryUsage {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(free),
            free_bytes: free.min(total_bytes),
        }
    }

    pub fn percent_used(&self) -> f64 {
        percent_of(self.used_bytes, self.total_bytes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskUsage {
    pub path: PathBuf,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl DiskUsage {
    pub fn from_space(path: PathBuf, total_bytes: u64, available_bytes: u64) -> Self {
        DiskUsage {
            path,
            total_bytes,
            used_bytes: total_bytes.saturating_sub(available_bytes),
            free_bytes: available_bytes.min(total_bytes),
        }
    }

    pub fn percent_used(&self) -> f64 {
        percent_of(self.used_bytes, self.total_bytes)
    }
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn memory_prefers_available_over_free() {
        let mem = MemoryUsage::from_totals(16 * GB, 12 * GB, 2 * GB);
        assert_eq!(mem.used_bytes, 4 * GB);
        assert_eq!(mem.free_bytes, 12 * GB);
        assert!((mem.percent_used() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn memory_falls_back_to_free() {
        let mem = MemoryUsage::from_totals(8 * GB, 0, 2 * GB);
        assert_eq!(mem.used_bytes, 6 * GB);
        assert!((mem.percent_used() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn zero_totals_do_not_divide() {
        let mem = MemoryUsage::from_totals(0, 0, 0);
        assert_eq!(mem.percent_used(), 0.0);

        let disk = DiskUsage::from_space(PathBuf::from("/"), 0, 0);
        assert_eq!(disk.percent_used(), 0.0);
    }

    #[test]
    fn disk_used_is_total_minus_available() {
        let disk = DiskUsage::from_space(PathBuf::from("/"), 100 * GB, 40 * GB);
        assert_eq!(disk.used_bytes, 60 * GB);
        assert_eq!(disk.free_bytes, 40 * GB);
        assert!((disk.percent_used() - 60.0).abs() < 1e-9);
    }
}
