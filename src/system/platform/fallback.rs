use std::path::Path;

use sysinfo::Networks;

use super::PlatformCounters;
use crate::sampler::{CpuTicks, NetTotals};
use crate::system::error::SampleError;
use crate::system::procfs::is_loopback;

pub struct Platform;

impl PlatformCounters for Platform {
    fn cpu_ticks(_proc_root: &Path) -> Result<CpuTicks, SampleError> {
        Err(SampleError::Unsupported("CPU tick"))
    }

    fn net_totals(_proc_root: &Path, loopback_pattern: &str) -> Result<NetTotals, SampleError> {
        let networks = Networks::new_with_refreshed_list();
        let mut totals = NetTotals::default();
        for (name, data) in &networks {
            if is_loopback(name, loopback_pattern) {
                continue;
            }
            totals.received = totals.received.saturating_add(data.total_received());
            totals.sent = totals.sent.saturating_add(data.total_transmitted());
        }
        Ok(totals)
    }
}
