use std::path::Path;

use super::PlatformCounters;
use crate::sampler::{CpuTicks, NetTotals};
use crate::system::error::SampleError;
use crate::system::procfs::{parse_net_dev, parse_proc_stat};

pub struct Platform;

impl PlatformCounters for Platform {
    fn cpu_ticks(proc_root: &Path) -> Result<CpuTicks, SampleError> {
        let path = proc_root.join("stat");
        let contents = read(&path)?;
        parse_proc_stat(&path, &contents)
    }

    fn net_totals(proc_root: &Path, loopback_pattern: &str) -> Result<NetTotals, SampleError> {
        let path = proc_root.join("net").join("dev");
        let contents = read(&path)?;
        parse_net_dev(&path, &contents, loopback_pattern)
    }
}

// Whole-file read: the handle is closed before parsing starts.
fn read(path: &Path) -> Result<String, SampleError> {
    std::fs::read_to_string(path).map_err(|source| SampleError::Io {
        path: path.to_path_buf(),
        source,
    })
}
