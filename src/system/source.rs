use std::path::{Path, PathBuf};

use sysinfo::{Disks, System};

use super::error::SampleError;
use super::platform;
use super::snapshot::{DiskUsage, MemoryUsage};
use crate::sampler::{CpuTicks, NetTotals};

/// Anything that can produce one raw sample per counter family.
///
/// Each call is independent: implementations must not hold OS handles across
/// calls, so a failed read can simply be retried on the next tick.
pub trait CounterSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks, SampleError>;
    fn net_totals(&mut self) -> Result<NetTotals, SampleError>;
    fn memory(&mut self) -> Result<MemoryUsage, SampleError>;
    fn disk(&mut self) -> Result<DiskUsage, SampleError>;
}

/// Counters of the machine we are running on.
pub struct HostSource {
    sys: System,
    proc_root: PathBuf,
    disk_path: PathBuf,
    loopback_pattern: String,
}

impl HostSource {
    pub fn new(
        proc_root: impl Into<PathBuf>,
        disk_path: impl Into<PathBuf>,
        loopback_pattern: impl Into<String>,
    ) -> Self {
        HostSource {
            sys: System::new(),
            proc_root: proc_root.into(),
            disk_path: disk_path.into(),
            loopback_pattern: loopback_pattern.into(),
        }
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }
}

impl CounterSource for HostSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks, SampleError> {
        platform::cpu_ticks(&self.proc_root)
    }

    fn net_totals(&mut self) -> Result<NetTotals, SampleError> {
        platform::net_totals(&self.proc_root, &self.loopback_pattern)
    }

    fn memory(&mut self) -> Result<MemoryUsage, SampleError> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(SampleError::Unsupported("memory"));
        }
        Ok(MemoryUsage::from_totals(
            total,
            self.sys.available_memory(),
            self.sys.free_memory(),
        ))
    }

    fn disk(&mut self) -> Result<DiskUsage, SampleError> {
        let disks = Disks::new_with_refreshed_list();
        let mounts: Vec<&Path> = disks.list().iter().map(|d| d.mount_point()).collect();
        let resolved = resolve_disk_path(&self.disk_path)?;
        let index = select_mount(&resolved, &mounts).ok_or_else(|| SampleError::NoDisk {
            path: self.disk_path.clone(),
        })?;
        let disk = &disks.list()[index];
        Ok(DiskUsage::from_space(
            self.disk_path.clone(),
            disk.total_space(),
            disk.available_space(),
        ))
    }
}

/// Absolute, symlink-free form of `path`, so relative paths and links into
/// other filesystems land on the mount that actually holds the data.
pub fn resolve_disk_path(path: &Path) -> Result<PathBuf, SampleError> {
    std::fs::canonicalize(path).map_err(|source| SampleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Index of the mount point that holds `path`: the longest one that is a
/// component-wise prefix of it.
pub fn select_mount(path: &Path, mount_points: &[&Path]) -> Option<usize> {
    mount_points
        .iter()
        .enumerate()
        .filter(|(_, mount)| path.starts_with(mount))
        .max_by_key(|(_, mount)| mount.components().count())
        .map(|(i, _)| i)
}
