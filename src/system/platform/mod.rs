use std::path::Path;

use crate::sampler::{CpuTicks, NetTotals};
use crate::system::error::SampleError;

pub trait PlatformCounters {
    fn cpu_ticks(proc_root: &Path) -> Result<CpuTicks, SampleError>;
    fn net_totals(proc_root: &Path, loopback_pattern: &str) -> Result<NetTotals, SampleError>;
}

#[cfg(not(target_os = "linux"))]
mod fallback;
#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(target_os = "linux"))]
use fallback as platform_impl;
#[cfg(target_os = "linux")]
use linux as platform_impl;

pub fn cpu_ticks(proc_root: &Path) -> Result<CpuTicks, SampleError> {
    platform_impl::Platform::cpu_ticks(proc_root)
}

pub fn net_totals(proc_root: &Path, loopback_pattern: &str) -> Result<NetTotals, SampleError> {
    platform_impl::Platform::net_totals(proc_root, loopback_pattern)
}
