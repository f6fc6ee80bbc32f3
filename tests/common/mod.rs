use std::collections::VecDeque;
use std::path::PathBuf;

use sysmon::sampler::{CpuTicks, NetTotals};
use sysmon::system::error::SampleError;
use sysmon::system::snapshot::{DiskUsage, MemoryUsage};
use sysmon::system::source::CounterSource;

pub const GB: u64 = 1024 * 1024 * 1024;

/// Replays queued samples in order; an exhausted queue or a `None` entry is a
/// read failure.
#[derive(Default)]
pub struct ScriptedSource {
    pub cpu: VecDeque<Option<CpuTicks>>,
    pub net: VecDeque<Option<NetTotals>>,
    pub memory: Option<MemoryUsage>,
    pub disk: Option<DiskUsage>,
}

impl ScriptedSource {
    pub fn healthy() -> Self {
        ScriptedSource {
            memory: Some(MemoryUsage::from_totals(16 * GB, 8 * GB, 2 * GB)),
            disk: Some(DiskUsage::from_space(PathBuf::from("/"), 100 * GB, 75 * GB)),
            ..ScriptedSource::default()
        }
    }

    pub fn push_cpu(mut self, ticks: Option<CpuTicks>) -> Self {
        self.cpu.push_back(ticks);
        self
    }

    pub fn push_net(mut self, totals: Option<NetTotals>) -> Self {
        self.net.push_back(totals);
        self
    }
}

impl CounterSource for ScriptedSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks, SampleError> {
        self.cpu
            .pop_front()
            .flatten()
            .ok_or_else(|| SampleError::parse("/proc/stat", "no scripted sample"))
    }

    fn net_totals(&mut self) -> Result<NetTotals, SampleError> {
        self.net
            .pop_front()
            .flatten()
            .ok_or_else(|| SampleError::parse("/proc/net/dev", "no scripted sample"))
    }

    fn memory(&mut self) -> Result<MemoryUsage, SampleError> {
        self.memory.clone().ok_or(SampleError::Unsupported("memory"))
    }

    fn disk(&mut self) -> Result<DiskUsage, SampleError> {
        self.disk.clone().ok_or(SampleError::NoDisk {
            path: PathBuf::from("/"),
        })
    }
}

pub fn cpu(user: u64, nice: u64, system: u64, idle: u64) -> Option<CpuTicks> {
    Some(CpuTicks {
        user,
        nice,
        system,
        idle,
        ..CpuTicks::default()
    })
}

pub fn net(received: u64, sent: u64) -> Option<NetTotals> {
    Some(NetTotals { received, sent })
}

/// Counters that grow with tokio's clock: 1 KiB received per elapsed second,
/// CPU half busy. Meant for paused-clock tests.
pub struct ClockedSource {
    started: tokio::time::Instant,
}

impl ClockedSource {
    pub fn new() -> Self {
        ClockedSource {
            started: tokio::time::Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl CounterSource for ClockedSource {
    fn cpu_ticks(&mut self) -> Result<CpuTicks, SampleError> {
        let ms = self.elapsed_ms();
        Ok(CpuTicks {
            user: ms,
            idle: ms,
            ..CpuTicks::default()
        })
    }

    fn net_totals(&mut self) -> Result<NetTotals, SampleError> {
        Ok(NetTotals {
            received: self.elapsed_ms() * 1024 / 1000,
            sent: 0,
        })
    }

    fn memory(&mut self) -> Result<MemoryUsage, SampleError> {
        Ok(MemoryUsage::from_totals(16 * GB, 8 * GB, 2 * GB))
    }

    fn disk(&mut self) -> Result<DiskUsage, SampleError> {
        Ok(DiskUsage::from_space(PathBuf::from("/"), 100 * GB, 75 * GB))
    }
}
