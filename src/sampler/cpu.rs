/// Cumulative CPU time counters since boot, in kernel ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTicks {
    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .fold(0u64, |acc, &v| acc.saturating_add(v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CpuBaseline {
    total: u64,
    idle: u64,
}

/// Previous CPU sample totals. `None` until the first sample seeds it.
#[derive(Clone, Debug, Default)]
pub struct CpuRateState {
    prev: Option<CpuBaseline>,
}

impl CpuRateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_baselined(&self) -> bool {
        self.prev.is_some()
    }
}

/// Busy percentage since the previous sample, then store `sample` as the new
/// baseline.
///
/// Returns `0.0` when the state had no baseline yet, when no ticks elapsed, and
/// when a counter went backwards (reboot or wrap); in the last case the new
/// sample becomes the baseline.
pub fn cpu_usage_percent(sample: &CpuTicks, state: &mut CpuRateState) -> f64 {
    let current = CpuBaseline {
        total: sample.total(),
        idle: sample.idle,
    };

    let usage = match state.prev {
        Some(prev) => busy_percent(prev, current),
        None => 0.0,
    };

    state.prev = Some(current);
    usage
}

fn busy_percent(prev: CpuBaseline, current: CpuBaseline) -> f64 {
    if current.total < prev.total || current.idle < prev.idle {
        return 0.0;
    }

    let delta_total = current.total - prev.total;
    if delta_total == 0 {
        return 0.0;
    }
    let delta_idle = current.idle - prev.idle;

    ((1.0 - delta_idle as f64 / delta_total as f64) * 100.0).clamp(0.0, 100.0)
}
