const BYTES_PER_KB: f64 = 1024.0;

/// Received/sent byte totals summed over every non-loopback interface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetTotals {
    pub received: u64,
    pub sent: u64,
}

/// Throughput in KB/s averaged over one sampling interval.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetRates {
    pub download_kbs: f64,
    pub upload_kbs: f64,
}

#[derive(Clone, Debug, Default)]
pub struct NetRateState {
    prev: Option<NetTotals>,
}

impl NetRateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_baselined(&self) -> bool {
        self.prev.is_some()
    }
}

/// Average throughput since the previous sample over `interval_secs`, then
/// store `sample` as the new baseline.
///
/// The first call only seeds the state and yields zero rates. A direction whose
/// counter went backwards is clamped to zero, and a non-positive or non-finite
/// interval yields zero for both directions.
pub fn network_rates(sample: &NetTotals, state: &mut NetRateState, interval_secs: f64) -> NetRates {
    let rates = match state.prev {
        Some(prev) if interval_secs.is_finite() && interval_secs > 0.0 => NetRates {
            download_kbs: per_second_kb(prev.received, sample.received, interval_secs),
            upload_kbs: per_second_kb(prev.sent, sample.sent, interval_secs),
        },
        _ => NetRates::default(),
    };

    state.prev = Some(*sample);
    rates
}

fn per_second_kb(prev: u64, current: u64, interval_secs: f64) -> f64 {
    current.saturating_sub(prev) as f64 / (BYTES_PER_KB * interval_secs)
}
