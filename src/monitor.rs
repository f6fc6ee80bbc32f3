use std::io::Write;
use std::time::{Duration, Instant};

use chrono::Local;
use color_eyre::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::format::render_report;
use crate::sampler::{CpuRateState, NetRateState, NetRates, cpu_usage_percent, network_rates};
use crate::system::error::SampleError;
use crate::system::snapshot::Report;
use crate::system::source::CounterSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// At least one rate family has no baseline yet; ticks only seed.
    Uninitialized,
    /// Every tick produces a report.
    Steady,
}

/// Owns the rate states and drives one sampling pass per tick.
///
/// Time is passed in rather than read. Callers pass the instant the sampling
/// pass starts, not a scheduled deadline, since network rates divide by it.
pub struct Monitor {
    source: Box<dyn CounterSource>,
    cpu: CpuRateState,
    net: NetRateState,
    last_net_at: Option<Instant>,
    cpu_unsupported: bool,
    net_unsupported: bool,
    phase: Phase,
}

impl Monitor {
    pub fn new(source: Box<dyn CounterSource>) -> Self {
        Monitor {
            source,
            cpu: CpuRateState::new(),
            net: NetRateState::new(),
            last_net_at: None,
            cpu_unsupported: false,
            net_unsupported: false,
            phase: Phase::Uninitialized,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn on_tick(&mut self, now: Instant) -> Option<Report> {
        match self.phase {
            Phase::Uninitialized => {
                self.prime(now);
                None
            }
            Phase::Steady => Some(self.sample(now)),
        }
    }

    fn prime(&mut self, now: Instant) {
        let _span = tracing::debug_span!("monitor.prime").entered();

        self.sample_cpu();
        self.sample_network(now);

        // A family the host cannot provide at all does not hold up reporting.
        let cpu_ready = self.cpu.is_baselined() || self.cpu_unsupported;
        let net_ready = self.net.is_baselined() || self.net_unsupported;
        if cpu_ready && net_ready {
            self.phase = Phase::Steady;
            info!("rate baselines seeded");
        }
    }

    fn sample(&mut self, now: Instant) -> Report {
        let _span = tracing::debug_span!("monitor.sample").entered();

        let cpu_percent = self.sample_cpu();
        let memory = ok_or_warn("memory", self.source.memory());
        let disk = ok_or_warn("disk", self.source.disk());
        let network = self.sample_network(now);

        debug!(
            cpu = ?cpu_percent,
            memory_used = ?memory.as_ref().map(|m| m.used_bytes),
            disk_used = ?disk.as_ref().map(|d| d.used_bytes),
            download_kbs = ?network.map(|n| n.download_kbs),
            upload_kbs = ?network.map(|n| n.upload_kbs),
            "sampled"
        );

        Report {
            taken_at: Local::now(),
            cpu_percent,
            memory,
            disk,
            network,
        }
    }

    // Only a rate computed against a real baseline is reported.
    fn sample_cpu(&mut self) -> Option<f64> {
        let result = self.source.cpu_ticks();
        self.cpu_unsupported = matches!(result, Err(SampleError::Unsupported(_)));
        let ticks = ok_or_warn("cpu", result)?;
        let baselined = self.cpu.is_baselined();
        let usage = cpu_usage_percent(&ticks, &mut self.cpu);
        baselined.then_some(usage)
    }

    fn sample_network(&mut self, now: Instant) -> Option<NetRates> {
        let result = self.source.net_totals();
        self.net_unsupported = matches!(result, Err(SampleError::Unsupported(_)));
        let totals = ok_or_warn("network", result)?;
        let baselined = self.net.is_baselined();
        let interval_secs = self
            .last_net_at
            .map(|prev| now.saturating_duration_since(prev).as_secs_f64())
            .unwrap_or(0.0);
        let rates = network_rates(&totals, &mut self.net, interval_secs);
        self.last_net_at = Some(now);
        baselined.then_some(rates)
    }
}

fn ok_or_warn<T>(family: &'static str, result: Result<T, SampleError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(family, %error, "sample failed");
            None
        }
    }
}

/// Fixed-period cadence for the sampling loops.
///
/// A late tick is not made up for: the next deadline moves to one period after
/// the late one fired.
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Ticker { interval }
    }

    /// Waits for the next deadline and returns the current time, which is
    /// later than the deadline whenever the caller was busy past it.
    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await;
        tokio::time::Instant::now().into_std()
    }
}

/// Clear-and-print loop: one report per `period` after the priming tick.
///
/// Runs until `max_reports` reports were written, or forever when it is `None`.
pub async fn run_plain<W: Write>(
    monitor: &mut Monitor,
    period: Duration,
    max_reports: Option<usize>,
    out: &mut W,
) -> Result<usize> {
    let mut ticker = Ticker::new(period);

    let mut written = 0;
    loop {
        if max_reports.is_some_and(|max| written >= max) {
            return Ok(written);
        }

        let now = ticker.tick().await;
        if let Some(report) = monitor.on_tick(now) {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            out.write_all(render_report(&report).as_bytes())?;
            out.flush()?;
            written += 1;
        }
    }
}
