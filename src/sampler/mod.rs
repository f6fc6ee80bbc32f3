//! Delta-based rate computation over monotonic kernel counters.
//!
//! Everything in here is pure arithmetic: callers read raw counters from
//! whatever source they like and keep one rate state per counter family.

pub mod cpu;
pub mod network;

pub use cpu::{CpuRateState, CpuTicks, cpu_usage_percent};
pub use network::{NetRateState, NetRates, NetTotals, network_rates};
