//! Parsers for the fixed-format text files under `/proc`.
//!
//! Pure functions over file contents; reading is left to the platform layer.

use std::path::Path;

use crate::sampler::{CpuTicks, NetTotals};
use crate::system::error::SampleError;

const NET_DEV_HEADER_LINES: usize = 2;
const NET_DEV_TX_BYTES_COLUMN: usize = 8;

/// Aggregate CPU counters from the first line of `/proc/stat`.
///
/// Kernels older than 2.6.11 omit `steal` (and older still `iowait`/`irq`/`softirq`),
/// so anything past `idle` is optional and reads as zero.
pub fn parse_proc_stat(path: &Path, contents: &str) -> Result<CpuTicks, SampleError> {
    let line = contents
        .lines()
        .next()
        .ok_or_else(|| SampleError::parse(path, "file is empty"))?;

    let mut fields = line.split_whitespace();
    if fields.next() != Some("cpu") {
        return Err(SampleError::parse(path, "first line is not the aggregate cpu line"));
    }

    let mut values = [0u64; 8];
    let mut seen = 0;
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field
            .parse()
            .map_err(|_| SampleError::parse(path, format!("invalid tick counter `{field}`")))?;
        seen += 1;
    }
    if seen < 4 {
        return Err(SampleError::parse(
            path,
            format!("expected at least 4 tick counters, found {seen}"),
        ));
    }

    let [user, nice, system, idle, iowait, irq, softirq, steal] = values;
    Ok(CpuTicks {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        steal,
    })
}

/// Interfaces whose name contains `pattern` are treated as loopback. An empty
/// pattern excludes nothing.
pub fn is_loopback(name: &str, pattern: &str) -> bool {
    !pattern.is_empty() && name.contains(pattern)
}

/// Received/transmitted byte totals from `/proc/net/dev`, summed over every
/// interface that is not loopback.
pub fn parse_net_dev(
    path: &Path,
    contents: &str,
    loopback_pattern: &str,
) -> Result<NetTotals, SampleError> {
    let mut totals = NetTotals::default();

    for line in contents.lines().skip(NET_DEV_HEADER_LINES) {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if is_loopback(name, loopback_pattern) {
            continue;
        }

        let fields: Vec<&str> = counters.split_whitespace().collect();
        let (Some(rx), Some(tx)) = (fields.first(), fields.get(NET_DEV_TX_BYTES_COLUMN)) else {
            return Err(SampleError::parse(
                path,
                format!("interface `{name}` has too few columns"),
            ));
        };
        let received: u64 = rx
            .parse()
            .map_err(|_| SampleError::parse(path, format!("invalid rx bytes for `{name}`")))?;
        let sent: u64 = tx
            .parse()
            .map_err(|_| SampleError::parse(path, format!("invalid tx bytes for `{name}`")))?;

        totals.received = totals.received.saturating_add(received);
        totals.sent = totals.sent.saturating_add(sent);
    }

    Ok(totals)
}
