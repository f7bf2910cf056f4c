//! Sequential sweep of a host range over one shared socket.

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use sweepr_common::cancel::CancelToken;
use sweepr_common::config::Config;
use sweepr_common::error::SocketError;
use sweepr_common::network::range::HostRange;
use tracing::{debug, info};

use crate::probe::{ProbeResult, Prober};
use crate::transport::{EchoTransport, IcmpTransport, SocketMode};

/// Per-probe progress hook, called after every address with its result.
pub type ProgressFn<'a> = &'a mut dyn FnMut(Ipv4Addr, ProbeResult);

/// Every address that answered, in the order probed (ascending).
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub up: Vec<Ipv4Addr>,
    pub probed: u64,
    pub elapsed: Duration,
}

impl ScanReport {
    /// A completed sweep with no responsive hosts. A normal outcome, not an
    /// error.
    pub fn no_hosts(&self) -> bool {
        self.up.is_empty()
    }
}

/// Probes every address in `range` in ascending order and reports the ones
/// that answered.
///
/// One socket backs the whole sweep; only acquiring it can fail. Per-address
/// send/receive failures and timeouts count the address as down and the
/// sweep moves on.
pub fn sweep(
    range: HostRange,
    cfg: &Config,
    cancel: &CancelToken,
    progress: Option<ProgressFn<'_>>,
) -> Result<ScanReport, SocketError> {
    let mode = SocketMode::detect();
    let transport = IcmpTransport::open(mode, cfg)?;
    debug!(
        "probing {} hosts through a {} ICMP socket",
        range.host_count(),
        mode.label()
    );

    let mut prober = Prober::new(transport, cfg.timeout);
    Ok(run(&mut prober, range, cancel, progress))
}

/// The sweep loop proper, generic over the transport so it can run against
/// a fake network in tests.
pub fn run<T: EchoTransport>(
    prober: &mut Prober<T>,
    range: HostRange,
    cancel: &CancelToken,
    mut progress: Option<ProgressFn<'_>>,
) -> ScanReport {
    let started = Instant::now();
    let mut report = ScanReport::default();

    for addr in range.iter() {
        if cancel.is_cancelled() {
            info!("sweep interrupted after {} probes", report.probed);
            break;
        }

        let result = prober.probe(addr);
        report.probed += 1;
        if result == ProbeResult::Up {
            report.up.push(addr);
        }
        if let Some(on_probe) = progress.as_mut() {
            on_probe(addr, result);
        }
    }

    report.elapsed = started.elapsed();
    report
}
