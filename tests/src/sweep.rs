//! End-to-end sweeps against the loopback interface.
//!
//! Creating an ICMP socket needs either root (raw) or a permissive
//! `net.ipv4.ping_group_range` (datagram). Environments without either get
//! a skip message instead of a failure.

use std::net::Ipv4Addr;

use sweepr_common::cancel::CancelToken;
use sweepr_common::config::Config;
use sweepr_common::error::SocketError;
use sweepr_common::network::target::ScanTarget;
use sweepr_core::scanner::{self, ScanReport};

fn sweep_target(spec: &str, cancel: &CancelToken) -> Result<ScanReport, SocketError> {
    let target: ScanTarget = spec.parse().expect("valid network spec");
    scanner::sweep(target.host_range(), &Config::default(), cancel, None)
}

fn skip(err: &SocketError) {
    eprintln!("Skipping loopback sweep: cannot open an ICMP socket ({err})");
}

/// Sweeping 127.0.0.1/32 probes exactly one address, and loopback always
/// answers locally.
#[test]
fn loopback_single_host_is_up() {
    let report = match sweep_target("127.0.0.1/32", &CancelToken::new()) {
        Ok(report) => report,
        Err(err) => return skip(&err),
    };

    assert_eq!(report.probed, 1);
    assert_eq!(report.up, vec![Ipv4Addr::LOCALHOST]);
}

/// A /29 on loopback probes 127.0.0.1 through 127.0.0.6; whatever subset
/// answers must come back in ascending probe order.
#[test]
fn loopback_range_reports_in_ascending_order() {
    let report = match sweep_target("127.0.0.0/29", &CancelToken::new()) {
        Ok(report) => report,
        Err(err) => return skip(&err),
    };

    assert_eq!(report.probed, 6);
    assert!(report.up.contains(&Ipv4Addr::LOCALHOST));
    assert!(report.up.windows(2).all(|pair| pair[0] < pair[1]));
}

/// A token cancelled before the sweep starts must stop it before the first
/// probe; the empty report is still a successful completion.
#[test]
fn cancelled_token_stops_before_the_first_probe() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let report = match sweep_target("127.0.0.0/30", &cancel) {
        Ok(report) => report,
        Err(err) => return skip(&err),
    };

    assert_eq!(report.probed, 0);
    assert!(report.no_hosts());
}
