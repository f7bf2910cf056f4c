use std::net::Ipv4Addr;

use indicatif::{ProgressBar, ProgressStyle};
use sweepr_core::probe::ProbeResult;

/// Progress over the sweep; hidden in quiet mode.
pub fn sweep_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:32.green} {pos}/{len} {msg}").unwrap(),
    );
    bar
}

pub fn update(bar: &ProgressBar, addr: Ipv4Addr, result: ProbeResult) {
    bar.inc(1);
    if result == ProbeResult::Up {
        bar.set_message(format!("{addr} is up"));
    }
}
