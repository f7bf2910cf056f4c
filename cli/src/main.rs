mod commands;
mod terminal;

use anyhow::Context;
use clap::Parser;
use commands::CommandLine;
use signal_hook::consts::{SIGINT, SIGTERM};
use sweepr_common::cancel::CancelToken;
use sweepr_common::{success, warn};
use sweepr_core::scanner;
use terminal::{logging, print, progress};

fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse();

    logging::init();

    let target = args.target()?;
    let cfg = args.config();
    let range = target.host_range();

    if !args.quiet {
        print::header("subnet sweep");
        print::target_summary(&target, &range);
        success!("{} usable addresses derived from the given network", range.host_count());
    }

    if !target.mask.is_contiguous() {
        warn!(
            "netmask {} is not a contiguous bit pattern, the derived range is unlikely to be meaningful",
            target.mask
        );
    }

    let cancel = CancelToken::new();
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, cancel.flag())
            .context("installing the interrupt handler")?;
    }

    let bar = progress::sweep_bar(range.host_count(), args.quiet);
    let mut on_probe = |addr, result| progress::update(&bar, addr, result);
    let report = scanner::sweep(range, &cfg, &cancel, Some(&mut on_probe))?;
    bar.finish_and_clear();

    if cancel.is_cancelled() {
        warn!("interrupted, the report below is partial");
    }

    print::report(&report, args.quiet);
    Ok(())
}
