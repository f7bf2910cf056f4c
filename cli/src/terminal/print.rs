use std::fmt::Display;

use colored::*;
use sweepr_common::network::range::HostRange;
use sweepr_common::network::target::ScanTarget;
use sweepr_core::scanner::ScanReport;

pub const TOTAL_WIDTH: usize = 64;

const KEY_WIDTH: usize = 10;

pub fn header(msg: &str) {
    let formatted = format!("⟦ {} ⟧", msg);
    let msg_len = formatted.chars().count();

    let dash_count = TOTAL_WIDTH.saturating_sub(msg_len);
    let left = dash_count / 2;
    let right = dash_count - left;

    let line = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{line}");
}

pub fn fat_separator() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

pub fn aligned_line<V: Display>(key: &str, value: V) {
    let dots = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    println!(
        "{} {}{}{} {}",
        ">".bright_black(),
        key.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        value
    );
}

/// The entered address and netmask plus the derived sweep boundaries, shown
/// before the first probe goes out.
pub fn target_summary(target: &ScanTarget, range: &HostRange) {
    aligned_line("Address", target.addr);
    aligned_line(
        "Netmask",
        format!("{} (/{})", target.mask, target.mask.prefix_len()),
    );
    aligned_line("First host", range.first());
    aligned_line("Last host", range.last());
    aligned_line("Hosts", range.host_count());
}

pub fn report(report: &ScanReport, quiet: bool) {
    if quiet {
        for addr in &report.up {
            println!("{addr}");
        }
        return;
    }

    if report.no_hosts() {
        no_results();
        return;
    }

    header("live hosts");
    for addr in &report.up {
        println!("  {}", format!("{addr} is up").green().bold());
    }
    fat_separator();
    summary(report);
}

fn no_results() {
    println!("{}", "No up host!".red().bold());
}

fn summary(report: &ScanReport) {
    let hosts = format!("{} live hosts", report.up.len()).bold().green();
    let probed = format!("{} probed", report.probed);
    let took = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();
    centerln(&format!("Sweep complete: {hosts} of {probed} in {took}"));
}

fn centerln(msg: &str) {
    let width = console::measure_text_width(msg);
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    println!("{space}{msg}");
}
