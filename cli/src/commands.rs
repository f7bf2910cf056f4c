use std::time::Duration;

use clap::Parser;
use sweepr_common::config::{Config, DEFAULT_TIMEOUT, DEFAULT_TTL};
use sweepr_common::error::FormatError;
use sweepr_common::network::target::ScanTarget;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(version, about = "Discover live hosts on an IPv4 subnet.")]
pub struct CommandLine {
    /// Network to sweep in CIDR form (`192.168.1.0/24`), or an address to
    /// pair with NETMASK
    pub spec: String,

    /// Dotted-decimal netmask for the two-argument form
    /// (`192.168.1.0 255.255.255.0`)
    pub netmask: Option<String>,

    /// Per-probe reply timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    pub timeout: u64,

    /// Time-to-live on outgoing echo requests
    #[arg(long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,

    /// Print only the responsive addresses, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    /// Resolves the two accepted input forms into one validated target.
    pub fn target(&self) -> Result<ScanTarget, FormatError> {
        match &self.netmask {
            Some(mask) => ScanTarget::from_parts(&self.spec, mask),
            None => self.spec.parse(),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            timeout: Duration::from_millis(self.timeout),
            ttl: self.ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cidr_spec_needs_no_netmask_argument() {
        let args = CommandLine::parse_from(["sweepr", "192.168.1.0/24"]);
        let target = args.target().unwrap();
        assert_eq!(target.mask.prefix_len(), 24);
    }

    #[test]
    fn netmask_argument_selects_the_two_part_form() {
        let args = CommandLine::parse_from(["sweepr", "192.168.1.0", "255.255.255.0"]);
        let target = args.target().unwrap();
        assert_eq!(target.mask.prefix_len(), 24);
    }

    #[test]
    fn flags_reach_the_config() {
        let args =
            CommandLine::parse_from(["sweepr", "10.0.0.0/30", "--timeout", "100", "--ttl", "32"]);
        let cfg = args.config();
        assert_eq!(cfg.timeout, Duration::from_millis(100));
        assert_eq!(cfg.ttl, 32);
    }
}
