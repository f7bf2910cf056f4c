//! Parsing of the two accepted sweep inputs.
//!
//! Supported forms:
//! * **CIDR**: `192.168.1.0/24`.
//! * **Address + netmask**: `192.168.1.0` and `255.255.255.0` as separate
//!   arguments.

use std::net::Ipv4Addr;
use std::str::FromStr;

use super::netmask::Netmask;
use super::range::HostRange;
use crate::error::FormatError;

/// A validated (address, netmask) pair, ready for range derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTarget {
    pub addr: Ipv4Addr,
    pub mask: Netmask,
}

impl ScanTarget {
    /// The two-argument input form: a dotted address plus a dotted netmask.
    pub fn from_parts(addr: &str, mask: &str) -> Result<Self, FormatError> {
        let addr = parse_addr(addr)?;
        let mask: Netmask = mask.parse()?;
        Ok(Self { addr, mask })
    }

    pub fn host_range(&self) -> HostRange {
        HostRange::compute(self.addr, self.mask)
    }
}

impl FromStr for ScanTarget {
    type Err = FormatError;

    /// The CIDR input form, `A.B.C.D/N` with N in 0..=32.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((addr_part, prefix_part)) = s.split_once('/') else {
            return Err(FormatError::SlashCount(s.to_string()));
        };
        if prefix_part.contains('/') {
            return Err(FormatError::SlashCount(s.to_string()));
        }

        let addr = parse_addr(addr_part)?;
        let prefix: u8 = prefix_part
            .parse()
            .map_err(|_| FormatError::PrefixOutOfRange(prefix_part.to_string()))?;
        let mask = Netmask::from_prefix(prefix)?;

        Ok(Self { addr, mask })
    }
}

fn parse_addr(s: &str) -> Result<Ipv4Addr, FormatError> {
    s.parse().map_err(|_| FormatError::Address(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cidr_form_is_parsed() {
        let target: ScanTarget = "192.168.1.0/24".parse().unwrap();
        assert_eq!(target.addr, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(target.mask.to_string(), "255.255.255.0");
    }

    #[test]
    fn two_argument_form_is_parsed() {
        let target = ScanTarget::from_parts("10.0.0.8", "255.255.255.248").unwrap();
        assert_eq!(target.addr, Ipv4Addr::new(10, 0, 0, 8));
        assert_eq!(target.mask.prefix_len(), 29);
    }

    #[test]
    fn both_forms_agree() {
        let cidr: ScanTarget = "172.16.0.0/12".parse().unwrap();
        let parts = ScanTarget::from_parts("172.16.0.0", "255.240.0.0").unwrap();
        assert_eq!(cidr, parts);
    }

    #[test]
    fn missing_or_repeated_slash_is_rejected() {
        assert!(matches!(
            "192.168.1.0".parse::<ScanTarget>(),
            Err(FormatError::SlashCount(_))
        ));
        assert!(matches!(
            "192.168.1.0/24/8".parse::<ScanTarget>(),
            Err(FormatError::SlashCount(_))
        ));
    }

    #[test]
    fn malformed_address_is_rejected() {
        assert!(matches!(
            "192.168.1/24".parse::<ScanTarget>(),
            Err(FormatError::Address(_))
        ));
        assert!(matches!(
            ScanTarget::from_parts("10.0.0.256", "255.0.0.0"),
            Err(FormatError::Address(_))
        ));
    }

    #[test]
    fn out_of_range_prefix_is_rejected() {
        assert!(matches!(
            "10.0.0.0/33".parse::<ScanTarget>(),
            Err(FormatError::PrefixOutOfRange(_))
        ));
        assert!(matches!(
            "10.0.0.0/abc".parse::<ScanTarget>(),
            Err(FormatError::PrefixOutOfRange(_))
        ));
    }

    #[test]
    fn malformed_netmask_is_rejected() {
        assert!(matches!(
            ScanTarget::from_parts("10.0.0.0", "255.255.0"),
            Err(FormatError::Netmask(_))
        ));
    }

    #[test]
    fn target_derives_its_range() {
        let target: ScanTarget = "10.0.0.0/30".parse().unwrap();
        let range = target.host_range();
        assert_eq!(range.first(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(range.last(), Ipv4Addr::new(10, 0, 0, 2));
    }
}
