//! Conversion between CIDR prefix lengths and dotted-decimal netmasks.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::FormatError;

/// An IPv4 netmask.
///
/// Built from a prefix length the mask is always a contiguous run of 1-bits.
/// Parsed from dotted-decimal form any octet pattern is accepted:
/// contiguity is not validated at use time, and a non-contiguous mask yields
/// a meaningless range (the bitwise range arithmetic tolerates it). Callers
/// that care can ask via [`Netmask::is_contiguous`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Netmask(u32);

impl Netmask {
    /// Mask with the first `prefix` bits set and the rest cleared.
    pub fn from_prefix(prefix: u8) -> Result<Self, FormatError> {
        if prefix > 32 {
            return Err(FormatError::PrefixOutOfRange(prefix.to_string()));
        }
        // Shifting a u32 by 32 is not defined, so /0 gets its own arm.
        let bits = match prefix {
            0 => 0,
            n => u32::MAX << (32 - u32::from(n)),
        };
        Ok(Self(bits))
    }

    /// The raw 32-bit mask.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Number of leading 1-bits.
    pub fn prefix_len(self) -> u8 {
        self.0.leading_ones() as u8
    }

    /// Bits left for host addressing. Only meaningful for contiguous masks.
    pub fn host_bits(self) -> u8 {
        32 - self.prefix_len()
    }

    /// Whether the mask is a single run of 1-bits followed by 0-bits.
    pub fn is_contiguous(self) -> bool {
        Self::from_prefix(self.prefix_len()) == Ok(self)
    }
}

impl FromStr for Netmask {
    type Err = FormatError;

    /// Dotted-decimal form, e.g. `255.255.255.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr: Ipv4Addr = s.parse().map_err(|_| FormatError::Netmask(s.to_string()))?;
        Ok(Self(addr.into()))
    }
}

impl fmt::Display for Netmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ipv4Addr::from(self.0).fmt(f)
    }
}

impl From<Netmask> for Ipv4Addr {
    fn from(mask: Netmask) -> Self {
        Ipv4Addr::from(mask.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_to_dotted_form() {
        assert_eq!(Netmask::from_prefix(24).unwrap().to_string(), "255.255.255.0");
        assert_eq!(Netmask::from_prefix(30).unwrap().to_string(), "255.255.255.252");
        assert_eq!(Netmask::from_prefix(0).unwrap().to_string(), "0.0.0.0");
        assert_eq!(
            Netmask::from_prefix(32).unwrap().to_string(),
            "255.255.255.255"
        );
    }

    #[test]
    fn prefix_out_of_range_is_rejected() {
        assert_eq!(
            Netmask::from_prefix(33),
            Err(FormatError::PrefixOutOfRange("33".to_string()))
        );
    }

    #[test]
    fn round_trip_through_dotted_form() {
        for prefix in 0..=32 {
            let mask = Netmask::from_prefix(prefix).unwrap();
            let reparsed: Netmask = mask.to_string().parse().unwrap();
            assert_eq!(reparsed, mask);
            assert_eq!(reparsed.prefix_len(), prefix);
        }
    }

    #[test]
    fn non_contiguous_mask_is_accepted_but_flagged() {
        let mask: Netmask = "255.0.255.0".parse().unwrap();
        assert!(!mask.is_contiguous());

        let mask: Netmask = "255.255.255.0".parse().unwrap();
        assert!(mask.is_contiguous());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!("255.255.255".parse::<Netmask>().is_err());
        assert!("255.255.255.256".parse::<Netmask>().is_err());
        assert!("not-a-mask".parse::<Netmask>().is_err());
    }
}
