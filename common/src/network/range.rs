//! Derivation of the usable host range of an IPv4 network.

use std::net::Ipv4Addr;

use super::netmask::Netmask;

/// Usable host boundaries of an IPv4 network.
///
/// Derived once from an address and a netmask; the network and broadcast
/// addresses are excluded whenever the mask leaves room for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostRange {
    network: Ipv4Addr,
    broadcast: Ipv4Addr,
    first: Ipv4Addr,
    last: Ipv4Addr,
}

impl HostRange {
    /// Applies `mask` to `addr` and derives the first/last usable hosts.
    ///
    /// All arithmetic runs on the full 32-bit value, so the +1/-1 steps
    /// carry across octet boundaries: masking `10.0.0.255/24` yields network
    /// `10.0.0.0`, and the first host after it is `10.0.0.1`.
    ///
    /// /31 and /32 networks have no separate network and broadcast
    /// addresses; there the whole block is usable (a /32 is a single host).
    pub fn compute(addr: Ipv4Addr, mask: Netmask) -> Self {
        let network = u32::from(addr) & mask.bits();
        let broadcast = network | !mask.bits();

        let (first, last) = if mask.host_bits() < 2 {
            (network, broadcast)
        } else {
            (network + 1, broadcast - 1)
        };

        Self {
            network: Ipv4Addr::from(network),
            broadcast: Ipv4Addr::from(broadcast),
            first: Ipv4Addr::from(first),
            last: Ipv4Addr::from(last),
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.broadcast
    }

    pub fn first(&self) -> Ipv4Addr {
        self.first
    }

    pub fn last(&self) -> Ipv4Addr {
        self.last
    }

    /// Number of addresses the sequencer will visit.
    pub fn host_count(&self) -> u64 {
        u64::from(u32::from(self.last)) - u64::from(u32::from(self.first)) + 1
    }

    /// Ascending, inclusive of both bounds.
    ///
    /// Driven by `u32`, so octet-array and integer ordering agree, and
    /// `RangeInclusive` visits `last` itself before terminating (which a
    /// `while current != last` loop would skip).
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let first: u32 = self.first.into();
        let last: u32 = self.last.into();
        (first..=last).map(Ipv4Addr::from)
    }
}
