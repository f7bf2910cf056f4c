//! ICMP socket acquisition and the transport seam used by the prober.
//!
//! Root gets a raw ICMP socket; unprivileged processes fall back to a
//! datagram ICMP socket (`net.ipv4.ping_group_range` permitting). The
//! prober only ever sees the [`EchoTransport`] trait, so how the socket was
//! obtained stays out of the probe logic and tests can substitute a
//! scripted fake.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use sweepr_common::config::Config;
use sweepr_common::error::SocketError;

/// Socket capability selected from the process privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketMode {
    /// `SOCK_RAW`: replies arrive with their IPv4 header in front and the
    /// echo identifier is preserved end to end. Requires root.
    Raw,
    /// `SOCK_DGRAM` with `IPPROTO_ICMP`: the kernel strips the IPv4 header
    /// and rewrites the echo identifier on the way out.
    Datagram,
}

impl SocketMode {
    /// Strongest capability available to the current process.
    pub fn detect() -> Self {
        if is_root::is_root() {
            SocketMode::Raw
        } else {
            SocketMode::Datagram
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SocketMode::Raw => "raw",
            SocketMode::Datagram => "datagram",
        }
    }

    fn socket_type(self) -> Type {
        match self {
            SocketMode::Raw => Type::RAW,
            SocketMode::Datagram => Type::DGRAM,
        }
    }
}

/// What the prober needs from a socket.
pub trait EchoTransport {
    fn send_to(&mut self, packet: &[u8], addr: Ipv4Addr) -> io::Result<()>;
    fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;
    /// Adjusts the blocking-receive deadline. Both the seconds and the
    /// sub-second part of `timeout` must take effect.
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;
    /// Replies carry an IPv4 header in front of the ICMP message.
    fn delivers_ipv4_header(&self) -> bool;
    /// The echo identifier survives the round trip unchanged.
    fn preserves_identifier(&self) -> bool;
}

/// The one ICMP-capable socket a sweep reuses for every probe.
pub struct IcmpTransport {
    socket: UdpSocket,
    mode: SocketMode,
}

impl IcmpTransport {
    /// Opens and configures the probing socket. Failure here is fatal for
    /// the whole sweep.
    pub fn open(mode: SocketMode, cfg: &Config) -> Result<Self, SocketError> {
        let socket = open_socket(mode, cfg).map_err(|source| SocketError {
            mode: mode.label(),
            source,
        })?;
        Ok(Self { socket, mode })
    }
}

fn open_socket(mode: SocketMode, cfg: &Config) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, mode.socket_type(), Some(Protocol::ICMPV4))?;
    socket.set_ttl(cfg.ttl)?;
    socket.set_read_timeout(Some(clamp_timeout(cfg.timeout)))?;
    // socket2 was only needed to create the ICMP socket; plain blocking std
    // I/O covers everything the prober does with it.
    Ok(socket.into())
}

impl EchoTransport for IcmpTransport {
    fn send_to(&mut self, packet: &[u8], addr: Ipv4Addr) -> io::Result<()> {
        let dest = SocketAddr::V4(SocketAddrV4::new(addr, 0));
        self.socket.send_to(packet, dest).map(|_| ())
    }

    fn recv_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket.recv_from(buf)
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.socket.set_read_timeout(Some(clamp_timeout(timeout)))
    }

    fn delivers_ipv4_header(&self) -> bool {
        self.mode == SocketMode::Raw
    }

    fn preserves_identifier(&self) -> bool {
        self.mode == SocketMode::Raw
    }
}

/// A zero read timeout means "block forever" to the socket layer; a probe
/// deadline needs it to mean "give up almost immediately" instead.
fn clamp_timeout(timeout: Duration) -> Duration {
    timeout.max(Duration::from_millis(1))
}
