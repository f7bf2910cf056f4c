//! One ICMP echo exchange against a single address.

use std::io;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use sweepr_protocols::icmp;
use tracing::{debug, trace};

use crate::transport::EchoTransport;

/// Room for a 64-byte echo reply plus the largest IPv4 header a raw socket
/// can put in front of it.
const REPLY_BUFFER_LEN: usize = 128;

/// Outcome of probing one address.
///
/// Nothing in between is kept: a send failure, a receive failure, a timeout
/// and a malformed or wrong-type reply all collapse to `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    Up,
    Down,
}

/// Sends echo requests and judges the replies, one address at a time.
///
/// The identifier is fixed for the prober's lifetime; the sequence number
/// increases by one per probe, so a stale reply can never satisfy a newer
/// probe.
pub struct Prober<T> {
    transport: T,
    timeout: Duration,
    ident: u16,
    seq: u16,
}

impl<T: EchoTransport> Prober<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            ident: rand::random(),
            seq: 0,
        }
    }

    /// One echo exchange: build, send, await a matching reply until the
    /// time budget runs out. Per-address failures never propagate; they are
    /// the `Down` result.
    pub fn probe(&mut self, addr: Ipv4Addr) -> ProbeResult {
        let seq = self.next_seq();

        let packet = match icmp::create_echo_request(self.ident, seq) {
            Ok(packet) => packet,
            Err(err) => {
                debug!("building echo request for {addr} failed: {err}");
                return ProbeResult::Down;
            }
        };

        if let Err(err) = self.transport.send_to(&packet, addr) {
            debug!("sending echo request to {addr} failed: {err}");
            return ProbeResult::Down;
        }

        self.await_reply(addr, seq)
    }

    /// Blocks until a reply matching `seq` arrives or the deadline passes.
    /// Traffic that belongs to another exchange is drained, never consumed
    /// as an answer.
    fn await_reply(&mut self, addr: Ipv4Addr, seq: u16) -> ProbeResult {
        if self.transport.set_read_timeout(self.timeout).is_err() {
            return ProbeResult::Down;
        }
        let deadline = Instant::now() + self.timeout;
        let mut buf = [0u8; REPLY_BUFFER_LEN];

        loop {
            match self.transport.recv_from(&mut buf) {
                Ok((len, src)) => {
                    if self.is_matching_reply(&buf[..len], seq) {
                        trace!("echo reply for {addr} from {src}");
                        return ProbeResult::Up;
                    }
                }
                Err(err) if is_timeout(&err) => return ProbeResult::Down,
                Err(err) => {
                    debug!("receiving echo reply for {addr} failed: {err}");
                    return ProbeResult::Down;
                }
            }

            // Unrelated traffic arrived; only the remaining budget may be
            // spent on the next receive.
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return ProbeResult::Down;
            };
            if remaining.is_zero() || self.transport.set_read_timeout(remaining).is_err() {
                return ProbeResult::Down;
            }
        }
    }

    fn is_matching_reply(&self, datagram: &[u8], seq: u16) -> bool {
        let icmp_bytes = if self.transport.delivers_ipv4_header() {
            match icmp::strip_ipv4_header(datagram) {
                Some(bytes) => bytes,
                None => return false,
            }
        } else {
            datagram
        };

        let Some(reply) = icmp::parse_echo_reply(icmp_bytes) else {
            return false;
        };

        // Datagram ICMP sockets rewrite the identifier on the way out, so
        // it only binds on transports that preserve it.
        if self.transport.preserves_identifier() && reply.ident != self.ident {
            return false;
        }
        reply.seq == seq
    }

    fn next_seq(&mut self) -> u16 {
        let seq = self.seq;
        self.seq = self.seq.wrapping_add(1);
        seq
    }
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
