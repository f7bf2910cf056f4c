use std::io;

use thiserror::Error;

/// Rejection reasons for a network specification.
///
/// Parsing happens before any socket is opened, so none of these can
/// interrupt a running sweep.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The CIDR form must contain exactly one `/`.
    #[error("expected a single '/' in {0:?}")]
    SlashCount(String),
    #[error("invalid IPv4 address {0:?}")]
    Address(String),
    #[error("invalid netmask {0:?}")]
    Netmask(String),
    #[error("prefix length {0:?} is not in 0..=32")]
    PrefixOutOfRange(String),
}

/// The probing socket could not be created or configured.
///
/// Fatal for the whole sweep: without the shared socket no probe can run.
#[derive(Debug, Error)]
#[error("cannot open {mode} ICMP socket: {source}")]
pub struct SocketError {
    pub mode: &'static str,
    #[source]
    pub source: io::Error,
}
