use std::time::Duration;

/// Default per-probe reply deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Default TTL stamped on outgoing echo requests.
pub const DEFAULT_TTL: u32 = 64;

/// Sweep-wide tunables supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// How long each probe waits for an echo reply. The whole value reaches
    /// the socket; the receive deadline is never left partially specified.
    pub timeout: Duration,
    /// TTL for outgoing echo requests.
    pub ttl: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            ttl: DEFAULT_TTL,
        }
    }
}
