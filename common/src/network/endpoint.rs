//! # Holder Identity Key
//!
//! A holder is identified by the socket address it answered on, nothing
//! else. Name, mass and filament details may all change between scans
//! without creating a new logical device.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Identity key of a holder: the `(ip, port)` pair it was probed at.
///
/// Kept as a dedicated type so selection matching never depends on how an
/// address happens to be formatted as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl Endpoint {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self { ip, port }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = String;

    /// Parses `a.b.c.d:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((ip_str, port_str)) = s.split_once(':') else {
            return Err(format!("missing port in endpoint '{s}'"));
        };
        let ip = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("invalid address in endpoint '{s}': {e}"))?;
        let port = port_str
            .parse::<u16>()
            .map_err(|e| format!("invalid port in endpoint '{s}': {e}"))?;
        Ok(Self { ip, port })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
