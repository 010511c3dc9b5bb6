//! # Probe-Space Planning
//!
//! Holders advertise themselves on a handful of conventional private
//! addresses, so the planner narrows the sweep to those instead of walking
//! whole /24 blocks. Exhaustive coverage of a single /24 across two ports
//! is already 508 probes; the narrowed plan trades recall for bounded
//! latency.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use crate::network::endpoint::Endpoint;

/// Probed after the machine's own /24, duplicates skipped.
const COMMON_SUBNETS: [[u8; 3]; 4] = [
    [192, 168, 1],
    [192, 168, 0],
    [10, 0, 0],
    [172, 16, 0],
];

/// Host ids where spool holders tend to land (DHCP pools, router defaults).
const COMMON_HOST_IDS: [u8; 13] = [1, 10, 11, 12, 13, 14, 15, 20, 100, 101, 102, 200, 254];

/// Single addresses worth a try when nothing is known at all.
const FALLBACK_SUBNETS: [[u8; 3]; 3] = [[192, 168, 1], [192, 168, 0], [10, 0, 0]];
const FALLBACK_HOST_IDS: [u8; 4] = [12, 10, 11, 1];

const LOCAL_FALLBACK: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);

/// Best guess for this machine's LAN address.
pub fn local_ipv4() -> Ipv4Addr {
    route_source_ipv4().unwrap_or(LOCAL_FALLBACK)
}

/// Asks the routing table which source address would reach the internet.
/// `connect` on a datagram socket only selects a route; no packet leaves.
fn route_source_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(("8.8.8.8", 80)).ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(addr) => Some(addr),
        IpAddr::V6(_) => None,
    }
}

/// First three octets of `addr`: the /24 it lives in.
pub fn subnet_of(addr: Ipv4Addr) -> [u8; 3] {
    let [a, b, c, _] = addr.octets();
    [a, b, c]
}

/// The ordered sweep plan: the local /24 first, then the common private
/// subnets, each crossed with the conventional host ids and `ports`.
pub fn plan_sweep(local: Ipv4Addr, ports: &[u16]) -> Vec<Endpoint> {
    let mut subnets: Vec<[u8; 3]> = vec![subnet_of(local)];
    for subnet in COMMON_SUBNETS {
        if !subnets.contains(&subnet) {
            subnets.push(subnet);
        }
    }

    let mut plan: Vec<Endpoint> =
        Vec::with_capacity(subnets.len() * COMMON_HOST_IDS.len() * ports.len());
    for [a, b, c] in subnets {
        for host_id in COMMON_HOST_IDS {
            let ip = Ipv4Addr::new(a, b, c, host_id);
            for &port in ports {
                plan.push(Endpoint::new(ip, port));
            }
        }
    }
    plan
}

/// Hosts for the no-known-devices fallback of a targeted refresh, in the
/// order the refresh walks them.
pub fn plan_fallback_hosts() -> Vec<Ipv4Addr> {
    let mut hosts: Vec<Ipv4Addr> =
        Vec::with_capacity(FALLBACK_SUBNETS.len() * FALLBACK_HOST_IDS.len());
    for [a, b, c] in FALLBACK_SUBNETS {
        for host_id in FALLBACK_HOST_IDS {
            hosts.push(Ipv4Addr::new(a, b, c, host_id));
        }
    }
    hosts
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
