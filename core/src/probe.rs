//! # Device Probe
//!
//! One bounded-time interrogation of one candidate endpoint.
//!
//! The holder firmware serves a small JSON report over plain HTTP; the
//! probe fetches it, decides whether the speaker really is a holder, and
//! collapses every possible failure into "no device there". Nothing a
//! probe does can fail the scan around it, and it touches no shared state.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use spoolwatch_common::config::Config;
use spoolwatch_common::holder::{
    DEFAULT_DENSITY_G_CM3, DEFAULT_DIAMETER_MM, DEFAULT_INITIAL_WEIGHT_G, Holder,
};
use spoolwatch_common::network::endpoint::Endpoint;

/// Path every holder answers its report on.
pub const DEVICE_PATH: &str = "/data";

/// Ways a single probe can fail. All of them mean the same thing to the
/// scanner, no holder at that endpoint, but callers inside this module
/// match on the kind for trace output.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no answer within {0:?}")]
    Timeout(Duration),
    #[error("connect failed: {0}")]
    Connect(std::io::Error),
    #[error("request failed: {0}")]
    Io(std::io::Error),
    #[error("unexpected reply: {0}")]
    BadStatus(String),
    #[error("undecodable report: {0}")]
    BadReport(serde_json::Error),
}

/// Raw `/data` report as the firmware serializes it. Everything except
/// `net` is optional; missing fields take the documented defaults.
#[derive(Debug, Deserialize)]
pub struct SpoolReport {
    #[serde(default)]
    pub name: String,
    pub net: Option<f64>,
    #[serde(default)]
    pub gross: f64,
    #[serde(default)]
    pub filament_id: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default = "default_diameter")]
    pub diameter: f64,
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_diameter() -> f64 {
    DEFAULT_DIAMETER_MM
}

fn default_density() -> f64 {
    DEFAULT_DENSITY_G_CM3
}

fn default_weight() -> f64 {
    DEFAULT_INITIAL_WEIGHT_G
}

/// Strategy seam for the scanner: anything that can test one endpoint.
///
/// `None` means "no holder there", whatever the reason. Implementations
/// must be safe to drive from many tasks at once.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, endpoint: Endpoint) -> Option<Holder>;
}

/// The real probe: `GET /data` over a raw TCP stream, one short timeout
/// covering connect, request and response.
pub struct HttpProber {
    timeout: Duration,
    name_prefix: String,
}

impl HttpProber {
    pub fn new(cfg: &Config) -> Self {
        Self {
            timeout: cfg.probe_timeout,
            name_prefix: cfg.name_prefix.clone(),
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, endpoint: Endpoint) -> Option<Holder> {
        match fetch_report(endpoint, self.timeout).await {
            Ok(report) => accept(endpoint, report, &self.name_prefix),
            Err(err) => {
                tracing::trace!("probe {endpoint}: {err}");
                None
            }
        }
    }
}

/// Takes a decoded report as a holder only when it carries a numeric `net`
/// reading and its name starts, case-insensitively, with the device-family
/// prefix. The prefix check is the only authentication there is.
pub fn accept(endpoint: Endpoint, report: SpoolReport, name_prefix: &str) -> Option<Holder> {
    let net_g = report.net?;
    if !report
        .name
        .to_uppercase()
        .starts_with(&name_prefix.to_uppercase())
    {
        return None;
    }

    let name = if report.name.trim().is_empty() {
        Holder::fallback_name(endpoint)
    } else {
        report.name
    };

    Some(Holder {
        endpoint,
        name,
        net_g,
        gross_g: report.gross,
        filament_id: report.filament_id,
        material: report.material,
        manufacturer: report.manufacturer,
        diameter_mm: report.diameter,
        density_g_cm3: report.density,
        initial_weight_g: report.weight,
    })
}

async fn fetch_report(endpoint: Endpoint, limit: Duration) -> Result<SpoolReport, ProbeError> {
    timeout(limit, exchange(endpoint))
        .await
        .map_err(|_| ProbeError::Timeout(limit))?
}

async fn exchange(endpoint: Endpoint) -> Result<SpoolReport, ProbeError> {
    let mut stream = TcpStream::connect((endpoint.ip, endpoint.port))
        .await
        .map_err(ProbeError::Connect)?;

    let request = format!(
        "GET {DEVICE_PATH} HTTP/1.1\r\nHost: {endpoint}\r\nAccept: application/json\r\nConnection: close\r\n\r\n"
    );
    stream
        .write_all(request.as_bytes())
        .await
        .map_err(ProbeError::Io)?;

    // The firmware answers with a plain identity body and closes the
    // socket, so read-to-end is the whole response.
    let mut raw: Vec<u8> = Vec::new();
    stream.read_to_end(&mut raw).await.map_err(ProbeError::Io)?;

    parse_response(&raw)
}

/// Splits a raw HTTP reply into status and body and decodes the body.
fn parse_response(raw: &[u8]) -> Result<SpoolReport, ProbeError> {
    let text = String::from_utf8_lossy(raw);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return Err(ProbeError::BadStatus("missing header terminator".into()));
    };

    let status_line = head.lines().next().unwrap_or_default();
    let status = status_line.split_whitespace().nth(1);
    if status != Some("200") {
        return Err(ProbeError::BadStatus(status_line.to_string()));
    }

    serde_json::from_str(body.trim()).map_err(ProbeError::BadReport)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn endpoint() -> Endpoint {
        Endpoint::new(Ipv4Addr::new(192, 168, 1, 12), 80)
    }

    fn report(json: &str) -> SpoolReport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accept_takes_a_well_formed_report() {
        let report = report(
            r#"{"name": "FD-Spool-1", "net": 412.5, "gross": 650.0,
                "material": "PLA", "manufacturer": "Creality"}"#,
        );
        let holder = accept(endpoint(), report, "FD").unwrap();

        assert_eq!(holder.endpoint, endpoint());
        assert_eq!(holder.name, "FD-Spool-1");
        assert_eq!(holder.net_g, 412.5);
        assert_eq!(holder.gross_g, 650.0);
        assert_eq!(holder.material, "PLA");
        // Unreported numeric fields take the documented defaults.
        assert_eq!(holder.diameter_mm, 1.75);
        assert_eq!(holder.density_g_cm3, 1.24);
        assert_eq!(holder.initial_weight_g, 1000.0);
    }

    #[test]
    fn accept_matches_the_prefix_case_insensitively() {
        let report = report(r#"{"name": "fd_kitchen", "net": 12.0}"#);
        assert!(accept(endpoint(), report, "FD").is_some());
    }

    #[test]
    fn accept_rejects_a_foreign_name() {
        let report = report(r#"{"name": "ESP-Cam", "net": 12.0}"#);
        assert!(accept(endpoint(), report, "FD").is_none());
    }

    #[test]
    fn accept_rejects_a_report_without_net_mass() {
        let report = report(r#"{"name": "FD-Spool-1", "gross": 650.0}"#);
        assert!(accept(endpoint(), report, "FD").is_none());
    }

    #[test]
    fn accept_synthesizes_a_name_when_none_is_enforced() {
        // With an empty prefix every name passes, including an empty one;
        // the holder then carries the endpoint-derived label.
        let report = report(r#"{"net": 12.0}"#);
        let holder = accept(endpoint(), report, "").unwrap();
        assert_eq!(holder.name, "Spool (192.168.1.12:80)");
    }

    #[test]
    fn parse_response_decodes_a_valid_reply() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"name\":\"FD1\",\"net\":5.5}";
        let report = parse_response(raw).unwrap();
        assert_eq!(report.name, "FD1");
        assert_eq!(report.net, Some(5.5));
    }

    #[test]
    fn parse_response_rejects_non_200_status() {
        let raw = b"HTTP/1.1 404 Not Found\r\n\r\n{}";
        assert!(matches!(
            parse_response(raw),
            Err(ProbeError::BadStatus(_))
        ));
    }

    #[test]
    fn parse_response_rejects_a_truncated_reply() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: application/json";
        assert!(matches!(
            parse_response(raw),
            Err(ProbeError::BadStatus(_))
        ));
    }

    #[test]
    fn parse_response_rejects_a_non_json_body() {
        let raw = b"HTTP/1.1 200 OK\r\n\r\n<html>router admin</html>";
        assert!(matches!(
            parse_response(raw),
            Err(ProbeError::BadReport(_))
        ));
    }
}
