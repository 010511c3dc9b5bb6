//! # Holder Data Model
//!
//! One discovered filament-spool device and the state it last reported.

use crate::network::endpoint::Endpoint;

pub const DEFAULT_DIAMETER_MM: f64 = 1.75;
pub const DEFAULT_DENSITY_G_CM3: f64 = 1.24;
pub const DEFAULT_INITIAL_WEIGHT_G: f64 = 1000.0;

/// Last reported state of a single spool holder.
///
/// The endpoint is the only identity field: records carrying the same
/// endpoint across scans describe the same device at different points in
/// time. Every other field is authoritative per reading and is replaced
/// wholesale on every successful probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Holder {
    pub endpoint: Endpoint,
    pub name: String,
    /// Filament currently on the spool, grams.
    pub net_g: f64,
    /// Spool plus filament, grams. 0 when unreported.
    pub gross_g: f64,
    pub filament_id: String,
    pub material: String,
    pub manufacturer: String,
    pub diameter_mm: f64,
    pub density_g_cm3: f64,
    /// Reference full-spool mass the remaining percentage is figured from.
    pub initial_weight_g: f64,
}

impl Holder {
    /// A record with nothing reported yet: defaults everywhere and a name
    /// synthesized from the endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            name: Self::fallback_name(endpoint),
            net_g: 0.0,
            gross_g: 0.0,
            filament_id: String::new(),
            material: String::new(),
            manufacturer: String::new(),
            diameter_mm: DEFAULT_DIAMETER_MM,
            density_g_cm3: DEFAULT_DENSITY_G_CM3,
            initial_weight_g: DEFAULT_INITIAL_WEIGHT_G,
        }
    }

    /// Label shown when the device reports no name of its own.
    pub fn fallback_name(endpoint: Endpoint) -> String {
        format!("Spool ({endpoint})")
    }

    /// `manufacturer | material | diameter` one-liner; nothing when the
    /// device reported no material.
    pub fn filament_summary(&self) -> Option<String> {
        if self.material.is_empty() {
            return None;
        }
        let mut parts: Vec<String> = Vec::new();
        if !self.manufacturer.is_empty() {
            parts.push(self.manufacturer.clone());
        }
        parts.push(self.material.clone());
        if self.diameter_mm > 0.0 {
            parts.push(format!("{}mm", self.diameter_mm));
        }
        Some(parts.join(" | "))
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn endpoint() -> Endpoint {
        Endpoint::new(Ipv4Addr::new(192, 168, 1, 12), 80)
    }

    #[test]
    fn fresh_holder_carries_the_documented_defaults() {
        let holder = Holder::new(endpoint());
        assert_eq!(holder.name, "Spool (192.168.1.12:80)");
        assert_eq!(holder.diameter_mm, 1.75);
        assert_eq!(holder.density_g_cm3, 1.24);
        assert_eq!(holder.initial_weight_g, 1000.0);
    }

    #[test]
    fn filament_summary_requires_a_material() {
        let mut holder = Holder::new(endpoint());
        holder.manufacturer = "Creality".to_string();
        assert_eq!(holder.filament_summary(), None);

        holder.material = "PLA".to_string();
        assert_eq!(
            holder.filament_summary().as_deref(),
            Some("Creality | PLA | 1.75mm")
        );
    }

    #[test]
    fn filament_summary_skips_what_was_not_reported() {
        let mut holder = Holder::new(endpoint());
        holder.material = "PETG".to_string();
        holder.diameter_mm = 0.0;
        assert_eq!(holder.filament_summary().as_deref(), Some("PETG"));
    }
}
