//! # Feasibility
//!
//! Pure derivations from a holder reading and a slicer requirement: spool
//! length, remaining percentage, and the enough/not-enough verdict. Free
//! of side effects; cheap enough to re-run on every state change.

use std::f64::consts::PI;

use spoolwatch_common::holder::Holder;

/// Enough-or-not classification of the selected holder against the
/// required mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// No holder selected and no requirement known.
    NoDevice,
    /// A holder is selected but nothing was sliced yet.
    NoRequirement,
    /// The requirement is known but there is no usable mass reading.
    InsufficientData,
    /// The spool covers the job; equality counts as enough.
    Sufficient,
    /// The spool runs dry `deficit_g` grams before the job ends.
    Insufficient { deficit_g: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feasibility {
    /// Estimated filament length left on the spool, metres, one decimal.
    /// Absent without a holder, a positive reading, or sane geometry.
    pub length_m: Option<f64>,
    /// Remaining share of the reference full-spool mass, whole percent.
    pub percent_remaining: u32,
    pub verdict: Verdict,
}

pub fn assess(holder: Option<&Holder>, required_g: Option<f64>) -> Feasibility {
    let available = holder.map(|h| h.net_g).filter(|g| *g > 0.0);
    let required = required_g.filter(|g| *g > 0.0);

    let verdict = match (required, available) {
        (Some(required), Some(net)) => {
            if net >= required {
                Verdict::Sufficient
            } else {
                Verdict::Insufficient {
                    deficit_g: round2(required - net),
                }
            }
        }
        (Some(_), None) => Verdict::InsufficientData,
        (None, _) if holder.is_none() => Verdict::NoDevice,
        (None, _) => Verdict::NoRequirement,
    };

    Feasibility {
        length_m: holder.and_then(spool_length_m),
        percent_remaining: holder.map_or(0, percent_remaining),
        verdict,
    }
}

/// Length from mass: volume = net / density (cm³), cross-section =
/// π·(diameter/10/2)² (cm²), length = volume / area, reported in metres.
/// Non-positive density or diameter yields no length instead of a division
/// fault.
fn spool_length_m(holder: &Holder) -> Option<f64> {
    if holder.net_g <= 0.0 || holder.density_g_cm3 <= 0.0 || holder.diameter_mm <= 0.0 {
        return None;
    }

    let volume_cm3 = holder.net_g / holder.density_g_cm3;
    let radius_cm = holder.diameter_mm / 10.0 / 2.0;
    let area_cm2 = PI * radius_cm * radius_cm;
    let length_cm = volume_cm3 / area_cm2;

    Some(round1(length_cm / 100.0))
}

fn percent_remaining(holder: &Holder) -> u32 {
    if holder.net_g <= 0.0 || holder.initial_weight_g <= 0.0 {
        return 0;
    }
    (100.0 * holder.net_g / holder.initial_weight_g).round() as u32
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
