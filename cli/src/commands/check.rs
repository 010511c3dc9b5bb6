use colored::*;

use spoolwatch_common::config::Config;
use spoolwatch_common::network::endpoint::Endpoint;
use spoolwatch_core::feasibility::{self, Feasibility, Verdict};
use spoolwatch_core::gcode::{self, Extraction};
use spoolwatch_core::scanner::Scanner;
use spoolwatch_core::session::SessionState;

use crate::terminal::{colors, print, spinner};

/// The "check now" action: refresh what is known, read the newest sliced
/// job, and put a verdict under both.
pub async fn check(targets: Vec<Endpoint>, cfg: &Config) -> anyhow::Result<()> {
    let scanner = Scanner::new(cfg);

    let spinner_handle = spinner::start_scan_spinner("Refreshing spool holders...");
    let found = scanner.targeted_refresh(&targets).await;
    spinner_handle.finish_and_clear();

    let mut session = SessionState::new();
    session.reconcile(found);

    // An extraction without a mass is as good as none: a resident session
    // would keep its previous usable one, and a one-shot run has nothing
    // older to fall back to.
    let extraction = gcode::latest_extraction(&cfg.gcode_dirs).filter(|e| e.required_g.is_some());

    let required_g = extraction.as_ref().and_then(|e| e.required_g);
    let result = feasibility::assess(session.selected(), required_g);

    render(&session, extraction.as_ref(), &result, cfg);
    Ok(())
}

fn render(
    session: &SessionState,
    extraction: Option<&Extraction>,
    result: &Feasibility,
    cfg: &Config,
) {
    print::header("Print Check", cfg.quiet);

    let mut rows: Vec<(String, ColoredString)> = Vec::new();

    if let Some(extraction) = extraction {
        if let Some(model) = &extraction.model_name {
            rows.push(("Model".to_string(), model.clone().color(colors::ACCENT)));
        }
        if let Some(required) = extraction.required_g {
            rows.push((
                "Job needs".to_string(),
                format!("{required} g").color(colors::MASS),
            ));
        }
    }

    if let Some(holder) = session.selected() {
        rows.push((
            "Holder".to_string(),
            format!("{} ({})", holder.name, holder.endpoint).color(colors::PRIMARY),
        ));

        let on_spool = if holder.net_g > 0.0 {
            format!("{} g ({}% left)", holder.net_g, result.percent_remaining)
        } else {
            "no reading".to_string()
        };
        rows.push(("On spool".to_string(), on_spool.color(colors::MASS)));

        if let Some(filament) = holder.filament_summary() {
            rows.push(("Filament".to_string(), filament.normal()));
        }

        if let Some(length_m) = result.length_m {
            rows.push(("Length".to_string(), format!("~{length_m} m").normal()));
        }
    }

    if !rows.is_empty() {
        print::aligned_block(rows);
        print::blank();
    }

    print::fat_separator();
    print::centerln(verdict_line(result));
}

fn verdict_line(result: &Feasibility) -> ColoredString {
    match result.verdict {
        Verdict::Sufficient => "✓ ENOUGH FILAMENT".color(colors::GOOD).bold(),
        Verdict::Insufficient { deficit_g } => format!("✗ NOT ENOUGH ({deficit_g} g short)")
            .color(colors::BAD)
            .bold(),
        Verdict::InsufficientData => "Job weighed, but no spool reading to hold against it"
            .color(colors::NOTICE)
            .bold(),
        Verdict::NoRequirement => "No sliced job found; spool state only".color(colors::NOTICE),
        Verdict::NoDevice => "No spool holders answered".color(colors::SEPARATOR).bold(),
    }
}
