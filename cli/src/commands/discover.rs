use std::time::{Duration, Instant};

use colored::*;

use spoolwatch_common::config::Config;
use spoolwatch_common::holder::Holder;
use spoolwatch_common::success;
use spoolwatch_core::scanner::Scanner;
use spoolwatch_core::session::SessionState;

use crate::terminal::{colors, print, spinner};

type Detail = (String, ColoredString);

pub async fn discover(cfg: &Config) -> anyhow::Result<()> {
    let scanner = Scanner::new(cfg);

    let spinner_handle = spinner::start_scan_spinner("Probing the likely subnets...");
    let start_time: Instant = Instant::now();
    let found = scanner.full_rescan().await;
    spinner_handle.finish_and_clear();

    let mut session = SessionState::new();
    session.reconcile(found);

    discovery_ends(&session, start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(session: &SessionState, total_time: Duration, cfg: &Config) {
    if session.is_empty() {
        print::header("ZERO HOLDERS DETECTED", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("Spool Holders", cfg.quiet);
    print_holders(session, cfg);
    print_summary(session.holders().len(), total_time, cfg);
}

fn print_holders(session: &SessionState, cfg: &Config) {
    for (idx, holder) in session.holders().iter().enumerate() {
        match cfg.quiet {
            2 => {}
            _ => {
                let selected = session.selected_endpoint() == Some(holder.endpoint);
                print_holder_tree(holder, idx, selected);
            }
        }
        if idx + 1 != session.holders().len() {
            print::blank();
        }
    }
}

fn print_summary(holder_count: usize, total_time: Duration, cfg: &Config) {
    let holders: ColoredString = format!("{holder_count} holder(s)").bold().green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString = &format!("Discovery complete: {holders} answered in {elapsed}")
        .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
        }
        _ => {
            print::blank();
            success!("{}", output);
        }
    }
}

fn print_holder_tree(holder: &Holder, idx: usize, selected: bool) {
    let head = if selected {
        format!("{} (selected)", holder.name)
    } else {
        holder.name.clone()
    };
    print::tree_head(idx, &head);

    let mut details: Vec<Detail> = vec![
        (
            "Address".to_string(),
            holder.endpoint.to_string().color(colors::ACCENT),
        ),
        (
            "Net".to_string(),
            format!("{} g", holder.net_g).color(colors::MASS),
        ),
    ];

    if holder.gross_g > 0.0 {
        details.push(("Gross".to_string(), format!("{} g", holder.gross_g).normal()));
    }

    if let Some(filament) = holder.filament_summary() {
        details.push(("Filament".to_string(), filament.normal()));
    }

    if !holder.filament_id.is_empty() {
        details.push(("Spool id".to_string(), holder.filament_id.clone().normal()));
    }

    print::as_tree_one_level(details);
}
