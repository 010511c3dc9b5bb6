use colored::*;

use spoolwatch_common::config::Config;
use spoolwatch_common::network::candidates;
use spoolwatch_core::gcode;

use crate::terminal::{colors, print};

/// Dry overview: where a sweep would look and which folders feed the
/// extractor. Nothing is probed.
pub fn info(cfg: &Config) -> anyhow::Result<()> {
    print::header("Probe Plan", cfg.quiet);

    let local = candidates::local_ipv4();
    let plan = candidates::plan_sweep(local, &cfg.device_ports);
    let [a, b, c] = candidates::subnet_of(local);

    let ports: String = cfg
        .device_ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    print::aligned_block(vec![
        (
            "Local IPv4".to_string(),
            local.to_string().color(colors::ACCENT),
        ),
        ("Home subnet".to_string(), format!("{a}.{b}.{c}.0/24").normal()),
        ("Ports".to_string(), ports.normal()),
        (
            "Candidates".to_string(),
            plan.len().to_string().color(colors::MASS),
        ),
        (
            "Probe timeout".to_string(),
            format!("{:?}", cfg.probe_timeout).normal(),
        ),
        (
            "Parallel cap".to_string(),
            cfg.max_parallel_probes.to_string().normal(),
        ),
    ]);

    print::header("Watched Folders", cfg.quiet);

    if cfg.gcode_dirs.is_empty() {
        print::print_status("None configured; pass --gcode-dir to watch one");
        return Ok(());
    }

    for dir in &cfg.gcode_dirs {
        let marker: ColoredString = if dir.exists() {
            "present".color(colors::GOOD)
        } else {
            "missing".color(colors::SEPARATOR)
        };
        print::print_status(format!("{} ({})", dir.display(), marker));
    }

    match gcode::find_latest(&cfg.gcode_dirs) {
        Some(path) => print::print_status(format!("Newest job: {}", path.display())),
        None => print::print_status("No sliced output yet"),
    }

    Ok(())
}
