use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Spinner shown while probes are in flight; the caller clears it once
/// the scan settles. Draws on stderr, so log lines stay intact.
pub fn start_scan_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

    pb.set_style(style);
    pb.enable_steady_tick(TICK);
    pb.set_message(message.to_string());
    pb
}
