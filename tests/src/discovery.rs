use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use spoolwatch_common::config::Config;
use spoolwatch_core::feasibility::{self, Verdict};
use spoolwatch_core::probe::{HttpProber, Prober};
use spoolwatch_core::scanner::Scanner;
use spoolwatch_core::session::SessionState;

use crate::emulator;

fn test_config() -> Config {
    Config {
        probe_timeout: Duration::from_millis(300),
        ..Default::default()
    }
}

fn holder_body(name: &str, net: f64) -> String {
    json!({
        "name": name,
        "net": net,
        "gross": net + 180.0,
        "material": "PLA",
        "manufacturer": "Creality",
    })
    .to_string()
}

#[tokio::test]
async fn probe_reports_the_exact_endpoint_it_was_given() {
    let endpoint = emulator::serve(emulator::http_ok(&holder_body("FD-Bench", 412.5))).await;
    let prober = HttpProber::new(&test_config());

    let holder = prober.probe(endpoint).await.expect("emulated holder must be found");

    assert_eq!(holder.endpoint, endpoint);
    assert_eq!(holder.name, "FD-Bench");
    assert_eq!(holder.net_g, 412.5);
    assert_eq!(holder.material, "PLA");
    // Fields the emulator left out come back as the documented defaults.
    assert_eq!(holder.diameter_mm, 1.75);
    assert_eq!(holder.initial_weight_g, 1000.0);
}

#[tokio::test]
async fn probe_drops_a_speaker_with_a_foreign_name() {
    let endpoint = emulator::serve(emulator::http_ok(&holder_body("ESP-Cam", 10.0))).await;
    let prober = HttpProber::new(&test_config());

    assert!(prober.probe(endpoint).await.is_none());
}

#[tokio::test]
async fn probe_drops_a_report_without_net_mass() {
    let body = json!({"name": "FD-Bench"}).to_string();
    let endpoint = emulator::serve(emulator::http_ok(&body)).await;
    let prober = HttpProber::new(&test_config());

    assert!(prober.probe(endpoint).await.is_none());
}

#[tokio::test]
async fn probe_drops_a_non_json_answer() {
    let endpoint =
        emulator::serve(emulator::http_ok("<html>definitely a router</html>")).await;
    let prober = HttpProber::new(&test_config());

    assert!(prober.probe(endpoint).await.is_none());
}

#[tokio::test]
async fn probe_times_out_on_a_silent_socket() {
    let endpoint = emulator::serve_silence().await;
    let prober = HttpProber::new(&test_config());

    let started = std::time::Instant::now();
    assert!(prober.probe(endpoint).await.is_none());
    // The timeout bounds the wait; a stuck socket must not hang the scan.
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn probe_treats_connection_refused_as_no_device() {
    let endpoint = emulator::dead_endpoint().await;
    let prober = HttpProber::new(&test_config());

    assert!(prober.probe(endpoint).await.is_none());
}

#[tokio::test]
async fn scanner_keeps_only_the_endpoints_that_qualified() {
    let real = emulator::serve(emulator::http_ok(&holder_body("FD-Shelf", 250.0))).await;
    let imposter = emulator::serve(emulator::http_ok(&holder_body("ESP-Cam", 250.0))).await;
    let dead = emulator::dead_endpoint().await;

    let cfg = test_config();
    let scanner = Scanner::with_prober(
        Arc::new(HttpProber::new(&cfg)),
        cfg.max_parallel_probes,
        cfg.device_ports.clone(),
    );

    let found = scanner.targeted_refresh(&[real, imposter, dead]).await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].endpoint, real);
}

#[tokio::test]
async fn refresh_reconcile_and_verdict_end_to_end() {
    let endpoint = emulator::serve(emulator::http_ok(&holder_body("FD-Shelf", 250.0))).await;

    let cfg = test_config();
    let scanner = Scanner::with_prober(
        Arc::new(HttpProber::new(&cfg)),
        cfg.max_parallel_probes,
        cfg.device_ports.clone(),
    );

    let mut session = SessionState::new();
    session.reconcile(scanner.targeted_refresh(&[endpoint]).await);

    let selected = session.selected().expect("the one holder must be selected");
    assert_eq!(selected.endpoint, endpoint);

    let result = feasibility::assess(session.selected(), Some(45.7));
    assert_eq!(result.verdict, Verdict::Sufficient);
    assert_eq!(result.percent_remaining, 25);

    let result = feasibility::assess(session.selected(), Some(300.0));
    assert_eq!(result.verdict, Verdict::Insufficient { deficit_g: 50.0 });
}

#[tokio::test]
async fn selection_survives_two_real_scans() {
    let first = emulator::serve(emulator::http_ok(&holder_body("FD-Shelf", 250.0))).await;
    let second = emulator::serve(emulator::http_ok(&holder_body("FD-Desk", 90.0))).await;

    let cfg = test_config();
    let scanner = Scanner::with_prober(
        Arc::new(HttpProber::new(&cfg)),
        cfg.max_parallel_probes,
        cfg.device_ports.clone(),
    );

    let mut session = SessionState::new();
    session.reconcile(scanner.targeted_refresh(&[first, second]).await);
    assert!(session.select(second));

    // Same pair again; arrival order may differ, identity may not.
    session.reconcile(scanner.targeted_refresh(&[first, second]).await);

    assert_eq!(session.selected().map(|h| h.endpoint), Some(second));
    assert_eq!(session.holders().len(), 2);
}
