//! # Discovery Scanner
//!
//! Fans the probe out over a candidate plan under a fixed concurrency cap
//! and gathers whatever answered. Probes launch in batches: up to the cap
//! go out, the whole batch settles, the next batch follows. Probe count is
//! small and probe latency uniform, so the barrier costs little and keeps
//! the in-flight bound exact.
//!
//! A scan finishes only when every launched probe finished or timed out;
//! partial results are never published. An empty result set is a valid
//! outcome, not an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use spoolwatch_common::config::Config;
use spoolwatch_common::holder::Holder;
use spoolwatch_common::network::candidates;
use spoolwatch_common::network::endpoint::Endpoint;
use spoolwatch_common::{info, warn};

use crate::probe::{HttpProber, Prober};

pub struct Scanner {
    prober: Arc<dyn Prober>,
    max_parallel: usize,
    ports: Vec<u16>,
    stop: Arc<AtomicBool>,
}

impl Scanner {
    pub fn new(cfg: &Config) -> Self {
        Self::with_prober(
            Arc::new(HttpProber::new(cfg)),
            cfg.max_parallel_probes,
            cfg.device_ports.clone(),
        )
    }

    /// Seam for driving the scanner with a scripted prober.
    pub fn with_prober(prober: Arc<dyn Prober>, max_parallel: usize, ports: Vec<u16>) -> Self {
        Self {
            prober,
            max_parallel: max_parallel.max(1),
            ports,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag checked between batches; raising it abandons the
    /// remainder of an in-flight scan without cutting a launched batch
    /// short.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Heuristic sweep over the planned probe space. Used on startup and
    /// for an explicit re-discovery.
    pub async fn full_rescan(&self) -> Vec<Holder> {
        let local = candidates::local_ipv4();
        let plan = candidates::plan_sweep(local, &self.ports);
        info!("Probing {} candidate endpoints around {}", plan.len(), local);

        let found = self.run(plan).await;
        info!("Sweep finished: {} holder(s) answered", found.len());
        found
    }

    /// Re-probes exactly the endpoints already on record, which is much
    /// cheaper than a sweep. With nothing on record it falls back to the
    /// short conventional-address list instead.
    pub async fn targeted_refresh(&self, known: &[Endpoint]) -> Vec<Holder> {
        if known.is_empty() {
            return self.fallback_sweep().await;
        }
        info!("Re-probing {} known holder(s)", known.len());
        self.run(known.to_vec()).await
    }

    async fn run(&self, plan: Vec<Endpoint>) -> Vec<Holder> {
        let found: Arc<Mutex<Vec<Holder>>> = Arc::new(Mutex::new(Vec::new()));

        for batch in plan.chunks(self.max_parallel) {
            if self.stop.load(Ordering::Relaxed) {
                warn!("Scan abandoned with candidates left unprobed");
                break;
            }

            let mut handles = Vec::with_capacity(batch.len());
            for &endpoint in batch {
                let prober = Arc::clone(&self.prober);
                let found = Arc::clone(&found);
                handles.push(tokio::spawn(async move {
                    if let Some(holder) = prober.probe(endpoint).await {
                        found.lock().unwrap().push(holder);
                    }
                }));
            }

            for handle in handles {
                let _ = handle.await;
            }
        }

        let mut guard = found.lock().unwrap();
        std::mem::take(&mut *guard)
    }

    /// Quick pass over the conventional single addresses, used when a
    /// refresh is requested before anything was ever discovered. Ports on
    /// one host are tried in order and the first answer wins; a holder
    /// never serves two ports at once.
    async fn fallback_sweep(&self) -> Vec<Holder> {
        let hosts = candidates::plan_fallback_hosts();
        info!("Nothing on record; trying {} conventional addresses", hosts.len());

        let found: Arc<Mutex<Vec<Holder>>> = Arc::new(Mutex::new(Vec::new()));

        for batch in hosts.chunks(self.max_parallel) {
            if self.stop.load(Ordering::Relaxed) {
                break;
            }

            let mut handles = Vec::with_capacity(batch.len());
            for &ip in batch {
                let prober = Arc::clone(&self.prober);
                let found = Arc::clone(&found);
                let ports = self.ports.clone();
                handles.push(tokio::spawn(async move {
                    for port in ports {
                        if let Some(holder) = prober.probe(Endpoint::new(ip, port)).await {
                            found.lock().unwrap().push(holder);
                            break;
                        }
                    }
                }));
            }

            for handle in handles {
                let _ = handle.await;
            }
        }

        let mut guard = found.lock().unwrap();
        std::mem::take(&mut *guard)
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
