//! # Session State & Reconciliation
//!
//! The record set the operator is looking at, plus which record they
//! picked. All mutation funnels through here; there are no ambient
//! globals, and each mutation is a single `&mut` call so a reader never
//! observes a half-applied scan.

use spoolwatch_common::holder::Holder;
use spoolwatch_common::network::endpoint::Endpoint;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    holders: Vec<Holder>,
    selected: Option<Endpoint>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current records in arrival order.
    pub fn holders(&self) -> &[Holder] {
        &self.holders
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Identity keys of everything currently known; the candidate list of
    /// a targeted refresh.
    pub fn known_endpoints(&self) -> Vec<Endpoint> {
        self.holders.iter().map(|h| h.endpoint).collect()
    }

    /// The selected record, resolved against the current set.
    pub fn selected(&self) -> Option<&Holder> {
        let endpoint = self.selected?;
        self.holders.iter().find(|h| h.endpoint == endpoint)
    }

    pub fn selected_endpoint(&self) -> Option<Endpoint> {
        self.selected
    }

    /// Moves the selection; refused for endpoints not in the current set.
    pub fn select(&mut self, endpoint: Endpoint) -> bool {
        if self.holders.iter().any(|h| h.endpoint == endpoint) {
            self.selected = Some(endpoint);
            true
        } else {
            false
        }
    }

    /// Folds a finished scan into the session.
    ///
    /// The stored set is replaced wholesale; mixing fields of an old
    /// reading into a fresh one would present a composite no device ever
    /// reported. Selection survives by identity: it stays on the same
    /// endpoint when the new set still carries it, falls back to the first
    /// arrival otherwise, and clears when nothing answered.
    pub fn reconcile(&mut self, fresh: Vec<Holder>) {
        let prior = self.selected;
        self.holders = fresh;

        self.selected = match prior {
            Some(endpoint) if self.holders.iter().any(|h| h.endpoint == endpoint) => {
                Some(endpoint)
            }
            _ => self.holders.first().map(|h| h.endpoint),
        };
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

    fn ep(d: u8) -> Endpoint {
        Endpoint::new(Ipv4Addr::new(192, 168, 1, d), 80)
    }

    fn holder(d: u8, net_g: f64) -> Holder {
        let mut holder = Holder::new(ep(d));
        holder.net_g = net_g;
        holder
    }

    #[test]
    fn first_scan_selects_the_first_arrival() {
        let mut session = SessionState::new();
        session.reconcile(vec![holder(10, 100.0), holder(11, 200.0)]);

        assert_eq!(session.selected_endpoint(), Some(ep(10)));
        assert_eq!(session.holders().len(), 2);
    }

    #[test]
    fn selection_survives_a_rescan_by_identity() {
        let mut session = SessionState::new();
        session.reconcile(vec![holder(10, 100.0), holder(11, 200.0)]);
        assert!(session.select(ep(11)));

        // Same device shows up re-ordered and with a fresh reading.
        session.reconcile(vec![holder(11, 150.0), holder(10, 100.0)]);

        let selected = session.selected().unwrap();
        assert_eq!(selected.endpoint, ep(11));
        assert_eq!(selected.net_g, 150.0, "must be the fresh record, not the old one");
    }

    #[test]
    fn vanished_selection_falls_back_to_the_first_arrival() {
        let mut session = SessionState::new();
        session.reconcile(vec![holder(10, 100.0), holder(11, 200.0)]);
        assert!(session.select(ep(11)));

        session.reconcile(vec![holder(12, 50.0), holder(10, 100.0)]);

        assert_eq!(session.selected_endpoint(), Some(ep(12)));
    }

    #[test]
    fn empty_scan_clears_the_selection() {
        let mut session = SessionState::new();
        session.reconcile(vec![holder(10, 100.0)]);
        assert!(session.selected().is_some());

        session.reconcile(Vec::new());

        assert!(session.is_empty());
        assert_eq!(session.selected_endpoint(), None);
    }

    #[test]
    fn empty_refresh_of_an_empty_session_changes_nothing() {
        let mut session = SessionState::new();
        session.reconcile(Vec::new());

        assert!(session.is_empty());
        assert_eq!(session.selected_endpoint(), None);
        assert!(session.known_endpoints().is_empty());
    }

    #[test]
    fn select_refuses_an_unknown_endpoint() {
        let mut session = SessionState::new();
        session.reconcile(vec![holder(10, 100.0)]);

        assert!(!session.select(ep(99)));
        assert_eq!(session.selected_endpoint(), Some(ep(10)));
    }
}
