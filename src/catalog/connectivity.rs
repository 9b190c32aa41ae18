//! Connectivity oracle consulted before every catalog request.

use std::sync::atomic::{AtomicBool, Ordering};

/// Answers "can the catalog be reached right now?".
pub trait Connectivity: Send + Sync {
    fn is_reachable(&self) -> bool;
}

/// Reachability flag owned by the host application.
///
/// Starts reachable. The host flips it from its own network-status source;
/// the catalog client only reads it.
///
/// # Examples
///
/// ```
/// use giveaway::catalog::{Connectivity, NetworkMonitor};
///
/// let monitor = NetworkMonitor::default();
/// assert!(monitor.is_reachable());
/// monitor.set_reachable(false);
/// assert!(!monitor.is_reachable());
/// ```
#[derive(Debug)]
pub struct NetworkMonitor {
    reachable: AtomicBool,
}

impl NetworkMonitor {
    #[must_use]
    pub const fn new(reachable: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        let previous = self.reachable.swap(reachable, Ordering::SeqCst);
        if previous != reachable {
            tracing::info!(reachable, "network reachability changed");
        }
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for NetworkMonitor {
    fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}
