//! Login navigation
//!
//! When a session cannot be renewed the gateway asks the host application to
//! show its login view. The host decides what that means (route change,
//! window swap, CLI prompt).

use tokio::sync::watch;

/// Receives "go to login" requests from the gateway
pub trait LoginNavigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Only logs the request; for hosts without a login view
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl LoginNavigator for LogNavigator {
    fn redirect_to_login(&self) {
        tracing::warn!("Session expired, login required");
    }
}

/// Publishes a redirect counter on a watch channel
///
/// Views subscribe and switch to the login screen whenever the value changes.
#[derive(Debug)]
pub struct WatchNavigator {
    tx: watch::Sender<u64>,
}

impl WatchNavigator {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    /// Number of redirects requested so far
    pub fn redirects(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl Default for WatchNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginNavigator for WatchNavigator {
    fn redirect_to_login(&self) {
        tracing::warn!("Session expired, redirecting to login");
        self.tx.send_modify(|n| *n += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_navigator_counts() {
        let nav = WatchNavigator::new();
        let rx = nav.subscribe();
        assert_eq!(nav.redirects(), 0);

        nav.redirect_to_login();
        nav.redirect_to_login();

        assert_eq!(nav.redirects(), 2);
        assert!(rx.has_changed().unwrap());
    }
}
