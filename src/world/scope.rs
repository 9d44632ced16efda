//! Scoped world-event subscriptions.
//!
//! Subscriptions pair with view visibility: subscribe when the map view
//! becomes visible, unsubscribe when it hides or the session ends.
//! Dangling callbacks firing against a torn-down viewport are the primary
//! resource-leak hazard, so the subscription is a scope: dropping the
//! handle is the unsubscribe, and it runs even when detach is skipped on
//! an error path.

/// RAII handle for an active world-event subscription.
#[derive(Debug)]
pub struct EventScope {
    name: &'static str,
    detached: bool,
}

impl EventScope {
    /// Opens a subscription scope.
    pub fn subscribe(name: &'static str) -> Self {
        log::debug!("subscribed to {name}");
        Self {
            name,
            detached: false,
        }
    }

    /// Whether events should still be delivered through this scope.
    pub fn is_active(&self) -> bool {
        !self.detached
    }

    /// Explicit early unsubscribe. Idempotent; `Drop` covers the rest.
    pub fn detach(&mut self) {
        if !self.detached {
            self.detached = true;
            log::debug!("unsubscribed from {}", self.name);
        }
    }
}

impl Drop for EventScope {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_active_until_detach() {
        let mut scope = EventScope::subscribe("world-events");
        assert!(scope.is_active());
        scope.detach();
        assert!(!scope.is_active());
        // detach is idempotent
        scope.detach();
    }
}
