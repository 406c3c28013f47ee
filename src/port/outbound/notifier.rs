//! Notifier port for valuation alerts.
//!
//! Notifications are fire-and-forget: the sampler never waits on delivery
//! and delivery failures never fail a cycle.

use rust_decimal::Decimal;

/// Events that can trigger notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The total worth moved by at least the alert threshold.
    ValuationMoved(MoveEvent),
    /// A sampling cycle failed.
    CycleFailed {
        /// The error, rendered for humans.
        reason: String,
    },
}

/// Threshold-crossing move of the portfolio's total worth.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEvent {
    /// Absolute change against the previous sample.
    pub delta: Decimal,
    /// Change as a percentage of the previous sample.
    pub percent: Decimal,
    /// Total worth of the new sample.
    pub total_worth: Decimal,
}

impl MoveEvent {
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.percent.is_sign_negative() && !self.percent.is_zero()
    }
}

/// Trait for notification handlers.
///
/// `notify` must return quickly. Implementations that do slow I/O should
/// queue the event for a background task.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        self.notify_all(event);
    }
}

/// A no-op notifier for when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that records events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::{debug, info};
        match event {
            Event::ValuationMoved(e) => {
                info!(
                    delta = %e.delta,
                    percent = %e.percent,
                    total_worth = %e.total_worth,
                    "Valuation alert"
                );
            }
            Event::CycleFailed { reason } => {
                debug!(reason = %reason, "Failure event dispatched");
            }
        }
    }
}
