//! Port traits: the boundary between the dispatcher and its side effects.
//!
//! ```text
//!   Registry / Router ──▶ ErrorNotifier ──▶ adapter (log line, LED pulse, …)
//! ```
//!
//! The dispatcher decides *when* a host error is worth signalling; adapters
//! decide *how*. See [`crate::adapters`] for the stock implementations.

use crate::error::DispatchError;

/// Signals a failed receive to whoever is watching the device.
pub trait ErrorNotifier {
    /// Called exactly once per failed command, after which dispatch for
    /// that command is abandoned.
    fn on_receive_error(&mut self, error: &DispatchError);
}

/// Notifier that does nothing.
pub struct NullNotifier;

impl ErrorNotifier for NullNotifier {
    fn on_receive_error(&mut self, _error: &DispatchError) {}
}

/// Fan a notification out to two notifiers.
impl<A: ErrorNotifier, B: ErrorNotifier> ErrorNotifier for (A, B) {
    fn on_receive_error(&mut self, error: &DispatchError) {
        self.0.on_receive_error(error);
        self.1.on_receive_error(error);
    }
}
