//! Log-based error notifier.
//!
//! Implements [`ErrorNotifier`] by writing one warning per failed command
//! to the logger (UART / USB-CDC in production). Boards without a spare
//! LED use this on its own; others pair it with
//! [`PinNotifier`](super::pin_notifier::PinNotifier).

use log::warn;

use crate::error::DispatchError;
use crate::ports::ErrorNotifier;

/// Adapter that logs every receive error and keeps a running count.
#[derive(Debug, Default)]
pub struct LogNotifier {
    errors: u32,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors reported since construction.
    pub fn error_count(&self) -> u32 {
        self.errors
    }
}

impl ErrorNotifier for LogNotifier {
    fn on_receive_error(&mut self, error: &DispatchError) {
        self.errors = self.errors.wrapping_add(1);
        warn!("RC    | receive error #{}: {error}", self.errors);
    }
}
