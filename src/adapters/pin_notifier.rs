//! Error LED notifier.
//!
//! Lights an indicator pin for [`ERROR_PULSE_MS`] after each receive
//! error. Non-blocking: the main loop calls [`PinNotifier::tick`] with the
//! elapsed time and the pin is released once the pulse has run out. A new
//! error while lit restarts the pulse.
//!
//! Generic over `embedded-hal` 1.0 [`OutputPin`], so the same adapter drives
//! an ESP-IDF `PinDriver` on target and a mock in host tests.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::DispatchError;
use crate::ports::ErrorNotifier;

/// How long the indicator stays lit after an error.
pub const ERROR_PULSE_MS: u32 = 500;

pub struct PinNotifier<P> {
    pin: P,
    /// Remaining lit time; 0 when idle.
    remaining_ms: u32,
}

impl<P: OutputPin> PinNotifier<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            remaining_ms: 0,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.remaining_ms > 0
    }

    /// Advance the pulse timer.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.remaining_ms == 0 {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 && self.pin.set_low().is_err() {
            warn!("RC    | error LED: set_low failed");
        }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ErrorNotifier for PinNotifier<P> {
    fn on_receive_error(&mut self, _error: &DispatchError) {
        if self.pin.set_high().is_err() {
            warn!("RC    | error LED: set_high failed");
            return;
        }
        self.remaining_ms = ERROR_PULSE_MS;
    }
}
