//! Data channel abstraction: the typed, line-oriented serial link.
//!
//! The physical transport and line framing live outside this crate. The
//! dispatcher only needs a handful of typed primitives plus end-of-line
//! detection; the on-wire encoding of those primitives is the channel's
//! business.
//!
//! Concrete implementations:
//! - [`LineChannel`](crate::adapters::line_channel::LineChannel): decimal
//!   tokens over one buffered command line (host serial console)
//! - [`NullChannel`]: reads nothing, discards everything

use crate::error::CodecError;

/// Typed read/send primitives over the current command line.
///
/// Reads are non-blocking: they consume whatever is buffered for the
/// current line and report [`CodecError::ShortRead`] once it is exhausted.
pub trait DataChannel {
    /// Read the next value as an unsigned integer.
    fn read_unsigned(&mut self) -> Result<u64, CodecError>;

    /// Read the next value as a signed integer.
    fn read_signed(&mut self) -> Result<i64, CodecError>;

    /// Read the next value as a float.
    fn read_float(&mut self) -> Result<f32, CodecError>;

    fn send_unsigned(&mut self, value: u64);

    fn send_signed(&mut self, value: i64);

    fn send_float(&mut self, value: f32);

    /// Send free-form text (help output, diagnostics).
    fn send_text(&mut self, text: &str);

    /// `true` once every value on the current line has been consumed.
    fn is_at_line_end(&mut self) -> bool;

    /// Terminate the current response line.
    fn end_line(&mut self);
}

/// A channel with an always-empty input line that discards all output.
/// Useful as a default when no host is attached.
pub struct NullChannel;

impl DataChannel for NullChannel {
    fn read_unsigned(&mut self) -> Result<u64, CodecError> {
        Err(CodecError::ShortRead)
    }

    fn read_signed(&mut self) -> Result<i64, CodecError> {
        Err(CodecError::ShortRead)
    }

    fn read_float(&mut self) -> Result<f32, CodecError> {
        Err(CodecError::ShortRead)
    }

    fn send_unsigned(&mut self, _value: u64) {}

    fn send_signed(&mut self, _value: i64) {}

    fn send_float(&mut self, _value: f32) {}

    fn send_text(&mut self, _text: &str) {}

    fn is_at_line_end(&mut self) -> bool {
        true
    }

    fn end_line(&mut self) {}
}
