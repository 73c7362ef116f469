//! Text data channel over one buffered command line.
//!
//! Input is the argument text of a host line, split on whitespace into
//! decimal tokens. Output accumulates in memory as space-separated tokens;
//! `end_line` terminates the response with `\n`. The console loop flushes
//! [`LineChannel::take_output`] to the serial port after each command.

use core::fmt::{Display, Write};
use core::iter::Peekable;
use core::str::{FromStr, SplitWhitespace};

use crate::channel::DataChannel;
use crate::error::CodecError;

pub struct LineChannel<'a> {
    tokens: Peekable<SplitWhitespace<'a>>,
    output: String,
    line_open: bool,
}

impl<'a> LineChannel<'a> {
    pub fn new(args: &'a str) -> Self {
        Self {
            tokens: args.split_whitespace().peekable(),
            output: String::new(),
            line_open: false,
        }
    }

    /// Everything sent so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Drain the response buffer.
    pub fn take_output(&mut self) -> String {
        self.line_open = false;
        core::mem::take(&mut self.output)
    }

    fn read<T: FromStr>(&mut self) -> Result<T, CodecError> {
        let token = self.tokens.next().ok_or(CodecError::ShortRead)?;
        token.parse().map_err(|_| CodecError::Malformed)
    }

    fn push(&mut self, value: impl Display) {
        if self.line_open {
            self.output.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = write!(self.output, "{value}");
        self.line_open = true;
    }
}

impl DataChannel for LineChannel<'_> {
    fn read_unsigned(&mut self) -> Result<u64, CodecError> {
        self.read()
    }

    fn read_signed(&mut self) -> Result<i64, CodecError> {
        self.read()
    }

    fn read_float(&mut self) -> Result<f32, CodecError> {
        self.read()
    }

    fn send_unsigned(&mut self, value: u64) {
        self.push(value);
    }

    fn send_signed(&mut self, value: i64) {
        self.push(value);
    }

    fn send_float(&mut self, value: f32) {
        self.push(value);
    }

    fn send_text(&mut self, text: &str) {
        self.push(text);
    }

    fn is_at_line_end(&mut self) -> bool {
        self.tokens.peek().is_none()
    }

    fn end_line(&mut self) {
        self.output.push('\n');
        self.line_open = false;
    }
}
