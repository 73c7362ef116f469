//! Console line assembler.
//!
//! The console reader is non-blocking: one poll may return half a command,
//! `WouldBlock`, then the rest.  Bytes are accumulated here across polls
//! and a line is handed out only once its `\n` has arrived.
//!
//! ```text
//!   "remote_con" ─┐
//!   WouldBlock    ├──▶ pending ──▶ "remote_control help"
//!   "trol help\n" ┘
//! ```

use std::io::{BufRead, ErrorKind};

use log::warn;

/// Longest accepted console line, terminator excluded.
pub const MAX_LINE_LEN: usize = 256;

/// Accumulates console bytes until a full line is available.
#[derive(Debug, Default)]
pub struct ConsoleLines {
    pending: heapless::Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl ConsoleLines {
    pub const fn new() -> Self {
        Self {
            pending: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Drain whatever `reader` has ready.
    ///
    /// Returns the next complete line without its terminator, or `None`
    /// when the reader would block or is at EOF. A partial line stays
    /// pending for the next call. Lines longer than [`MAX_LINE_LEN`] are
    /// dropped whole.
    pub fn poll<R: BufRead>(&mut self, reader: &mut R) -> std::io::Result<Option<String>> {
        loop {
            let available = match reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                    return Ok(None);
                }
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(None);
            }

            let (used, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.extend(&available[..end]);
                    (end + 1, true)
                }
                None => {
                    self.extend(available);
                    (available.len(), false)
                }
            };
            reader.consume(used);

            if complete {
                if let Some(line) = self.take_line() {
                    return Ok(Some(line));
                }
            }
        }
    }

    /// Bytes buffered towards the next line.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    fn extend(&mut self, bytes: &[u8]) {
        if self.overflowed {
            return;
        }
        if self.pending.extend_from_slice(bytes).is_err() {
            self.overflowed = true;
        }
    }

    fn take_line(&mut self) -> Option<String> {
        let line = if self.overflowed {
            warn!("console: line longer than {MAX_LINE_LEN} bytes dropped");
            None
        } else {
            let text = String::from_utf8_lossy(&self.pending);
            Some(text.trim_end_matches('\r').to_owned())
        };
        self.pending.clear();
        self.overflowed = false;
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{BufReader, Read};

    /// Reader that replays chunks; `None` is a `WouldBlock`.
    struct Scripted(VecDeque<Option<&'static str>>);

    impl Scripted {
        fn new(script: &[Option<&'static str>]) -> BufReader<Self> {
            BufReader::new(Self(script.iter().copied().collect()))
        }
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.pop_front() {
                Some(Some(chunk)) => {
                    buf[..chunk.len()].copy_from_slice(chunk.as_bytes());
                    Ok(chunk.len())
                }
                Some(None) => Err(ErrorKind::WouldBlock.into()),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn partial_input_survives_would_block() {
        let mut reader = Scripted::new(&[Some("remote_con"), None, Some("trol help\n")]);
        let mut lines = ConsoleLines::new();

        assert_eq!(lines.poll(&mut reader).unwrap(), None);
        assert_eq!(lines.pending(), b"remote_con");
        assert_eq!(
            lines.poll(&mut reader).unwrap().as_deref(),
            Some("remote_control help")
        );
        assert!(lines.pending().is_empty());
    }

    #[test]
    fn one_chunk_can_carry_several_lines() {
        let mut reader = Scripted::new(&[Some("remote_control 0 1\r\nremote_control send 0\n")]);
        let mut lines = ConsoleLines::new();

        assert_eq!(
            lines.poll(&mut reader).unwrap().as_deref(),
            Some("remote_control 0 1")
        );
        assert_eq!(
            lines.poll(&mut reader).unwrap().as_deref(),
            Some("remote_control send 0")
        );
        assert_eq!(lines.poll(&mut reader).unwrap(), None);
    }

    #[test]
    fn eof_keeps_partial_line() {
        let mut reader = Scripted::new(&[Some("remote_control 1")]);
        let mut lines = ConsoleLines::new();
        assert_eq!(lines.poll(&mut reader).unwrap(), None);
        assert_eq!(lines.pending(), b"remote_control 1");
    }

    #[test]
    fn overlong_line_is_dropped_and_next_line_is_clean() {
        let long: &'static str = "x".repeat(MAX_LINE_LEN + 10).leak();
        let mut reader = Scripted::new(&[Some(long), Some("\nremote_control help\n")]);
        let mut lines = ConsoleLines::new();

        assert_eq!(
            lines.poll(&mut reader).unwrap().as_deref(),
            Some("remote_control help")
        );
    }

    #[test]
    fn hard_errors_propagate_without_losing_input() {
        struct Failing(u8);

        impl Read for Failing {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                self.0 += 1;
                let chunk = match self.0 {
                    1 => "remote_",
                    2 => return Err(ErrorKind::BrokenPipe.into()),
                    3 => "control\n",
                    _ => return Ok(0),
                };
                buf[..chunk.len()].copy_from_slice(chunk.as_bytes());
                Ok(chunk.len())
            }
        }

        let mut reader = BufReader::new(Failing(0));
        let mut lines = ConsoleLines::new();
        assert!(lines.poll(&mut reader).is_err());
        assert_eq!(
            lines.poll(&mut reader).unwrap().as_deref(),
            Some("remote_control")
        );
    }
}
