//! Help / introspection emitter.
//!
//! One line per entry, in id order:
//!
//! ```text
//! 0: u8 -> u8
//! 1: u16 -> u16
//! 2: void -> void
//! 3: <unknown type> -> <unknown type>
//! ```
//!
//! The host uses this listing to learn the wire types; nothing is mutated.

use core::fmt::Write;

use log::warn;

use crate::channel::DataChannel;
use crate::dispatch::Registry;
use crate::entry::{EntryId, EntryShape};

/// Longest line: two-digit id plus two `<unknown type>` names.
const LINE_CAPACITY: usize = 48;

/// Format one help line.
pub fn help_line(id: EntryId, shape: &EntryShape) -> heapless::String<LINE_CAPACITY> {
    let mut line = heapless::String::new();
    if write!(
        line,
        "{id}: {} -> {}",
        shape.arg_type().name(),
        shape.return_type().name()
    )
    .is_err()
    {
        warn!("help: line for entry {id} truncated");
    }
    line
}

/// Write the listing for every entry to `channel`.
pub fn emit_help<C>(registry: &Registry<C>, channel: &mut dyn DataChannel) {
    for (id, shape) in registry.entries() {
        channel.send_text(&help_line(id, &shape));
        channel.end_line();
    }
}
