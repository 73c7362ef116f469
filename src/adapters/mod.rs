//! Adapters: concrete implementations of the data channel and port traits.
//!
//! | Adapter         | Implements     | Connects to                     |
//! |-----------------|----------------|---------------------------------|
//! | `console_lines` | (line framing) | Non-blocking console reader     |
//! | `line_channel`  | DataChannel    | One buffered serial-console line|
//! | `log_notifier`  | ErrorNotifier  | Serial log output               |
//! | `pin_notifier`  | ErrorNotifier  | Indicator LED (embedded-hal)    |

pub mod console_lines;
pub mod line_channel;
pub mod log_notifier;
pub mod pin_notifier;
