//! Remote-control entry dispatch library.
//!
//! Declare a table of controllable quantities once; get a bidirectional
//! dispatcher that writes host values into device state (receive), reports
//! state back (send) and runs actions (trigger), keyed by a numeric entry id.
//!
//! Pure logic only. The ESP-IDF console binary lives in `main.rs` behind
//! the `espidf` feature; everything here builds and tests on the host.

#![deny(unused_must_use)]

#[macro_use]
mod macros;

pub mod adapters;
pub mod channel;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod help;
pub mod ports;
pub mod router;

pub use dispatch::{Registry, RegistryBuilder};
pub use error::{Error, Result};
pub use router::{CommandOutcome, RemoteControl};
