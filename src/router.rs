//! Command router: the entry point the host-command layer calls.
//!
//! ```text
//!   "remote_control help"          ──▶ help listing
//!   "remote_control"      + "<id> <value…>" ──▶ receive(id)
//!   "remote_control send" + "<id>"          ──▶ send(id)
//!   "remote_control trigger" + "<id>"       ──▶ trigger(id)
//!   anything else                  ──▶ Ignored (another handler may claim it)
//! ```
//!
//! Exactly one entry per command line. The keyword may follow the prefix
//! after any whitespace or a dot (`remote_control.send`).

use log::{debug, info};

use crate::channel::DataChannel;
use crate::codec::WireValue;
use crate::config::RemoteControlConfig;
use crate::dispatch::table::Operation;
use crate::dispatch::{Registry, report};
use crate::entry::EntryId;
use crate::error::{CodecError, DispatchError, Error, Result};
use crate::help::emit_help;
use crate::ports::ErrorNotifier;

/// What became of one command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not addressed to this extension.
    Ignored,
    /// Help listing written.
    Help,
    /// The entry's thunk ran.
    Dispatched { operation: Operation, entry: EntryId },
    /// Addressed to this extension but not carried out.
    Rejected(Error),
}

/// Configured router over a built registry.
pub struct RemoteControl<C> {
    config: RemoteControlConfig,
    registry: Registry<C>,
}

impl<C> RemoteControl<C> {
    pub fn new(config: RemoteControlConfig, registry: Registry<C>) -> Result<Self> {
        config.validate()?;
        let registry = registry.with_unknown_entry_policy(config.unknown_entry);
        info!(
            "remote control: listening on '{}' ({} entries, help {})",
            config.command_prefix,
            registry.len(),
            if config.help_enabled { "on" } else { "off" }
        );
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &RemoteControlConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    /// Route one command. `command` is the command name (prefix plus
    /// optional keyword); its arguments are read from `channel`.
    pub fn handle_command(
        &self,
        command: &str,
        ctx: &mut C,
        channel: &mut dyn DataChannel,
        notifier: &mut dyn ErrorNotifier,
    ) -> CommandOutcome {
        let Some(keyword) = self.keyword(command) else {
            return CommandOutcome::Ignored;
        };

        let operation = match keyword {
            "" => Operation::Receive,
            "send" => Operation::Send,
            "trigger" => Operation::Trigger,
            "help" if self.config.help_enabled => {
                emit_help(&self.registry, channel);
                return CommandOutcome::Help;
            }
            _ => {
                debug!("remote control: unhandled keyword '{keyword}'");
                return CommandOutcome::Ignored;
            }
        };

        let id = match read_entry_id(channel) {
            Ok(id) => id,
            Err(e) => {
                report(&e, self.registry.unknown_entry_policy(), notifier);
                return CommandOutcome::Rejected(e.into());
            }
        };

        let result = match operation {
            Operation::Receive => self.registry.receive(id, ctx, channel, notifier),
            Operation::Send => self
                .registry
                .send(id, ctx, channel, notifier)
                .map(|()| channel.end_line()),
            Operation::Trigger => self.registry.trigger(id, ctx, notifier),
        };

        match result {
            Ok(()) => CommandOutcome::Dispatched {
                operation,
                entry: id,
            },
            Err(e) => CommandOutcome::Rejected(e),
        }
    }

    /// Keyword following the prefix, `""` for none, `None` if the command
    /// is not ours.
    fn keyword<'a>(&self, command: &'a str) -> Option<&'a str> {
        let rest = command.trim().strip_prefix(self.config.command_prefix.as_str())?;
        if rest.is_empty() {
            return Some("");
        }
        let keyword = rest
            .strip_prefix(|c: char| c == '.' || c.is_whitespace())?
            .trim();
        Some(keyword)
    }
}

fn read_entry_id(channel: &mut dyn DataChannel) -> core::result::Result<EntryId, DispatchError> {
    if channel.is_at_line_end() {
        return Err(DispatchError::MissingEntryId);
    }
    EntryId::decode(channel).map_err(|e| match e {
        CodecError::ShortRead => DispatchError::MissingEntryId,
        CodecError::Malformed | CodecError::Unsupported => DispatchError::MalformedEntryId,
    })
}

/// Split a raw host line into `(command, arguments)`.
///
/// The command is the first token, extended by the second when that one
/// starts with a letter (`remote_control help`). Entry ids are numeric, so
/// they always land in the arguments.
pub fn split_command_line(line: &str) -> (&str, &str) {
    let line = line.trim();
    let first_end = line.find(char::is_whitespace).unwrap_or(line.len());
    let after_first = line[first_end..].trim_start();

    if after_first.starts_with(|c: char| c.is_alphabetic()) {
        let offset = line.len() - after_first.len();
        let second_len = after_first
            .find(char::is_whitespace)
            .unwrap_or(after_first.len());
        let command_end = offset + second_len;
        return (&line[..command_end], line[command_end..].trim_start());
    }
    (&line[..first_end], after_first)
}
