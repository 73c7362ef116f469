//! Remote-control configuration
//!
//! Tunable behaviour of the command router. Values can be loaded from a
//! JSON provisioning blob or persisted to NVS as postcard bytes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Command name the router answers to unless configured otherwise.
pub const DEFAULT_COMMAND_PREFIX: &str = "remote_control";

/// What to do with an entry id outside the declared table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownEntryPolicy {
    /// No-op, and the error notifier fires once.
    #[default]
    Notify,
    /// No-op, logged only.
    Ignore,
}

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteControlConfig {
    /// Command name that selects this extension on the host line
    pub command_prefix: heapless::String<24>,
    /// Answer `<prefix> help` with the entry listing
    pub help_enabled: bool,
    /// Handling of out-of-range entry ids
    pub unknown_entry: UnknownEntryPolicy,
}

impl Default for RemoteControlConfig {
    fn default() -> Self {
        let mut command_prefix = heapless::String::new();
        // Fits: 14 bytes into 24.
        let _ = command_prefix.push_str(DEFAULT_COMMAND_PREFIX);
        Self {
            command_prefix,
            help_enabled: true,
            unknown_entry: UnknownEntryPolicy::default(),
        }
    }
}

impl RemoteControlConfig {
    /// Reject settings the router cannot work with.
    pub fn validate(&self) -> Result<()> {
        let prefix = self.command_prefix.as_str();
        if prefix.is_empty() {
            return Err(Error::Config("command prefix is empty"));
        }
        if !prefix.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(Error::Config("command prefix must be printable ASCII without spaces"));
        }
        // '.' separates the prefix from a keyword.
        if prefix.contains('.') {
            return Err(Error::Config("command prefix must not contain '.'"));
        }
        Ok(())
    }

    /// Parse and validate a JSON provisioning blob.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON config"))?;
        config.validate()?;
        Ok(config)
    }

    /// Encode for NVS storage.
    pub fn to_postcard(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Config("postcard encode failed"))
    }

    /// Decode and validate bytes previously written by [`Self::to_postcard`].
    pub fn from_postcard(bytes: &[u8]) -> Result<Self> {
        let config: Self =
            postcard::from_bytes(bytes).map_err(|_| Error::Config("malformed stored config"))?;
        config.validate()?;
        Ok(config)
    }
}
