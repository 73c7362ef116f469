//! Unified error types for the remote-control core.
//!
//! A single `Error` enum that every stage (table definition, dispatch,
//! configuration) converts into, so the command router and the firmware
//! entry point handle failures uniformly.  All variants are `Copy`; the
//! diagnostics they carry are `&'static str` names taken from the
//! descriptor table, never heap strings.

use core::fmt;

use crate::dispatch::table::Operation;
use crate::entry::EntryId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A descriptor could not be resolved to a dispatch strategy.
    Definition(DefinitionError),
    /// More descriptors were declared than the registry can hold.
    TableFull { capacity: usize },
    /// A command could not be dispatched.
    Dispatch(DispatchError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Definition(e) => write!(f, "definition: {e}"),
            Self::TableFull { capacity } => {
                write!(f, "definition: table full (capacity {capacity} entries)")
            }
            Self::Dispatch(e) => write!(f, "dispatch: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Definition errors
// ---------------------------------------------------------------------------

/// An entry whose shape matched no dispatch strategy.
///
/// Names the offending descriptor so the integrator can find it in the
/// table: `object` is the owning field (or `<free>` for free functions),
/// `getter`/`setter` are the member names (`<none>` when absent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionError {
    pub entry: EntryId,
    pub object: &'static str,
    pub getter: &'static str,
    pub setter: &'static str,
    pub value_type: &'static str,
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} has no matching dispatch strategy (object={}, getter={}, setter={}, type={})",
            self.entry, self.object, self.getter, self.setter, self.value_type
        )
    }
}

impl From<DefinitionError> for Error {
    fn from(e: DefinitionError) -> Self {
        Self::Definition(e)
    }
}

// ---------------------------------------------------------------------------
// Dispatch errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The channel hit end-of-line before the entry's value was complete.
    ShortRead { entry: EntryId },
    /// A value token was present but did not decode to the entry's type.
    Malformed { entry: EntryId },
    /// The id is outside the declared table.
    UnknownEntry { entry: EntryId },
    /// The entry exists but has no thunk for this operation.
    NotApplicable { entry: EntryId, operation: Operation },
    /// The command carried no entry id.
    MissingEntryId,
    /// The entry id token did not decode to a `u8`.
    MalformedEntryId,
}

impl DispatchError {
    pub(crate) fn from_codec(entry: EntryId, operation: Operation, e: CodecError) -> Self {
        match e {
            CodecError::ShortRead => Self::ShortRead { entry },
            CodecError::Malformed => Self::Malformed { entry },
            CodecError::Unsupported => Self::NotApplicable { entry, operation },
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortRead { entry } => write!(f, "short read on entry {entry}"),
            Self::Malformed { entry } => write!(f, "malformed value for entry {entry}"),
            Self::UnknownEntry { entry } => write!(f, "unknown entry {entry}"),
            Self::NotApplicable { entry, operation } => {
                write!(f, "entry {entry} does not support {operation}")
            }
            Self::MissingEntryId => write!(f, "missing entry id"),
            Self::MalformedEntryId => write!(f, "malformed entry id"),
        }
    }
}

impl From<DispatchError> for Error {
    fn from(e: DispatchError) -> Self {
        Self::Dispatch(e)
    }
}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

/// Failure to pull a value off the data channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// No more data on the current line.
    ShortRead,
    /// Data present but not decodable as the requested type.
    Malformed,
    /// The descriptor has no member for this direction.
    Unsupported,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortRead => write!(f, "short read"),
            Self::Malformed => write!(f, "malformed value"),
            Self::Unsupported => write!(f, "unsupported operation"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
