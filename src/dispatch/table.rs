//! Per-operation thunk tables and the per-kind thunk generator.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  ThunkSet per entry (index = EntryId)                         │
//! │  ┌────┬───────────────────┬─────────────┬──────────────────┐  │
//! │  │ id │ receive           │ send        │ trigger          │  │
//! │  ├────┼───────────────────┼─────────────┼──────────────────┤  │
//! │  │ 0  │ receive_value     │ send_value  │ —                │  │
//! │  │ 1  │ receive_value     │ send_value  │ —                │  │
//! │  │ 2  │ receive_unit      │ send_value  │ —                │  │
//! │  │ 3  │ —                 │ —           │ trigger_action   │  │
//! │  └────┴───────────────────┴─────────────┴──────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! A thunk is a plain `fn` pointer that calls back into the descriptor
//! through [`Accessor`].  Lookup is a bounds-checked index, O(1).
//!
//! The resolved kind decides which tables an entry occupies.  How the
//! value reaches device state (in-place cell, object method, free
//! function) is fixed by the descriptor type behind the trait object, so
//! the thunk bodies are the same for every non-error kind.

use core::fmt;

use crate::channel::DataChannel;
use crate::entry::access::Accessor;
use crate::entry::{AccessPattern, EntryId, EntryKind, EntryShape, MAX_ENTRIES};
use crate::error::DispatchError;

/// The three things a host can ask of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Receive,
    Send,
    Trigger,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Receive => "receive",
            Self::Send => "send",
            Self::Trigger => "trigger",
        })
    }
}

// ---------------------------------------------------------------------------
// Thunk signatures
// ---------------------------------------------------------------------------

/// Host → device: consume a value from the channel into device state.
pub type ReceiveThunk<C> =
    fn(&dyn Accessor<C>, EntryId, &mut C, &mut dyn DataChannel) -> Result<(), DispatchError>;

/// Device → host: write the entry's current value to the channel.
pub type SendThunk<C> =
    fn(&dyn Accessor<C>, EntryId, &mut C, &mut dyn DataChannel) -> Result<(), DispatchError>;

/// Run the entry's action. No channel I/O.
pub type TriggerThunk<C> = fn(&dyn Accessor<C>, EntryId, &mut C) -> Result<(), DispatchError>;

fn receive_value<C>(
    entry: &dyn Accessor<C>,
    id: EntryId,
    ctx: &mut C,
    channel: &mut dyn DataChannel,
) -> Result<(), DispatchError> {
    if channel.is_at_line_end() {
        return Err(DispatchError::ShortRead { entry: id });
    }
    entry
        .apply(ctx, channel)
        .map_err(|e| DispatchError::from_codec(id, Operation::Receive, e))
}

/// Unit receive: the setter takes nothing, so nothing is read.
fn receive_unit<C>(
    entry: &dyn Accessor<C>,
    id: EntryId,
    ctx: &mut C,
    channel: &mut dyn DataChannel,
) -> Result<(), DispatchError> {
    entry
        .apply(ctx, channel)
        .map_err(|e| DispatchError::from_codec(id, Operation::Receive, e))
}

fn send_value<C>(
    entry: &dyn Accessor<C>,
    id: EntryId,
    ctx: &mut C,
    channel: &mut dyn DataChannel,
) -> Result<(), DispatchError> {
    entry
        .emit(ctx, channel)
        .map_err(|e| DispatchError::from_codec(id, Operation::Send, e))
}

fn trigger_action<C>(
    entry: &dyn Accessor<C>,
    id: EntryId,
    ctx: &mut C,
) -> Result<(), DispatchError> {
    entry
        .invoke(ctx)
        .map_err(|e| DispatchError::from_codec(id, Operation::Trigger, e))
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// One row of the dispatch tables: the thunks bound for a single entry.
pub struct ThunkSet<C> {
    pub receive: Option<ReceiveThunk<C>>,
    pub send: Option<SendThunk<C>>,
    pub trigger: Option<TriggerThunk<C>>,
}

/// Select thunks for a resolved entry. [`EntryKind::Error`] binds nothing.
pub fn generate<C>(kind: EntryKind, shape: &EntryShape) -> ThunkSet<C> {
    let receive: ReceiveThunk<C> = if shape.arg_type().is_void() {
        receive_unit::<C>
    } else {
        receive_value::<C>
    };
    let value_pair = ThunkSet {
        receive: Some(receive),
        send: Some(send_value::<C>),
        trigger: None,
    };

    match kind {
        EntryKind::Error => ThunkSet {
            receive: None,
            send: None,
            trigger: None,
        },
        EntryKind::GlobalFunctions if shape.pattern() == AccessPattern::NoArgAction => ThunkSet {
            receive: None,
            send: None,
            trigger: Some(trigger_action::<C>),
        },
        EntryKind::ObjectSetterGetter | EntryKind::GlobalIntrinsic | EntryKind::GlobalFunctions => {
            value_pair
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchTable
// ---------------------------------------------------------------------------

/// Id-indexed table for one [`Operation`]. Built once, never mutated.
pub struct DispatchTable<T> {
    slots: heapless::Vec<Option<T>, MAX_ENTRIES>,
}

impl<T: Copy> DispatchTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
        }
    }

    /// Append the slot for the next id. Returns the slot back when full.
    pub fn push(&mut self, slot: Option<T>) -> Result<(), Option<T>> {
        self.slots.push(slot)
    }

    /// Thunk bound at `id`, if any.
    pub fn get(&self, id: EntryId) -> Option<T> {
        self.slots.get(usize::from(id)).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: Copy> Default for DispatchTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
