//! Dispatch generator: turns a descriptor table into an immutable registry.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Build (once)                           │
//! │                                                              │
//! │  RegistryBuilder ──▶ classify ──▶ generate ──▶ Registry      │
//! │   .entry(..)         (per id)     (thunks)     receive table │
//! │   .entry(..)                                   send table    │
//! │   .build()                                     trigger table │
//! └──────────────────────────────────────────────────────────────┘
//!
//!   host command ──▶ Registry::{receive, send, trigger}(id) ──▶ thunk
//! ```
//!
//! `build()` is the validation pass: the first unresolvable descriptor
//! fails the whole table and nothing is generated. A built [`Registry`]
//! never changes and is `Send + Sync`; device state is threaded through
//! every call as `&mut C`.

pub mod table;

use log::{debug, info, warn};

use crate::channel::DataChannel;
use crate::config::UnknownEntryPolicy;
use crate::entry::access::Accessor;
use crate::entry::classify::resolve;
use crate::entry::{EntryId, EntryKind, EntryShape, MAX_ENTRIES};
use crate::error::{DispatchError, Error, Result};
use crate::ports::ErrorNotifier;

use table::{DispatchTable, Operation, ReceiveThunk, SendThunk, TriggerThunk, generate};

type EntryList<C> = heapless::Vec<Box<dyn Accessor<C>>, MAX_ENTRIES>;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects descriptors in declaration order. Position is the wire id.
pub struct RegistryBuilder<C> {
    entries: EntryList<C>,
    dropped: usize,
    unknown_entry: UnknownEntryPolicy,
}

impl<C> RegistryBuilder<C> {
    pub fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
            dropped: 0,
            unknown_entry: UnknownEntryPolicy::default(),
        }
    }

    /// Append the next entry; it receives id `previous count`.
    #[must_use]
    pub fn entry(mut self, entry: impl Accessor<C> + 'static) -> Self {
        if self.entries.push(Box::new(entry)).is_err() {
            self.dropped += 1;
        }
        self
    }

    #[must_use]
    pub fn unknown_entry_policy(mut self, policy: UnknownEntryPolicy) -> Self {
        self.unknown_entry = policy;
        self
    }

    /// Resolve every entry and generate the dispatch tables.
    pub fn build(self) -> Result<Registry<C>> {
        if self.dropped > 0 {
            warn!(
                "registry: {} entries declared, capacity is {MAX_ENTRIES}",
                MAX_ENTRIES + self.dropped
            );
            return Err(Error::TableFull {
                capacity: MAX_ENTRIES,
            });
        }

        let mut kinds = heapless::Vec::new();
        let mut receive = DispatchTable::new();
        let mut send = DispatchTable::new();
        let mut trigger = DispatchTable::new();

        for (index, entry) in self.entries.iter().enumerate() {
            let id = index as EntryId;
            let shape = entry.shape();
            let kind = resolve(id, &shape).inspect_err(|e| warn!("registry: {e}"))?;
            let thunks = generate::<C>(kind, &shape);
            debug!(
                "registry: entry {id} {:?} ({}) -> {kind:?}",
                shape.pattern(),
                shape.object_name()
            );

            // Capacities match `entries`, so these cannot overflow.
            let full = Error::TableFull {
                capacity: MAX_ENTRIES,
            };
            kinds.push(kind).map_err(|_| full)?;
            receive.push(thunks.receive).map_err(|_| full)?;
            send.push(thunks.send).map_err(|_| full)?;
            trigger.push(thunks.trigger).map_err(|_| full)?;
        }

        info!("registry: built {} entries", self.entries.len());
        Ok(Registry {
            entries: self.entries,
            kinds,
            receive,
            send,
            trigger,
            unknown_entry: self.unknown_entry,
        })
    }
}

impl<C> Default for RegistryBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable id → thunk tables for receive, send and trigger.
pub struct Registry<C> {
    entries: EntryList<C>,
    kinds: heapless::Vec<EntryKind, MAX_ENTRIES>,
    receive: DispatchTable<ReceiveThunk<C>>,
    send: DispatchTable<SendThunk<C>>,
    trigger: DispatchTable<TriggerThunk<C>>,
    unknown_entry: UnknownEntryPolicy,
}

impl<C> Registry<C> {
    pub fn builder() -> RegistryBuilder<C> {
        RegistryBuilder::new()
    }

    /// Same tables, different out-of-range id handling.
    #[must_use]
    pub fn with_unknown_entry_policy(mut self, policy: UnknownEntryPolicy) -> Self {
        self.unknown_entry = policy;
        self
    }

    pub fn unknown_entry_policy(&self) -> UnknownEntryPolicy {
        self.unknown_entry
    }

    /// Host → device: decode a value from `channel` into entry `id`.
    pub fn receive(
        &self,
        id: EntryId,
        ctx: &mut C,
        channel: &mut dyn DataChannel,
        notifier: &mut dyn ErrorNotifier,
    ) -> Result<()> {
        let result = self
            .lookup(id, Operation::Receive, &self.receive)
            .and_then(|(entry, thunk)| thunk(entry, id, ctx, channel));
        self.finish(id, Operation::Receive, result, notifier)
    }

    /// Device → host: encode entry `id`'s current value to `channel`.
    pub fn send(
        &self,
        id: EntryId,
        ctx: &mut C,
        channel: &mut dyn DataChannel,
        notifier: &mut dyn ErrorNotifier,
    ) -> Result<()> {
        let result = self
            .lookup(id, Operation::Send, &self.send)
            .and_then(|(entry, thunk)| thunk(entry, id, ctx, channel));
        self.finish(id, Operation::Send, result, notifier)
    }

    /// Run entry `id`'s action.
    pub fn trigger(
        &self,
        id: EntryId,
        ctx: &mut C,
        notifier: &mut dyn ErrorNotifier,
    ) -> Result<()> {
        let result = self
            .lookup(id, Operation::Trigger, &self.trigger)
            .and_then(|(entry, thunk)| thunk(entry, id, ctx));
        self.finish(id, Operation::Trigger, result, notifier)
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn kind(&self, id: EntryId) -> Option<EntryKind> {
        self.kinds.get(usize::from(id)).copied()
    }

    pub fn shape(&self, id: EntryId) -> Option<EntryShape> {
        self.entries.get(usize::from(id)).map(|e| e.shape())
    }

    /// `(id, shape)` for every entry in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (EntryId, EntryShape)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, e)| (index as EntryId, e.shape()))
    }

    fn lookup<T: Copy>(
        &self,
        id: EntryId,
        operation: Operation,
        table: &DispatchTable<T>,
    ) -> core::result::Result<(&dyn Accessor<C>, T), DispatchError> {
        let entry = self
            .entries
            .get(usize::from(id))
            .ok_or(DispatchError::UnknownEntry { entry: id })?;
        let thunk = table
            .get(id)
            .ok_or(DispatchError::NotApplicable {
                entry: id,
                operation,
            })?;
        Ok((entry.as_ref(), thunk))
    }

    /// Log the outcome and notify per the error class.
    fn finish(
        &self,
        id: EntryId,
        operation: Operation,
        result: core::result::Result<(), DispatchError>,
        notifier: &mut dyn ErrorNotifier,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                debug!("dispatch: {operation} entry {id}");
                Ok(())
            }
            Err(e) => {
                report(&e, self.unknown_entry, notifier);
                Err(e.into())
            }
        }
    }
}

/// Log a dispatch failure and fire the notifier when the error class calls
/// for it.
pub(crate) fn report(
    error: &DispatchError,
    policy: UnknownEntryPolicy,
    notifier: &mut dyn ErrorNotifier,
) {
    match error {
        DispatchError::NotApplicable { .. } => debug!("dispatch: {error}"),
        DispatchError::UnknownEntry { .. } if policy == UnknownEntryPolicy::Ignore => {
            debug!("dispatch: {error} (ignored)");
        }
        _ => {
            warn!("dispatch: {error}");
            notifier.on_receive_error(error);
        }
    }
}
