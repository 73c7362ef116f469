//! Typed descriptors, one per access pattern.
//!
//! Each descriptor captures plain function pointers into the device
//! context `C`, so descriptors are `Send + Sync` regardless of `C` and a
//! built registry can be shared freely.  State is only ever reached
//! through the `&mut C` handed to [`Accessor::apply`] / [`Accessor::emit`]
//! / [`Accessor::invoke`] at dispatch time.
//!
//! Decoding always completes before the target is touched: a short read
//! in the middle of an aggregate leaves device state as it was.

use core::marker::PhantomData;

use crate::channel::DataChannel;
use crate::codec::{TypeTag, WireValue};
use crate::error::CodecError;

use super::{EntryShape, Member, Target};

/// Uniform runtime face of a descriptor.
///
/// The dispatch generator never inspects concrete descriptor types; it
/// picks thunks from the resolved kind and the [`EntryShape`], and the
/// thunks call back through this trait.
pub trait Accessor<C>: Send + Sync {
    /// Shape reported to the classifier and the help emitter.
    fn shape(&self) -> EntryShape;

    /// Decode the entry's value from `channel` and store it.
    ///
    /// Descriptors without a setter report [`CodecError::Unsupported`].
    fn apply(&self, _ctx: &mut C, _channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        Err(CodecError::Unsupported)
    }

    /// Read the entry's value and encode it to `channel`.
    fn emit(&self, _ctx: &mut C, _channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        Err(CodecError::Unsupported)
    }

    /// Run the entry's action.
    fn invoke(&self, _ctx: &mut C) -> Result<(), CodecError> {
        Err(CodecError::Unsupported)
    }
}

fn member<V: WireValue>(name: &'static str) -> Member {
    Member {
        name,
        value: TypeTag::of::<V>(),
    }
}

fn void_member(name: &'static str) -> Member {
    Member {
        name,
        value: TypeTag::void(),
    }
}

// ---------------------------------------------------------------------------
// DirectVariable
// ---------------------------------------------------------------------------

/// A typed cell inside the context, read and written in place.
pub struct DirectVariable<C, V> {
    name: &'static str,
    cell: fn(&mut C) -> &mut V,
}

impl<C, V> DirectVariable<C, V> {
    pub const fn new(name: &'static str, cell: fn(&mut C) -> &mut V) -> Self {
        Self { name, cell }
    }
}

impl<C, V: WireValue> Accessor<C> for DirectVariable<C, V> {
    fn shape(&self) -> EntryShape {
        EntryShape {
            target: Target::Object(self.name),
            value_type: TypeTag::of::<V>(),
            getter: None,
            setter: None,
        }
    }

    fn apply(&self, ctx: &mut C, channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        let value = V::decode(channel)?;
        *(self.cell)(ctx) = value;
        Ok(())
    }

    fn emit(&self, ctx: &mut C, channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        (self.cell)(ctx).encode(channel);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ObjectAccessorPair
// ---------------------------------------------------------------------------

/// Getter/setter methods on an object owned by the context.
///
/// `V` is the declared value type; `G` and `S` are what the getter
/// returns and the setter accepts.  They normally coincide, and the
/// classifier rejects the entry when they do not.
pub struct ObjectAccessorPair<C, O, V, G = V, S = V> {
    object: &'static str,
    project: fn(&mut C) -> &mut O,
    getter: Option<(&'static str, fn(&O) -> G)>,
    setter: Option<(&'static str, fn(&mut O, S))>,
    _value: PhantomData<fn() -> V>,
}

impl<C, O, G, S> ObjectAccessorPair<C, O, G, G, S> {
    /// Full pair; the declared type is the getter's return type.
    pub const fn new(
        object: &'static str,
        project: fn(&mut C) -> &mut O,
        getter: (&'static str, fn(&O) -> G),
        setter: (&'static str, fn(&mut O, S)),
    ) -> Self {
        Self {
            object,
            project,
            getter: Some(getter),
            setter: Some(setter),
            _value: PhantomData,
        }
    }
}

impl<C, O, G> ObjectAccessorPair<C, O, G, G, G> {
    pub const fn getter_only(
        object: &'static str,
        project: fn(&mut C) -> &mut O,
        getter: (&'static str, fn(&O) -> G),
    ) -> Self {
        Self {
            object,
            project,
            getter: Some(getter),
            setter: None,
            _value: PhantomData,
        }
    }

    pub const fn setter_only(
        object: &'static str,
        project: fn(&mut C) -> &mut O,
        setter: (&'static str, fn(&mut O, G)),
    ) -> Self {
        Self {
            object,
            project,
            getter: None,
            setter: Some(setter),
            _value: PhantomData,
        }
    }
}

impl<C, O, V, G, S> ObjectAccessorPair<C, O, V, G, S> {
    /// Override the declared value type.
    pub fn declare<W>(self) -> ObjectAccessorPair<C, O, W, G, S> {
        ObjectAccessorPair {
            object: self.object,
            project: self.project,
            getter: self.getter,
            setter: self.setter,
            _value: PhantomData,
        }
    }
}

impl<C, O, V, G, S> Accessor<C> for ObjectAccessorPair<C, O, V, G, S>
where
    V: WireValue,
    G: WireValue,
    S: WireValue,
{
    fn shape(&self) -> EntryShape {
        EntryShape {
            target: Target::Object(self.object),
            value_type: TypeTag::of::<V>(),
            getter: self.getter.map(|(name, _)| member::<G>(name)),
            setter: self.setter.map(|(name, _)| member::<S>(name)),
        }
    }

    fn apply(&self, ctx: &mut C, channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        let (_, set) = self.setter.ok_or(CodecError::Unsupported)?;
        let value = S::decode(channel)?;
        set((self.project)(ctx), value);
        Ok(())
    }

    fn emit(&self, ctx: &mut C, channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        let (_, get) = self.getter.ok_or(CodecError::Unsupported)?;
        get((self.project)(ctx)).encode(channel);
        Ok(())
    }
}

/// Object accessor pair whose getter and setter carry no value.
///
/// Receive calls the setter without touching the channel, so the pair
/// behaves like a trigger; send calls the getter and emits nothing.
pub struct ObjectUnitPair<C, O> {
    object: &'static str,
    project: fn(&mut C) -> &mut O,
    getter: (&'static str, fn(&O)),
    setter: (&'static str, fn(&mut O)),
}

impl<C, O> ObjectUnitPair<C, O> {
    pub const fn new(
        object: &'static str,
        project: fn(&mut C) -> &mut O,
        getter: (&'static str, fn(&O)),
        setter: (&'static str, fn(&mut O)),
    ) -> Self {
        Self {
            object,
            project,
            getter,
            setter,
        }
    }
}

impl<C, O> Accessor<C> for ObjectUnitPair<C, O> {
    fn shape(&self) -> EntryShape {
        EntryShape {
            target: Target::Object(self.object),
            value_type: TypeTag::void(),
            getter: Some(void_member(self.getter.0)),
            setter: Some(void_member(self.setter.0)),
        }
    }

    fn apply(&self, ctx: &mut C, _channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        (self.setter.1)((self.project)(ctx));
        Ok(())
    }

    fn emit(&self, ctx: &mut C, _channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        (self.getter.1)((self.project)(ctx));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GlobalFunctionPair
// ---------------------------------------------------------------------------

/// Free getter/setter functions with no owning object.
pub struct GlobalFunctionPair<V, G = V, S = V> {
    getter: Option<(&'static str, fn() -> G)>,
    setter: Option<(&'static str, fn(S))>,
    _value: PhantomData<fn() -> V>,
}

impl<G, S> GlobalFunctionPair<G, G, S> {
    pub const fn new(getter: (&'static str, fn() -> G), setter: (&'static str, fn(S))) -> Self {
        Self {
            getter: Some(getter),
            setter: Some(setter),
            _value: PhantomData,
        }
    }
}

impl<G> GlobalFunctionPair<G, G, G> {
    pub const fn getter_only(getter: (&'static str, fn() -> G)) -> Self {
        Self {
            getter: Some(getter),
            setter: None,
            _value: PhantomData,
        }
    }

    pub const fn setter_only(setter: (&'static str, fn(G))) -> Self {
        Self {
            getter: None,
            setter: Some(setter),
            _value: PhantomData,
        }
    }
}

impl<V, G, S> GlobalFunctionPair<V, G, S> {
    /// Override the declared value type.
    pub fn declare<W>(self) -> GlobalFunctionPair<W, G, S> {
        GlobalFunctionPair {
            getter: self.getter,
            setter: self.setter,
            _value: PhantomData,
        }
    }
}

impl<C, V, G, S> Accessor<C> for GlobalFunctionPair<V, G, S>
where
    V: WireValue,
    G: WireValue,
    S: WireValue,
{
    fn shape(&self) -> EntryShape {
        EntryShape {
            target: Target::Free,
            value_type: TypeTag::of::<V>(),
            getter: self.getter.map(|(name, _)| member::<G>(name)),
            setter: self.setter.map(|(name, _)| member::<S>(name)),
        }
    }

    fn apply(&self, _ctx: &mut C, channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        let (_, set) = self.setter.ok_or(CodecError::Unsupported)?;
        set(S::decode(channel)?);
        Ok(())
    }

    fn emit(&self, _ctx: &mut C, channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        let (_, get) = self.getter.ok_or(CodecError::Unsupported)?;
        get().encode(channel);
        Ok(())
    }
}

/// Free getter/setter functions that carry no value.
pub struct GlobalUnitPair {
    getter: (&'static str, fn()),
    setter: (&'static str, fn()),
}

impl GlobalUnitPair {
    pub const fn new(getter: (&'static str, fn()), setter: (&'static str, fn())) -> Self {
        Self { getter, setter }
    }
}

impl<C> Accessor<C> for GlobalUnitPair {
    fn shape(&self) -> EntryShape {
        EntryShape {
            target: Target::Free,
            value_type: TypeTag::void(),
            getter: Some(void_member(self.getter.0)),
            setter: Some(void_member(self.setter.0)),
        }
    }

    fn apply(&self, _ctx: &mut C, _channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        (self.setter.1)();
        Ok(())
    }

    fn emit(&self, _ctx: &mut C, _channel: &mut dyn DataChannel) -> Result<(), CodecError> {
        (self.getter.1)();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NoArgAction
// ---------------------------------------------------------------------------

/// A zero-argument action; reachable only through trigger.
pub struct NoArgAction<C> {
    name: &'static str,
    action: fn(&mut C),
}

impl<C> NoArgAction<C> {
    pub const fn new(name: &'static str, action: fn(&mut C)) -> Self {
        Self { name, action }
    }
}

impl<C> Accessor<C> for NoArgAction<C> {
    fn shape(&self) -> EntryShape {
        EntryShape {
            target: Target::Action(self.name),
            value_type: TypeTag::void(),
            getter: None,
            setter: None,
        }
    }

    fn invoke(&self, ctx: &mut C) -> Result<(), CodecError> {
        (self.action)(ctx);
        Ok(())
    }
}
