//! Value codec: typed adapters layered on the [`DataChannel`] primitives.
//!
//! Every type that can travel as an entry value implements [`WireValue`].
//! Narrow integers ride on the channel's 64-bit primitives and are range
//! checked on the way in; an out-of-range token is `Malformed`, never
//! silently truncated.
//!
//! | Rust type          | Channel primitive            | Help name        |
//! |--------------------|------------------------------|------------------|
//! | `u8`..`u64`        | `read/send_unsigned`         | `u8`..`u64`      |
//! | `i8`..`i64`        | `read/send_signed`           | `i8`..`i64`      |
//! | `bool`             | unsigned `0` / `1`           | `bool`           |
//! | `f32`              | `read/send_float`            | `f32`            |
//! | `()`               | nothing                      | `void`           |
//! | `[T; N]`, tuples   | each element in order        | `<unknown type>` |
//! | [`Packed<T>`]      | length + postcard bytes      | `<unknown type>` |

use core::any::TypeId;
use core::fmt;

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::channel::DataChannel;
use crate::error::CodecError;

/// Help-output name for types without a fixed mapping.
pub const UNKNOWN_TYPE: &str = "<unknown type>";

/// Largest postcard payload a [`Packed`] value may occupy (length is a `u8`).
pub const PACKED_MAX: usize = 255;

// ---------------------------------------------------------------------------
// WireValue
// ---------------------------------------------------------------------------

/// A value that can be decoded from and encoded to a [`DataChannel`].
pub trait WireValue: Sized + 'static {
    /// Fixed help-output name. `None` renders as [`UNKNOWN_TYPE`].
    const TYPE_NAME: Option<&'static str> = None;

    /// Decode one complete value. Must not have side effects beyond
    /// consuming channel input.
    fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError>;

    fn encode(&self, channel: &mut dyn DataChannel);
}

macro_rules! impl_unsigned {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl WireValue for $ty {
            const TYPE_NAME: Option<&'static str> = Some($name);

            fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
                let raw = channel.read_unsigned()?;
                <$ty>::try_from(raw).map_err(|_| CodecError::Malformed)
            }

            fn encode(&self, channel: &mut dyn DataChannel) {
                channel.send_unsigned(u64::from(*self));
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl WireValue for $ty {
            const TYPE_NAME: Option<&'static str> = Some($name);

            fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
                let raw = channel.read_signed()?;
                <$ty>::try_from(raw).map_err(|_| CodecError::Malformed)
            }

            fn encode(&self, channel: &mut dyn DataChannel) {
                channel.send_signed(i64::from(*self));
            }
        }
    )*};
}

impl_unsigned!(u8 => "u8", u16 => "u16", u32 => "u32", u64 => "u64");
impl_signed!(i8 => "i8", i16 => "i16", i32 => "i32", i64 => "i64");

impl WireValue for bool {
    const TYPE_NAME: Option<&'static str> = Some("bool");

    fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
        match channel.read_unsigned()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CodecError::Malformed),
        }
    }

    fn encode(&self, channel: &mut dyn DataChannel) {
        channel.send_unsigned(u64::from(*self));
    }
}

impl WireValue for f32 {
    const TYPE_NAME: Option<&'static str> = Some("f32");

    fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
        channel.read_float()
    }

    fn encode(&self, channel: &mut dyn DataChannel) {
        channel.send_float(*self);
    }
}

/// The no-value type: nothing is read, nothing is sent.
impl WireValue for () {
    const TYPE_NAME: Option<&'static str> = Some("void");

    fn decode(_channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
        Ok(())
    }

    fn encode(&self, _channel: &mut dyn DataChannel) {}
}

// ── Aggregates ────────────────────────────────────────────────

impl<T: WireValue + Copy + Default, const N: usize> WireValue for [T; N] {
    fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
        let mut out = [T::default(); N];
        for slot in &mut out {
            *slot = T::decode(channel)?;
        }
        Ok(out)
    }

    fn encode(&self, channel: &mut dyn DataChannel) {
        for item in self {
            item.encode(channel);
        }
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: WireValue),+> WireValue for ($($name,)+) {
            fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
                Ok(($($name::decode(channel)?,)+))
            }

            #[allow(non_snake_case)]
            fn encode(&self, channel: &mut dyn DataChannel) {
                let ($($name,)+) = self;
                $($name.encode(channel);)+
            }
        }
    };
}

impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);

/// A serde aggregate carried as a length-prefixed postcard blob.
///
/// Wire layout: one `u8` length followed by that many `u8` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Packed<T>(pub T);

impl<T> WireValue for Packed<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn decode(channel: &mut dyn DataChannel) -> Result<Self, CodecError> {
        let len = usize::from(u8::decode(channel)?);
        let mut buf = [0u8; PACKED_MAX];
        for byte in &mut buf[..len] {
            *byte = u8::decode(channel)?;
        }
        postcard::from_bytes(&buf[..len])
            .map(Packed)
            .map_err(|_| CodecError::Malformed)
    }

    fn encode(&self, channel: &mut dyn DataChannel) {
        let mut buf = [0u8; PACKED_MAX];
        match postcard::to_slice(&self.0, &mut buf) {
            Ok(bytes) => {
                (bytes.len() as u8).encode(channel);
                for byte in bytes.iter() {
                    byte.encode(channel);
                }
            }
            Err(e) => {
                warn!("codec: packed value does not fit {PACKED_MAX} bytes ({e:?})");
                0u8.encode(channel);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TypeTag
// ---------------------------------------------------------------------------

/// Identity of a wire type, used by the classifier for signature
/// compatibility and by the help emitter for naming.
///
/// Equality is by Rust type identity; the name is presentation only.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: Option<&'static str>,
}

impl TypeTag {
    pub fn of<V: WireValue>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: V::TYPE_NAME,
        }
    }

    /// Tag of the no-value type `()`.
    pub fn void() -> Self {
        Self::of::<()>()
    }

    pub fn is_void(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    /// Name from the fixed mapping, or [`UNKNOWN_TYPE`].
    pub fn name(&self) -> &'static str {
        self.name.unwrap_or(UNKNOWN_TYPE)
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
