//! Entry descriptors: the declarative table the integrator submits.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Descriptor table (declaration order = wire id)                   │
//! │  ┌────┬──────────────────────┬───────────┬──────────┬──────────┐  │
//! │  │ id │ target               │ getter    │ setter   │ value    │  │
//! │  ├────┼──────────────────────┼───────────┼──────────┼──────────┤  │
//! │  │ 0  │ Object("led")        │ brightness│ set_brig…│ u8       │  │
//! │  │ 1  │ Object("counter")    │ —         │ —        │ u16      │  │
//! │  │ 2  │ Free                 │ speed     │ set_speed│ u16      │  │
//! │  │ 3  │ Action("reboot")     │ —         │ —        │ void     │  │
//! │  └────┴──────────────────────┴───────────┴──────────┴──────────┘  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nobody tags an entry with its dispatch strategy. Each descriptor only
//! reports its [`EntryShape`] (what it targets, which accessor members it
//! has and what types they carry) and [`classify`](classify::classify)
//! decides the [`EntryKind`].

pub mod access;
pub mod classify;

use crate::codec::TypeTag;

/// Wire id of an entry: its zero-based declaration index.
pub type EntryId = u8;

/// Maximum number of entries a registry holds.
pub const MAX_ENTRIES: usize = 64;

// ---------------------------------------------------------------------------
// Classification output
// ---------------------------------------------------------------------------

/// The dispatch strategy an entry resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// No strategy matches; the table must not be built.
    Error,
    /// Getter/setter methods on an owned object.
    ObjectSetterGetter,
    /// Free getter/setter functions, or a free action.
    GlobalFunctions,
    /// Direct read/write of a typed cell, no accessor call.
    GlobalIntrinsic,
}

/// How a descriptor reaches its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    DirectVariable,
    ObjectAccessorPair,
    GlobalFunctionPair,
    NoArgAction,
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// What a descriptor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// An addressable object (or plain value) inside the device context.
    Object(&'static str),
    /// Free functions with no owning object.
    Free,
    /// A zero-argument callable.
    Action(&'static str),
}

/// A named accessor member and the value type it produces or accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub value: TypeTag,
}

/// Everything the classifier needs to know about a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryShape {
    pub target: Target,
    /// The declared wire type.
    pub value_type: TypeTag,
    /// Getter member and the type it returns.
    pub getter: Option<Member>,
    /// Setter member and the type it accepts.
    pub setter: Option<Member>,
}

impl EntryShape {
    pub fn pattern(&self) -> AccessPattern {
        match self.target {
            Target::Object(_) if self.getter.is_none() && self.setter.is_none() => {
                AccessPattern::DirectVariable
            }
            Target::Object(_) => AccessPattern::ObjectAccessorPair,
            Target::Free => AccessPattern::GlobalFunctionPair,
            Target::Action(_) => AccessPattern::NoArgAction,
        }
    }

    /// Type consumed by a receive: the setter's argument, or the declared
    /// type when the value is written directly.
    pub fn arg_type(&self) -> TypeTag {
        match self.target {
            Target::Action(_) => TypeTag::void(),
            _ => self.setter.map_or(self.value_type, |m| m.value),
        }
    }

    /// Type produced by a send: the getter's result, or the declared type
    /// when the value is read directly.
    pub fn return_type(&self) -> TypeTag {
        match self.target {
            Target::Action(_) => TypeTag::void(),
            _ => self.getter.map_or(self.value_type, |m| m.value),
        }
    }

    /// `<free>` for free functions; the object or action name otherwise.
    pub fn object_name(&self) -> &'static str {
        match self.target {
            Target::Object(name) | Target::Action(name) => name,
            Target::Free => "<free>",
        }
    }

    pub fn getter_name(&self) -> &'static str {
        self.getter.map_or("<none>", |m| m.name)
    }

    pub fn setter_name(&self) -> &'static str {
        self.setter.map_or("<none>", |m| m.name)
    }
}
