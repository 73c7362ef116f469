//! Kind classifier: decides an entry's dispatch strategy from its shape.
//!
//! Fixed priority cascade, evaluated once per entry before anything is
//! dispatched:
//!
//! ```text
//!  Object target ──┬─ getter + setter, both of declared type ──▶ ObjectSetterGetter
//!                  ├─ no getter, no setter ────────────────────▶ GlobalIntrinsic
//!                  └─ anything else ───────────────────────────▶ Error
//!
//!  Free target ────┬─ getter + setter, round-trip declared type ▶ GlobalFunctions
//!                  └─ anything else ───────────────────────────▶ Error
//!
//!  Action target ─────────────────────────────────────────────▶ GlobalFunctions
//! ```
//!
//! An object that carries accessor members which do not fit is an
//! authoring error, while an object with no members at all is a plain
//! value written in place. Hence the asymmetric object branch.

use super::{EntryId, EntryKind, EntryShape, Target};
use crate::error::DefinitionError;

/// Resolve a shape to exactly one [`EntryKind`]. Pure and total.
pub fn classify(shape: &EntryShape) -> EntryKind {
    match shape.target {
        Target::Object(_) => classify_object(shape),
        Target::Free => classify_free(shape),
        Target::Action(_) => EntryKind::GlobalFunctions,
    }
}

/// Classify, turning [`EntryKind::Error`] into a diagnostic that names the
/// offending descriptor.
pub fn resolve(id: EntryId, shape: &EntryShape) -> Result<EntryKind, DefinitionError> {
    match classify(shape) {
        EntryKind::Error => Err(DefinitionError {
            entry: id,
            object: shape.object_name(),
            getter: shape.getter_name(),
            setter: shape.setter_name(),
            value_type: shape.value_type.name(),
        }),
        kind => Ok(kind),
    }
}

fn classify_object(shape: &EntryShape) -> EntryKind {
    match (shape.getter, shape.setter) {
        (Some(get), Some(set))
            if get.value == shape.value_type && set.value == shape.value_type =>
        {
            EntryKind::ObjectSetterGetter
        }
        (None, None) => EntryKind::GlobalIntrinsic,
        _ => EntryKind::Error,
    }
}

fn classify_free(shape: &EntryShape) -> EntryKind {
    match (shape.getter, shape.setter) {
        // Setter must accept what the getter returns.
        (Some(get), Some(set)) if set.value == get.value && get.value == shape.value_type => {
            EntryKind::GlobalFunctions
        }
        _ => EntryKind::Error,
    }
}
