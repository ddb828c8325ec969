//! Attribute descriptors: `{id, name, dataType, hook?}`.

use crate::arena::ArenaHandle;
use std::sync::Arc;

/// The data type an attribute's values must match. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Double,
    /// UTF-8 string.
    String,
    /// Arbitrary byte sequence.
    Binary,
    /// Reference to another entity, by id.
    Entity,
}

/// A callback fired synchronously, under the store's write lock, after a
/// value of this attribute is added.
///
/// The original C-style hook took an opaque `userdata` pointer alongside the
/// attribute and record; in Rust that role is played by whatever state the
/// closure captures, so there is no separate `userdata` parameter here.
///
/// # Re-entrancy
///
/// The hook runs while the store's write lock is held. It must not call
/// back into the owning [`crate::Store`] — doing so will deadlock.
pub type Hook = Arc<dyn Fn(&AttributeView, &crate::catalog::value::ValueView) + Send + Sync>;

#[derive(Clone)]
pub(crate) struct Attribute {
    pub id: u64,
    pub name: ArenaHandle,
    pub data_type: DataType,
    pub hook: Option<Hook>,
}

/// Owned snapshot of an attribute, safe to hold after the store's lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeView {
    /// Attribute id.
    pub id: u64,
    /// Attribute name (globally unique).
    pub name: String,
    /// The data type values of this attribute must carry.
    pub data_type: DataType,
}
