//! Descriptors for leaves and groups in a catalog.

use std::fmt;
use std::rc::Rc;

use crate::coerce::{FieldKind, FieldSlot};
use crate::schema::FieldDecl;

use super::Location;

/// Naming anchor for a nested, non-embedded group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDescriptor {
    name: &'static str,
    parent: Option<Rc<GroupDescriptor>>,
}

impl GroupDescriptor {
    pub(super) const fn new(name: &'static str, parent: Option<Rc<Self>>) -> Self {
        Self { name, parent }
    }

    /// Local name of the group field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Enclosing group, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Root-to-group path joined with `.`.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_path(self.name, self.parent())
    }
}

/// One settable leaf of a record `R`.
pub struct FieldDescriptor<R> {
    name: &'static str,
    parent: Option<Rc<GroupDescriptor>>,
    kind: FieldKind,
    type_name: &'static str,
    location: Location<R>,
    default_value: &'static str,
}

impl<R> FieldDescriptor<R> {
    pub(super) fn new(
        decl: FieldDecl,
        parent: Option<Rc<GroupDescriptor>>,
        kind: FieldKind,
        type_name: &'static str,
        location: Location<R>,
    ) -> Self {
        Self {
            name: decl.name,
            parent,
            kind,
            type_name,
            location,
            default_value: decl.default_value,
        }
    }

    /// Local name of the field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Enclosing group, if any. Embedded groups are never reported here.
    #[must_use]
    pub fn parent(&self) -> Option<&GroupDescriptor> {
        self.parent.as_deref()
    }

    /// Semantic kind of the field.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Rust type name of the field, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Raw default annotation; empty when none was declared.
    #[must_use]
    pub const fn default_value(&self) -> &'static str {
        self.default_value
    }

    /// Root-to-leaf path joined with `.`.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_path(self.name, self.parent())
    }

    /// Borrow the field inside `record` as a writable slot.
    pub fn slot<'r>(&self, record: &'r mut R) -> FieldSlot<'r> {
        (self.location)(record)
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.full_name())
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

fn join_path(leaf: &'static str, parent: Option<&GroupDescriptor>) -> String {
    let mut segments = vec![leaf];
    let mut cursor = parent;
    while let Some(group) = cursor {
        segments.push(group.name);
        cursor = group.parent();
    }
    segments.reverse();
    segments.join(".")
}
