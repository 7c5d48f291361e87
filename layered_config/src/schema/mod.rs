//! The [`Configurable`] trait and its implementations for leaf types.
//!
//! Records implement the trait through `#[derive(Configurable)]`. Leaf types
//! such as integers, strings and [`Duration`] implement it here, as do the
//! container types the loader cannot populate from a string. Those
//! containers still enter the catalog so that a source targeting them fails
//! loudly with an unsupported-kind error instead of being ignored.

mod containers;

use std::any::type_name;
use std::rc::Rc;
use std::time::Duration;

use crate::catalog::{CatalogBuilder, GroupDescriptor, Projection, location};
use crate::coerce::{FieldKind, FieldSlot};

/// Whether a type is a record with fields or a single settable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A record whose fields are expanded into the catalog.
    Group,
    /// A single value coerced from a string.
    Leaf,
}

/// Static metadata for one field, emitted by the derive macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Local name segment.
    pub name: &'static str,
    /// Raw default annotation, empty when absent.
    pub default_value: &'static str,
    /// Whether the field is an embedded group that adds no name segment.
    pub embedded: bool,
}

impl FieldDecl {
    /// Declare a field named `name` with no default.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            default_value: "",
            embedded: false,
        }
    }

    /// Attach the raw default annotation.
    #[must_use]
    pub const fn with_default(mut self, default_value: &'static str) -> Self {
        self.default_value = default_value;
        self
    }

    /// Mark the field as an embedded group.
    #[must_use]
    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }
}

/// A type that can appear in a configuration catalog.
///
/// Derive it for records; leaf implementations are provided for `bool`, the
/// integer and float primitives, [`String`] and [`Duration`].
pub trait Configurable: Sized + 'static {
    /// Whether the type is a record or a leaf.
    const SHAPE: Shape;

    /// Register `Self` as the field `decl` of a root record `R`.
    fn describe<R: 'static>(
        builder: &mut CatalogBuilder<R>,
        decl: FieldDecl,
        parent: Option<&Rc<GroupDescriptor>>,
        project: &Projection<R, Self>,
    );

    /// Register the direct children of `Self` in declaration order.
    ///
    /// Leaves have no children and keep the empty default.
    fn describe_fields<R: 'static>(
        _builder: &mut CatalogBuilder<R>,
        _parent: Option<&Rc<GroupDescriptor>>,
        _project: &Projection<R, Self>,
    ) {
    }

    /// Move every field left out of the catalog from `previous` into `self`.
    ///
    /// The file stage decodes a fresh record, which resets skipped fields to
    /// whatever serde fills in. This puts the values they held before the
    /// stage back, recursing into nested records. Leaves keep the no-op.
    fn restore_skipped(&mut self, _previous: &mut Self) {}
}

macro_rules! leaf_types {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Configurable for $ty {
                const SHAPE: Shape = Shape::Leaf;

                fn describe<R: 'static>(
                    builder: &mut CatalogBuilder<R>,
                    decl: FieldDecl,
                    parent: Option<&Rc<GroupDescriptor>>,
                    project: &Projection<R, Self>,
                ) {
                    let to_field = Rc::clone(project);
                    builder.leaf(
                        decl,
                        parent,
                        FieldKind::$variant,
                        type_name::<$ty>(),
                        location(move |root: &mut R| FieldSlot::$variant(to_field(root))),
                    );
                }
            }
        )+
    };
}

leaf_types! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Str,
    Duration => Duration,
}

/// Register a leaf that no source can populate.
fn describe_unsupported<R: 'static, T: 'static>(
    builder: &mut CatalogBuilder<R>,
    decl: FieldDecl,
    parent: Option<&Rc<GroupDescriptor>>,
) {
    builder.leaf(
        decl,
        parent,
        FieldKind::Unsupported,
        type_name::<T>(),
        location(|_: &mut R| FieldSlot::Unsupported),
    );
}
