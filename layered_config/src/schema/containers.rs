//! Pointer-like and collection types that cannot be set from a string.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::{Configurable, FieldDecl, Shape, describe_unsupported};
use crate::catalog::{CatalogBuilder, GroupDescriptor, Projection};

macro_rules! unsupported_types {
    ($( [$($params:tt)*] $ty:ty ),+ $(,)?) => {
        $(
            impl<$($params)*> Configurable for $ty {
                const SHAPE: Shape = Shape::Leaf;

                fn describe<R: 'static>(
                    builder: &mut CatalogBuilder<R>,
                    decl: FieldDecl,
                    parent: Option<&Rc<GroupDescriptor>>,
                    _project: &Projection<R, Self>,
                ) {
                    describe_unsupported::<R, Self>(builder, decl, parent);
                }
            }
        )+
    };
}

unsupported_types! {
    [T: 'static] Option<T>,
    [T: 'static] Box<T>,
    [T: 'static] Vec<T>,
    [K: 'static, V: 'static, S: 'static] HashMap<K, V, S>,
    [K: 'static, V: 'static] BTreeMap<K, V>,
}
