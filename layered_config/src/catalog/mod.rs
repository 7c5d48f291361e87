//! Field catalog construction.
//!
//! A [`Catalog`] is the flat, declaration-ordered list of every settable leaf
//! in a configuration record. It is built from the descriptor tables emitted
//! by `#[derive(Configurable)]`: each record registers its children with a
//! [`CatalogBuilder`], recursing into nested groups. Regular groups become a
//! [`GroupDescriptor`] that namespaces their children; flattened groups add no
//! descriptor, so their children report the enclosing group as parent.

mod descriptor;

pub use descriptor::{FieldDescriptor, GroupDescriptor};

use std::any::type_name;
use std::rc::Rc;

use crate::coerce::{FieldKind, FieldSlot};
use crate::error::{LoadError, LoadResult};
use crate::schema::{Configurable, FieldDecl, Shape};

/// Projection from a root record `R` to a nested value `T`.
pub type Projection<R, T> = Rc<dyn for<'r> Fn(&'r mut R) -> &'r mut T>;

/// Location handle resolving a leaf field of `R` to a writable slot.
pub type Location<R> = Rc<dyn for<'r> Fn(&'r mut R) -> FieldSlot<'r>>;

/// Wrap a closure as a [`Projection`].
pub fn projection<R, T, F>(project: F) -> Projection<R, T>
where
    F: for<'r> Fn(&'r mut R) -> &'r mut T + 'static,
    R: ?Sized,
    T: ?Sized,
{
    Rc::new(project)
}

/// Wrap a closure as a [`Location`].
pub fn location<R, F>(locate: F) -> Location<R>
where
    F: for<'r> Fn(&'r mut R) -> FieldSlot<'r> + 'static,
    R: ?Sized,
{
    Rc::new(locate)
}

/// Accumulates descriptors while a record describes its fields.
pub struct CatalogBuilder<R> {
    fields: Vec<FieldDescriptor<R>>,
}

impl<R: 'static> CatalogBuilder<R> {
    const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Compose `outer` with a field accessor, yielding a projection to the
    /// field itself.
    pub fn nest<T, U, F>(outer: &Projection<R, T>, field: F) -> Projection<R, U>
    where
        T: 'static,
        U: 'static,
        F: for<'t> Fn(&'t mut T) -> &'t mut U + 'static,
    {
        let to_parent = Rc::clone(outer);
        projection(move |root: &mut R| field(to_parent(root)))
    }

    /// Register a leaf field.
    pub fn leaf(
        &mut self,
        decl: FieldDecl,
        parent: Option<&Rc<GroupDescriptor>>,
        kind: FieldKind,
        type_name: &'static str,
        location: Location<R>,
    ) {
        self.fields.push(FieldDescriptor::new(
            decl,
            parent.cloned(),
            kind,
            type_name,
            location,
        ));
    }

    /// Register a nested group and recurse into its children.
    ///
    /// Embedded groups contribute no name segment: their children are
    /// attached to `parent` directly.
    pub fn group<T: Configurable>(
        &mut self,
        decl: FieldDecl,
        parent: Option<&Rc<GroupDescriptor>>,
        project: &Projection<R, T>,
    ) {
        if decl.embedded {
            T::describe_fields(self, parent, project);
            return;
        }
        let anchor = Rc::new(GroupDescriptor::new(decl.name, parent.cloned()));
        T::describe_fields(self, Some(&anchor), project);
    }
}

/// Ordered list of the settable leaves of a record `R`.
pub struct Catalog<R> {
    fields: Vec<FieldDescriptor<R>>,
}

impl<R: Configurable> Catalog<R> {
    /// Enumerate the leaves of `R` in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidTarget`] when `R` is a leaf type rather
    /// than a record with named fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::{Catalog, Configurable};
    ///
    /// #[derive(Configurable)]
    /// struct Auth {
    ///     user: String,
    /// }
    ///
    /// #[derive(Configurable)]
    /// struct App {
    ///     port: u16,
    ///     auth: Auth,
    /// }
    ///
    /// let catalog = Catalog::<App>::build()?;
    /// let names: Vec<_> = catalog.iter().map(|field| field.full_name()).collect();
    /// assert_eq!(names, ["port", "auth.user"]);
    /// # Ok::<(), layered_config::LoadError>(())
    /// ```
    pub fn build() -> LoadResult<Self> {
        if R::SHAPE != Shape::Group {
            return Err(LoadError::InvalidTarget {
                type_name: type_name::<R>(),
            });
        }
        let mut builder = CatalogBuilder::new();
        R::describe_fields(&mut builder, None, &projection(|root: &mut R| root));
        Ok(Self {
            fields: builder.fields,
        })
    }
}

impl<R> Catalog<R> {
    /// Iterate descriptors in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor<R>> {
        self.fields.iter()
    }

    /// Number of leaves.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no settable leaves.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find a leaf by its dotted name.
    #[must_use]
    pub fn find(&self, dotted_name: &str) -> Option<&FieldDescriptor<R>> {
        self.fields
            .iter()
            .find(|field| field.full_name() == dotted_name)
    }
}

impl<'a, R> IntoIterator for &'a Catalog<R> {
    type Item = &'a FieldDescriptor<R>;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R> std::fmt::Debug for Catalog<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}
