//! Descriptors of bean types and their properties.
//!
//! A [`BeanDescriptor`] is built once per type from its
//! [`BeanSchema`](crate::schema::BeanSchema): the properties are enumerated
//! in declaration order, each bound to an accessor of the requested
//! [`AccessorKind`], and the constructor used by builders is located.

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use bean_utils::hash::HashMap;

use crate::access::AccessorKind;
use crate::builder::{BeanBuilder, StringConverter};
use crate::info::Type;
use crate::schema::{BeanSchema, ConstructorDecl};
use crate::{Bean, BeanError, Value};

// -----------------------------------------------------------------------------
// Modules

mod construct;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub use property::{PropertyDescriptor, PropertyStyle};

// -----------------------------------------------------------------------------
// BeanDescriptor

/// The properties of one bean type.
///
/// Equality and hashing only consider the bean type.
///
/// # Examples
///
/// ```
/// use bean_meta::{BeanRegistry, derive::Bean};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Point {
///     #[property]
///     x: i32,
///     #[property]
///     y: i32,
/// }
///
/// let registry = BeanRegistry::new();
/// let descriptor = registry.lookup::<Point>().unwrap();
/// assert_eq!(descriptor.property_names().collect::<Vec<_>>(), ["x", "y"]);
/// assert!(descriptor.property("z").is_err());
///
/// let mut builder = descriptor.builder();
/// builder.set("x", 3).unwrap().set("y", 4).unwrap();
/// assert_eq!(builder.build_as::<Point>().unwrap(), Point { x: 3, y: 4 });
/// ```
pub struct BeanDescriptor {
    schema: &'static BeanSchema,
    kind: AccessorKind,
    properties: Vec<PropertyDescriptor>,
    index: HashMap<&'static str, usize>,
    constructor: usize,
    prototype: Vec<Option<Box<dyn Value>>>,
    converter: Arc<StringConverter>,
}

impl BeanDescriptor {
    /// Builds the descriptor of the type declared by `schema`.
    ///
    /// Prefer [`BeanRegistry::lookup`](crate::BeanRegistry::lookup), which
    /// builds each descriptor once.
    pub fn from_schema(schema: &'static BeanSchema, kind: AccessorKind) -> Result<Self, BeanError> {
        let layout = construct::layout(schema, kind)?;
        log::debug!(
            "described `{}` with {} properties ({kind:?})",
            schema.ty().path(),
            layout.properties.len(),
        );
        Ok(Self {
            schema,
            kind,
            properties: layout.properties,
            index: layout.index,
            constructor: layout.constructor,
            prototype: layout.prototype,
            converter: StringConverter::shared(),
        })
    }

    /// Replaces the converter used by [`BeanBuilder::set_string`].
    pub fn with_converter(mut self, converter: Arc<StringConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// The bean type.
    #[inline]
    pub fn ty(&self) -> &'static Type {
        self.schema.ty()
    }

    #[inline]
    pub fn schema(&self) -> &'static BeanSchema {
        self.schema
    }

    #[inline]
    pub fn accessor_kind(&self) -> AccessorKind {
        self.kind
    }

    /// Returns `true` if the bean is built through setters rather than a
    /// constructor.
    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.schema.is_mutable()
    }

    #[inline]
    pub fn converter(&self) -> &StringConverter {
        &self.converter
    }

    /// `true` while the descriptor parses text with the standard converter.
    pub(crate) fn has_standard_converter(&self) -> bool {
        Arc::ptr_eq(&self.converter, &StringConverter::shared())
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.properties.iter().map(PropertyDescriptor::name)
    }

    #[inline]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the property named `name`.
    pub fn property(&self, name: &str) -> Result<&PropertyDescriptor, BeanError> {
        self.find(name).ok_or_else(|| BeanError::PropertyNotFound {
            bean: self.ty().path(),
            property: name.to_string(),
        })
    }

    #[inline]
    pub(crate) fn find(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    /// Properties in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Opens a builder of a new bean.
    #[inline]
    pub fn builder(&self) -> BeanBuilder<'_> {
        BeanBuilder::new(self)
    }

    /// Reads every property of `bean`, in declaration order.
    pub fn read_all(&self, bean: &dyn Bean) -> Result<Vec<(&'static str, Option<Box<dyn Value>>)>, BeanError> {
        self.properties
            .iter()
            .map(|p| p.get(bean).map(|value| (p.name(), value)))
            .collect()
    }

    #[inline]
    pub(crate) fn constructor(&self) -> &'static ConstructorDecl {
        &self.schema.constructors()[self.constructor]
    }

    /// The zero values every constructor argument starts with.
    #[inline]
    pub(crate) fn prototype(&self) -> Vec<Option<Box<dyn Value>>> {
        self.prototype.clone()
    }
}

impl PartialEq for BeanDescriptor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty().id() == other.ty().id()
    }
}

impl Eq for BeanDescriptor {}

impl Hash for BeanDescriptor {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty().id().hash(state);
    }
}

impl fmt::Debug for BeanDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDescriptor")
            .field("type", self.ty())
            .field("accessor", &self.kind)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}
