use core::any::TypeId;
use core::fmt;

use crate::access::AccessorKind;
use crate::schema::BeanSchema;

/// A descriptor factory submitted by `#[bean(auto_register)]`.
///
/// Factories are collected at link time, [`BeanRegistry`](crate::BeanRegistry)
/// consults them when a dynamic lookup misses its cache.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use bean_meta::{BeanRegistry, derive::Bean};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// #[bean(auto_register)]
/// struct Ledger {
///     #[property]
///     entries: Vec<i64>,
/// }
///
/// let registry = BeanRegistry::new();
/// let descriptor = registry.lookup_id(TypeId::of::<Ledger>()).unwrap();
/// assert_eq!(descriptor.property_count(), 1);
/// assert!(registry.lookup_path(descriptor.ty().path()).is_ok());
/// ```
pub struct BeanFactory {
    type_id: fn() -> TypeId,
    schema: fn() -> &'static BeanSchema,
    accessor: AccessorKind,
}

impl BeanFactory {
    #[doc(hidden)]
    pub const fn new(
        type_id: fn() -> TypeId,
        schema: fn() -> &'static BeanSchema,
        accessor: AccessorKind,
    ) -> Self {
        Self {
            type_id,
            schema,
            accessor,
        }
    }

    #[inline]
    pub fn bean_type_id(&self) -> TypeId {
        (self.type_id)()
    }

    #[inline]
    pub fn schema(&self) -> &'static BeanSchema {
        (self.schema)()
    }

    #[inline]
    pub fn accessor_kind(&self) -> AccessorKind {
        self.accessor
    }

    /// Iterates over every submitted factory.
    pub fn iter() -> impl Iterator<Item = &'static BeanFactory> {
        inventory::iter::<BeanFactory>.into_iter()
    }

    /// Returns the first factory matching `predicate`.
    pub fn find(mut predicate: impl FnMut(&BeanFactory) -> bool) -> Option<&'static BeanFactory> {
        Self::iter().find(|f| predicate(f))
    }
}

impl fmt::Debug for BeanFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanFactory")
            .field("type", self.schema().ty())
            .field("accessor", &self.accessor)
            .finish()
    }
}

inventory::collect!(BeanFactory);
