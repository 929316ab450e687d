use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::access::AccessorKind;
use crate::info::{Type, Typed};
use crate::schema::BeanSchema;
use crate::Value;

// -----------------------------------------------------------------------------
// Bean

/// A value object with a fixed, named set of properties.
///
/// This is the object-safe side of a bean type: every instance can name its
/// declaration schema, so a registry can describe a `&dyn Bean` it has never
/// seen. Implemented by `#[derive(Bean)]`.
pub trait Bean: Value {
    /// The declaration schema of the concrete type.
    fn bean_schema(&self) -> &'static BeanSchema;

    /// The accessor strategy the type was declared with.
    fn accessor_kind(&self) -> AccessorKind {
        AccessorKind::default()
    }
}

impl dyn Bean {
    /// Returns the [`Type`] of the concrete bean.
    #[inline]
    pub fn ty(&self) -> &'static Type {
        self.dyn_type_info().ty()
    }

    /// Returns `true` if the underlying bean is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts and unboxes the bean, returning `Err(self)` on mismatch.
    pub fn take<T: Any>(self: Box<dyn Bean>) -> Result<T, Box<dyn Bean>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { *<Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for dyn Bean {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value_debug(f)
    }
}

// -----------------------------------------------------------------------------
// DescribeBean

/// A self-describing bean type: it exposes its own descriptor factory, so
/// [`BeanRegistry::lookup`](crate::BeanRegistry::lookup) can build its
/// descriptor on first use.
///
/// # Examples
///
/// ```
/// use bean_meta::{AccessorKind, DescribeBean, derive::Bean};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// #[bean(accessor = "handle")]
/// struct Town {
///     #[property]
///     name: String,
/// }
///
/// assert_eq!(Town::ACCESSOR, AccessorKind::Handle);
/// assert_eq!(Town::schema().fields().len(), 1);
///
/// let descriptor = Town::describe(AccessorKind::Reflective).unwrap();
/// assert_eq!(descriptor.accessor_kind(), AccessorKind::Reflective);
/// ```
pub trait DescribeBean: Bean + Typed + Sized {
    /// The default accessor strategy.
    const ACCESSOR: AccessorKind = AccessorKind::Generated;

    /// The declaration schema, built once.
    fn schema() -> &'static BeanSchema;

    /// Builds a fresh descriptor with the given strategy.
    ///
    /// Prefer [`BeanRegistry::lookup`](crate::BeanRegistry::lookup), which
    /// caches the result.
    fn describe(kind: AccessorKind) -> Result<crate::BeanDescriptor, crate::BeanError> {
        crate::BeanDescriptor::from_schema(Self::schema(), kind)
    }
}
