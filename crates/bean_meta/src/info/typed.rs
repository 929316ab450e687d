use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// # Examples
///
/// ```
/// use bean_meta::info::{ContainerKind, Typed};
///
/// let info = <Vec<String> as Typed>::type_info();
/// assert_eq!(info.container_kind(), Some(ContainerKind::List));
/// ```
///
/// Use [`DynamicTyped`] for dynamic dispatch.
pub trait Typed: TypePath {
    /// Returns the compile-time information of the type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    /// Returns the type information of the underlying type.
    fn dyn_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn dyn_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
