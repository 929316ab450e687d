//! Containers for static storage of type information.
//!
//! These are usually used to implement [`Typed`](crate::info::Typed) and
//! [`TypePath`](crate::info::TypePath) by hand.
//!
//! - [`NonGenericTypeInfoCell`]: an [`OnceLock`] around a [`TypeInfo`].
//! - [`GenericTypeInfoCell`] / [`GenericTypePathCell`]: a `static` inside a
//!   generic function is shared by every instantiation, so these cells keep
//!   one leaked entry per [`TypeId`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use bean_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;

    pub trait CellContent: Send + Sync + 'static {}

    impl CellContent for String {}
    impl CellContent for TypeInfo {}
}

use sealed::CellContent;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Static storage for the information of a non-generic type.
pub struct NonGenericTypeCell<T: CellContent>(OnceLock<T>);

/// Static storage for the [`TypeInfo`] of a non-generic type.
///
/// # Examples
///
/// ```
/// use bean_meta::info::{NonGenericTypeInfoCell, OpaqueInfo, TypeInfo, TypePath, Typed};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Meters(f64);
///
/// impl TypePath for Meters {
///     fn type_path() -> &'static str { "units::Meters" }
///     fn type_name() -> &'static str { "Meters" }
///     fn type_ident() -> &'static str { "Meters" }
/// }
///
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert_eq!(Meters::type_info().type_name(), "Meters");
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: CellContent> NonGenericTypeCell<T> {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

impl<T: CellContent> Default for NonGenericTypeCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage for the information of generic types, one entry per
/// monomorphized type.
pub struct GenericTypeCell<T: CellContent>(RwLock<TypeIdMap<&'static T>>);

/// Static storage for the [`TypeInfo`] of generic types.
///
/// ```
/// use bean_meta::info::{GenericTypeInfoCell, TypeInfo, Typed};
///
/// // `Vec<T>` is implemented on top of this cell.
/// let a = <Vec<u8> as Typed>::type_info();
/// let b = <Vec<u16> as Typed>::type_info();
/// assert_ne!(a.ty(), b.ty());
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Static storage for the type paths of generic types.
///
/// ```
/// use bean_meta::info::{GenericTypePathCell, TypePath, concat};
///
/// struct Wrapper<T>(T);
///
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["demo::Wrapper<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Wrapper<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Wrapper" }
/// }
///
/// assert_eq!(<Wrapper<i32>>::type_path(), "demo::Wrapper<i32>");
/// assert_eq!(<Wrapper<bool>>::type_name(), "Wrapper<bool>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: CellContent> GenericTypeCell<T> {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the entry of type `G`, generating it with `f` if absent.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl<T: CellContent> Default for GenericTypeCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// concat

/// Concatenate string slices with a single allocation.
///
/// ```
/// assert_eq!(bean_meta::info::concat(&["Vec", "<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(arr: &[&str]) -> String {
    let len = arr.iter().map(|s| s.len()).sum();
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
