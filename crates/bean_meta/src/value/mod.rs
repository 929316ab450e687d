use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::cmp::Ordering;
use core::fmt;

use bean_utils::hash::{FixedHashState, FixedHasher};

use crate::Bean;
use crate::info::{DynamicTypePath, DynamicTyped, TypePath};

// -----------------------------------------------------------------------------
// Modules

mod impls;

// -----------------------------------------------------------------------------
// Value

/// A property value whose concrete type is only known at runtime.
///
/// Every property of a bean is read and written as a `dyn Value`. The trait
/// is implemented for primitives, `String`, `Option<T>`, the standard
/// collections and every `#[derive(Bean)]` type; other types can use
/// [`impl_opaque_value!`](crate::impl_opaque_value).
///
/// Note that [`Any::type_id`] on a `Box<dyn Value>` returns the id of the
/// box. Use [`Value::ty_id`] instead:
///
/// ```
/// use bean_meta::Value;
/// use core::any::TypeId;
///
/// let x: Box<dyn Value> = Box::new(7u8);
/// assert_eq!(x.ty_id(), TypeId::of::<u8>());
/// assert!(x.is::<u8>());
/// ```
pub trait Value: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// Returns the [`TypeId`] of the underlying type.
    #[inline(always)]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns a boxed copy of the value.
    fn clone_value(&self) -> Box<dyn Value>;

    /// Compares with a value of any type, values of different types are never equal.
    fn value_eq(&self, other: &dyn Value) -> bool;

    /// A hash consistent with [`Value::value_eq`], computed with [`value_hasher`].
    fn value_hash(&self) -> u64;

    /// Orders two values of the same type, `None` if they are not comparable.
    #[inline]
    fn value_cmp(&self, other: &dyn Value) -> Option<Ordering> {
        let _ = other;
        None
    }

    /// Formats the value for debugging.
    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Returns a structural view of the value.
    fn value_ref(&self) -> ValueRef<'_>;
}

// -----------------------------------------------------------------------------
// ValueRef

/// A borrowed, structural view of a [`Value`].
///
/// Codecs and generic utilities walk values through this enum instead of
/// downcasting to every concrete collection type.
#[derive(Debug)]
pub enum ValueRef<'a> {
    /// A leaf value, such as a number or a string.
    Opaque(&'a dyn Value),
    /// A present/absent wrapper.
    Optional(Option<&'a dyn Value>),
    /// An ordered sequence.
    List(Vec<&'a dyn Value>),
    /// An unordered collection of unique elements.
    Set(Vec<&'a dyn Value>),
    /// Key-value pairs.
    Map(Vec<(&'a dyn Value, &'a dyn Value)>),
    /// A nested bean.
    Bean(&'a dyn Bean),
}

impl<'a> ValueRef<'a> {
    /// Returns the nested bean, if any.
    #[inline]
    pub fn as_bean(&self) -> Option<&'a dyn Bean> {
        match self {
            ValueRef::Bean(bean) => Some(*bean),
            _ => None,
        }
    }

    /// Number of elements of a container, `None` for leaves and beans.
    pub fn len(&self) -> Option<usize> {
        match self {
            ValueRef::Optional(v) => Some(usize::from(v.is_some())),
            ValueRef::List(v) | ValueRef::Set(v) => Some(v.len()),
            ValueRef::Map(v) => Some(v.len()),
            ValueRef::Opaque(_) | ValueRef::Bean(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// dyn Value

impl dyn Value {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, returning `Err(self)` on mismatch.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Value>) -> Result<Box<T>, Box<dyn Value>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts and unboxes the value, returning `Err(self)` on mismatch.
    ///
    /// ```
    /// use bean_meta::Value;
    ///
    /// let x: Box<dyn Value> = Box::new(String::from("Park Lane"));
    /// let x = x.take::<u32>().unwrap_err();
    /// assert_eq!(x.take::<String>().unwrap(), "Park Lane");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Value>) -> Result<T, Box<dyn Value>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Returns the value as a bean, if it is one.
    #[inline]
    pub fn as_bean(&self) -> Option<&dyn Bean> {
        self.value_ref().as_bean()
    }
}

impl fmt::Debug for dyn Value {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value_debug(f)
    }
}

impl PartialEq for dyn Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value_eq(other)
    }
}

impl Clone for Box<dyn Value> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_value()
    }
}

impl TypePath for dyn Value {
    fn type_path() -> &'static str {
        "dyn bean_meta::Value"
    }

    fn type_name() -> &'static str {
        "dyn Value"
    }

    fn type_ident() -> &'static str {
        "dyn Value"
    }
}

// -----------------------------------------------------------------------------
// Hashing

/// The hasher behind every [`Value::value_hash`].
///
/// Hashes are stable for the lifetime of the process only.
#[inline]
pub fn value_hasher() -> FixedHasher {
    core::hash::BuildHasher::build_hasher(&FixedHashState)
}

/// Hash any `Hash` value with [`value_hasher`].
#[inline]
pub(crate) fn hash_of<T: core::hash::Hash + ?Sized>(value: &T) -> u64 {
    core::hash::BuildHasher::hash_one(&FixedHashState, value)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cmp::Ordering;

    use super::{Value, ValueRef};

    #[test]
    fn downcast_keeps_value_on_mismatch() {
        let x: Box<dyn Value> = Box::new(12i32);
        let x = x.downcast::<i64>().unwrap_err();
        assert_eq!(*x.downcast::<i32>().unwrap(), 12);
    }

    #[test]
    fn equality_across_types() {
        let a: Box<dyn Value> = Box::new(1u8);
        let b: Box<dyn Value> = Box::new(1u16);
        assert!(!a.value_eq(&*b));
        assert!(a.value_eq(&1u8));
        assert_eq!(&*a, &*a.clone());
    }

    #[test]
    fn hash_follows_equality() {
        let a = vec![String::from("a"), String::from("b")];
        let b = a.clone();
        assert_eq!(a.value_hash(), b.value_hash());

        let x: std::collections::HashMap<String, i32> =
            [(String::from("x"), 1), (String::from("y"), 2)].into_iter().collect();
        let y: std::collections::HashMap<String, i32> =
            [(String::from("y"), 2), (String::from("x"), 1)].into_iter().collect();
        assert!(x.value_eq(&y));
        assert_eq!(x.value_hash(), y.value_hash());
    }

    #[test]
    fn structural_views() {
        let list = vec![1, 2, 3];
        assert!(matches!(list.value_ref(), ValueRef::List(items) if items.len() == 3));

        let set: BTreeSet<char> = ['a', 'b'].into_iter().collect();
        assert_eq!(set.value_ref().len(), Some(2));

        let map: BTreeMap<String, bool> = BTreeMap::new();
        assert!(matches!(map.value_ref(), ValueRef::Map(pairs) if pairs.is_empty()));

        let none: Option<String> = None;
        assert!(matches!(none.value_ref(), ValueRef::Optional(None)));
        assert!(matches!(5u64.value_ref(), ValueRef::Opaque(_)));
    }

    #[test]
    fn ordering() {
        assert_eq!(1i32.value_cmp(&2i32), Some(Ordering::Less));
        assert_eq!(1i32.value_cmp(&2i64), None);
        assert_eq!(f64::NAN.value_cmp(&1.0f64), None);
        assert_eq!(Some(3u8).value_cmp(&None::<u8>), Some(Ordering::Greater));

        let words: Vec<String> = vec!["b".into()];
        let other: Vec<String> = vec!["a".into(), "z".into()];
        assert_eq!(words.value_cmp(&other), Some(Ordering::Greater));
    }

    #[test]
    fn debug_output() {
        let value: Box<dyn Value> = Box::new(Some(String::from("USD")));
        assert_eq!(alloc::format!("{value:?}"), "Some(\"USD\")");
    }
}
