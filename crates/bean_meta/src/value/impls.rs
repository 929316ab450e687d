use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::{HashMap, HashSet};

use crate::info::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
use crate::info::{ListInfo, MapInfo, OpaqueInfo, OptionalInfo, SetInfo};
use crate::info::{TypeInfo, TypePath, Typed, concat};
use crate::value::{Value, ValueRef, hash_of, value_hasher};

// -----------------------------------------------------------------------------
// Scalars

fn zero_of<T: Value + Default>() -> Box<dyn Value> {
    Box::new(T::default())
}

macro_rules! impl_scalar_path {
    ($ty:ty, $name:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $name
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }
        }
    };
}

macro_rules! impl_scalar_value {
    ($($ty:ty),* $(,)?) => {$(
        impl_scalar_path!($ty, stringify!($ty));

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>().with_zero(zero_of::<Self>)))
            }
        }

        impl Value for $ty {
            #[inline]
            fn clone_value(&self) -> Box<dyn Value> {
                Box::new(*self)
            }

            #[inline]
            fn value_eq(&self, other: &dyn Value) -> bool {
                other.downcast_ref::<Self>().is_some_and(|other| self == other)
            }

            #[inline]
            fn value_hash(&self) -> u64 {
                hash_of(self)
            }

            #[inline]
            fn value_cmp(&self, other: &dyn Value) -> Option<Ordering> {
                other.downcast_ref::<Self>().map(|other| self.cmp(other))
            }

            fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }

            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Opaque(self)
            }
        }
    )*};
}

impl_scalar_value!(bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_float_value {
    ($($ty:ty),* $(,)?) => {$(
        impl_scalar_path!($ty, stringify!($ty));

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>().with_zero(zero_of::<Self>)))
            }
        }

        impl Value for $ty {
            #[inline]
            fn clone_value(&self) -> Box<dyn Value> {
                Box::new(*self)
            }

            #[inline]
            fn value_eq(&self, other: &dyn Value) -> bool {
                other.downcast_ref::<Self>().is_some_and(|other| self == other)
            }

            fn value_hash(&self) -> u64 {
                // `0.0 == -0.0`, so both hash as positive zero.
                let bits = if *self == 0.0 { 0 } else { self.to_bits() };
                hash_of(&bits)
            }

            #[inline]
            fn value_cmp(&self, other: &dyn Value) -> Option<Ordering> {
                other.downcast_ref::<Self>().and_then(|other| self.partial_cmp(other))
            }

            fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }

            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Opaque(self)
            }
        }
    )*};
}

impl_float_value!(f32, f64);

impl TypePath for String {
    fn type_path() -> &'static str {
        "alloc::string::String"
    }

    fn type_name() -> &'static str {
        "String"
    }

    fn type_ident() -> &'static str {
        "String"
    }

    fn module_path() -> Option<&'static str> {
        Some("alloc::string")
    }
}

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Value for String {
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other.downcast_ref::<Self>().is_some_and(|other| self == other)
    }

    fn value_hash(&self) -> u64 {
        hash_of(self)
    }

    fn value_cmp(&self, other: &dyn Value) -> Option<Ordering> {
        other.downcast_ref::<Self>().map(|other| self.cmp(other))
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Opaque(self)
    }
}

// -----------------------------------------------------------------------------
// Element-wise helpers

#[inline]
fn as_value<T: Value>(value: &T) -> &dyn Value {
    value
}

fn seq_eq<'a>(
    a: impl ExactSizeIterator<Item = &'a dyn Value>,
    b: impl ExactSizeIterator<Item = &'a dyn Value>,
) -> bool {
    a.len() == b.len() && a.zip(b).all(|(x, y)| x.value_eq(y))
}

fn seq_hash<'a>(items: impl ExactSizeIterator<Item = &'a dyn Value>) -> u64 {
    let mut hasher = value_hasher();
    hasher.write_usize(items.len());
    for item in items {
        hasher.write_u64(item.value_hash());
    }
    hasher.finish()
}

fn seq_cmp<'a>(
    mut a: impl Iterator<Item = &'a dyn Value>,
    mut b: impl Iterator<Item = &'a dyn Value>,
) -> Option<Ordering> {
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Some(Ordering::Equal),
            (None, Some(_)) => return Some(Ordering::Less),
            (Some(_), None) => return Some(Ordering::Greater),
            (Some(x), Some(y)) => match x.value_cmp(y)? {
                Ordering::Equal => {}
                other => return Some(other),
            },
        }
    }
}

/// Hash of an unordered collection, independent of iteration order.
fn unordered_hash(len: usize, hashes: impl Iterator<Item = u64>) -> u64 {
    let sum = hashes.fold(0u64, u64::wrapping_add);
    let mut hasher = value_hasher();
    hasher.write_usize(len);
    hasher.write_u64(sum);
    hasher.finish()
}

fn pair_hash(key: &dyn Value, value: &dyn Value) -> u64 {
    let mut hasher = value_hasher();
    hasher.write_u64(key.value_hash());
    hasher.write_u64(value.value_hash());
    hasher.finish()
}

// -----------------------------------------------------------------------------
// Option

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    fn type_ident() -> &'static str {
        "Option"
    }

    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Value + Typed + Clone> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<T>()))
    }
}

impl<T: Value + Typed + Clone> Value for Option<T> {
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        match (self, other.downcast_ref::<Self>()) {
            (Some(a), Some(Some(b))) => a.value_eq(b),
            (None, Some(None)) => true,
            _ => false,
        }
    }

    fn value_hash(&self) -> u64 {
        let mut hasher = value_hasher();
        match self {
            Some(value) => {
                hasher.write_u8(1);
                hasher.write_u64(value.value_hash());
            }
            None => hasher.write_u8(0),
        }
        hasher.finish()
    }

    fn value_cmp(&self, other: &dyn Value) -> Option<Ordering> {
        match (self, other.downcast_ref::<Self>()?) {
            (Some(a), Some(b)) => a.value_cmp(b),
            (a, b) => Some(a.is_some().cmp(&b.is_some())),
        }
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => f.debug_tuple("Some").field(&as_value(value)).finish(),
            None => f.write_str("None"),
        }
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Optional(self.as_ref().map(as_value))
    }
}

// -----------------------------------------------------------------------------
// Vec

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }

    fn type_ident() -> &'static str {
        "Vec"
    }

    fn module_path() -> Option<&'static str> {
        Some("alloc::vec")
    }
}

impl<T: Value + Typed + Clone> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Value + Typed + Clone> Value for Vec<T> {
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| seq_eq(self.iter().map(as_value), other.iter().map(as_value)))
    }

    fn value_hash(&self) -> u64 {
        seq_hash(self.iter().map(as_value))
    }

    fn value_cmp(&self, other: &dyn Value) -> Option<Ordering> {
        let other = other.downcast_ref::<Self>()?;
        seq_cmp(self.iter().map(as_value), other.iter().map(as_value))
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(as_value)).finish()
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::List(self.iter().map(as_value).collect())
    }
}

// -----------------------------------------------------------------------------
// BTreeSet

impl<T: TypePath> TypePath for BTreeSet<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["alloc::collections::btree_set::BTreeSet<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["BTreeSet<", T::type_name(), ">"]))
    }

    fn type_ident() -> &'static str {
        "BTreeSet"
    }

    fn module_path() -> Option<&'static str> {
        Some("alloc::collections::btree_set")
    }
}

impl<T: Value + Typed + Clone + Ord> Typed for BTreeSet<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Set(SetInfo::new::<Self, T>()))
    }
}

impl<T: Value + Typed + Clone + Ord> Value for BTreeSet<T> {
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| seq_eq(self.iter().map(as_value), other.iter().map(as_value)))
    }

    fn value_hash(&self) -> u64 {
        seq_hash(self.iter().map(as_value))
    }

    fn value_cmp(&self, other: &dyn Value) -> Option<Ordering> {
        let other = other.downcast_ref::<Self>()?;
        seq_cmp(self.iter().map(as_value), other.iter().map(as_value))
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(as_value)).finish()
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Set(self.iter().map(as_value).collect())
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: TypePath, V: TypePath> TypePath for BTreeMap<K, V> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&[
                "alloc::collections::btree_map::BTreeMap<",
                K::type_path(),
                ", ",
                V::type_path(),
                ">",
            ])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["BTreeMap<", K::type_name(), ", ", V::type_name(), ">"])
        })
    }

    fn type_ident() -> &'static str {
        "BTreeMap"
    }

    fn module_path() -> Option<&'static str> {
        Some("alloc::collections::btree_map")
    }
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Value + Typed + Clone + Ord,
    V: Value + Typed + Clone,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K, V> Value for BTreeMap<K, V>
where
    K: Value + Typed + Clone + Ord,
    V: Value + Typed + Clone,
{
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other.downcast_ref::<Self>().is_some_and(|other| {
            self.len() == other.len()
                && self
                    .iter()
                    .zip(other.iter())
                    .all(|((k1, v1), (k2, v2))| k1.value_eq(k2) && v1.value_eq(v2))
        })
    }

    fn value_hash(&self) -> u64 {
        let mut hasher = value_hasher();
        hasher.write_usize(self.len());
        for (key, value) in self {
            hasher.write_u64(pair_hash(key, value));
        }
        hasher.finish()
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (as_value(k), as_value(v))))
            .finish()
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Map(self.iter().map(|(k, v)| (as_value(k), as_value(v))).collect())
    }
}

// -----------------------------------------------------------------------------
// HashSet

impl<T: TypePath> TypePath for HashSet<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["std::collections::hash::set::HashSet<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["HashSet<", T::type_name(), ">"]))
    }

    fn type_ident() -> &'static str {
        "HashSet"
    }

    fn module_path() -> Option<&'static str> {
        Some("std::collections::hash::set")
    }
}

impl<T: Value + Typed + Clone + Eq + Hash> Typed for HashSet<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Set(SetInfo::new::<Self, T>()))
    }
}

impl<T: Value + Typed + Clone + Eq + Hash> Value for HashSet<T> {
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    fn value_hash(&self) -> u64 {
        unordered_hash(self.len(), self.iter().map(Value::value_hash))
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(as_value)).finish()
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Set(self.iter().map(as_value).collect())
    }
}

// -----------------------------------------------------------------------------
// HashMap

impl<K: TypePath, V: TypePath> TypePath for HashMap<K, V> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&[
                "std::collections::hash::map::HashMap<",
                K::type_path(),
                ", ",
                V::type_path(),
                ">",
            ])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["HashMap<", K::type_name(), ", ", V::type_name(), ">"])
        })
    }

    fn type_ident() -> &'static str {
        "HashMap"
    }

    fn module_path() -> Option<&'static str> {
        Some("std::collections::hash::map")
    }
}

impl<K, V> Typed for HashMap<K, V>
where
    K: Value + Typed + Clone + Eq + Hash,
    V: Value + Typed + Clone,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K, V> Value for HashMap<K, V>
where
    K: Value + Typed + Clone + Eq + Hash,
    V: Value + Typed + Clone,
{
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> bool {
        other.downcast_ref::<Self>().is_some_and(|other| {
            self.len() == other.len()
                && self
                    .iter()
                    .all(|(k, v)| other.get(k).is_some_and(|o| v.value_eq(o)))
        })
    }

    fn value_hash(&self) -> u64 {
        unordered_hash(self.len(), self.iter().map(|(k, v)| pair_hash(k, v)))
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (as_value(k), as_value(v))))
            .finish()
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Map(self.iter().map(|(k, v)| (as_value(k), as_value(v))).collect())
    }
}

// -----------------------------------------------------------------------------
// Opaque user types

/// Implements [`TypePath`], [`Typed`] and [`Value`] for a leaf type.
///
/// The type must be `Clone + PartialEq + Debug + Send + Sync + 'static`.
/// Add `hash` to hash through [`Hash`] and `ord` to compare through [`Ord`],
/// otherwise every value of the type hashes alike and is not comparable.
///
/// ```
/// use bean_meta::{Value, impl_opaque_value};
///
/// #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// pub struct Currency(&'static str);
///
/// impl_opaque_value!(Currency, "money::Currency", hash, ord);
///
/// let usd: &dyn Value = &Currency("USD");
/// assert!(usd.value_eq(&Currency("USD")));
/// assert_eq!(usd.dyn_type_name(), "Currency");
/// # use bean_meta::info::DynamicTypePath;
/// ```
#[macro_export]
macro_rules! impl_opaque_value {
    (@hash) => {
        fn value_hash(&self) -> u64 {
            $crate::__macro_exports::hash_one(<Self as $crate::info::TypePath>::type_path())
        }
    };
    (@hash hash $($rest:ident)*) => {
        fn value_hash(&self) -> u64 {
            $crate::__macro_exports::hash_one(self)
        }
    };
    (@hash $skip:ident $($rest:ident)*) => {
        $crate::impl_opaque_value!(@hash $($rest)*);
    };
    (@cmp) => {};
    (@cmp ord $($rest:ident)*) => {
        fn value_cmp(&self, other: &dyn $crate::Value) -> ::core::option::Option<::core::cmp::Ordering> {
            other
                .downcast_ref::<Self>()
                .map(|other| ::core::cmp::Ord::cmp(self, other))
        }
    };
    (@cmp $skip:ident $($rest:ident)*) => {
        $crate::impl_opaque_value!(@cmp $($rest)*);
    };
    ($ty:ty, $path:literal $(, $flag:ident)* $(,)?) => {
        impl $crate::info::TypePath for $ty {
            fn type_path() -> &'static str {
                $path
            }

            fn type_name() -> &'static str {
                $crate::__macro_exports::last_segment($path)
            }

            fn type_ident() -> &'static str {
                $crate::__macro_exports::last_segment($path)
            }

            fn module_path() -> ::core::option::Option<&'static str> {
                $crate::__macro_exports::module_of($path)
            }
        }

        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Opaque($crate::info::OpaqueInfo::new::<Self>())
                })
            }
        }

        impl $crate::Value for $ty {
            fn clone_value(&self) -> $crate::__macro_exports::Box<dyn $crate::Value> {
                $crate::__macro_exports::Box::new(::core::clone::Clone::clone(self))
            }

            fn value_eq(&self, other: &dyn $crate::Value) -> bool {
                other
                    .downcast_ref::<Self>()
                    .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other))
            }

            $crate::impl_opaque_value!(@hash $($flag)*);

            $crate::impl_opaque_value!(@cmp $($flag)*);

            fn value_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }

            fn value_ref(&self) -> $crate::ValueRef<'_> {
                $crate::ValueRef::Opaque(self)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Value;
    use crate::info::{TypePath, Typed};

    #[derive(Clone, Debug, PartialEq)]
    struct Weight(f32);

    crate::impl_opaque_value!(Weight, "tests::units::Weight");

    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct Code(u16);

    crate::impl_opaque_value!(Code, "tests::Code", hash, ord);

    #[test]
    fn opaque_macro_paths() {
        assert_eq!(Weight::type_path(), "tests::units::Weight");
        assert_eq!(Weight::type_name(), "Weight");
        assert_eq!(Weight::module_path(), Some("tests::units"));
        assert!(Weight::type_info().zero_value().is_none());
    }

    #[test]
    fn opaque_macro_flags() {
        assert!(Weight(1.0).value_cmp(&Weight(2.0)).is_none());
        assert_eq!(Weight(1.0).value_hash(), Weight(2.0).value_hash());
        assert_eq!(Code(1).value_cmp(&Code(2)), Some(core::cmp::Ordering::Less));
        assert_ne!(Code(1).value_hash(), Code(2).value_hash());
    }

    #[test]
    fn float_zero_hash() {
        assert!(0.0f64.value_eq(&-0.0f64));
        assert_eq!(0.0f64.value_hash(), (-0.0f64).value_hash());
        assert!(!f32::NAN.value_eq(&f32::NAN));
    }

    #[test]
    fn collection_clone_value() {
        let map: BTreeMap<String, Vec<u8>> = [(String::from("k"), vec![1, 2])].into_iter().collect();
        let copy = map.clone_value();
        assert!(copy.value_eq(&map));
        assert_eq!(copy.dyn_type_info().type_arguments().len(), 2);
    }
}
