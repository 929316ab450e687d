use alloc::boxed::Box;
use core::any::TypeId;

use crate::Value;
use crate::info::{Type, TypePath, Typed, impl_type_fn};

// -----------------------------------------------------------------------------
// ContainerKind

/// The closed set of container shapes recognized by the type resolver and
/// by optional-wrapper detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// `Option<T>`, the present/absent wrapper.
    Optional,
    /// `Vec<T>`.
    List,
    /// `BTreeSet<T>` and `HashSet<T>`.
    Set,
    /// `BTreeMap<K, V>` and `HashMap<K, V>`.
    Map,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a value type.
///
/// Obtained through [`Typed::type_info`] or
/// [`DynamicTyped::dyn_type_info`](crate::info::DynamicTyped::dyn_type_info).
#[derive(Debug)]
pub enum TypeInfo {
    Opaque(OpaqueInfo),
    Optional(OptionalInfo),
    List(ListInfo),
    Set(SetInfo),
    Map(MapInfo),
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Opaque(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Set(info) => info.ty(),
            Self::Map(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_is<T: core::any::Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// The container shape, `None` for opaque types.
    pub const fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Self::Opaque(_) => None,
            Self::Optional(_) => Some(ContainerKind::Optional),
            Self::List(_) => Some(ContainerKind::List),
            Self::Set(_) => Some(ContainerKind::Set),
            Self::Map(_) => Some(ContainerKind::Map),
        }
    }

    /// Generic arguments of a container in declaration order, empty for
    /// opaque types.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use bean_meta::info::Typed;
    ///
    /// let info = <BTreeMap<String, Vec<u8>> as Typed>::type_info();
    /// let args = info.type_arguments();
    /// assert_eq!(args.len(), 2);
    /// assert_eq!(args[0].type_name(), "String");
    /// assert_eq!(args[1].type_name(), "Vec<u8>");
    /// ```
    pub fn type_arguments(&self) -> &[&'static TypeInfo] {
        match self {
            Self::Opaque(_) => &[],
            Self::Optional(info) => core::slice::from_ref(&info.item),
            Self::List(info) => core::slice::from_ref(&info.item),
            Self::Set(info) => core::slice::from_ref(&info.item),
            Self::Map(info) => &info.entry,
        }
    }

    /// The value a builder slot of this type starts with.
    ///
    /// Numbers are `0`, `bool` is `false`, `char` is `'\0'`. Every other
    /// type starts null.
    pub fn zero_value(&self) -> Option<Box<dyn Value>> {
        match self {
            Self::Opaque(info) => info.zero.map(|zero| zero()),
            _ => None,
        }
    }

    /// Returns `true` if a value of type `source` can be stored where this
    /// type is expected.
    ///
    /// The rule set is closed: identical types, or `self` is `Option<T>`
    /// and `source` is assignable to `T`.
    ///
    /// ```
    /// use bean_meta::info::Typed;
    ///
    /// let target = <Option<String> as Typed>::type_info();
    /// assert!(target.is_assignable_from(String::type_info()));
    /// assert!(!String::type_info().is_assignable_from(target));
    /// ```
    pub fn is_assignable_from(&self, source: &TypeInfo) -> bool {
        if self.ty_id() == source.ty_id() {
            return true;
        }
        match self {
            Self::Optional(info) => info.item.is_assignable_from(source),
            _ => false,
        }
    }

    /// Converts `value` into this type.
    ///
    /// A `T` is wrapped into `Option<T>` and an `Option<T>` is unwrapped
    /// into `T`, where `None` becomes a null slot (`Ok(None)`). The value is
    /// returned untouched in `Err` when no conversion applies.
    ///
    /// ```
    /// use bean_meta::{Value, info::Typed};
    ///
    /// let wrapped = <Option<i32> as Typed>::type_info()
    ///     .coerce(Box::new(5i32))
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(wrapped.take::<Option<i32>>().unwrap(), Some(5));
    ///
    /// let absent = i32::type_info().coerce(Box::new(None::<i32>)).unwrap();
    /// assert!(absent.is_none());
    /// ```
    pub fn coerce(&self, value: Box<dyn Value>) -> Result<Option<Box<dyn Value>>, Box<dyn Value>> {
        if value.ty_id() == self.ty_id() {
            return Ok(Some(value));
        }
        if let Self::Optional(target) = self
            && target.item.is_assignable_from(value.dyn_type_info())
        {
            return match target.item.coerce(value)? {
                Some(item) => (target.wrap)(item).map(Some),
                None => Ok(Some((target.none)())),
            };
        }
        if let Self::Optional(source) = value.dyn_type_info() {
            return match (source.unwrap)(value)? {
                Some(item) => self.coerce(item),
                None => Ok(None),
            };
        }
        Err(value)
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Information of a leaf type such as a number, a string or a bean.
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
    zero: Option<fn() -> Box<dyn Value>>,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    /// Creates the information of a type without zero value.
    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            zero: None,
        }
    }

    /// Sets the value builder slots of this type start with.
    #[inline]
    pub const fn with_zero(mut self, zero: fn() -> Box<dyn Value>) -> Self {
        self.zero = Some(zero);
        self
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

type WrapFn = fn(Box<dyn Value>) -> Result<Box<dyn Value>, Box<dyn Value>>;
type UnwrapFn = fn(Box<dyn Value>) -> Result<Option<Box<dyn Value>>, Box<dyn Value>>;

/// Information of `Option<T>`.
#[derive(Debug)]
pub struct OptionalInfo {
    ty: Type,
    item: &'static TypeInfo,
    wrap: WrapFn,
    unwrap: UnwrapFn,
    none: fn() -> Box<dyn Value>,
}

impl OptionalInfo {
    impl_type_fn!(ty);

    pub fn new<T: Value + Typed + Clone>() -> Self
    where
        Option<T>: Value + TypePath,
    {
        fn wrap<T: Value>(value: Box<dyn Value>) -> Result<Box<dyn Value>, Box<dyn Value>>
        where
            Option<T>: Value,
        {
            value
                .take::<T>()
                .map(|value| Box::new(Some(value)) as Box<dyn Value>)
        }

        fn unwrap<T: Value>(
            value: Box<dyn Value>,
        ) -> Result<Option<Box<dyn Value>>, Box<dyn Value>>
        where
            Option<T>: Value,
        {
            value
                .take::<Option<T>>()
                .map(|value| value.map(|value| Box::new(value) as Box<dyn Value>))
        }

        fn none<T: 'static>() -> Box<dyn Value>
        where
            Option<T>: Value,
        {
            Box::new(None::<T>)
        }

        Self {
            ty: Type::of::<Option<T>>(),
            item: T::type_info(),
            wrap: wrap::<T>,
            unwrap: unwrap::<T>,
            none: none::<T>,
        }
    }

    /// Information of the wrapped type.
    #[inline]
    pub const fn item_info(&self) -> &'static TypeInfo {
        self.item
    }
}

// -----------------------------------------------------------------------------
// ListInfo / SetInfo

/// Information of an ordered sequence such as `Vec<T>`.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item: &'static TypeInfo,
}

impl ListInfo {
    impl_type_fn!(ty);

    pub fn new<C: TypePath, T: Typed>() -> Self {
        Self {
            ty: Type::of::<C>(),
            item: T::type_info(),
        }
    }

    #[inline]
    pub const fn item_info(&self) -> &'static TypeInfo {
        self.item
    }
}

/// Information of a set such as `BTreeSet<T>`.
#[derive(Debug)]
pub struct SetInfo {
    ty: Type,
    item: &'static TypeInfo,
}

impl SetInfo {
    impl_type_fn!(ty);

    pub fn new<C: TypePath, T: Typed>() -> Self {
        Self {
            ty: Type::of::<C>(),
            item: T::type_info(),
        }
    }

    #[inline]
    pub const fn item_info(&self) -> &'static TypeInfo {
        self.item
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Information of a map such as `BTreeMap<K, V>`.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    entry: [&'static TypeInfo; 2],
}

impl MapInfo {
    impl_type_fn!(ty);

    pub fn new<C: TypePath, K: Typed, V: Typed>() -> Self {
        Self {
            ty: Type::of::<C>(),
            entry: [K::type_info(), V::type_info()],
        }
    }

    #[inline]
    pub const fn key_info(&self) -> &'static TypeInfo {
        self.entry[0]
    }

    #[inline]
    pub const fn value_info(&self) -> &'static TypeInfo {
        self.entry[1]
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::Value;
    use crate::info::{ContainerKind, Typed};

    #[test]
    fn zero_values() {
        let zero = i64::type_info().zero_value().unwrap();
        assert_eq!(zero.take::<i64>().unwrap(), 0);
        let zero = bool::type_info().zero_value().unwrap();
        assert!(!zero.take::<bool>().unwrap());
        let zero = char::type_info().zero_value().unwrap();
        assert_eq!(zero.take::<char>().unwrap(), '\0');
        assert!(String::type_info().zero_value().is_none());
        assert!(<Option<i32>>::type_info().zero_value().is_none());
        assert!(<Vec<i32>>::type_info().zero_value().is_none());
    }

    #[test]
    fn container_kinds() {
        assert_eq!(<Option<u8>>::type_info().container_kind(), Some(ContainerKind::Optional));
        assert_eq!(<Vec<u8>>::type_info().container_kind(), Some(ContainerKind::List));
        assert_eq!(u8::type_info().container_kind(), None);
    }

    #[test]
    fn coerce_rejects_unrelated() {
        let value: Box<dyn Value> = Box::new(1u8);
        let value = String::type_info().coerce(value).unwrap_err();
        let value = <Option<String>>::type_info().coerce(value).unwrap_err();
        assert!(value.is::<u8>());
    }

    #[test]
    fn coerce_none_into_option() {
        let target = <Option<String>>::type_info();
        let value = target.coerce(Box::new(None::<String>)).unwrap().unwrap();
        assert_eq!(value.take::<Option<String>>().unwrap(), None);
    }
}
