use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::access::{AccessorKind, PropertyAccessor};
use crate::info::{Annotations, Type, TypeInfo, TypePath};
use crate::{Bean, BeanError, Value};

// -----------------------------------------------------------------------------
// PropertyStyle

/// How a property can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyStyle {
    /// Read-only, set once through the constructor.
    Immutable,
    /// Readable and writable in place.
    ReadWrite,
    /// Read-only, computed from other properties, never a constructor
    /// parameter.
    Derived,
}

impl PropertyStyle {
    /// Returns `true` if values can be written into an existing bean.
    #[inline]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::ReadWrite)
    }

    /// Returns `true` if the property can be set through a builder.
    #[inline]
    pub const fn is_buildable(self) -> bool {
        !matches!(self, Self::Derived)
    }
}

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// Metadata of one property, bound to an accessor.
///
/// # Examples
///
/// ```
/// use bean_meta::{BeanRegistry, PropertyStyle, derive::Bean};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Address {
///     #[property(get = "field")]
///     street: String,
///     #[property]
///     town: Option<String>,
///     #[property(get = "wrapped")]
///     county: Option<String>,
/// }
///
/// let registry = BeanRegistry::new();
/// let descriptor = registry.lookup::<Address>().unwrap();
///
/// let street = descriptor.property("street").unwrap();
/// assert_eq!(street.style(), PropertyStyle::Immutable);
/// assert_eq!(street.property_type().name(), "String");
///
/// // A nullable field is typed by its content, unless its getter
/// // returns the whole `Option`.
/// let town = descriptor.property("town").unwrap();
/// assert_eq!(town.property_type().name(), "String");
/// let county = descriptor.property("county").unwrap();
/// assert_eq!(county.property_type().name(), "Option<String>");
///
/// let address = Address { street: "Park Lane".into(), town: None, county: None };
/// assert_eq!(street.get_as::<String>(&address).unwrap().as_deref(), Some("Park Lane"));
/// assert_eq!(town.get_as::<String>(&address).unwrap(), None);
/// assert_eq!(county.get_as::<Option<String>>(&address).unwrap(), Some(None));
/// ```
pub struct PropertyDescriptor {
    pub(crate) name: &'static str,
    pub(crate) declaring_type: &'static Type,
    pub(crate) generic_type: &'static TypeInfo,
    pub(crate) slot_type: &'static TypeInfo,
    pub(crate) style: PropertyStyle,
    pub(crate) slot: Option<usize>,
    pub(crate) annotations: Option<Arc<Annotations>>,
    pub(crate) accessor: Box<dyn PropertyAccessor>,
}

impl PropertyDescriptor {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The bean type declaring the property.
    #[inline]
    pub fn declaring_type(&self) -> &'static Type {
        self.declaring_type
    }

    /// The declared type of the property.
    #[inline]
    pub fn property_type(&self) -> &'static Type {
        self.generic_type.ty()
    }

    /// The declared type with its generic arguments.
    #[inline]
    pub fn generic_type(&self) -> &'static TypeInfo {
        self.generic_type
    }

    #[inline]
    pub fn style(&self) -> PropertyStyle {
        self.style
    }

    #[inline]
    pub fn annotations(&self) -> &Annotations {
        self.annotations.as_deref().unwrap_or(Annotations::EMPTY)
    }

    /// Returns the annotation of type `T`, if present.
    #[inline]
    pub fn annotation<T: Value>(&self) -> Option<&T> {
        self.annotations().get::<T>()
    }

    /// The position of the property in the constructor parameters of an
    /// immutable bean.
    #[inline]
    pub fn constructor_index(&self) -> Option<usize> {
        match self.style {
            PropertyStyle::Immutable => self.slot,
            _ => None,
        }
    }

    #[inline]
    pub fn accessor_kind(&self) -> AccessorKind {
        self.accessor.kind()
    }

    /// Returns `true` if [`set`](Self::set) can succeed.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.style.is_writable() && self.accessor.is_writable()
    }

    #[inline]
    pub(crate) fn slot(&self) -> Option<usize> {
        self.slot
    }

    /// Reads the property of `bean`, `Ok(None)` is a null value.
    pub fn get(&self, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError> {
        self.check_bean(bean)?;
        self.accessor.read(bean)
    }

    /// Reads the property of `bean` as a `T`.
    pub fn get_as<T: Value + TypePath>(&self, bean: &dyn Bean) -> Result<Option<T>, BeanError> {
        match self.get(bean)? {
            Some(value) => value.take::<T>().map(Some).map_err(|value| BeanError::TypeMismatch {
                property: self.name,
                expected: T::type_path(),
                found: value.dyn_type_path(),
            }),
            None => Ok(None),
        }
    }

    /// Writes `value` into `bean`.
    ///
    /// Only [`PropertyStyle::ReadWrite`] properties are writable, others
    /// fail with [`BeanError::NotWritable`].
    #[inline]
    pub fn set<T: Value>(&self, bean: &mut dyn Bean, value: T) -> Result<(), BeanError> {
        self.set_boxed(bean, Some(Box::new(value)))
    }

    /// Writes a type-erased value into `bean`, `None` writes null.
    pub fn set_boxed(&self, bean: &mut dyn Bean, value: Option<Box<dyn Value>>) -> Result<(), BeanError> {
        if !self.style.is_writable() {
            return Err(BeanError::NotWritable {
                property: self.name,
            });
        }
        self.check_bean(bean)?;
        let value = match value {
            Some(value) => self.accept(value)?,
            None => None,
        };
        self.accessor.write(bean, value)
    }

    /// Converts `value` into the type the write operation (or constructor
    /// parameter) expects.
    pub(crate) fn accept(&self, value: Box<dyn Value>) -> Result<Option<Box<dyn Value>>, BeanError> {
        let found = value.dyn_type_info();
        // Nullable slots also take their `Option` form.
        let accepted = self.generic_type.is_assignable_from(found)
            || self.slot_type.is_assignable_from(found)
            || is_optional_of(found, self.slot_type);
        if !accepted {
            return Err(BeanError::TypeMismatch {
                property: self.name,
                expected: self.generic_type.type_path(),
                found: found.type_path(),
            });
        }
        self.slot_type.coerce(value).map_err(|value| BeanError::TypeMismatch {
            property: self.name,
            expected: self.slot_type.type_path(),
            found: value.dyn_type_path(),
        })
    }

    fn check_bean(&self, bean: &dyn Bean) -> Result<(), BeanError> {
        if bean.ty_id() == self.declaring_type.id() {
            Ok(())
        } else {
            Err(BeanError::WrongBeanType {
                expected: self.declaring_type.path(),
                found: bean.dyn_type_path(),
            })
        }
    }
}

fn is_optional_of(found: &TypeInfo, target: &TypeInfo) -> bool {
    match found {
        TypeInfo::Optional(info) => target.is_assignable_from(info.item_info()),
        _ => false,
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("declaring_type", self.declaring_type)
            .field("property_type", self.generic_type.ty())
            .field("style", &self.style)
            .field("accessor", &self.accessor)
            .finish()
    }
}
