//! Construction of beans from named property values.
//!
//! A [`BeanBuilder`] is opened by
//! [`BeanDescriptor::builder`](crate::BeanDescriptor::builder), fed with
//! values by property name and consumed by [`BeanBuilder::build`].
//!
//! Immutable beans are created through the constructor located when the
//! descriptor was built, their arguments start with the zero value of each
//! parameter type. Mutable beans are created through their zero-argument
//! constructor and every value that was set is then written through the
//! property accessor, in declaration order.

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::descriptor::{BeanDescriptor, PropertyDescriptor, PropertyStyle};
use crate::info::{TypeInfo, TypePath};
use crate::schema::Args;
use crate::{Bean, BeanError, MemberError, Value};

// -----------------------------------------------------------------------------
// Modules

mod convert;

// -----------------------------------------------------------------------------
// Exports

pub use convert::{NoConverter, StringConverter};

// -----------------------------------------------------------------------------
// BeanBuilder

/// Accumulates property values and builds a bean from them.
///
/// # Examples
///
/// ```
/// use bean_meta::{BeanError, BeanRegistry, derive::Bean};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Account {
///     #[property]
///     number: u32,
///     #[property(validate = "not_null")]
///     owner: Option<String>,
/// }
///
/// let registry = BeanRegistry::new();
/// let descriptor = registry.lookup::<Account>().unwrap();
///
/// let mut builder = descriptor.builder();
/// builder.set_string("number", "12").unwrap();
/// assert!(matches!(builder.set("owner", 1u8), Err(BeanError::TypeMismatch { .. })));
/// assert!(matches!(builder.set("balance", 0), Err(BeanError::UnknownProperty { .. })));
///
/// // `owner` is still null.
/// assert!(matches!(builder.build(), Err(BeanError::ConstructionFailed { .. })));
/// ```
pub struct BeanBuilder<'a> {
    descriptor: &'a BeanDescriptor,
    slots: Vec<Option<Box<dyn Value>>>,
    touched: Vec<bool>,
}

impl<'a> BeanBuilder<'a> {
    pub(crate) fn new(descriptor: &'a BeanDescriptor) -> Self {
        let (slots, touched) = if descriptor.is_mutable() {
            let count = descriptor
                .properties()
                .iter()
                .filter(|p| p.slot().is_some())
                .count();
            (vec![None; count], vec![false; count])
        } else {
            let slots = descriptor.prototype();
            let touched = vec![false; slots.len()];
            (slots, touched)
        };
        Self {
            descriptor,
            slots,
            touched,
        }
    }

    /// The descriptor of the bean being built.
    #[inline]
    pub fn descriptor(&self) -> &'a BeanDescriptor {
        self.descriptor
    }

    /// Sets the property `name` to `value`.
    ///
    /// The value must have the property type or, for optional properties,
    /// the wrapped type.
    #[inline]
    pub fn set<T: Value>(&mut self, name: &str, value: T) -> Result<&mut Self, BeanError> {
        self.set_boxed(name, Some(Box::new(value)))
    }

    /// Sets the property `name` to a type-erased value, `None` sets null.
    pub fn set_boxed(&mut self, name: &str, value: Option<Box<dyn Value>>) -> Result<&mut Self, BeanError> {
        let (property, slot) = self.buildable(name)?;
        let value = match value {
            Some(value) => property.accept(value)?,
            None => None,
        };
        self.slots[slot] = value;
        self.touched[slot] = true;
        Ok(self)
    }

    /// Parses `text` with the descriptor's
    /// [`StringConverter`] and sets the property `name` to the result.
    pub fn set_string(&mut self, name: &str, text: &str) -> Result<&mut Self, BeanError> {
        let (property, _) = self.buildable(name)?;
        let target = match property.generic_type() {
            TypeInfo::Optional(info) => info.item_info(),
            other => other,
        };
        let value = self
            .descriptor
            .converter()
            .parse(target, text)
            .map_err(|source| BeanError::ParseError {
                property: property.name(),
                ty: target.type_path(),
                text: text.to_string(),
                source,
            })?;
        self.set_boxed(name, Some(value))
    }

    /// Returns the value currently held for the property `name`.
    pub fn get(&self, name: &str) -> Result<Option<&dyn Value>, BeanError> {
        let (_, slot) = self.buildable(name)?;
        Ok(self.slots[slot].as_deref())
    }

    fn buildable(&self, name: &str) -> Result<(&'a PropertyDescriptor, usize), BeanError> {
        let descriptor = self.descriptor;
        let property = descriptor.find(name).ok_or_else(|| BeanError::UnknownProperty {
            bean: descriptor.ty().path(),
            property: name.to_string(),
        })?;
        match property.slot() {
            Some(slot) if property.style() != PropertyStyle::Derived => Ok((property, slot)),
            _ => Err(BeanError::NotWritable {
                property: property.name(),
            }),
        }
    }

    /// Builds the bean.
    ///
    /// Every failure of the constructor or of a write operation is reported
    /// as [`BeanError::ConstructionFailed`].
    pub fn build(self) -> Result<Box<dyn Bean>, BeanError> {
        let bean = self.descriptor.ty().path();
        if !self.descriptor.is_mutable() {
            log::trace!("building `{bean}` through its constructor");
            let constructor = self.descriptor.constructor();
            // A leniently matched constructor may take `Option<T>` where the
            // property holds a `T`.
            let slots = self
                .slots
                .into_iter()
                .zip(constructor.params())
                .enumerate()
                .map(|(index, (slot, param))| match slot {
                    Some(value) => param.coerce(value).map_err(|value| {
                        BeanError::construction(bean, MemberError::WrongArgument {
                            bean,
                            index,
                            expected: param.type_path(),
                            found: value.dyn_type_path(),
                        })
                    }),
                    None => Ok(None),
                })
                .collect::<Result<Vec<_>, _>>()?;
            return constructor
                .invoke(Args::new(bean, slots))
                .map_err(|e| BeanError::construction(bean, e));
        }

        log::trace!("building `{bean}` through its setters");
        let mut instance = self
            .descriptor
            .constructor()
            .invoke(Args::new(bean, Vec::new()))
            .map_err(|e| BeanError::construction(bean, e))?;
        let mut slots = self.slots;
        for property in self.descriptor.properties() {
            let Some(slot) = property.slot() else {
                continue;
            };
            if !self.touched[slot] {
                continue;
            }
            property
                .accessor
                .write(&mut *instance, slots[slot].take())
                .map_err(|e| BeanError::construction(bean, e))?;
        }
        Ok(instance)
    }

    /// Builds the bean and unboxes it as a `T`.
    pub fn build_as<T: Bean + TypePath>(self) -> Result<T, BeanError> {
        self.build()?.take::<T>().map_err(|bean| BeanError::WrongBeanType {
            expected: T::type_path(),
            found: bean.dyn_type_path(),
        })
    }
}

impl fmt::Debug for BeanBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for property in self.descriptor.properties() {
            if let Some(slot) = property.slot() {
                map.entry(&property.name(), &self.slots[slot]);
            }
        }
        map.finish()
    }
}
