//! Element types of collection and map properties.
//!
//! Generic parameters are reified, so every answer comes straight from the
//! property's [`TypeInfo`]. Properties of another shape yield `None` or an
//! empty list.
//!
//! ```
//! use std::collections::BTreeMap;
//! use bean_meta::{BeanRegistry, derive::Bean, resolve};
//!
//! #[derive(Bean, Clone, Debug, PartialEq)]
//! struct Index {
//!     #[property]
//!     words: BTreeMap<String, Vec<u32>>,
//!     #[property]
//!     tags: Vec<String>,
//! }
//!
//! let registry = BeanRegistry::new();
//! let descriptor = registry.lookup::<Index>().unwrap();
//!
//! let words = descriptor.property("words").unwrap();
//! assert_eq!(resolve::map_key_type(words).unwrap().name(), "String");
//! assert_eq!(resolve::map_value_type(words).unwrap().name(), "Vec<u32>");
//! assert_eq!(resolve::map_value_type_types(words)[0].name(), "u32");
//! assert!(resolve::collection_type(words).is_none());
//!
//! let tags = descriptor.property("tags").unwrap();
//! assert_eq!(resolve::collection_type(tags).unwrap().name(), "String");
//! assert!(resolve::collection_type_types(tags).is_empty());
//! ```

use alloc::vec::Vec;

use crate::PropertyDescriptor;
use crate::info::{Type, TypeInfo};

fn item_info(info: &TypeInfo) -> Option<&'static TypeInfo> {
    match info {
        TypeInfo::List(list) => Some(list.item_info()),
        TypeInfo::Set(set) => Some(set.item_info()),
        _ => None,
    }
}

fn entry_info(info: &TypeInfo) -> Option<(&'static TypeInfo, &'static TypeInfo)> {
    match info {
        TypeInfo::Map(map) => Some((map.key_info(), map.value_info())),
        _ => None,
    }
}

fn arguments_of(info: &TypeInfo) -> Vec<Type> {
    info.type_arguments().iter().map(|arg| *arg.ty()).collect()
}

/// The element type of a list or set property.
pub fn collection_type(property: &PropertyDescriptor) -> Option<Type> {
    item_info(property.generic_type()).map(|item| *item.ty())
}

/// The type arguments of the element type of a list or set property.
pub fn collection_type_types(property: &PropertyDescriptor) -> Vec<Type> {
    item_info(property.generic_type())
        .map(arguments_of)
        .unwrap_or_default()
}

/// The key type of a map property.
pub fn map_key_type(property: &PropertyDescriptor) -> Option<Type> {
    entry_info(property.generic_type()).map(|(key, _)| *key.ty())
}

/// The value type of a map property.
pub fn map_value_type(property: &PropertyDescriptor) -> Option<Type> {
    entry_info(property.generic_type()).map(|(_, value)| *value.ty())
}

/// The type arguments of the value type of a map property.
pub fn map_value_type_types(property: &PropertyDescriptor) -> Vec<Type> {
    entry_info(property.generic_type())
        .map(|(_, value)| arguments_of(value))
        .unwrap_or_default()
}
