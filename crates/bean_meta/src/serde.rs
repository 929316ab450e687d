//! `serde` support: serialize any bean through its descriptor.
//!
//! A bean is written as a map from property names to values, in declaration
//! order. Null properties are skipped. Values are walked structurally:
//!
//! - primitives and `String` use the matching serializer method,
//! - `Option` is written as its content,
//! - lists and sets as sequences, maps as maps,
//! - nested beans recursively.
//!
//! Other leaf types cannot be serialized and report an error.
//!
//! ```
//! use bean_meta::{BeanRegistry, derive::Bean, serde::SerializeBean};
//!
//! #[derive(Bean, Clone, Debug, PartialEq)]
//! struct Person {
//!     #[property]
//!     forename: Option<String>,
//!     #[property]
//!     surname: String,
//!     #[property]
//!     tags: Vec<String>,
//! }
//!
//! let registry = BeanRegistry::new();
//! let person = Person { forename: None, surname: "Joda".into(), tags: vec!["a".into()] };
//!
//! let json = serde_json::to_string(&SerializeBean::new(&registry, &person)).unwrap();
//! assert_eq!(json, r#"{"surname":"Joda","tags":["a"]}"#);
//! ```

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde_core::ser::{Error, SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::{Bean, BeanRegistry, Value, ValueRef};

// -----------------------------------------------------------------------------
// SerializeBean

/// A [`Serialize`] view of a bean.
pub struct SerializeBean<'a> {
    registry: &'a BeanRegistry,
    bean: &'a dyn Bean,
}

impl<'a> SerializeBean<'a> {
    #[inline]
    pub fn new(registry: &'a BeanRegistry, bean: &'a dyn Bean) -> Self {
        Self { registry, bean }
    }
}

impl Serialize for SerializeBean<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let descriptor = self.registry.lookup_bean(self.bean).map_err(S::Error::custom)?;
        let values = descriptor.read_all(self.bean).map_err(S::Error::custom)?;
        let present: Vec<(&'static str, Box<dyn Value>)> = values
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect();

        let mut state = serializer.serialize_map(Some(present.len()))?;
        for (name, value) in &present {
            state.serialize_entry(name, &SerializeValue::new(self.registry, &**value))?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// SerializeValue

struct SerializeValue<'a> {
    registry: &'a BeanRegistry,
    value: &'a dyn Value,
}

impl<'a> SerializeValue<'a> {
    #[inline]
    fn new(registry: &'a BeanRegistry, value: &'a dyn Value) -> Self {
        Self { registry, value }
    }
}

macro_rules! serialize_scalar {
    ($value:expr, $serializer:expr, { $($ty:ty => $method:ident),* $(,)? }) => {
        $(
            if let Some(value) = $value.downcast_ref::<$ty>() {
                return $serializer.$method(*value);
            }
        )*
    };
}

impl Serialize for SerializeValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.value_ref() {
            ValueRef::Bean(bean) => SerializeBean::new(self.registry, bean).serialize(serializer),
            ValueRef::Optional(Some(inner)) => {
                serializer.serialize_some(&SerializeValue::new(self.registry, inner))
            }
            ValueRef::Optional(None) => serializer.serialize_none(),
            ValueRef::List(items) | ValueRef::Set(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(&SerializeValue::new(self.registry, item))?;
                }
                state.end()
            }
            ValueRef::Map(entries) => {
                let mut state = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    state.serialize_entry(
                        &SerializeValue::new(self.registry, key),
                        &SerializeValue::new(self.registry, value),
                    )?;
                }
                state.end()
            }
            ValueRef::Opaque(value) => {
                if let Some(text) = value.downcast_ref::<String>() {
                    return serializer.serialize_str(text);
                }
                serialize_scalar!(value, serializer, {
                    bool => serialize_bool,
                    char => serialize_char,
                    u8 => serialize_u8,
                    u16 => serialize_u16,
                    u32 => serialize_u32,
                    u64 => serialize_u64,
                    u128 => serialize_u128,
                    i8 => serialize_i8,
                    i16 => serialize_i16,
                    i32 => serialize_i32,
                    i64 => serialize_i64,
                    i128 => serialize_i128,
                    f32 => serialize_f32,
                    f64 => serialize_f64,
                });
                if let Some(value) = value.downcast_ref::<usize>() {
                    return serializer.serialize_u64(*value as u64);
                }
                if let Some(value) = value.downcast_ref::<isize>() {
                    return serializer.serialize_i64(*value as i64);
                }
                Err(S::Error::custom(format!(
                    "cannot serialize opaque value of type `{}`",
                    value.dyn_type_path()
                )))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use super::SerializeBean;
    use crate::BeanRegistry;
    use crate::derive::Bean;

    #[derive(Bean, Clone, Debug, PartialEq)]
    struct Owner {
        #[property]
        name: String,
        #[property]
        age: u32,
    }

    #[derive(Bean, Clone, Debug, PartialEq)]
    struct Garage {
        #[property]
        owner: Option<Owner>,
        #[property]
        slots: BTreeMap<String, Vec<u8>>,
        #[property]
        open: bool,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Colour(u8);

    crate::impl_opaque_value!(Colour, "tests::Colour");

    #[derive(Bean, Clone, Debug, PartialEq)]
    struct Car {
        #[property]
        colour: Colour,
    }

    #[test]
    fn nested_beans_and_maps() {
        let registry = BeanRegistry::new();
        let garage = Garage {
            owner: Some(Owner {
                name: String::from("Stephen"),
                age: 40,
            }),
            slots: [(String::from("a"), vec![1, 2])].into_iter().collect(),
            open: true,
        };
        let json = serde_json::to_value(SerializeBean::new(&registry, &garage)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "owner": { "name": "Stephen", "age": 40 },
                "slots": { "a": [1, 2] },
                "open": true,
            })
        );
    }

    #[test]
    fn opaque_values_are_rejected() {
        let registry = BeanRegistry::new();
        let car = Car { colour: Colour(3) };
        let err = serde_json::to_string(&SerializeBean::new(&registry, &car)).unwrap_err();
        assert!(err.to_string().contains("tests::Colour"));
    }
}
