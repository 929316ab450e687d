//! Argument checks used by bean constructors.
//!
//! Failures are [`MemberError`]s, so a builder reports them as
//! [`BeanError::ConstructionFailed`](crate::BeanError::ConstructionFailed).

use alloc::borrow::Cow;
use alloc::format;

use crate::{MemberError, Value, ValueRef};

/// Fails if `value` is null.
///
/// ```
/// use bean_meta::ops::validate::not_null;
///
/// assert_eq!(not_null(Some(3), "count").unwrap(), 3);
/// assert_eq!(not_null(None::<u8>, "count").unwrap_err().to_string(), "count must not be null");
/// ```
#[inline]
pub fn not_null<T>(value: Option<T>, name: &'static str) -> Result<T, MemberError> {
    value.ok_or(MemberError::NullValue(name))
}

/// Fails if `value` is null or empty.
///
/// Strings, lists, sets and maps are empty when they have no element, an
/// `Option` is checked through its content. Other values are never empty.
///
/// ```
/// use bean_meta::ops::validate::not_empty;
///
/// assert!(not_empty(Some(String::from("Blah")), "name").is_ok());
/// assert!(not_empty(Some(String::new()), "name").is_err());
/// assert!(not_empty(Some(Vec::<u8>::new()), "list").is_err());
/// assert!(not_empty(None::<Vec<u8>>, "list").is_err());
/// ```
pub fn not_empty<T: Value>(value: Option<T>, name: &'static str) -> Result<T, MemberError> {
    let value = not_null(value, name)?;
    if is_empty(&value) {
        return Err(MemberError::Validation(Cow::Owned(format!(
            "{name} must not be empty"
        ))));
    }
    Ok(value)
}

fn is_empty(value: &dyn Value) -> bool {
    if let Some(text) = value.downcast_ref::<alloc::string::String>() {
        return text.is_empty();
    }
    match value.value_ref() {
        ValueRef::Optional(inner) => inner.is_none_or(is_empty),
        ValueRef::List(items) | ValueRef::Set(items) => items.is_empty(),
        ValueRef::Map(entries) => entries.is_empty(),
        ValueRef::Opaque(_) | ValueRef::Bean(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};

    use super::{not_empty, not_null};

    #[test]
    fn null_checks() {
        assert!(not_null(Some(""), "name").is_ok());
        let err = not_null(None::<String>, "name").unwrap_err();
        assert_eq!(err.to_string(), "name must not be null");
    }

    #[test]
    fn empty_maps() {
        let mut map = BTreeMap::new();
        assert!(not_empty(Some(map.clone()), "map").is_err());
        map.insert(String::from("A"), String::from("B"));
        assert!(not_empty(Some(map), "map").is_ok());
        let err = not_empty(Some(None::<String>), "town").unwrap_err();
        assert_eq!(err.to_string(), "town must not be empty");
    }
}
