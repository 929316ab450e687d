//! Items referenced by the code `#[derive(Bean)]` and
//! [`impl_opaque_value!`](crate::impl_opaque_value) expand to.
//!
//! Hand-written schemas may use the helpers too, but this module is not
//! part of the stable API.

#![doc(hidden)]

use core::hash::Hash;

use crate::info::TypePath;
use crate::{Bean, MemberError, Value};

// -----------------------------------------------------------------------------
// Re-exports

pub use alloc::boxed::Box;
pub use std::sync::OnceLock;

#[cfg(feature = "auto_register")]
pub use inventory;

// -----------------------------------------------------------------------------
// Type paths

/// `"a::b::C"` -> `"C"`.
#[inline]
pub fn last_segment(path: &'static str) -> &'static str {
    match path.rsplit_once("::") {
        Some((_, last)) => last,
        None => path,
    }
}

/// `"a::b::C"` -> `Some("a::b")`.
#[inline]
pub fn module_of(path: &'static str) -> Option<&'static str> {
    path.rsplit_once("::").map(|(module, _)| module)
}

#[inline]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    crate::value::hash_of(value)
}

// -----------------------------------------------------------------------------
// Member functions

/// Downcasts the receiver of a member function.
#[inline]
pub fn instance<T: Bean + TypePath>(bean: &dyn Bean) -> Result<&T, MemberError> {
    let found = bean.dyn_type_path();
    bean.downcast_ref::<T>().ok_or(MemberError::WrongInstance {
        expected: T::type_path(),
        found,
    })
}

/// Downcasts the receiver of a member function mutably.
#[inline]
pub fn instance_mut<T: Bean + TypePath>(bean: &mut dyn Bean) -> Result<&mut T, MemberError> {
    let found = bean.dyn_type_path();
    bean.downcast_mut::<T>().ok_or(MemberError::WrongInstance {
        expected: T::type_path(),
        found,
    })
}

/// A present read result.
#[inline]
pub fn some<T: Value>(value: T) -> Option<Box<dyn Value>> {
    Some(Box::new(value))
}

/// The read result of a nullable member.
#[inline]
pub fn boxed_opt<T: Value>(value: Option<T>) -> Option<Box<dyn Value>> {
    value.map(|value| Box::new(value) as Box<dyn Value>)
}

/// Boxes a constructed bean.
#[inline]
pub fn bean<T: Bean>(value: T) -> Box<dyn Bean> {
    Box::new(value)
}

/// Stores a written value into a non-null member.
pub fn assign<T: Value + TypePath>(
    slot: &mut T,
    name: &'static str,
    value: Option<Box<dyn Value>>,
) -> Result<(), MemberError> {
    let value = value.ok_or(MemberError::NullValue(name))?;
    *slot = value.take::<T>().map_err(|value| MemberError::WrongValue {
        expected: T::type_path(),
        found: value.dyn_type_path(),
    })?;
    Ok(())
}

/// Stores a written value into a nullable member, `None` clears it.
pub fn assign_opt<T: Value + TypePath>(
    slot: &mut Option<T>,
    value: Option<Box<dyn Value>>,
) -> Result<(), MemberError> {
    *slot = match value {
        Some(value) => Some(value.take::<T>().map_err(|value| MemberError::WrongValue {
            expected: T::type_path(),
            found: value.dyn_type_path(),
        })?),
        None => None,
    };
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::{assign, assign_opt, last_segment, module_of};
    use crate::Value;

    #[test]
    fn path_segments() {
        assert_eq!(last_segment("demo::units::Weight"), "Weight");
        assert_eq!(last_segment("Weight"), "Weight");
        assert_eq!(module_of("demo::units::Weight"), Some("demo::units"));
        assert_eq!(module_of("Weight"), None);
    }

    #[test]
    fn assignment() {
        let mut name = String::new();
        assign(&mut name, "name", Some(alloc::boxed::Box::new(String::from("Joda")))).unwrap();
        assert_eq!(name, "Joda");

        let err = assign(&mut name, "name", None).unwrap_err();
        assert_eq!(err.to_string(), "name must not be null");

        let wrong: alloc::boxed::Box<dyn Value> = alloc::boxed::Box::new(3u8);
        assert!(assign(&mut name, "name", Some(wrong)).is_err());

        let mut town = Some(String::from("London"));
        assign_opt(&mut town, None).unwrap();
        assert_eq!(town, None);
    }
}
