use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::info::TypePath;
use crate::{MemberError, Value};

/// Positional constructor arguments assembled by a builder.
///
/// A slot is `None` when the argument is null.
///
/// ```
/// use bean_meta::{Value, schema::Args};
///
/// let mut args = Args::new("demo::Pair", vec![Some(Box::new(4u8) as Box<dyn Value>), None]);
/// assert_eq!(args.take::<u8>(0).unwrap(), 4);
/// assert_eq!(args.take_opt::<String>(1).unwrap(), None);
/// assert!(args.take::<u8>(0).is_err());
/// assert!(args.take_opt::<u8>(2).is_err());
/// ```
pub struct Args {
    bean: &'static str,
    slots: Vec<Option<Box<dyn Value>>>,
}

impl Args {
    #[inline]
    pub fn new(bean: &'static str, slots: Vec<Option<Box<dyn Value>>>) -> Self {
        Self { bean, slots }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Path of the bean type being constructed.
    #[inline]
    pub fn bean(&self) -> &'static str {
        self.bean
    }

    /// Takes a nullable argument out of its slot.
    ///
    /// An index past the last slot is a [`MemberError::MissingArgument`],
    /// not a null argument.
    pub fn take_opt<T: Value + TypePath>(&mut self, index: usize) -> Result<Option<T>, MemberError> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or(MemberError::MissingArgument {
            bean: self.bean,
            index,
            len,
        })?;
        let Some(value) = slot.take() else {
            return Ok(None);
        };
        value.take::<T>().map(Some).map_err(|value| MemberError::WrongArgument {
            bean: self.bean,
            index,
            expected: T::type_path(),
            found: value.dyn_type_path(),
        })
    }

    /// Takes a non-null argument out of its slot.
    pub fn take<T: Value + TypePath>(&mut self, index: usize) -> Result<T, MemberError> {
        self.take_opt(index)?.ok_or(MemberError::NullArgument {
            bean: self.bean,
            index,
        })
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("bean", &self.bean)
            .field("slots", &self.slots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::Args;
    use crate::{MemberError, Value};

    #[test]
    fn short_arguments_are_not_null() {
        let mut args = Args::new("demo::Pair", vec![Some(Box::new(1u8) as Box<dyn Value>)]);
        let err = args.take_opt::<String>(1).unwrap_err();
        assert!(matches!(err, MemberError::MissingArgument { index: 1, len: 1, .. }));
        assert_eq!(err.to_string(), "`demo::Pair` was given 1 arguments, argument 1 is missing");

        let err = args.take::<u8>(3).unwrap_err();
        assert!(matches!(err, MemberError::MissingArgument { index: 3, .. }));
        assert_eq!(args.take::<u8>(0).unwrap(), 1);
    }
}
