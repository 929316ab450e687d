use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::error::Error as StdError;

use thiserror::Error;

/// A shared, type-erased cause.
pub type Cause = Arc<dyn StdError + Send + Sync>;

// -----------------------------------------------------------------------------
// BeanError

/// Errors of descriptor construction, property access and bean building.
///
/// Errors are cheap to clone so that the registry can hand out the same
/// descriptor-construction failure to every caller.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum BeanError {
    #[error("bean type not found: {0}")]
    BeanNotFound(Cow<'static, str>),

    #[error("property not found: {bean}.{property}")]
    PropertyNotFound { bean: &'static str, property: String },

    #[error("bean type already registered: {0}")]
    DuplicateRegistration(&'static str),

    #[error("property declared twice: {bean}.{property}")]
    DuplicateProperty {
        bean: &'static str,
        property: &'static str,
    },

    #[error("unable to find constructor: {bean}")]
    ConstructorNotFound { bean: &'static str },

    #[error("unable to find property getter or setter: {bean}.{member}")]
    ConstructorOrAccessorNotFound { bean: &'static str, member: String },

    #[error("unable to find constructor: more than one matches for {bean}")]
    AmbiguousConstructor { bean: &'static str },

    #[error("property cannot be read: {bean}.{property}")]
    NotReadable {
        bean: &'static str,
        property: &'static str,
    },

    #[error("property cannot be written: {property}")]
    NotWritable { property: &'static str },

    #[error("property {property} expects `{expected}`, found `{found}`")]
    TypeMismatch {
        property: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("property {property} cannot parse {text:?} as `{ty}`")]
    ParseError {
        property: &'static str,
        ty: &'static str,
        text: String,
        source: Cause,
    },

    #[error("unknown property: {bean}.{property}")]
    UnknownProperty { bean: &'static str, property: String },

    #[error("bean cannot be created: {bean}")]
    ConstructionFailed { bean: &'static str, source: Cause },

    #[error("property {property} failed on invocation")]
    InvocationFailed { property: &'static str, source: Cause },

    #[error("wrong bean type: expected `{expected}`, found `{found}`")]
    WrongBeanType {
        expected: &'static str,
        found: &'static str,
    },
}

impl BeanError {
    #[inline]
    pub(crate) fn construction(bean: &'static str, cause: impl StdError + Send + Sync + 'static) -> Self {
        Self::ConstructionFailed {
            bean,
            source: Arc::new(cause),
        }
    }

    #[inline]
    pub(crate) fn invocation(property: &'static str, cause: MemberError) -> Self {
        Self::InvocationFailed {
            property,
            source: Arc::new(cause),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberError

/// Failures reported by the member functions of a
/// [`BeanSchema`](crate::schema::BeanSchema): getters, setters, field
/// accessors and constructors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MemberError {
    #[error("member invoked on `{found}`, expected `{expected}`")]
    WrongInstance {
        expected: &'static str,
        found: &'static str,
    },

    #[error("member expects `{expected}`, found `{found}`")]
    WrongValue {
        expected: &'static str,
        found: &'static str,
    },

    #[error("argument {index} of `{bean}` expects `{expected}`, found `{found}`")]
    WrongArgument {
        bean: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("argument {index} of `{bean}` is null")]
    NullArgument { bean: &'static str, index: usize },

    #[error("`{bean}` was given {len} arguments, argument {index} is missing")]
    MissingArgument {
        bean: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{0} must not be null")]
    NullValue(&'static str),

    #[error("{0}")]
    Validation(Cow<'static, str>),

    #[error("{0}")]
    Other(Box<dyn StdError + Send + Sync>),
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::error::Error;

    use super::{BeanError, MemberError};

    #[test]
    fn causes_are_kept() {
        let err = BeanError::construction("demo::Handle", MemberError::NullValue("city"));
        assert_eq!(err.to_string(), "bean cannot be created: demo::Handle");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "city must not be null");

        let copy = err.clone();
        assert!(matches!(copy, BeanError::ConstructionFailed { bean: "demo::Handle", .. }));
    }
}
