//! Accessor strategies binding a property name to its read and write
//! operations.
//!
//! Three strategies share the [`PropertyAccessor`] contract:
//!
//! - [`AccessorKind::Reflective`]: looks the member up by name in the
//!   [`BeanSchema`] on every call.
//! - [`AccessorKind::Handle`]: resolves the member functions once, when the
//!   descriptor is built, and calls them directly afterwards.
//! - [`AccessorKind::Generated`]: uses the per-type accessor table emitted by
//!   `#[derive(Bean)]`.
//!
//! All three observe the same values and agree on writability; they only
//! differ in how much work an invocation does.

use alloc::boxed::Box;
use core::fmt;

use crate::schema::BeanSchema;
use crate::{Bean, BeanError, Value};

// -----------------------------------------------------------------------------
// Modules

mod generated;
mod handle;
mod reflective;

// -----------------------------------------------------------------------------
// Exports

pub use generated::GeneratedBinding;
pub use handle::HandleAccessor;
pub use reflective::ReflectiveAccessor;

// -----------------------------------------------------------------------------
// AccessorKind

/// The strategy a descriptor binds its properties with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// Name lookup in the schema at every call.
    Reflective,
    /// Member functions resolved once and called directly.
    Handle,
    /// The generated accessor table.
    #[default]
    Generated,
}

// -----------------------------------------------------------------------------
// PropertyAccessor

/// Reads and writes one property of a bean.
///
/// Callers must pass an instance of the declaring type,
/// [`PropertyDescriptor`](crate::PropertyDescriptor) checks this before
/// delegating here.
pub trait PropertyAccessor: Send + Sync + fmt::Debug {
    /// The strategy of this accessor.
    fn kind(&self) -> AccessorKind;

    /// Reads the property, `Ok(None)` is a null value.
    fn read(&self, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError>;

    /// Writes the property in place.
    ///
    /// Fails with [`BeanError::NotWritable`] if the accessor has no write
    /// operation.
    fn write(&self, bean: &mut dyn Bean, value: Option<Box<dyn Value>>) -> Result<(), BeanError>;

    /// Returns `true` if [`write`](Self::write) is bound.
    fn is_writable(&self) -> bool;
}

// -----------------------------------------------------------------------------
// Members

/// The member a property is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadMember {
    Field(&'static str),
    Getter(&'static str),
}

/// The member a property is written through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteMember {
    Field(&'static str),
    Setter(&'static str),
}

/// The resolved members of one property, the input of every strategy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MemberBinding {
    pub property: &'static str,
    pub read: ReadMember,
    pub write: Option<WriteMember>,
}

impl MemberBinding {
    /// Binds the members with the given strategy.
    pub(crate) fn bind(
        self,
        schema: &'static BeanSchema,
        kind: AccessorKind,
    ) -> Result<Box<dyn PropertyAccessor>, BeanError> {
        Ok(match kind {
            AccessorKind::Reflective => Box::new(ReflectiveAccessor::bind(schema, self)?),
            AccessorKind::Handle => Box::new(HandleAccessor::resolve(schema, self)?),
            AccessorKind::Generated => Box::new(GeneratedBinding::resolve(schema, self)?),
        })
    }
}

// -----------------------------------------------------------------------------
// Member lookup

impl ReadMember {
    pub(crate) fn find(self, schema: &BeanSchema) -> Option<crate::schema::ReadFn> {
        match self {
            ReadMember::Field(name) => schema.field(name).and_then(|f| f.reader()),
            ReadMember::Getter(name) => schema.find_method(name).and_then(|m| m.reader()),
        }
    }
}

impl WriteMember {
    pub(crate) fn find(self, schema: &BeanSchema) -> Option<crate::schema::WriteFn> {
        match self {
            WriteMember::Field(name) => schema.field(name).and_then(|f| f.writer()),
            WriteMember::Setter(name) => schema.find_method(name).and_then(|m| m.writer()),
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            WriteMember::Field(name) | WriteMember::Setter(name) => name,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::AccessorKind;

    #[test]
    fn generated_is_default() {
        assert_eq!(AccessorKind::default(), AccessorKind::Generated);
    }
}
