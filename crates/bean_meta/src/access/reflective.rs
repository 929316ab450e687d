use alloc::boxed::Box;
use alloc::string::ToString;

use crate::access::{AccessorKind, MemberBinding, PropertyAccessor};
use crate::schema::BeanSchema;
use crate::{Bean, BeanError, Value};

/// Looks the bound members up by name at every call.
///
/// Nothing resolved is cached between calls; the accessor only keeps the
/// schema and the member names.
#[derive(Debug)]
pub struct ReflectiveAccessor {
    schema: &'static BeanSchema,
    members: MemberBinding,
}

impl ReflectiveAccessor {
    /// Checks that the members exist, without keeping them.
    pub(crate) fn bind(schema: &'static BeanSchema, members: MemberBinding) -> Result<Self, BeanError> {
        if members.read.find(schema).is_none() {
            return Err(BeanError::NotReadable {
                bean: schema.ty().path(),
                property: members.property,
            });
        }
        if let Some(member) = members.write
            && member.find(schema).is_none()
        {
            return Err(BeanError::ConstructorOrAccessorNotFound {
                bean: schema.ty().path(),
                member: member.name().to_string(),
            });
        }
        Ok(Self { schema, members })
    }
}

impl PropertyAccessor for ReflectiveAccessor {
    #[inline]
    fn kind(&self) -> AccessorKind {
        AccessorKind::Reflective
    }

    fn read(&self, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError> {
        let property = self.members.property;
        let read = self.members.read.find(self.schema).ok_or(BeanError::NotReadable {
            bean: self.schema.ty().path(),
            property,
        })?;
        read(bean).map_err(|e| BeanError::invocation(property, e))
    }

    fn write(&self, bean: &mut dyn Bean, value: Option<Box<dyn Value>>) -> Result<(), BeanError> {
        let property = self.members.property;
        let write = self
            .members
            .write
            .and_then(|member| member.find(self.schema))
            .ok_or(BeanError::NotWritable { property })?;
        write(bean, value).map_err(|e| BeanError::invocation(property, e))
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.members.write.is_some()
    }
}
