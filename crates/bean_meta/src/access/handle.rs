use alloc::boxed::Box;
use alloc::string::ToString;
use core::fmt;

use crate::access::{AccessorKind, MemberBinding, PropertyAccessor};
use crate::schema::{BeanSchema, ReadFn, WriteFn};
use crate::{Bean, BeanError, Value};

/// Member functions resolved once, when the descriptor is built.
///
/// Every bound member already has the uniform `(bean) -> value` shape, so an
/// invocation is a single indirect call.
pub struct HandleAccessor {
    property: &'static str,
    read: ReadFn,
    write: Option<WriteFn>,
}

impl HandleAccessor {
    pub(crate) fn resolve(schema: &BeanSchema, members: MemberBinding) -> Result<Self, BeanError> {
        let property = members.property;
        let read = members.read.find(schema).ok_or(BeanError::NotReadable {
            bean: schema.ty().path(),
            property,
        })?;
        let write = match members.write {
            Some(member) => Some(member.find(schema).ok_or_else(|| {
                BeanError::ConstructorOrAccessorNotFound {
                    bean: schema.ty().path(),
                    member: member.name().to_string(),
                }
            })?),
            None => None,
        };
        Ok(Self {
            property,
            read,
            write,
        })
    }
}

impl PropertyAccessor for HandleAccessor {
    #[inline]
    fn kind(&self) -> AccessorKind {
        AccessorKind::Handle
    }

    #[inline]
    fn read(&self, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError> {
        (self.read)(bean).map_err(|e| BeanError::invocation(self.property, e))
    }

    fn write(&self, bean: &mut dyn Bean, value: Option<Box<dyn Value>>) -> Result<(), BeanError> {
        let Some(write) = self.write else {
            return Err(BeanError::NotWritable {
                property: self.property,
            });
        };
        write(bean, value).map_err(|e| BeanError::invocation(self.property, e))
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.write.is_some()
    }
}

impl fmt::Debug for HandleAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleAccessor")
            .field("property", &self.property)
            .field("writable", &self.write.is_some())
            .finish()
    }
}
