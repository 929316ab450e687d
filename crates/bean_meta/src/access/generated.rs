use alloc::boxed::Box;
use alloc::string::ToString;

use crate::access::{AccessorKind, MemberBinding, PropertyAccessor};
use crate::schema::{BeanSchema, GeneratedAccessor};
use crate::{Bean, BeanError, Value};

/// An entry of the generated accessor table bound to a property.
#[derive(Debug)]
pub struct GeneratedBinding {
    entry: GeneratedAccessor,
    writable: bool,
}

impl GeneratedBinding {
    pub(crate) fn resolve(schema: &BeanSchema, members: MemberBinding) -> Result<Self, BeanError> {
        let property = members.property;
        let entry = *schema
            .generated_for(property)
            .ok_or(BeanError::NotReadable {
                bean: schema.ty().path(),
                property,
            })?;
        let writable = members.write.is_some();
        if writable && entry.setter().is_none() {
            return Err(BeanError::ConstructorOrAccessorNotFound {
                bean: schema.ty().path(),
                member: property.to_string(),
            });
        }
        Ok(Self { entry, writable })
    }
}

impl PropertyAccessor for GeneratedBinding {
    #[inline]
    fn kind(&self) -> AccessorKind {
        AccessorKind::Generated
    }

    #[inline]
    fn read(&self, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError> {
        (self.entry.getter())(bean).map_err(|e| BeanError::invocation(self.entry.name(), e))
    }

    fn write(&self, bean: &mut dyn Bean, value: Option<Box<dyn Value>>) -> Result<(), BeanError> {
        let property = self.entry.name();
        match self.entry.setter() {
            Some(set) if self.writable => {
                set(bean, value).map_err(|e| BeanError::invocation(property, e))
            }
            _ => Err(BeanError::NotWritable { property }),
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.writable
    }
}
