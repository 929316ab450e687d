use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use bean_utils::hash::HashMap;

use crate::access::{AccessorKind, MemberBinding, ReadMember, WriteMember};
use crate::descriptor::{PropertyDescriptor, PropertyStyle};
use crate::info::{ContainerKind, TypeInfo};
use crate::schema::{BeanSchema, FieldDecl, GetStyle, MethodDecl};
use crate::{BeanError, Value};

/// The parts of a [`BeanDescriptor`](crate::BeanDescriptor) computed from
/// a schema.
pub(crate) struct Layout {
    pub properties: Vec<PropertyDescriptor>,
    pub index: HashMap<&'static str, usize>,
    pub constructor: usize,
    pub prototype: Vec<Option<Box<dyn Value>>>,
}

/// Enumerates the properties of `schema` and binds them with `kind`.
pub(crate) fn layout(schema: &'static BeanSchema, kind: AccessorKind) -> Result<Layout, BeanError> {
    let bean = schema.ty().path();
    let mutable = schema.is_mutable();

    let mut properties = Vec::new();
    let mut index = HashMap::default();
    let mut slot_types: Vec<&'static TypeInfo> = Vec::new();
    let mut nullable: Vec<bool> = Vec::new();

    let own_fields = schema
        .fields()
        .iter()
        .filter(|f| !f.is_static() && !f.is_inherited());

    for field in own_fields {
        let Some(style) = field.style() else {
            continue;
        };
        let (read, generic_type) = match style {
            GetStyle::Field | GetStyle::Optional => {
                (ReadMember::Field(field.name()), field.type_info())
            }
            GetStyle::Accessor => {
                let getter = find_getter(schema, field)?;
                let returns = getter.return_info().unwrap_or(field.type_info());
                // An optional-wrapping getter defines the property type.
                let generic_type = match returns.container_kind() {
                    Some(ContainerKind::Optional) => returns,
                    _ => field.type_info(),
                };
                (ReadMember::Getter(getter.name()), generic_type)
            }
        };

        let (write, slot_type) = if mutable {
            let (member, info) = find_writer(schema, field, style)?;
            (Some(member), info)
        } else {
            (None, field.type_info())
        };

        let members = MemberBinding {
            property: field.name(),
            read,
            write,
        };
        let property = PropertyDescriptor {
            name: field.name(),
            declaring_type: schema.ty(),
            generic_type,
            slot_type,
            style: if mutable {
                PropertyStyle::ReadWrite
            } else {
                PropertyStyle::Immutable
            },
            slot: Some(slot_types.len()),
            annotations: field.shared_annotations(),
            accessor: members.bind(schema, kind)?,
        };
        insert(&mut properties, &mut index, bean, property)?;
        slot_types.push(slot_type);
        nullable.push(field.is_nullable());
    }

    for method in schema.methods() {
        let Some(name) = method.derived_property() else {
            continue;
        };
        let Some(returns) = method.return_info() else {
            continue;
        };
        let members = MemberBinding {
            property: name,
            read: ReadMember::Getter(method.name()),
            write: None,
        };
        let property = PropertyDescriptor {
            name,
            declaring_type: schema.ty(),
            generic_type: returns,
            slot_type: returns,
            style: PropertyStyle::Derived,
            slot: None,
            annotations: method.shared_annotations(),
            accessor: members.bind(schema, kind)?,
        };
        insert(&mut properties, &mut index, bean, property)?;
    }

    let constructor = if mutable {
        schema
            .constructors()
            .iter()
            .position(|c| c.arity() == 0)
            .ok_or(BeanError::ConstructorNotFound { bean })?
    } else {
        find_constructor(schema, &slot_types)?
    };

    // Only non-null primitive parameters start from their zero value.
    let prototype = if mutable {
        Vec::new()
    } else {
        schema.constructors()[constructor]
            .params()
            .iter()
            .zip(&nullable)
            .map(|(param, &nullable)| if nullable { None } else { param.zero_value() })
            .collect()
    };

    Ok(Layout {
        properties,
        index,
        constructor,
        prototype,
    })
}

fn insert(
    properties: &mut Vec<PropertyDescriptor>,
    index: &mut HashMap<&'static str, usize>,
    bean: &'static str,
    property: PropertyDescriptor,
) -> Result<(), BeanError> {
    let name = property.name;
    if index.insert(name, properties.len()).is_some() {
        return Err(BeanError::DuplicateProperty {
            bean,
            property: name,
        });
    }
    properties.push(property);
    Ok(())
}

/// Finds the conventional getter of an accessor-style field: `is_<name>`
/// for `bool` fields, then `get_<name>`, on the schema and then its
/// ancestors.
fn find_getter<'a>(schema: &'a BeanSchema, field: &FieldDecl) -> Result<&'a MethodDecl, BeanError> {
    let getter = format!("get_{}", field.name());
    let found = if field.type_info().type_is::<bool>() {
        let is = format!("is_{}", field.name());
        find_reader(schema, &is).or_else(|| find_reader(schema, &getter))
    } else {
        find_reader(schema, &getter)
    };
    found.ok_or(BeanError::ConstructorOrAccessorNotFound {
        bean: schema.ty().path(),
        member: getter,
    })
}

fn find_reader<'a>(schema: &'a BeanSchema, name: &str) -> Option<&'a MethodDecl> {
    schema.find_method(name).filter(|m| m.reader().is_some())
}

/// Finds the write member of a property of a mutable bean: the field
/// itself for field styles, otherwise `set_<name>` with a fallback on the
/// field.
fn find_writer(
    schema: &BeanSchema,
    field: &FieldDecl,
    style: GetStyle,
) -> Result<(WriteMember, &'static TypeInfo), BeanError> {
    if style == GetStyle::Accessor {
        let setter = format!("set_{}", field.name());
        if let Some(method) = schema.find_method(&setter)
            && let Some(param) = method.param_info()
        {
            return Ok((WriteMember::Setter(method.name()), param));
        }
    }
    if field.writer().is_some() {
        return Ok((WriteMember::Field(field.name()), field.type_info()));
    }
    Err(BeanError::ConstructorOrAccessorNotFound {
        bean: schema.ty().path(),
        member: format!("set_{}", field.name()),
    })
}

/// Locates the constructor of an immutable bean: exact parameter types
/// first, then a unique constructor whose parameters accept the property
/// types.
fn find_constructor(schema: &BeanSchema, types: &[&'static TypeInfo]) -> Result<usize, BeanError> {
    let bean = schema.ty().path();
    let constructors = schema.constructors();
    if let Some(exact) = constructors.iter().position(|c| c.matches_exactly(types)) {
        return Ok(exact);
    }
    let mut lenient = constructors
        .iter()
        .enumerate()
        .filter(|(_, c)| c.matches_leniently(types))
        .map(|(i, _)| i);
    match (lenient.next(), lenient.next()) {
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => Err(BeanError::AmbiguousConstructor { bean }),
        (None, _) => {
            log::debug!(
                "no constructor of `{bean}` takes ({})",
                types.iter().map(|t| t.type_name()).collect::<Vec<_>>().join(", ")
            );
            Err(BeanError::ConstructorNotFound { bean })
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::find_constructor;
    use crate::info::Typed;
    use crate::schema::BeanSchema;

    #[test]
    fn empty_schema_has_no_constructor() {
        static SCHEMA: std::sync::OnceLock<BeanSchema> = std::sync::OnceLock::new();
        let schema = SCHEMA.get_or_init(BeanSchema::new::<u8>);
        let err = find_constructor(schema, &[u8::type_info()]).unwrap_err();
        assert_eq!(err.to_string(), "unable to find constructor: u8");
    }
}
