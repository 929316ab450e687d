use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::{format, vec};

use super::{Address, Currency, Person, address, converter, joda};
use crate::derive::Bean;
use crate::info::TypePath;
use crate::{AccessorKind, BeanError, BeanRegistry, DescribeBean, PropertyStyle};

fn registry() -> BeanRegistry {
    BeanRegistry::new().with_converter(converter())
}

#[test]
fn enumerates_properties_in_declaration_order() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();

    assert_eq!(descriptor.property_count(), 8);
    assert_eq!(
        descriptor.property_names().collect::<Vec<_>>(),
        ["number", "flag", "street", "town", "city", "owner", "list", "currency"]
    );
    assert_eq!(descriptor.accessor_kind(), AccessorKind::Handle);
    assert!(!descriptor.is_mutable());

    for (index, property) in descriptor.properties().iter().enumerate() {
        assert_eq!(property.style(), PropertyStyle::Immutable);
        assert_eq!(property.accessor_kind(), AccessorKind::Handle);
        assert_eq!(property.constructor_index(), Some(index));
        assert_eq!(property.declaring_type().path(), Address::type_path());
        assert!(!property.is_writable());
    }
}

#[test]
fn property_types() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();
    let type_of = |name| descriptor.property(name).unwrap().property_type();

    assert!(type_of("number").is::<i32>());
    assert!(type_of("flag").is::<bool>());
    assert!(type_of("street").is::<String>());
    // Read through a getter returning the whole `Option`.
    assert!(type_of("town").is::<Option<String>>());
    assert!(type_of("owner").is::<Person>());
    assert!(type_of("list").is::<Vec<String>>());
    assert!(type_of("currency").is::<Currency>());

    // `bool` properties are read through `is_<name>`.
    let schema = Address::schema();
    assert!(schema.method("is_flag").is_some());
    assert!(schema.method("get_flag").is_none());
    assert!(schema.method("get_street").is_none());
    assert_eq!(
        schema.method("get_town").unwrap().return_info().unwrap().type_path(),
        <Option<String> as TypePath>::type_path()
    );
}

#[test]
fn reads_every_property() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();
    let bean = address();

    let get = |name| descriptor.property(name).unwrap();
    assert_eq!(get("number").get_as::<i32>(&bean).unwrap(), Some(12));
    assert_eq!(get("flag").get_as::<bool>(&bean).unwrap(), Some(true));
    assert_eq!(get("street").get_as::<String>(&bean).unwrap().as_deref(), Some("Park Lane"));
    assert_eq!(get("town").get_as::<Option<String>>(&bean).unwrap(), Some(None));
    assert_eq!(get("owner").get_as::<Person>(&bean).unwrap(), Some(joda()));
    assert_eq!(get("list").get_as::<Vec<String>>(&bean).unwrap().unwrap().len(), 2);
    assert_eq!(get("currency").get_as::<Currency>(&bean).unwrap(), Some(Currency::Gbp));

    let absent = Address {
        owner: None,
        currency: None,
        ..address()
    };
    assert!(get("owner").get(&absent).unwrap().is_none());
    assert!(get("currency").get(&absent).unwrap().is_none());

    let err = get("number").get_as::<i64>(&bean).unwrap_err();
    assert!(matches!(err, BeanError::TypeMismatch { property: "number", .. }));
}

#[test]
fn builds_from_text_and_values() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();

    let mut builder = descriptor.builder();
    builder
        .set_string("number", "12")
        .unwrap()
        .set_string("flag", "true")
        .unwrap()
        .set("street", "Park Lane".to_string())
        .unwrap()
        .set_string("town", "Barnet")
        .unwrap()
        .set("city", Some("London".to_string()))
        .unwrap()
        .set("owner", joda())
        .unwrap()
        .set("list", vec!["a".to_string(), "b".to_string()])
        .unwrap()
        .set_string("currency", "GBP")
        .unwrap();
    assert_eq!(
        builder.get("number").unwrap().unwrap().downcast_ref::<i32>(),
        Some(&12)
    );

    let bean = builder.build_as::<Address>().unwrap();
    assert_eq!(bean, Address {
        town: Some("Barnet".into()),
        ..address()
    });
}

#[test]
fn builder_defaults() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();

    let mut builder = descriptor.builder();
    // Primitives start at their zero value, everything else at null.
    assert_eq!(builder.get("number").unwrap().unwrap().downcast_ref::<i32>(), Some(&0));
    assert_eq!(builder.get("flag").unwrap().unwrap().downcast_ref::<bool>(), Some(&false));
    assert!(builder.get("street").unwrap().is_none());

    builder
        .set("street", "Park Lane".to_string())
        .unwrap()
        .set("city", "London".to_string())
        .unwrap()
        .set("list", Vec::<String>::new())
        .unwrap();
    let bean = builder.build_as::<Address>().unwrap();
    assert_eq!(bean.number, 0);
    assert!(!bean.flag);
    assert_eq!(bean.town, None);
    assert_eq!(bean.owner, None);
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(accessor = "handle")]
struct Tally {
    #[property]
    count: Option<i32>,
    #[property]
    enabled: Option<bool>,
    #[property]
    total: i64,
}

#[test]
fn nullable_primitives_start_null() {
    let registry = registry();
    let descriptor = registry.lookup::<Tally>().unwrap();

    let builder = descriptor.builder();
    assert!(builder.get("count").unwrap().is_none());
    assert!(builder.get("enabled").unwrap().is_none());
    assert_eq!(builder.get("total").unwrap().unwrap().downcast_ref::<i64>(), Some(&0));

    let tally = builder.build_as::<Tally>().unwrap();
    assert_eq!(tally, Tally {
        count: None,
        enabled: None,
        total: 0,
    });

    let mut builder = descriptor.builder();
    builder.set("count", 3i32).unwrap().set_string("enabled", "true").unwrap();
    assert_eq!(builder.build_as::<Tally>().unwrap(), Tally {
        count: Some(3),
        enabled: Some(true),
        total: 0,
    });
}

#[test]
fn missing_required_property() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();

    let mut builder = descriptor.builder();
    builder
        .set("street", "Park Lane".to_string())
        .unwrap()
        .set("list", Vec::<String>::new())
        .unwrap()
        .set_boxed("city", None)
        .unwrap();
    let err = builder.build().unwrap_err();
    let BeanError::ConstructionFailed { bean, source } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*bean, Address::type_path());
    assert_eq!(source.to_string(), "city must not be null");
}

#[test]
fn builder_rejects_bad_input() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();
    let mut builder = descriptor.builder();

    let err = builder.set("number", "twelve".to_string()).err().unwrap();
    assert!(matches!(err, BeanError::TypeMismatch { property: "number", .. }));

    let err = builder.set_string("number", "twelve").err().unwrap();
    assert!(matches!(err, BeanError::ParseError { property: "number", ty: "i32", .. }));

    let err = builder.set_string("currency", "EUR").err().unwrap();
    assert!(matches!(err, BeanError::ParseError { property: "currency", .. }));

    let err = builder.set("postcode", 1).err().unwrap();
    assert!(matches!(err, BeanError::UnknownProperty { ref property, .. } if property == "postcode"));
}

#[test]
fn immutable_properties_are_not_writable() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();
    let mut bean = address();

    let err = descriptor.property("number").unwrap().set(&mut bean, 5).unwrap_err();
    assert!(matches!(err, BeanError::NotWritable { property: "number" }));
    assert_eq!(bean.number, 12);
}

#[test]
fn unknown_and_foreign() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();

    let err = descriptor.property("postcode").unwrap_err();
    assert!(matches!(
        err,
        BeanError::PropertyNotFound { bean, ref property } if bean == Address::type_path() && property == "postcode"
    ));
    assert_eq!(
        format!("{err}"),
        format!("property not found: {}.postcode", Address::type_path())
    );

    let err = descriptor.property("number").unwrap().get(&joda()).unwrap_err();
    assert!(matches!(err, BeanError::WrongBeanType { .. }));
}

#[test]
fn read_all_keeps_nulls() {
    let registry = registry();
    let descriptor = registry.lookup::<Address>().unwrap();
    let bean = Address {
        owner: None,
        ..address()
    };

    let values = descriptor.read_all(&bean).unwrap();
    assert_eq!(values.len(), 8);
    assert_eq!(values[5].0, "owner");
    assert!(values[5].1.is_none());
    assert!(values[3].1.is_some());
}
