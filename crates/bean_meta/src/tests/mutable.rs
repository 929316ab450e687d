use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::derive::Bean;
use crate::{AccessorKind, BeanError, BeanRegistry, DescribeBean, PropertyStyle};

#[derive(Clone, Debug, PartialEq)]
struct Unit(&'static str);

crate::impl_opaque_value!(Unit, "bean_meta::tests::mutable::Unit");

#[derive(Bean, Clone, Debug, Default, PartialEq)]
#[bean(mutable, derived(label: String = Gauge::label), @Unit("rpm"))]
struct Gauge {
    #[property(@Unit("bar"))]
    pressure: u32,
    #[property]
    name: Option<String>,
    #[property(get = "field")]
    active: bool,
    samples: Vec<u32>,
}

impl Gauge {
    fn label(&self) -> String {
        format!("{} at {}", self.name.as_deref().unwrap_or("gauge"), self.pressure)
    }
}

const KINDS: [AccessorKind; 3] = [
    AccessorKind::Reflective,
    AccessorKind::Handle,
    AccessorKind::Generated,
];

#[test]
fn mutable_schema() {
    let schema = Gauge::schema();
    assert!(schema.is_mutable());
    assert!(schema.method("set_pressure").is_some());
    assert!(schema.method("set_name").is_some());
    // Field style properties are written through the field.
    assert!(schema.method("set_active").is_none());
    assert!(schema.field("active").unwrap().writer().is_some());
    assert_eq!(schema.annotations().get::<Unit>(), Some(&Unit("rpm")));
    assert_eq!(schema.constructors().len(), 1);
    assert_eq!(schema.constructors()[0].arity(), 0);
}

#[test]
fn properties_are_read_write() {
    for kind in KINDS {
        let registry = BeanRegistry::new().with_accessor_kind(kind);
        let descriptor = registry.lookup::<Gauge>().unwrap();
        assert!(descriptor.is_mutable());
        assert_eq!(
            descriptor.property_names().collect::<Vec<_>>(),
            ["pressure", "name", "active", "label"]
        );

        let mut gauge = Gauge::default();
        let pressure = descriptor.property("pressure").unwrap();
        assert_eq!(pressure.style(), PropertyStyle::ReadWrite);
        assert!(pressure.is_writable());
        assert_eq!(pressure.constructor_index(), None);
        assert_eq!(pressure.annotation::<Unit>(), Some(&Unit("bar")));

        pressure.set(&mut gauge, 3u32).unwrap();
        descriptor.property("active").unwrap().set(&mut gauge, true).unwrap();
        let name = descriptor.property("name").unwrap();
        name.set(&mut gauge, "boiler".to_string()).unwrap();
        assert_eq!(gauge.pressure, 3, "{kind:?}");
        assert!(gauge.active, "{kind:?}");
        assert_eq!(gauge.name.as_deref(), Some("boiler"), "{kind:?}");

        name.set_boxed(&mut gauge, None).unwrap();
        assert_eq!(gauge.name, None, "{kind:?}");

        let err = pressure.set_boxed(&mut gauge, None).unwrap_err();
        assert!(matches!(err, BeanError::InvocationFailed { property: "pressure", .. }), "{kind:?}");

        let err = pressure.set(&mut gauge, "high".to_string()).unwrap_err();
        assert!(matches!(err, BeanError::TypeMismatch { .. }), "{kind:?}");
    }
}

#[test]
fn derived_properties() {
    let registry = BeanRegistry::new();
    let descriptor = registry.lookup::<Gauge>().unwrap();
    let label = descriptor.property("label").unwrap();
    assert_eq!(label.style(), PropertyStyle::Derived);
    assert!(!label.is_writable());
    assert!(label.property_type().is::<String>());

    let mut gauge = Gauge {
        pressure: 2,
        ..Gauge::default()
    };
    assert_eq!(label.get_as::<String>(&gauge).unwrap().as_deref(), Some("gauge at 2"));

    let err = label.set(&mut gauge, "x".to_string()).unwrap_err();
    assert!(matches!(err, BeanError::NotWritable { property: "label" }));
}

#[test]
fn builder_writes_through_setters() {
    let registry = BeanRegistry::new();
    let descriptor = registry.lookup::<Gauge>().unwrap();

    let mut builder = descriptor.builder();
    assert!(builder.get("pressure").unwrap().is_none());
    builder
        .set_string("pressure", "7")
        .unwrap()
        .set_string("name", "boiler")
        .unwrap();
    assert!(matches!(
        builder.set("label", "x".to_string()),
        Err(BeanError::NotWritable { property: "label" })
    ));

    let gauge = builder.build_as::<Gauge>().unwrap();
    assert_eq!(gauge, Gauge {
        pressure: 7,
        name: Some("boiler".into()),
        ..Gauge::default()
    });

    // Untouched properties keep their default.
    let gauge = descriptor.builder().build_as::<Gauge>().unwrap();
    assert_eq!(gauge, Gauge::default());

    // A failed write makes the build fail.
    let mut builder = descriptor.builder();
    builder.set_boxed("pressure", None).unwrap();
    assert!(matches!(builder.build(), Err(BeanError::ConstructionFailed { .. })));
}
