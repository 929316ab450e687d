use alloc::string::ToString;
use alloc::vec::Vec;

use super::{Address, Person, address, converter, joda};
use crate::{AccessorKind, BeanError, BeanRegistry, Value};

const KINDS: [AccessorKind; 3] = [
    AccessorKind::Reflective,
    AccessorKind::Handle,
    AccessorKind::Generated,
];

#[test]
fn strategies_read_the_same_values() {
    let bean = Address {
        town: Some("Barnet".into()),
        ..address()
    };
    let reads = KINDS.map(|kind| {
        let registry = BeanRegistry::new().with_accessor_kind(kind);
        let descriptor = registry.lookup::<Address>().unwrap();
        assert_eq!(descriptor.accessor_kind(), kind);
        descriptor.read_all(&bean).unwrap()
    });

    for other in &reads[1..] {
        assert_eq!(other.len(), reads[0].len());
        for ((name, value), (other_name, other_value)) in reads[0].iter().zip(other) {
            assert_eq!(name, other_name);
            match (value, other_value) {
                (Some(a), Some(b)) => assert!(a.value_eq(&**b), "{name} differs"),
                (None, None) => {}
                _ => panic!("{name} differs"),
            }
        }
    }
}

#[test]
fn strategies_build_the_same_bean() {
    let built = KINDS.map(|kind| {
        let registry = BeanRegistry::new()
            .with_accessor_kind(kind)
            .with_converter(converter());
        let descriptor = registry.lookup::<Address>().unwrap();
        let mut builder = descriptor.builder();
        builder
            .set("street", "Park Lane".to_string())
            .unwrap()
            .set("city", "London".to_string())
            .unwrap()
            .set("list", Vec::from(["a".to_string()]))
            .unwrap()
            .set_string("number", "7")
            .unwrap();
        builder.build_as::<Address>().unwrap()
    });
    assert_eq!(built[0], built[1]);
    assert_eq!(built[1], built[2]);
    assert_eq!(built[0].number, 7);
}

#[test]
fn strategies_report_the_same_failures() {
    for kind in KINDS {
        let registry = BeanRegistry::new().with_accessor_kind(kind);
        let descriptor = registry.lookup::<Person>().unwrap();
        let surname = descriptor.property("surname").unwrap();

        let err = surname.get(&address()).unwrap_err();
        assert!(matches!(err, BeanError::WrongBeanType { .. }), "{kind:?}");

        let mut bean = joda();
        let err = surname.set(&mut bean, "Smith".to_string()).unwrap_err();
        assert!(matches!(err, BeanError::NotWritable { property: "surname" }), "{kind:?}");
    }
}
