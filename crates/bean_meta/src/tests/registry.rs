use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::Barrier;
use std::thread;

use super::{Address, Currency, Person, converter, joda};
use crate::info::TypePath;
use crate::schema::{BeanSchema, FieldDecl, GetStyle};
use crate::{AccessorKind, BeanDescriptor, BeanError, BeanRegistry, DescribeBean, derive::Bean};

#[test]
fn descriptors_are_built_once() {
    let registry = BeanRegistry::new();
    assert!(registry.is_empty());

    let first = registry.lookup::<Person>().unwrap();
    let second = registry.lookup_bean(&joda()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(TypeId::of::<Person>()));

    let by_id = registry.lookup_id(TypeId::of::<Person>()).unwrap();
    let by_path = registry.lookup_path(Person::type_path()).unwrap();
    assert!(Arc::ptr_eq(&first, &by_id));
    assert!(Arc::ptr_eq(&first, &by_path));

    // Clones share their table.
    let shared = registry.clone();
    assert!(shared.contains(TypeId::of::<Person>()));
}

#[test]
fn unknown_types() {
    let registry = BeanRegistry::new();
    let err = registry.lookup_path("demo::Missing").unwrap_err();
    assert!(matches!(err, BeanError::BeanNotFound(ref path) if path == "demo::Missing"));

    let err = registry.lookup_id(TypeId::of::<u8>()).unwrap_err();
    assert!(matches!(err, BeanError::BeanNotFound(_)));
}

#[test]
fn duplicate_registration() {
    let registry = BeanRegistry::new();
    let descriptor = BeanDescriptor::from_schema(Person::schema(), AccessorKind::Reflective).unwrap();
    let registered = registry.register(descriptor).unwrap();
    assert_eq!(registered.accessor_kind(), AccessorKind::Reflective);

    let again = BeanDescriptor::from_schema(Person::schema(), AccessorKind::Handle).unwrap();
    let err = registry.register(again).unwrap_err();
    assert!(matches!(err, BeanError::DuplicateRegistration(path) if path == Person::type_path()));

    // The first registration stays in place.
    let found = registry.lookup::<Person>().unwrap();
    assert_eq!(found.accessor_kind(), AccessorKind::Reflective);

    // Looked up types cannot be registered either.
    registry.lookup::<Address>().unwrap();
    let late = BeanDescriptor::from_schema(Address::schema(), AccessorKind::Handle).unwrap();
    assert!(matches!(
        registry.register(late),
        Err(BeanError::DuplicateRegistration(_))
    ));
}

#[test]
fn accessor_kind_override() {
    let registry = BeanRegistry::new();
    assert_eq!(registry.lookup::<Person>().unwrap().accessor_kind(), AccessorKind::Generated);
    assert_eq!(registry.lookup::<Address>().unwrap().accessor_kind(), AccessorKind::Handle);

    let reflective = BeanRegistry::new().with_accessor_kind(AccessorKind::Reflective);
    assert_eq!(reflective.lookup::<Address>().unwrap().accessor_kind(), AccessorKind::Reflective);
}

#[test]
fn registered_descriptors_take_the_registry_converter() {
    let registry = BeanRegistry::new().with_converter(converter());
    let registered = registry
        .register(Address::describe(AccessorKind::Reflective).unwrap())
        .unwrap();

    let mut builder = registered.builder();
    builder.set_string("currency", "USD").unwrap();
    assert_eq!(
        builder.get("currency").unwrap().unwrap().downcast_ref::<Currency>(),
        Some(&Currency::Usd)
    );

    // Without it, `Currency` has no parser.
    let plain = Address::describe(AccessorKind::Reflective).unwrap();
    let mut builder = plain.builder();
    assert!(builder.set_string("currency", "USD").is_err());
}

const THREADS: usize = 8;

#[test]
fn concurrent_lookups_share_one_descriptor() {
    let registry = BeanRegistry::new();
    let barrier = Barrier::new(THREADS);

    let found: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    registry.lookup::<Address>().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(found.iter().all(|d| Arc::ptr_eq(d, &found[0])));
    assert_eq!(registry.len(), 1);
    assert!(Arc::ptr_eq(&found[0], &registry.lookup::<Address>().unwrap()));
}

#[test]
fn register_racing_lookup_publishes_once() {
    for _ in 0..16 {
        let registry = BeanRegistry::new();
        let barrier = Barrier::new(2);
        let descriptor = Address::describe(AccessorKind::Reflective).unwrap();

        let (registered, found) = thread::scope(|scope| {
            let register = scope.spawn(|| {
                barrier.wait();
                registry.register(descriptor)
            });
            let lookup = scope.spawn(|| {
                barrier.wait();
                registry.lookup::<Address>().unwrap()
            });
            (register.join().unwrap(), lookup.join().unwrap())
        });

        assert_eq!(registry.len(), 1);
        match registered {
            // Registered first, the lookup sees the registered descriptor.
            Ok(registered) => {
                assert!(Arc::ptr_eq(&registered, &found));
                assert_eq!(found.accessor_kind(), AccessorKind::Reflective);
            }
            Err(err) => {
                assert!(matches!(err, BeanError::DuplicateRegistration(path) if path == Address::type_path()));
                assert_eq!(found.accessor_kind(), AccessorKind::Handle);
            }
        }
        assert!(Arc::ptr_eq(&found, &registry.lookup::<Address>().unwrap()));
    }
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = faulty_schema)]
struct Faulty {}

fn faulty_schema() -> BeanSchema {
    // A property without getter and without constructor.
    BeanSchema::new::<Faulty>().with_field(FieldDecl::new::<u32>("hits").property(GetStyle::Accessor))
}

#[test]
fn failures_are_cached() {
    let registry = BeanRegistry::new();
    let first = registry.lookup::<Faulty>().unwrap_err();
    assert!(matches!(first, BeanError::ConstructorOrAccessorNotFound { .. }));
    assert!(registry.contains(TypeId::of::<Faulty>()));

    let second = registry.lookup_path(Faulty::type_path()).unwrap_err();
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(registry.len(), 1);
}

#[cfg(feature = "auto_register")]
mod auto_register {
    use core::any::TypeId;

    use crate::info::TypePath;
    use crate::{BeanRegistry, derive::Bean};

    #[derive(Bean, Clone, Debug, PartialEq)]
    #[bean(auto_register)]
    struct Ticket {
        #[property]
        seat: u16,
    }

    #[test]
    fn found_without_being_named() {
        let registry = BeanRegistry::new();
        assert!(!registry.contains(TypeId::of::<Ticket>()));

        let descriptor = registry.lookup_path(Ticket::type_path()).unwrap();
        assert_eq!(descriptor.property_count(), 1);
        assert!(registry.lookup_id(TypeId::of::<Ticket>()).is_ok());

        let mut builder = descriptor.builder();
        builder.set("seat", 12u16).unwrap();
        assert_eq!(builder.build_as::<Ticket>().unwrap(), Ticket { seat: 12 });
    }
}
