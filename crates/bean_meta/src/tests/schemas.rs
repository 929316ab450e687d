use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::__macro_exports::{bean, instance, some};
use crate::derive::Bean;
use crate::info::{Annotations, TypePath};
use crate::schema::{Args, BeanSchema, ConstructorDecl, FieldDecl, GetStyle, MethodDecl, ReadFn};
use crate::{AccessorKind, BeanDescriptor, BeanError, BeanRegistry, DescribeBean, PropertyStyle};

// -----------------------------------------------------------------------------
// Inheritance

#[derive(Clone, Debug, PartialEq)]
struct Label(&'static str);

crate::impl_opaque_value!(Label, "bean_meta::tests::schemas::Label");

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = shape_schema)]
struct Shape {}

/// Declares `get_kind` for every descendant.
fn shape_schema() -> BeanSchema {
    BeanSchema::new::<Shape>().with_method(MethodDecl::getter::<String>("get_kind", |b| {
        Ok(some(b.bean_schema().ty().name().to_string()))
    }))
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = square_schema)]
struct Square {
    side: u32,
}

fn square_schema() -> BeanSchema {
    BeanSchema::new::<Square>()
        .with_parent(Shape::schema())
        .with_field(FieldDecl::new::<String>("kind").property(GetStyle::Accessor))
        .with_field(
            FieldDecl::new::<u32>("side")
                .property(GetStyle::Field)
                .with_read(|b| Ok(some(instance::<Square>(b)?.side)))
                .with_annotations(Annotations::new().with(Label("length"))),
        )
        .with_field(FieldDecl::new::<u32>("origin").property(GetStyle::Field).inherited())
        .with_field(FieldDecl::new::<u32>("COUNT").property(GetStyle::Field).static_member())
        .with_constructor(
            ConstructorDecl::new(|mut args: Args| {
                args.take::<String>(0)?;
                Ok(bean(Square { side: args.take(1)? }))
            })
            .with_param::<String>()
            .with_param::<u32>(),
        )
}

#[test]
fn getters_are_found_on_ancestors() {
    let registry = BeanRegistry::new();
    let descriptor = registry.lookup::<Square>().unwrap();
    assert_eq!(Square::ACCESSOR, AccessorKind::Handle);
    assert_eq!(descriptor.accessor_kind(), AccessorKind::Handle);
    assert_eq!(descriptor.property_names().collect::<Vec<_>>(), ["kind", "side"]);

    let square = Square { side: 3 };
    let kind = descriptor.property("kind").unwrap();
    assert_eq!(kind.get_as::<String>(&square).unwrap().as_deref(), Some("Square"));
    assert_eq!(kind.declaring_type().path(), Square::type_path());

    let side = descriptor.property("side").unwrap();
    assert_eq!(side.annotation::<Label>(), Some(&Label("length")));
    assert!(kind.annotations().is_empty());

    let mut builder = descriptor.builder();
    builder.set("kind", "Square".to_string()).unwrap().set("side", 4u32).unwrap();
    assert_eq!(builder.build_as::<Square>().unwrap(), Square { side: 4 });
}

#[test]
fn descriptors_are_built_per_strategy() {
    for kind in [AccessorKind::Reflective, AccessorKind::Handle] {
        let descriptor = BeanDescriptor::from_schema(Square::schema(), kind).unwrap();
        assert_eq!(descriptor.accessor_kind(), kind);
        let value = descriptor.property("side").unwrap().get_as::<u32>(&Square { side: 9 });
        assert_eq!(value.unwrap(), Some(9));
    }

    // No generated accessor table.
    let err = BeanDescriptor::from_schema(Square::schema(), AccessorKind::Generated).unwrap_err();
    assert!(matches!(err, BeanError::NotReadable { property: "kind", .. }));
}

// -----------------------------------------------------------------------------
// Constructors

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = counter_schema)]
struct Counter {
    hits: u32,
}

fn counter_field() -> FieldDecl {
    FieldDecl::new::<u32>("hits")
        .property(GetStyle::Field)
        .with_read(|b| Ok(some(instance::<Counter>(b)?.hits)))
}

fn counter_schema() -> BeanSchema {
    BeanSchema::new::<Counter>()
        .with_field(counter_field())
        .with_constructor(
            ConstructorDecl::new(|mut args: Args| {
                let hits = args.take_opt::<Option<u32>>(0)?.flatten();
                Ok(bean(Counter { hits: hits.unwrap_or(1) }))
            })
            .with_param::<Option<u32>>(),
        )
}

#[test]
fn lenient_constructor() {
    let descriptor = BeanDescriptor::from_schema(Counter::schema(), AccessorKind::Handle).unwrap();
    let hits = descriptor.property("hits").unwrap();
    assert_eq!(hits.constructor_index(), Some(0));

    // Arguments are wrapped into the `Option` parameter.
    let mut builder = descriptor.builder();
    builder.set("hits", 5u32).unwrap();
    assert_eq!(builder.build_as::<Counter>().unwrap(), Counter { hits: 5 });

    let mut builder = descriptor.builder();
    builder.set_boxed("hits", None).unwrap();
    assert_eq!(builder.build_as::<Counter>().unwrap(), Counter { hits: 1 });

    // Unset slots follow the `Option` parameter, not the `u32` property.
    let builder = descriptor.builder();
    assert!(builder.get("hits").unwrap().is_none());
    assert_eq!(builder.build_as::<Counter>().unwrap(), Counter { hits: 1 });
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = ambiguous_schema)]
struct Ambiguous {
    hits: u32,
}

fn ambiguous_schema() -> BeanSchema {
    let construct = ConstructorDecl::new(|_: Args| Ok(bean(Ambiguous { hits: 0 })));
    BeanSchema::new::<Ambiguous>()
        .with_field(
            FieldDecl::new::<u32>("hits")
                .property(GetStyle::Field)
                .with_read(|b| Ok(some(instance::<Ambiguous>(b)?.hits))),
        )
        .with_constructor(ConstructorDecl::new(|_: Args| Ok(bean(Ambiguous { hits: 1 }))).with_param::<Option<u32>>())
        .with_constructor(construct.with_param::<Option<u32>>())
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = orphan_schema)]
struct Orphan {
    hits: u32,
}

fn orphan_schema() -> BeanSchema {
    BeanSchema::new::<Orphan>()
        .with_field(
            FieldDecl::new::<u32>("hits")
                .property(GetStyle::Field)
                .with_read(|b| Ok(some(instance::<Orphan>(b)?.hits))),
        )
        .with_constructor(ConstructorDecl::new(|_: Args| Ok(bean(Orphan { hits: 0 }))).with_param::<String>())
}

#[test]
fn constructor_resolution_failures() {
    let err = BeanDescriptor::from_schema(Ambiguous::schema(), AccessorKind::Handle).unwrap_err();
    assert!(matches!(err, BeanError::AmbiguousConstructor { .. }));
    assert!(err.to_string().contains("more than one matches"));

    let err = BeanDescriptor::from_schema(Orphan::schema(), AccessorKind::Handle).unwrap_err();
    assert!(matches!(err, BeanError::ConstructorNotFound { bean } if bean == Orphan::type_path()));
}

// -----------------------------------------------------------------------------
// Members

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = broken_schema)]
struct Broken {
    hits: u32,
}

fn broken_schema() -> BeanSchema {
    BeanSchema::new::<Broken>()
        .with_field(FieldDecl::new::<u32>("hits").property(GetStyle::Accessor))
        .with_constructor(
            ConstructorDecl::new(|mut args: Args| Ok(bean(Broken { hits: args.take(0)? }))).with_param::<u32>(),
        )
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = unread_schema)]
struct Unread {
    hits: u32,
}

fn unread_schema() -> BeanSchema {
    BeanSchema::new::<Unread>()
        .with_field(FieldDecl::new::<u32>("hits").property(GetStyle::Field))
        .with_constructor(
            ConstructorDecl::new(|mut args: Args| Ok(bean(Unread { hits: args.take(0)? }))).with_param::<u32>(),
        )
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(schema = twice_schema)]
struct Twice {
    hits: u32,
}

fn twice_schema() -> BeanSchema {
    let read: ReadFn = |b| Ok(some(instance::<Twice>(b)?.hits));
    BeanSchema::new::<Twice>()
        .with_field(FieldDecl::new::<u32>("hits").property(GetStyle::Field).with_read(read))
        .with_method(MethodDecl::getter::<u32>("get_total", read).derived("hits"))
}

#[test]
fn member_failures() {
    let err = BeanDescriptor::from_schema(Broken::schema(), AccessorKind::Handle).unwrap_err();
    assert!(matches!(
        err,
        BeanError::ConstructorOrAccessorNotFound { ref member, .. } if member == "get_hits"
    ));

    for kind in [AccessorKind::Reflective, AccessorKind::Handle] {
        let err = BeanDescriptor::from_schema(Unread::schema(), kind).unwrap_err();
        assert!(matches!(err, BeanError::NotReadable { property: "hits", .. }), "{kind:?}");
    }

    let err = BeanDescriptor::from_schema(Twice::schema(), AccessorKind::Handle).unwrap_err();
    assert!(matches!(err, BeanError::DuplicateProperty { property: "hits", .. }));
}

#[test]
fn derived_method_properties() {
    #[derive(Bean, Clone, Debug, PartialEq)]
    #[bean(schema = total_schema)]
    struct Total {
        hits: u32,
    }

    fn total_schema() -> BeanSchema {
        BeanSchema::new::<Total>()
            .with_method(MethodDecl::getter::<u32>("get_double", |b| {
                Ok(some(instance::<Total>(b)?.hits * 2))
            }).derived("double"))
            .with_constructor(ConstructorDecl::new(|_: Args| Ok(bean(Total { hits: 0 }))))
    }

    let descriptor = BeanDescriptor::from_schema(Total::schema(), AccessorKind::Reflective).unwrap();
    let double = descriptor.property("double").unwrap();
    assert_eq!(double.style(), PropertyStyle::Derived);
    assert_eq!(double.constructor_index(), None);
    assert_eq!(double.get_as::<u32>(&Total { hits: 4 }).unwrap(), Some(8));

    let mut builder = descriptor.builder();
    let err = builder.set("double", 2u32).err().unwrap();
    assert!(matches!(err, BeanError::NotWritable { property: "double" }));
    assert_eq!(builder.build_as::<Total>().unwrap(), Total { hits: 0 });
}
