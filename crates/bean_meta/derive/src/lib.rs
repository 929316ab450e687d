//! See [`Bean`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";
static PROPERTY_ATTRIBUTE_NAME: &str = "property";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Bean Derivation
///
/// `#[derive(Bean)]` implements `TypePath`, `Typed`, `Value`, `Bean` and
/// `DescribeBean` for a struct with named fields. The struct must also
/// implement `Clone`, `Debug` and `PartialEq`.
///
/// Only fields marked `#[property]` are properties, in declaration order.
/// A constructor fills the other fields with `Default::default()`.
///
/// ## Field Properties
///
/// ```rust, ignore
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Address {
///     #[property(get = "field", validate = "not_null")]
///     street: String,
///     #[property(get = "wrapped")]
///     town: Option<String>,
///     #[property(@Label("zip"))]
///     code: u32,
/// }
/// ```
///
/// An `Option<T>` field declares a nullable property of type `T`.
///
/// `get` selects how the property is read:
///
/// - `smart` (default): through a generated `get_<name>` getter, `is_<name>`
///   for `bool` fields.
/// - `field`: straight from the field.
/// - `optional`: straight from a nullable field.
/// - `wrapped`: through a getter returning the whole `Option<T>`, the
///   property type becomes `Option<T>` and reads are never null.
///
/// `validate` adds a constructor check, `not_null` or `not_empty`. A failed
/// check makes `BeanBuilder::build` fail. Without it, a null argument is
/// only accepted by nullable fields.
///
/// `@expr` attaches an annotation, any `Value`, to the property.
///
/// ## Type Attributes
///
/// ```rust, ignore
/// #[derive(Bean, Clone, Debug, Default, PartialEq)]
/// #[bean(accessor = "handle", mutable, auto_register)]
/// #[bean(derived(label: String = Counter::label), @Owner("stats"))]
/// struct Counter {
///     #[property]
///     hits: u64,
/// }
///
/// impl Counter {
///     fn label(&self) -> String { format!("{} hits", self.hits) }
/// }
/// ```
///
/// - `accessor = "reflective" | "handle" | "generated"`: the default
///   strategy of the descriptor, `generated` if absent, or `handle` if a
///   `schema` is given.
/// - `mutable`: properties are read-write. The type must implement
///   `Default`, builders start from it and call the generated setters.
/// - `auto_register`: the type can be found by `TypeId` or path without
///   being named, see `BeanRegistry::lookup_id`. No-op without the
///   `auto_register` feature.
/// - `derived(name: Type = path)`: a read-only property computed by
///   `fn(&Self) -> Type`.
/// - `schema = path`: use `fn() -> BeanSchema` instead of the generated
///   schema. Property attributes are then ignored.
/// - `@expr`: a bean annotation.
///
/// Generic types, enums and tuple structs are not supported.
#[proc_macro_derive(Bean, attributes(bean, property))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::BeanStruct::from_derive_input(&ast) {
        Ok(bean) => impls::impl_bean(&bean).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
