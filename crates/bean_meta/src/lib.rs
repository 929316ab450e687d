#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro always emits `::bean_meta::...` paths, so the crate needs
// an alias of itself to use `#[derive(Bean)]` in its own tests.
extern crate self as bean_meta;

// -----------------------------------------------------------------------------
// no_std support

// Descriptor cells and the registry rely on `std::sync`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod error;
mod value;

pub mod access;
pub mod builder;
pub mod descriptor;
pub mod info;
pub mod ops;
pub mod registry;
pub mod resolve;
pub mod schema;

#[cfg(feature = "serde")]
pub mod serde;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use bean::{Bean, DescribeBean};
pub use bean_meta_derive as derive;
pub use error::{BeanError, Cause, MemberError};
pub use value::{Value, ValueRef, value_hasher};

pub use access::AccessorKind;
pub use builder::{BeanBuilder, StringConverter};
pub use descriptor::{BeanDescriptor, PropertyDescriptor, PropertyStyle};
pub use registry::BeanRegistry;
