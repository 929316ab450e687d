//! Parsing of the derive input and its attributes.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bean_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{AccessorKind, BeanAttributes, GetStyle, PropertyAttributes, Validate};
pub(crate) use bean_struct::{BeanStruct, PropertyField};
