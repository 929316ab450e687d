//! Static type information of property values.
//!
//! - [`TypePath`]: stable type names.
//! - [`Typed`]: access to a [`TypeInfo`], the closed set of shapes the
//!   descriptor model understands (opaque, optional, list, set and map).
//! - [`Annotations`]: metadata attached to beans and members.

// -----------------------------------------------------------------------------
// Modules

mod annotations;
mod cell;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use annotations::Annotations;
pub use cell::{GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell};
pub use cell::{NonGenericTypeCell, NonGenericTypeInfoCell, concat};
pub use type_info::{ContainerKind, ListInfo, MapInfo, OpaqueInfo, OptionalInfo, SetInfo, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};
