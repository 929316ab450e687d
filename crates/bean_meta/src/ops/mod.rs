//! Operations built on bean descriptors: copying, comparison, queries and
//! constructor validation.

pub mod validate;

mod clone;
mod equal;
mod query;

pub use clone::clone_bean;
pub use equal::{
    equal_ignoring, equal_with_tolerance_f32, equal_with_tolerance_f64, properties_equal,
    properties_hash,
};
pub use query::{BeanQuery, ChainedQuery, PropertyQuery, comparator};
