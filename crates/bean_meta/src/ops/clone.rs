use alloc::boxed::Box;

use crate::{Bean, BeanError, BeanRegistry};

/// Copies a bean by reading each of its buildable properties and building a
/// new instance from them.
///
/// Derived properties are skipped, they are recomputed by the copy.
///
/// ```
/// use bean_meta::{BeanRegistry, derive::Bean, ops::clone_bean};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Tag {
///     #[property]
///     label: String,
///     #[property]
///     weight: Option<u8>,
/// }
///
/// let registry = BeanRegistry::new();
/// let tag = Tag { label: "red".into(), weight: None };
/// let copy = clone_bean(&registry, &tag).unwrap();
/// assert_eq!(copy.downcast_ref::<Tag>(), Some(&tag));
/// ```
pub fn clone_bean(registry: &BeanRegistry, bean: &dyn Bean) -> Result<Box<dyn Bean>, BeanError> {
    let descriptor = registry.lookup_bean(bean)?;
    let mut builder = descriptor.builder();
    for property in descriptor.properties() {
        if !property.style().is_buildable() {
            continue;
        }
        let value = property.get(bean)?;
        builder.set_boxed(property.name(), value)?;
    }
    builder.build()
}
