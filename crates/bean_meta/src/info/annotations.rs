use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use bean_utils::TypeIdMap;

use crate::Value;

// -----------------------------------------------------------------------------
// Annotations

/// Metadata attached to a bean, a field or a method.
///
/// Entries are keyed by their concrete type, so there is at most one
/// annotation per type. `#[derive(Bean)]` fills them from `@expr` arguments.
///
/// # Examples
///
/// ```
/// use bean_meta::info::Annotations;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Label(&'static str);
/// # bean_meta::impl_opaque_value!(Label, "demo::Label");
///
/// let notes = Annotations::new().with(Label("street")).with(10u8);
/// assert_eq!(notes.get::<Label>(), Some(&Label("street")));
/// assert_eq!(notes.get::<u8>(), Some(&10));
/// assert!(!notes.contains::<u16>());
/// ```
#[derive(Default)]
pub struct Annotations {
    entries: TypeIdMap<Box<dyn Value>>,
}

impl Annotations {
    /// An empty set, returned when a member carries no annotation.
    pub const EMPTY: &'static Self = &Self::new();

    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: TypeIdMap::new(),
        }
    }

    /// Adds an annotation, replacing a previous one of the same type.
    #[inline]
    pub fn with<T: Value>(mut self, value: T) -> Self {
        self.entries.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    /// Returns the annotation of type `T`.
    pub fn get<T: Value>(&self) -> Option<&T> {
        self.entries
            .get_type::<T>()
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns the annotation with the given [`TypeId`].
    #[inline]
    pub fn get_by_id(&self, type_id: TypeId) -> Option<&dyn Value> {
        self.entries.get(&type_id).map(|value| &**value)
    }

    #[inline]
    pub fn contains<T: Value>(&self) -> bool {
        self.entries.contains_type::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the annotations in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn Value> {
        self.entries.values().map(|value| &**value)
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
