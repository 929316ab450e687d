//! The registry of bean descriptors.
//!
//! A [`BeanRegistry`] maps bean types to their shared
//! [`BeanDescriptor`]. Descriptors of self-describing types are built on
//! first lookup; others can be registered explicitly, once.
//!
//! ## auto_register
//!
//! With the `auto_register` feature (enabled by default) every type
//! annotated with `#[bean(auto_register)]` submits a [`BeanFactory`] through
//! the [`inventory`] crate, so [`BeanRegistry::lookup_id`] and
//! [`BeanRegistry::lookup_path`] can describe it without naming it
//! statically.
//!
//! [`inventory`]: https://docs.rs/inventory

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bean_utils::TypeIdMap;
use bean_utils::hash::HashMap;

use crate::access::AccessorKind;
use crate::builder::StringConverter;
use crate::schema::BeanSchema;
use crate::{Bean, BeanDescriptor, BeanError, DescribeBean};

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto_register::BeanFactory;

// -----------------------------------------------------------------------------
// Table

type Entry = Result<Arc<BeanDescriptor>, BeanError>;

#[derive(Default)]
struct Table {
    entries: TypeIdMap<Entry>,
    paths: HashMap<&'static str, TypeId>,
}

impl Table {
    /// Publishes `entry` unless another one won the race, returns the
    /// published entry.
    fn publish(&mut self, type_id: TypeId, path: &'static str, entry: Entry) -> Entry {
        let published = self.entries.get_or_insert(type_id, || entry).clone();
        self.paths.entry(path).or_insert(type_id);
        published
    }
}

// -----------------------------------------------------------------------------
// BeanRegistry

/// A shared, thread-safe table of bean descriptors.
///
/// Cloning is cheap and clones share the same table. Failures to build a
/// descriptor are cached as well: later lookups of the type report the same
/// error without retrying.
///
/// # Examples
///
/// ```
/// use bean_meta::{AccessorKind, BeanError, BeanRegistry, DescribeBean, derive::Bean};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Person {
///     #[property]
///     name: String,
/// }
///
/// let registry = BeanRegistry::new();
/// let first = registry.lookup::<Person>().unwrap();
/// let again = registry.clone().lookup::<Person>().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &again));
///
/// let other = BeanRegistry::new();
/// other.register(Person::describe(AccessorKind::Handle).unwrap()).unwrap();
/// let err = other.register(Person::describe(AccessorKind::Handle).unwrap()).unwrap_err();
/// assert!(matches!(err, BeanError::DuplicateRegistration(_)));
/// assert_eq!(other.lookup::<Person>().unwrap().accessor_kind(), AccessorKind::Handle);
/// ```
#[derive(Clone)]
pub struct BeanRegistry {
    table: Arc<RwLock<Table>>,
    kind: Option<AccessorKind>,
    converter: Arc<StringConverter>,
}

impl Default for BeanRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl BeanRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            table: Arc::default(),
            kind: None,
            converter: StringConverter::shared(),
        }
    }

    /// Overrides the accessor strategy of lazily built descriptors, which
    /// otherwise use the strategy the type was declared with.
    pub fn with_accessor_kind(mut self, kind: AccessorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the converter of lazily built descriptors.
    pub fn with_converter(mut self, converter: StringConverter) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the descriptor of `T`, building it on first call.
    pub fn lookup<T: DescribeBean>(&self) -> Result<Arc<BeanDescriptor>, BeanError> {
        self.lookup_schema(TypeId::of::<T>(), T::schema(), T::ACCESSOR)
    }

    /// Returns the descriptor of the concrete type of `bean`, building it
    /// on first call.
    pub fn lookup_bean(&self, bean: &dyn Bean) -> Result<Arc<BeanDescriptor>, BeanError> {
        self.lookup_schema(bean.ty_id(), bean.bean_schema(), bean.accessor_kind())
    }

    /// Returns the descriptor of the type `type_id`, registered, already
    /// looked up or auto-registered.
    pub fn lookup_id(&self, type_id: TypeId) -> Result<Arc<BeanDescriptor>, BeanError> {
        if let Some(entry) = self.read().entries.get(&type_id) {
            return entry.clone();
        }
        #[cfg(feature = "auto_register")]
        if let Some(factory) = BeanFactory::find(|f| f.bean_type_id() == type_id) {
            return self.lookup_schema(type_id, factory.schema(), factory.accessor_kind());
        }
        Err(BeanError::BeanNotFound(Cow::Owned(format!("{type_id:?}"))))
    }

    /// Returns the descriptor of the type with the given path.
    pub fn lookup_path(&self, path: &str) -> Result<Arc<BeanDescriptor>, BeanError> {
        let found = {
            let table = self.read();
            table
                .paths
                .get(path)
                .and_then(|id| table.entries.get(id))
                .cloned()
        };
        if let Some(entry) = found {
            return entry;
        }
        #[cfg(feature = "auto_register")]
        if let Some(factory) = BeanFactory::find(|f| f.schema().ty().path() == path) {
            return self.lookup_schema(factory.bean_type_id(), factory.schema(), factory.accessor_kind());
        }
        Err(BeanError::BeanNotFound(Cow::Owned(path.to_string())))
    }

    fn lookup_schema(
        &self,
        type_id: TypeId,
        schema: &'static BeanSchema,
        declared: AccessorKind,
    ) -> Result<Arc<BeanDescriptor>, BeanError> {
        if let Some(entry) = self.read().entries.get(&type_id) {
            return entry.clone();
        }

        // Built outside the lock, the first published result wins.
        let path = schema.ty().path();
        let kind = self.kind.unwrap_or(declared);
        let entry = BeanDescriptor::from_schema(schema, kind)
            .map(|descriptor| Arc::new(descriptor.with_converter(self.converter.clone())));
        if let Err(e) = &entry {
            log::warn!("failed to describe `{path}`: {e}");
        }
        self.write().publish(type_id, path, entry)
    }

    /// Registers a descriptor built elsewhere.
    ///
    /// Fails with [`BeanError::DuplicateRegistration`] if the type is
    /// already present, the first registration stays in place. A descriptor
    /// still using the standard converter takes the registry's converter.
    pub fn register(&self, descriptor: BeanDescriptor) -> Result<Arc<BeanDescriptor>, BeanError> {
        let type_id = descriptor.ty().id();
        let path = descriptor.ty().path();
        let descriptor = if descriptor.has_standard_converter() {
            descriptor.with_converter(self.converter.clone())
        } else {
            descriptor
        };
        let mut table = self.write();
        if table.entries.contains(&type_id) {
            log::warn!("rejected duplicate registration of `{path}`");
            return Err(BeanError::DuplicateRegistration(path));
        }
        log::debug!("registered `{path}`");
        let descriptor = Arc::new(descriptor);
        table.entries.insert(type_id, Ok(descriptor.clone()));
        table.paths.insert(path, type_id);
        Ok(descriptor)
    }

    /// Returns `true` if the type has an entry, successful or not.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.read().entries.contains(&type_id)
    }

    /// Number of entries, failed descriptors included.
    #[inline]
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for BeanRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanRegistry")
            .field("entries", &self.len())
            .field("accessor", &self.kind)
            .finish_non_exhaustive()
    }
}
