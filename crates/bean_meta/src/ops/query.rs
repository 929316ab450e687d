use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::{Bean, BeanError, BeanRegistry, Value, ValueRef};

// -----------------------------------------------------------------------------
// BeanQuery

/// Extracts a value from a bean.
pub trait BeanQuery: Send + Sync + fmt::Debug {
    /// Returns the queried value, `Ok(None)` if it is null.
    fn query(&self, registry: &BeanRegistry, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError>;
}

// -----------------------------------------------------------------------------
// PropertyQuery

/// Reads one property by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyQuery {
    name: &'static str,
}

impl PropertyQuery {
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl BeanQuery for PropertyQuery {
    fn query(&self, registry: &BeanRegistry, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError> {
        registry.lookup_bean(bean)?.property(self.name)?.get(bean)
    }
}

// -----------------------------------------------------------------------------
// ChainedQuery

/// Follows a path of properties through nested beans.
///
/// A null link, or an absent `Option` around a nested bean, makes the whole
/// query null.
///
/// ```
/// use bean_meta::{BeanRegistry, derive::Bean};
/// use bean_meta::ops::{BeanQuery, ChainedQuery};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Person {
///     #[property]
///     surname: String,
/// }
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Address {
///     #[property]
///     owner: Option<Person>,
/// }
///
/// let registry = BeanRegistry::new();
/// let query = ChainedQuery::of(&["owner", "surname"]);
///
/// let address = Address { owner: Some(Person { surname: "Joda".into() }) };
/// let surname = query.query(&registry, &address).unwrap().unwrap();
/// assert_eq!(surname.take::<String>().unwrap(), "Joda");
///
/// let empty = Address { owner: None };
/// assert!(query.query(&registry, &empty).unwrap().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainedQuery {
    steps: Vec<PropertyQuery>,
}

impl ChainedQuery {
    pub fn new(steps: Vec<PropertyQuery>) -> Self {
        Self { steps }
    }

    /// Creates a query from property names.
    pub fn of(names: &[&'static str]) -> Self {
        Self::new(names.iter().copied().map(PropertyQuery::new).collect())
    }

    #[inline]
    pub fn steps(&self) -> &[PropertyQuery] {
        &self.steps
    }
}

enum Link<'a> {
    Bean(&'a dyn Bean),
    Absent,
    Other,
}

fn link(value: &dyn Value) -> Link<'_> {
    match value.value_ref() {
        ValueRef::Bean(bean) => Link::Bean(bean),
        ValueRef::Optional(Some(inner)) => link(inner),
        ValueRef::Optional(None) => Link::Absent,
        _ => Link::Other,
    }
}

impl BeanQuery for ChainedQuery {
    fn query(&self, registry: &BeanRegistry, bean: &dyn Bean) -> Result<Option<Box<dyn Value>>, BeanError> {
        let Some((first, rest)) = self.steps.split_first() else {
            return Ok(None);
        };
        let mut current = first.query(registry, bean)?;
        let mut previous = first.name();
        for step in rest {
            let Some(value) = current else {
                return Ok(None);
            };
            current = match link(&*value) {
                Link::Bean(nested) => step.query(registry, nested)?,
                Link::Absent => return Ok(None),
                Link::Other => {
                    return Err(BeanError::TypeMismatch {
                        property: previous,
                        expected: "a bean",
                        found: value.dyn_type_path(),
                    });
                }
            };
            previous = step.name();
        }
        Ok(current)
    }
}

// -----------------------------------------------------------------------------
// Comparator

/// Returns a comparator ordering beans by the value of `query`.
///
/// Null values, and values that cannot be read, sort first in ascending
/// order. Values without an order compare equal.
///
/// ```
/// use bean_meta::{Bean, BeanRegistry, derive::Bean};
/// use bean_meta::ops::{PropertyQuery, comparator};
///
/// #[derive(Bean, Clone, Debug, PartialEq)]
/// struct Person {
///     #[property]
///     surname: String,
/// }
///
/// let registry = BeanRegistry::new();
/// let query = PropertyQuery::new("surname");
/// let descending = comparator(&registry, &query, false);
///
/// let mut people = vec![
///     Person { surname: "Beans".into() },
///     Person { surname: "Joda".into() },
/// ];
/// people.sort_by(|a, b| descending(a, b));
/// assert_eq!(people[0].surname, "Joda");
/// ```
pub fn comparator<'a>(
    registry: &'a BeanRegistry,
    query: &'a dyn BeanQuery,
    ascending: bool,
) -> impl Fn(&dyn Bean, &dyn Bean) -> Ordering + 'a {
    move |a, b| {
        let a = query.query(registry, a).ok().flatten();
        let b = query.query(registry, b).ok().flatten();
        let order = match (&a, &b) {
            (Some(a), Some(b)) => a.value_cmp(&**b).unwrap_or(Ordering::Equal),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        };
        if ascending { order } else { order.reverse() }
    }
}
