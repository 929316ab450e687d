use alloc::string::String;
use alloc::vec;

use super::{Address, Currency, Person, address, joda};
use crate::ops::{BeanQuery, ChainedQuery, PropertyQuery, comparator};
use crate::ops::{clone_bean, equal_ignoring, properties_equal, properties_hash};
use crate::{Bean, BeanError, BeanRegistry};

#[test]
fn clones_through_the_builder() {
    let registry = BeanRegistry::new();
    let original = Address {
        town: Some("Barnet".into()),
        ..address()
    };
    let copy = clone_bean(&registry, &original).unwrap();
    assert_eq!(copy.downcast_ref::<Address>(), Some(&original));

    let sparse = Address {
        owner: None,
        currency: None,
        ..address()
    };
    let copy = clone_bean(&registry, &sparse).unwrap();
    assert_eq!(copy.downcast_ref::<Address>(), Some(&sparse));
}

#[test]
fn property_equality() {
    let registry = BeanRegistry::new();
    let a = address();
    let mut b = address();
    assert!(properties_equal(&registry, &a, &b).unwrap());
    assert_eq!(
        properties_hash(&registry, &a).unwrap(),
        properties_hash(&registry, &b).unwrap()
    );

    b.currency = Some(Currency::Usd);
    assert!(!properties_equal(&registry, &a, &b).unwrap());
    assert!(equal_ignoring(&registry, &a, &b, &["currency"]).unwrap());
    assert!(!equal_ignoring(&registry, &a, &b, &["number"]).unwrap());

    // Different property sets.
    assert!(!properties_equal(&registry, &a, &joda()).unwrap());
    assert!(!equal_ignoring(&registry, &a, &joda(), &[]).unwrap());
}

#[test]
fn queries_follow_nested_beans() {
    let registry = BeanRegistry::new();
    let bean = address();

    let number = PropertyQuery::new("number").query(&registry, &bean).unwrap();
    assert_eq!(number.unwrap().take::<i32>().unwrap(), 12);

    let surname = ChainedQuery::of(&["owner", "surname"]);
    let value = surname.query(&registry, &bean).unwrap().unwrap();
    assert_eq!(value.take::<String>().unwrap(), "Colebourne");

    let orphan = Address {
        owner: None,
        ..address()
    };
    assert!(surname.query(&registry, &orphan).unwrap().is_none());

    let err = ChainedQuery::of(&["city", "surname"]).query(&registry, &bean).unwrap_err();
    assert!(matches!(err, BeanError::TypeMismatch { property: "city", expected: "a bean", .. }));

    let err = PropertyQuery::new("postcode").query(&registry, &bean).unwrap_err();
    assert!(matches!(err, BeanError::PropertyNotFound { .. }));
}

#[test]
fn sorts_by_query() {
    let registry = BeanRegistry::new();
    let query = ChainedQuery::of(&["owner", "forename"]);

    let named = |forename: Option<&str>| Address {
        owner: Some(Person {
            forename: forename.map(Into::into),
            ..joda()
        }),
        ..address()
    };
    let mut addresses = vec![named(Some("Zoe")), named(None), named(Some("Ann"))];

    let ascending = comparator(&registry, &query, true);
    addresses.sort_by(|a, b| ascending(a, b));
    let forenames = addresses
        .iter()
        .map(|a| a.owner.as_ref().and_then(|o| o.forename.as_deref()))
        .collect::<alloc::vec::Vec<_>>();
    assert_eq!(forenames, [None, Some("Ann"), Some("Zoe")]);

    let descending = comparator(&registry, &query, false);
    addresses.sort_by(|a, b| descending(a as &dyn Bean, b as &dyn Bean));
    assert_eq!(addresses[0].owner.as_ref().unwrap().forename.as_deref(), Some("Zoe"));
}
