//! Scenarios spanning schemas, descriptors, builders and the registry.
//!
//! The fixtures below are shared by the submodules.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::StringConverter;
use crate::derive::Bean;

mod handle;
mod mutable;
mod ops;
mod registry;
mod schemas;
mod strategies;

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Currency {
    Gbp,
    Usd,
}

crate::impl_opaque_value!(Currency, "bean_meta::tests::Currency", hash, ord);

impl FromStr for Currency {
    type Err = fmt::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GBP" => Ok(Self::Gbp),
            "USD" => Ok(Self::Usd),
            _ => Err(fmt::Error),
        }
    }
}

#[derive(Bean, Clone, Debug, PartialEq)]
struct Person {
    #[property]
    forename: Option<String>,
    #[property(validate = "not_null")]
    surname: String,
}

/// Eight properties covering every get style.
#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(accessor = "handle")]
struct Address {
    #[property]
    number: i32,
    #[property]
    flag: bool,
    #[property(get = "field", validate = "not_null")]
    street: String,
    #[property(get = "wrapped")]
    town: Option<String>,
    #[property(validate = "not_null")]
    city: String,
    #[property(get = "optional")]
    owner: Option<Person>,
    #[property]
    list: Vec<String>,
    #[property]
    currency: Option<Currency>,
}

fn converter() -> StringConverter {
    StringConverter::standard().with::<Currency>()
}

fn joda() -> Person {
    Person {
        forename: Some("Stephen".into()),
        surname: "Colebourne".into(),
    }
}

fn address() -> Address {
    Address {
        number: 12,
        flag: true,
        street: "Park Lane".into(),
        town: None,
        city: "London".into(),
        owner: Some(joda()),
        list: alloc::vec!["a".into(), "b".into()],
        currency: Some(Currency::Gbp),
    }
}
