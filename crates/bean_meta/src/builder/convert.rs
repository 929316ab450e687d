use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::error::Error as StdError;
use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

use bean_utils::TypeIdMap;
use thiserror::Error;

use crate::error::Cause;
use crate::info::TypeInfo;
use crate::Value;

type ParseFn = fn(&str) -> Result<Box<dyn Value>, Cause>;

fn parse_as<T>(text: &str) -> Result<Box<dyn Value>, Cause>
where
    T: Value + FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match text.parse::<T>() {
        Ok(value) => Ok(Box::new(value)),
        Err(e) => Err(Arc::new(e)),
    }
}

/// Raised when no parser is registered for the target type.
#[derive(Debug, Error)]
#[error("no string converter registered for `{0}`")]
pub struct NoConverter(pub &'static str);

// -----------------------------------------------------------------------------
// StringConverter

/// Parsers from text to property values, keyed by target type.
///
/// [`StringConverter::standard`] knows every integer and float type, `bool`,
/// `char` and `String`. Further types are added through their [`FromStr`]
/// implementation.
///
/// # Examples
///
/// ```
/// use core::str::FromStr;
/// use bean_meta::{StringConverter, info::Typed};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Currency { Usd, Gbp }
/// bean_meta::impl_opaque_value!(Currency, "money::Currency");
///
/// impl FromStr for Currency {
///     type Err = std::fmt::Error;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         match s {
///             "USD" => Ok(Currency::Usd),
///             "GBP" => Ok(Currency::Gbp),
///             _ => Err(std::fmt::Error),
///         }
///     }
/// }
///
/// let converter = StringConverter::standard().with::<Currency>();
/// let usd = converter.parse(Currency::type_info(), "USD").unwrap();
/// assert_eq!(usd.take::<Currency>().unwrap(), Currency::Usd);
/// assert!(converter.parse(Currency::type_info(), "EUR").is_err());
///
/// let twelve = converter.parse(i32::type_info(), "12").unwrap();
/// assert_eq!(twelve.take::<i32>().unwrap(), 12);
/// ```
#[derive(Default, Clone)]
pub struct StringConverter {
    parsers: TypeIdMap<ParseFn>,
}

impl StringConverter {
    /// Creates a converter without parsers.
    #[inline]
    pub const fn new() -> Self {
        Self {
            parsers: TypeIdMap::new(),
        }
    }

    /// Creates a converter for primitives and `String`.
    pub fn standard() -> Self {
        Self::new()
            .with::<bool>()
            .with::<char>()
            .with::<u8>()
            .with::<u16>()
            .with::<u32>()
            .with::<u64>()
            .with::<u128>()
            .with::<usize>()
            .with::<i8>()
            .with::<i16>()
            .with::<i32>()
            .with::<i64>()
            .with::<i128>()
            .with::<isize>()
            .with::<f32>()
            .with::<f64>()
            .with::<String>()
    }

    /// The process-wide standard converter.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<StringConverter>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::standard())).clone()
    }

    /// Registers the [`FromStr`] implementation of `T`, replacing a previous
    /// parser of the same type.
    pub fn register<T>(&mut self)
    where
        T: Value + FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        self.parsers.insert(TypeId::of::<T>(), parse_as::<T>);
    }

    /// See [`register`](Self::register).
    #[inline]
    pub fn with<T>(mut self) -> Self
    where
        T: Value + FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        self.register::<T>();
        self
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.parsers.contains(&type_id)
    }

    /// Parses `text` as a value of type `info`.
    pub fn parse(&self, info: &TypeInfo, text: &str) -> Result<Box<dyn Value>, Cause> {
        match self.parsers.get(&info.ty_id()) {
            Some(parse) => parse(text),
            None => Err(Arc::new(NoConverter(info.type_path()))),
        }
    }
}

impl fmt::Debug for StringConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringConverter")
            .field("parsers", &self.parsers.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
