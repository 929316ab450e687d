use alloc::boxed::Box;
use core::hash::Hasher;

use crate::{Bean, BeanError, BeanRegistry, Value, value_hasher};

fn same_value(a: &Option<Box<dyn Value>>, b: &Option<Box<dyn Value>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.value_eq(&**b),
        (None, None) => true,
        _ => false,
    }
}

/// Compares two beans property by property.
///
/// The beans may be of different types: they are equal when they expose the
/// same property names with equal values.
pub fn properties_equal(registry: &BeanRegistry, a: &dyn Bean, b: &dyn Bean) -> Result<bool, BeanError> {
    let first = registry.lookup_bean(a)?;
    let second = registry.lookup_bean(b)?;
    if first.property_count() != second.property_count() {
        return Ok(false);
    }
    for property in first.properties() {
        let Some(other) = second.properties().iter().find(|p| p.name() == property.name()) else {
            return Ok(false);
        };
        if !same_value(&property.get(a)?, &other.get(b)?) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A hash of the property names and values of `bean`, consistent with
/// [`properties_equal`].
pub fn properties_hash(registry: &BeanRegistry, bean: &dyn Bean) -> Result<u64, BeanError> {
    let descriptor = registry.lookup_bean(bean)?;
    let mut sum = 0u64;
    for (name, value) in descriptor.read_all(bean)? {
        let mut hasher = value_hasher();
        hasher.write(name.as_bytes());
        hasher.write_u64(value.map_or(0, |v| v.value_hash()));
        // Order-independent, beans of other types may list the same
        // properties in another order.
        sum = sum.wrapping_add(hasher.finish());
    }
    Ok(sum)
}

/// Compares two beans of the same type, skipping the properties named in
/// `ignored`.
///
/// Beans of different types are never equal.
pub fn equal_ignoring(
    registry: &BeanRegistry,
    a: &dyn Bean,
    b: &dyn Bean,
    ignored: &[&str],
) -> Result<bool, BeanError> {
    if a.ty_id() != b.ty_id() {
        return Ok(false);
    }
    let descriptor = registry.lookup_bean(a)?;
    for property in descriptor.properties() {
        if ignored.contains(&property.name()) {
            continue;
        }
        if !same_value(&property.get(a)?, &property.get(b)?) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Compares two `f64` within `tolerance`.
///
/// `NaN` equals `NaN` and infinities only equal themselves.
///
/// ```
/// use bean_meta::ops::equal_with_tolerance_f64;
///
/// assert!(equal_with_tolerance_f64(1.0, 1.05, 0.1));
/// assert!(!equal_with_tolerance_f64(1.0, 1.2, 0.1));
/// assert!(equal_with_tolerance_f64(f64::NAN, f64::NAN, 0.0));
/// assert!(!equal_with_tolerance_f64(f64::INFINITY, f64::MAX, f64::INFINITY));
/// ```
pub fn equal_with_tolerance_f64(a: f64, b: f64, tolerance: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= tolerance
}

/// Compares two `f32` within `tolerance`, see [`equal_with_tolerance_f64`].
pub fn equal_with_tolerance_f32(a: f32, b: f32, tolerance: f32) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= tolerance
}
