use crate::runtime::error::{OverflowDirection, RuntimeError, RuntimeResult};
use crate::runtime::value::{Integer, Value};
use num_bigint::Sign;
use num_traits::ToPrimitive;

// -2^63 and 2^63 are both exactly representable as f64.
const LONG_MIN_DOUBLE: f64 = -9_223_372_036_854_775_808.0;
const LONG_MAX_DOUBLE: f64 = 9_223_372_036_854_775_808.0;

/// Narrows an integer to the native signed 64-bit range.
pub fn narrow_to_native(value: &Integer) -> RuntimeResult<i64> {
    match value {
        Integer::Fixnum(v) => Ok(*v),
        Integer::Bignum(big) => big.to_i64().ok_or_else(|| {
            let direction = if big.sign() == Sign::Minus {
                OverflowDirection::TooSmall
            } else {
                OverflowDirection::TooBig
            };
            RuntimeError::overflow(big, direction, "long")
        }),
    }
}

pub fn integer_as_long(value: &Integer) -> RuntimeResult<i64> {
    narrow_to_native(value)
}

/// Checks that `num` fits a 32-bit `int`.
pub fn check_int(num: i64) -> RuntimeResult<i32> {
    i32::try_from(num).map_err(|_| {
        let direction = if num < i64::from(i32::MIN) {
            OverflowDirection::TooSmall
        } else {
            OverflowDirection::TooBig
        };
        RuntimeError::overflow(num, direction, "int")
    })
}

pub fn integer_as_int(value: &Integer) -> RuntimeResult<i32> {
    check_int(narrow_to_native(value)?)
}

/// Converts a numeric value to `i64`. Floats truncate toward zero.
pub fn numeric_to_long(value: &Value) -> RuntimeResult<i64> {
    match value {
        Value::Int(integer) => narrow_to_native(integer),
        Value::Float(float) => float_to_long(*float),
        other => Err(RuntimeError::TypeMismatch {
            message: format!("no implicit conversion of {} into Integer", other.type_name()),
        }),
    }
}

fn float_to_long(value: f64) -> RuntimeResult<i64> {
    // NaN fails both comparisons.
    if value >= LONG_MIN_DOUBLE && value < LONG_MAX_DOUBLE {
        Ok(value.trunc() as i64)
    } else {
        Err(RuntimeError::FloatOutOfRange {
            value: value.to_string(),
        })
    }
}
