use crate::runtime::encoding::{CodeRange, Encoding};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;
use std::sync::Arc;

/// A runtime value. Strings and ranges are heap objects with identity;
/// everything else is an immediate.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(Integer),
    Float(f64),
    String(Arc<StringObject>),
    Range(Arc<RangeObject>),
}

impl Value {
    pub fn int(value: i64) -> Self {
        Value::Int(Integer::Fixnum(value))
    }

    /// Allocates a new interval object.
    pub fn range(begin: Value, end: Value, exclusive: bool) -> Self {
        Value::Range(Arc::new(RangeObject {
            begin,
            end,
            exclusive,
        }))
    }

    /// Allocates a new frozen string over `bytes`, trusting `code_range`.
    pub fn frozen_string(
        bytes: impl Into<Arc<[u8]>>,
        encoding: Encoding,
        code_range: CodeRange,
    ) -> Self {
        Value::String(Arc::new(StringObject::frozen(bytes, encoding, code_range)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Range(_) => "range",
        }
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringObject> {
        match self {
            Value::String(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeObject> {
        match self {
            Value::Range(object) => Some(object),
            _ => None,
        }
    }

    /// Reference identity. Immediates are identical when equal.
    pub fn same_object(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Arc::ptr_eq(a, b),
            (Value::Range(a), Value::Range(b)) => Arc::ptr_eq(a, b),
            (Value::String(_), _) | (Value::Range(_), _) => false,
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a.as_ref() == b.as_ref(),
            (Value::Range(a), Value::Range(b)) => a.as_ref() == b.as_ref(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{:?}", v.to_string_lossy()),
            Value::Range(range) => write!(f, "{}", range),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Value::Int(value)
    }
}

/// Integer with a native fast path. `Bignum` holds values outside `i64`
/// when built through [`Integer::from_big`].
#[derive(Clone, Debug)]
pub enum Integer {
    Fixnum(i64),
    Bignum(BigInt),
}

impl Integer {
    pub fn from_big(value: BigInt) -> Self {
        match value.to_i64() {
            Some(fixnum) => Integer::Fixnum(fixnum),
            None => Integer::Bignum(value),
        }
    }

    pub fn to_big(&self) -> BigInt {
        match self {
            Integer::Fixnum(v) => BigInt::from(*v),
            Integer::Bignum(v) => v.clone(),
        }
    }

    pub fn is_fixnum(&self) -> bool {
        matches!(self, Integer::Fixnum(_))
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Integer::Fixnum(a), Integer::Fixnum(b)) => a == b,
            _ => self.to_big() == other.to_big(),
        }
    }
}

impl Eq for Integer {}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::Fixnum(value)
    }
}

impl From<i128> for Integer {
    fn from(value: i128) -> Self {
        Integer::from_big(BigInt::from(value))
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Integer::from_big(value)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Fixnum(v) => write!(f, "{v}"),
            Integer::Bignum(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StringObject {
    bytes: Arc<[u8]>,
    encoding: Encoding,
    code_range: CodeRange,
    frozen: bool,
}

impl StringObject {
    /// A mutable string; its code range is left for the first reader to scan.
    pub fn new(bytes: impl Into<Arc<[u8]>>, encoding: Encoding) -> Self {
        Self {
            bytes: bytes.into(),
            encoding,
            code_range: CodeRange::Unknown,
            frozen: false,
        }
    }

    pub fn frozen(
        bytes: impl Into<Arc<[u8]>>,
        encoding: Encoding,
        code_range: CodeRange,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            encoding,
            code_range,
            frozen: true,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The classification recorded at construction, possibly `Unknown`.
    pub fn code_range(&self) -> CodeRange {
        self.code_range
    }

    pub fn scan_code_range(&self) -> CodeRange {
        if self.code_range.is_known() {
            self.code_range
        } else {
            CodeRange::scan(&self.bytes, self.encoding)
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Whether both objects view the very same byte buffer.
    pub fn shares_bytes_with(&self, other: &StringObject) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl PartialEq for StringObject {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding && self.bytes == other.bytes
    }
}

/// The interval value. Endpoints are not ordered or validated here; a range
/// whose begin lies after its end is simply empty.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeObject {
    pub begin: Value,
    pub end: Value,
    pub exclusive: bool,
}

impl fmt::Display for RangeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.begin,
            if self.exclusive { "..." } else { ".." },
            self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_normalizes_bignums_that_fit() {
        assert!(Integer::from(42i128).is_fixnum());
        assert!(Integer::from(i64::MIN as i128).is_fixnum());
        assert!(!Integer::from(i64::MAX as i128 + 1).is_fixnum());
        assert_eq!(Integer::Bignum(BigInt::from(7)), Integer::Fixnum(7));
    }

    #[test]
    fn ranges_compare_by_content_but_not_identity() {
        let a = Value::range(Value::int(1), Value::int(5), false);
        let b = Value::range(Value::int(1), Value::int(5), false);
        assert_eq!(a, b);
        assert!(!a.same_object(&b));
        assert!(a.same_object(&a.clone()));
        assert_ne!(a, Value::range(Value::int(1), Value::int(5), true));
    }

    #[test]
    fn strings_compare_bytes_and_encoding() {
        let utf8 = Value::frozen_string(&b"a"[..], Encoding::Utf8, CodeRange::SevenBit);
        let binary = Value::frozen_string(&b"a"[..], Encoding::Ascii8Bit, CodeRange::SevenBit);
        assert_ne!(utf8, binary);
        assert_eq!(
            utf8,
            Value::frozen_string(&b"a"[..], Encoding::Utf8, CodeRange::SevenBit)
        );
    }

    #[test]
    fn unknown_code_range_is_scanned_on_demand() {
        let text = StringObject::new(&b"caf\xc3\xa9"[..], Encoding::Utf8);
        assert!(!text.is_frozen());
        assert_eq!(text.code_range(), CodeRange::Unknown);
        assert_eq!(text.scan_code_range(), CodeRange::Valid);
    }

    #[test]
    fn display_uses_range_operators() {
        let inclusive = Value::range(Value::int(1), Value::int(5), false);
        let exclusive = Value::range(
            Value::frozen_string(&b"a"[..], Encoding::Utf8, CodeRange::SevenBit),
            Value::frozen_string(&b"z"[..], Encoding::Utf8, CodeRange::SevenBit),
            true,
        );
        assert_eq!(inclusive.to_string(), "1..5");
        assert_eq!(exclusive.to_string(), "\"a\"...\"z\"");
    }
}
