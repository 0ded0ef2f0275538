use crate::runtime::encoding::{CodeRange, Encoding};
use crate::runtime::value::{Integer, Value};
use std::sync::Arc;

/// Byte content of a text literal together with its encoding and the
/// validity classification computed when the literal was compiled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLiteral {
    bytes: Arc<[u8]>,
    encoding: Encoding,
    code_range: CodeRange,
}

impl TextLiteral {
    /// Takes the classification as given; it is never re-checked.
    pub fn new(bytes: impl Into<Arc<[u8]>>, encoding: Encoding, code_range: CodeRange) -> Self {
        Self {
            bytes: bytes.into(),
            encoding,
            code_range,
        }
    }

    /// Classifies `bytes` up front, as the code generator does when it
    /// emits the literal.
    pub fn scanned(bytes: impl Into<Arc<[u8]>>, encoding: Encoding) -> Self {
        let bytes = bytes.into();
        let code_range = CodeRange::scan(&bytes, encoding);
        Self {
            bytes,
            encoding,
            code_range,
        }
    }

    pub fn utf8(text: &str) -> Self {
        Self::scanned(text.as_bytes(), Encoding::Utf8)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn code_range(&self) -> CodeRange {
        self.code_range
    }

    /// A new frozen string object over the literal's bytes.
    pub fn to_value(&self) -> Value {
        Value::frozen_string(Arc::clone(&self.bytes), self.encoding, self.code_range)
    }
}

/// Endpoints known at compile time. Both sides are always the same kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralPayload {
    Integer { begin: Integer, end: Integer },
    Text { begin: TextLiteral, end: TextLiteral },
}

impl LiteralPayload {
    pub fn integers(begin: impl Into<Integer>, end: impl Into<Integer>) -> Self {
        LiteralPayload::Integer {
            begin: begin.into(),
            end: end.into(),
        }
    }

    pub fn texts(begin: TextLiteral, end: TextLiteral) -> Self {
        LiteralPayload::Text { begin, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_literals_are_classified_once() {
        assert_eq!(TextLiteral::utf8("a").code_range(), CodeRange::SevenBit);
        assert_eq!(TextLiteral::utf8("ß").code_range(), CodeRange::Valid);
    }

    #[test]
    fn explicit_classification_is_kept_verbatim() {
        let literal = TextLiteral::new(&b"\xff"[..], Encoding::Utf8, CodeRange::Valid);
        assert_eq!(literal.code_range(), CodeRange::Valid);
        let Value::String(object) = literal.to_value() else {
            panic!("expected a string");
        };
        assert_eq!(object.code_range(), CodeRange::Valid);
        assert!(object.is_frozen());
    }

    #[test]
    fn each_value_is_a_new_object_over_shared_bytes() {
        let literal = TextLiteral::utf8("z");
        let first = literal.to_value();
        let second = literal.to_value();
        assert_eq!(first, second);
        assert!(!first.same_object(&second));
        let (Some(a), Some(b)) = (first.as_string(), second.as_string()) else {
            panic!("expected strings");
        };
        assert!(a.shares_bytes_with(b));
    }
}
