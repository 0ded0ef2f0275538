use crate::language::literal::TextLiteral;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::value::Value;
use std::fmt;

/// Specialization tag of an installed site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteVariant {
    Generic,
    IntegerLiteralPair,
    TextLiteralPair,
}

impl SiteVariant {
    /// Runtime values `construct` expects.
    pub fn arity(self) -> usize {
        match self {
            SiteVariant::Generic => 2,
            SiteVariant::IntegerLiteralPair | SiteVariant::TextLiteralPair => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SiteVariant::Generic => "generic",
            SiteVariant::IntegerLiteralPair => "integer literal pair",
            SiteVariant::TextLiteralPair => "text literal pair",
        }
    }
}

impl fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteKind {
    Generic,
    IntegerPair { begin: i64, end: i64 },
    TextPair { begin: TextLiteral, end: TextLiteral },
}

/// A specialized range constructor bound to one source construction point.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructionSite {
    exclusive: bool,
    kind: SiteKind,
}

impl ConstructionSite {
    pub fn generic(exclusive: bool) -> Self {
        Self {
            exclusive,
            kind: SiteKind::Generic,
        }
    }

    pub fn integer_pair(begin: i64, end: i64, exclusive: bool) -> Self {
        Self {
            exclusive,
            kind: SiteKind::IntegerPair { begin, end },
        }
    }

    pub fn text_pair(begin: TextLiteral, end: TextLiteral, exclusive: bool) -> Self {
        Self {
            exclusive,
            kind: SiteKind::TextPair { begin, end },
        }
    }

    pub fn exclusive(&self) -> bool {
        self.exclusive
    }

    pub fn kind(&self) -> &SiteKind {
        &self.kind
    }

    pub fn variant(&self) -> SiteVariant {
        match self.kind {
            SiteKind::Generic => SiteVariant::Generic,
            SiteKind::IntegerPair { .. } => SiteVariant::IntegerLiteralPair,
            SiteKind::TextPair { .. } => SiteVariant::TextLiteralPair,
        }
    }

    pub fn arity(&self) -> usize {
        self.variant().arity()
    }

    /// Builds a new range on every call, literal variants included.
    pub fn construct(&self, args: &[Value]) -> RuntimeResult<Value> {
        match (&self.kind, args) {
            (SiteKind::Generic, [begin, end]) => {
                Ok(Value::range(begin.clone(), end.clone(), self.exclusive))
            }
            (SiteKind::IntegerPair { begin, end }, []) => Ok(Value::range(
                Value::int(*begin),
                Value::int(*end),
                self.exclusive,
            )),
            (SiteKind::TextPair { begin, end }, []) => Ok(Value::range(
                begin.to_value(),
                end.to_value(),
                self.exclusive,
            )),
            _ => Err(RuntimeError::ArityMismatch {
                name: self.variant().to_string(),
                expected: self.arity(),
                received: args.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::encoding::CodeRange;
    use crate::runtime::value::RangeObject;

    fn range_of(value: &Value) -> &RangeObject {
        value.as_range().expect("range value")
    }

    #[test]
    fn generic_site_uses_call_time_endpoints() {
        let site = ConstructionSite::generic(true);
        let first = site.construct(&[Value::int(3), Value::int(10)]).unwrap();
        let second = site.construct(&[Value::int(100), Value::int(200)]).unwrap();
        assert_eq!(first, Value::range(Value::int(3), Value::int(10), true));
        assert_eq!(second, Value::range(Value::int(100), Value::int(200), true));
        assert!(!first.same_object(&second));
    }

    #[test]
    fn generic_site_keeps_endpoint_identity_and_skips_ordering() {
        let site = ConstructionSite::generic(false);
        let begin = TextLiteral::utf8("b").to_value();
        let range = site.construct(&[begin.clone(), Value::Nil]).unwrap();
        assert!(range_of(&range).begin.same_object(&begin));

        let backwards = site.construct(&[Value::int(9), Value::int(2)]).unwrap();
        assert_eq!(range_of(&backwards).begin, Value::int(9));
    }

    #[test]
    fn integer_pair_site_allocates_each_call() {
        let site = ConstructionSite::integer_pair(1, 5, false);
        let first = site.construct(&[]).unwrap();
        let second = site.construct(&[]).unwrap();
        assert_eq!(first, Value::range(Value::int(1), Value::int(5), false));
        assert_eq!(first, second);
        assert!(!first.same_object(&second));
    }

    #[test]
    fn text_pair_site_rebuilds_frozen_strings() {
        let site =
            ConstructionSite::text_pair(TextLiteral::utf8("a"), TextLiteral::utf8("z"), false);
        let first = site.construct(&[]).unwrap();
        let second = site.construct(&[]).unwrap();
        assert_eq!(first, second);
        let (a, b) = (range_of(&first), range_of(&second));
        assert!(!a.begin.same_object(&b.begin));
        assert!(!a.end.same_object(&b.end));
        let begin = a.begin.as_string().expect("string endpoint");
        assert!(begin.is_frozen());
        assert_eq!(begin.code_range(), CodeRange::SevenBit);
        assert_eq!(begin.bytes(), b"a");
    }

    #[test]
    fn wrong_argument_count_is_fatal() {
        let err = ConstructionSite::integer_pair(1, 2, false)
            .construct(&[Value::int(1)])
            .unwrap_err();
        assert!(err.is_fatal());
        let err = ConstructionSite::generic(false).construct(&[]).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::ArityMismatch {
                expected: 2,
                received: 0,
                ..
            }
        ));
    }
}
