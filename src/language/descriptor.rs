use crate::language::literal::{LiteralPayload, TextLiteral};
use crate::language::signature::Signature;
use crate::runtime::value::Integer;
use std::fmt;

/// Where a construction point sits in user source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteOrigin {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for SiteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Everything the code generator knows about one range construction point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteDescriptor {
    pub signature: Signature,
    pub exclusive: bool,
    pub literal: Option<LiteralPayload>,
    pub origin: Option<SiteOrigin>,
}

impl SiteDescriptor {
    /// Endpoints arrive as runtime arguments.
    pub fn generic(exclusive: bool) -> Self {
        Self {
            signature: Signature::with_context(2),
            exclusive,
            literal: None,
            origin: None,
        }
    }

    pub fn integers(begin: impl Into<Integer>, end: impl Into<Integer>, exclusive: bool) -> Self {
        Self::literal(LiteralPayload::integers(begin, end), exclusive)
    }

    pub fn texts(begin: TextLiteral, end: TextLiteral, exclusive: bool) -> Self {
        Self::literal(LiteralPayload::texts(begin, end), exclusive)
    }

    pub fn literal(payload: LiteralPayload, exclusive: bool) -> Self {
        Self {
            signature: Signature::with_context(0),
            exclusive,
            literal: Some(payload),
            origin: None,
        }
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.origin = Some(SiteOrigin {
            file: file.into(),
            line,
        });
        self
    }
}
