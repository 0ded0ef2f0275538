use std::fmt;

/// Character encodings a text literal can be tagged with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii8Bit,
    UsAscii,
    Utf8,
    Iso8859_1,
}

impl Encoding {
    /// Looks an encoding up by its canonical name or one of its aliases,
    /// ignoring ASCII case.
    pub fn find(name: &str) -> Option<Encoding> {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "ASCII-8BIT" | "BINARY" => Some(Encoding::Ascii8Bit),
            "US-ASCII" | "ASCII" | "ANSI_X3.4-1968" => Some(Encoding::UsAscii),
            "UTF-8" | "CP65001" => Some(Encoding::Utf8),
            "ISO-8859-1" | "ISO8859-1" => Some(Encoding::Iso8859_1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii8Bit => "ASCII-8BIT",
            Encoding::UsAscii => "US-ASCII",
            Encoding::Utf8 => "UTF-8",
            Encoding::Iso8859_1 => "ISO-8859-1",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Precomputed validity of a byte sequence under its encoding.
///
/// The numeric codes are the ones compiled code embeds as bootstrap operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeRange {
    /// Not classified yet; consumers must scan before relying on validity.
    Unknown,
    /// Only bytes below 0x80.
    SevenBit,
    Valid,
    Broken,
}

impl CodeRange {
    pub const UNKNOWN_CODE: i32 = 0;
    pub const SEVEN_BIT_CODE: i32 = 0x10;
    pub const VALID_CODE: i32 = 0x20;
    pub const BROKEN_CODE: i32 = 0x30;

    pub fn from_code(code: i32) -> Option<CodeRange> {
        match code {
            Self::UNKNOWN_CODE => Some(CodeRange::Unknown),
            Self::SEVEN_BIT_CODE => Some(CodeRange::SevenBit),
            Self::VALID_CODE => Some(CodeRange::Valid),
            Self::BROKEN_CODE => Some(CodeRange::Broken),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            CodeRange::Unknown => Self::UNKNOWN_CODE,
            CodeRange::SevenBit => Self::SEVEN_BIT_CODE,
            CodeRange::Valid => Self::VALID_CODE,
            CodeRange::Broken => Self::BROKEN_CODE,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, CodeRange::Unknown)
    }

    /// Classifies `bytes` under `encoding`. Run by the code generator when a
    /// literal is emitted, never on the construction path.
    pub fn scan(bytes: &[u8], encoding: Encoding) -> CodeRange {
        // All supported encodings are ASCII compatible.
        if bytes.is_ascii() {
            return CodeRange::SevenBit;
        }
        match encoding {
            Encoding::UsAscii => CodeRange::Broken,
            Encoding::Utf8 => match std::str::from_utf8(bytes) {
                Ok(_) => CodeRange::Valid,
                Err(_) => CodeRange::Broken,
            },
            Encoding::Ascii8Bit | Encoding::Iso8859_1 => CodeRange::Valid,
        }
    }
}
