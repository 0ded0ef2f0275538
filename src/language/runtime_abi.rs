use crate::language::descriptor::SiteDescriptor;
use crate::language::literal::{LiteralPayload, TextLiteral};
use crate::language::signature::Signature;
use crate::runtime::convert::narrow_to_native;
use crate::runtime::encoding::{CodeRange, Encoding};
use crate::runtime::error::{RuntimeError, RuntimeResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapOperands {
    Plain {
        exclusive: i32,
    },
    Fixnums {
        begin: i64,
        end: i64,
        exclusive: i32,
    },
    Strings {
        begin: String,
        begin_encoding: String,
        begin_code_range: i32,
        end: String,
        end_encoding: String,
        end_code_range: i32,
        exclusive: i32,
    },
}

impl BootstrapOperands {
    pub fn into_descriptor(self, signature: &str) -> RuntimeResult<SiteDescriptor> {
        let signature = Signature::parse(signature)?;
        let descriptor = match self {
            BootstrapOperands::Plain { exclusive } => {
                SiteDescriptor::generic(decode_plain_flag(exclusive))
            }
            BootstrapOperands::Fixnums {
                begin,
                end,
                exclusive,
            } => SiteDescriptor::integers(begin, end, decode_flag(exclusive)),
            BootstrapOperands::Strings {
                begin,
                begin_encoding,
                begin_code_range,
                end,
                end_encoding,
                end_code_range,
                exclusive,
            } => SiteDescriptor::texts(
                text_operand(&begin, &begin_encoding, begin_code_range)?,
                text_operand(&end, &end_encoding, end_code_range)?,
                decode_flag(exclusive),
            ),
        };
        Ok(descriptor.with_signature(signature))
    }

    /// Operands the code generator emits for `descriptor`. Integer endpoints
    /// outside `i64` have no positional form.
    pub fn from_descriptor(descriptor: &SiteDescriptor) -> RuntimeResult<Self> {
        let exclusive = encode_flag(descriptor.exclusive);
        match &descriptor.literal {
            None => Ok(BootstrapOperands::Plain { exclusive }),
            Some(LiteralPayload::Integer { begin, end }) => {
                match (narrow_to_native(begin), narrow_to_native(end)) {
                    (Ok(begin), Ok(end)) => Ok(BootstrapOperands::Fixnums {
                        begin,
                        end,
                        exclusive,
                    }),
                    _ => Err(RuntimeError::malformed(
                        "integer literal endpoints outside the native range cannot be embedded",
                    )),
                }
            }
            Some(LiteralPayload::Text { begin, end }) => Ok(BootstrapOperands::Strings {
                begin: encode_raw_bytes(begin.bytes()),
                begin_encoding: begin.encoding().name().to_string(),
                begin_code_range: begin.code_range().code(),
                end: encode_raw_bytes(end.bytes()),
                end_encoding: end.encoding().name().to_string(),
                end_code_range: end.code_range().code(),
                exclusive,
            }),
        }
    }
}

/// Flag carried by literal operand forms: any nonzero value is set.
pub fn decode_flag(flag: i32) -> bool {
    flag != 0
}

/// The plain form only treats exactly `1` as set.
pub fn decode_plain_flag(flag: i32) -> bool {
    flag == 1
}

pub fn encode_flag(flag: bool) -> i32 {
    i32::from(flag)
}

pub fn decode_raw_bytes(raw: &str) -> RuntimeResult<Vec<u8>> {
    raw.chars()
        .map(|ch| {
            u8::try_from(ch).map_err(|_| {
                RuntimeError::malformed(format!(
                    "raw byte string contains U+{:04X}, which is not a byte",
                    u32::from(ch)
                ))
            })
        })
        .collect()
}

pub fn encode_raw_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub fn text_operand(raw: &str, encoding: &str, code_range: i32) -> RuntimeResult<TextLiteral> {
    let bytes = decode_raw_bytes(raw)?;
    let encoding = Encoding::find(encoding)
        .ok_or_else(|| RuntimeError::malformed(format!("unknown encoding `{}`", encoding)))?;
    let code_range = CodeRange::from_code(code_range).ok_or_else(|| {
        RuntimeError::malformed(format!("unknown code range {:#x}", code_range))
    })?;
    Ok(TextLiteral::new(bytes, encoding, code_range))
}
