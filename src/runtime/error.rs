use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Which side of the target range an overflowing integer fell off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowDirection {
    TooSmall,
    TooBig,
}

impl fmt::Display for OverflowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowDirection::TooSmall => write!(f, "small"),
            OverflowDirection::TooBig => write!(f, "big"),
        }
    }
}

#[derive(Clone, Debug, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("integer {value} too {direction} to convert to `{target}'")]
    #[diagnostic(code(range_site::integer_overflow))]
    IntegerOverflow {
        value: String,
        direction: OverflowDirection,
        target: &'static str,
    },
    #[error("float {value} out of range of integer")]
    #[diagnostic(code(range_site::float_out_of_range))]
    FloatOutOfRange { value: String },
    #[error("Malformed construction site descriptor: {message}")]
    #[diagnostic(
        code(range_site::malformed_descriptor),
        help("the code generator emitted a descriptor the runtime cannot link")
    )]
    MalformedDescriptor { message: String },
    #[error("Construction `{name}` expected {expected} arguments but received {received}")]
    #[diagnostic(code(range_site::arity_mismatch))]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("Type mismatch: {message}")]
    #[diagnostic(code(range_site::type_mismatch))]
    TypeMismatch { message: String },
    #[error("No construction site #{index} in code unit `{unit}`")]
    #[diagnostic(code(range_site::unknown_site))]
    UnknownSite { unit: String, index: usize },
}

impl RuntimeError {
    pub fn overflow(
        value: impl fmt::Display,
        direction: OverflowDirection,
        target: &'static str,
    ) -> Self {
        RuntimeError::IntegerOverflow {
            value: value.to_string(),
            direction,
            target,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        RuntimeError::MalformedDescriptor {
            message: message.into(),
        }
    }

    /// Integrity faults come from broken generated code; callers must not
    /// retry or recover from them.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RuntimeError::MalformedDescriptor { .. }
                | RuntimeError::ArityMismatch { .. }
                | RuntimeError::UnknownSite { .. }
        )
    }
}
