use crate::runtime::error::{RuntimeError, RuntimeResult};
use nom::{
    IResult,
    bytes::complete::tag,
    character::complete::{alpha1, multispace0},
    combinator::all_consuming,
    multi::separated_list0,
    sequence::{delimited, preceded, tuple},
};
use std::fmt;
use std::str::FromStr;

const CONTEXT_PARAM: &str = "context";
const VALUE_PARAM: &str = "value";

/// Type signature of a construction call point, written by the code generator
/// as `(context, value, value) -> value`. The leading `context` parameter is
/// optional and does not count toward the arity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    takes_context: bool,
    arity: usize,
}

impl Signature {
    pub fn new(takes_context: bool, arity: usize) -> Self {
        Self {
            takes_context,
            arity,
        }
    }

    /// Signature with the thread context followed by `arity` values.
    pub fn with_context(arity: usize) -> Self {
        Self::new(true, arity)
    }

    pub fn takes_context(&self) -> bool {
        self.takes_context
    }

    /// Number of runtime values passed at each invocation.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn parse(text: &str) -> RuntimeResult<Signature> {
        let (_, (params, ret)) = signature_parts(text).map_err(|_| {
            RuntimeError::malformed(format!("invalid call point signature `{}`", text))
        })?;
        if ret != VALUE_PARAM {
            return Err(RuntimeError::malformed(format!(
                "call point must return `{}`, found `{}`",
                VALUE_PARAM, ret
            )));
        }
        let mut takes_context = false;
        let mut arity = 0;
        for (idx, param) in params.iter().enumerate() {
            match *param {
                CONTEXT_PARAM if idx == 0 => takes_context = true,
                VALUE_PARAM => arity += 1,
                other => {
                    return Err(RuntimeError::malformed(format!(
                        "unexpected parameter `{}` at position {} in `{}`",
                        other, idx, text
                    )));
                }
            }
        }
        Ok(Signature::new(takes_context, arity))
    }
}

impl FromStr for Signature {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signature::parse(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params = Vec::with_capacity(self.arity + 1);
        if self.takes_context {
            params.push(CONTEXT_PARAM);
        }
        params.extend(std::iter::repeat(VALUE_PARAM).take(self.arity));
        write!(f, "({}) -> {}", params.join(", "), VALUE_PARAM)
    }
}

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

fn param_list(input: &str) -> IResult<&str, Vec<&str>> {
    delimited(
        ws(tag("(")),
        separated_list0(ws(tag(",")), ws(alpha1)),
        ws(tag(")")),
    )(input)
}

fn signature_parts(input: &str) -> IResult<&str, (Vec<&str>, &str)> {
    all_consuming(tuple((param_list, preceded(ws(tag("->")), ws(alpha1)))))(input)
}
