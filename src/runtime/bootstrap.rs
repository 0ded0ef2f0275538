use crate::language::descriptor::SiteDescriptor;
use crate::language::literal::LiteralPayload;
use crate::options::{LinkOptions, OverflowPolicy};
use crate::runtime::convert::narrow_to_native;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::site::ConstructionSite;
use crate::runtime::value::{Integer, Value};
use tracing::{debug, warn};

/// The target a call point is bound to: a site, plus the endpoints it is
/// invoked with when the call point itself passes none.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkedSite {
    site: ConstructionSite,
    bound: Option<[Value; 2]>,
}

impl LinkedSite {
    pub fn direct(site: ConstructionSite) -> Self {
        Self { site, bound: None }
    }

    pub fn bound(site: ConstructionSite, begin: Value, end: Value) -> Self {
        Self {
            site,
            bound: Some([begin, end]),
        }
    }

    pub fn site(&self) -> &ConstructionSite {
        &self.site
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Runtime values the call point has to pass.
    pub fn arity(&self) -> usize {
        if self.bound.is_some() {
            0
        } else {
            self.site.arity()
        }
    }

    pub fn invoke(&self, args: &[Value]) -> RuntimeResult<Value> {
        match &self.bound {
            None => self.site.construct(args),
            Some(bound) if args.is_empty() => self.site.construct(bound),
            Some(_) => Err(RuntimeError::ArityMismatch {
                name: format!("bound {}", self.site.variant()),
                expected: 0,
                received: args.len(),
            }),
        }
    }
}

/// Picks the site variant for `descriptor` and checks it against the call
/// point's signature. Pure: equal inputs give equal results.
pub fn link(descriptor: &SiteDescriptor, options: &LinkOptions) -> RuntimeResult<LinkedSite> {
    let exclusive = descriptor.exclusive;
    let linked = match &descriptor.literal {
        None => LinkedSite::direct(ConstructionSite::generic(exclusive)),
        Some(LiteralPayload::Integer { begin, end }) => match narrow_pair(begin, end) {
            Ok((begin, end)) => {
                LinkedSite::direct(ConstructionSite::integer_pair(begin, end, exclusive))
            }
            Err(err) => match options.overflow {
                OverflowPolicy::Raise => return Err(err),
                OverflowPolicy::Degrade => {
                    warn!(
                        origin = ?descriptor.origin,
                        %err,
                        "integer literal range degraded to a generic site"
                    );
                    LinkedSite::bound(
                        ConstructionSite::generic(exclusive),
                        Value::Int(begin.clone()),
                        Value::Int(end.clone()),
                    )
                }
            },
        },
        Some(LiteralPayload::Text { begin, end }) => LinkedSite::direct(
            ConstructionSite::text_pair(begin.clone(), end.clone(), exclusive),
        ),
    };

    let declared = descriptor.signature.arity();
    if linked.arity() != declared {
        return Err(RuntimeError::malformed(format!(
            "{} site takes {} runtime arguments but the call point signature `{}` passes {}",
            linked.site().variant(),
            linked.arity(),
            descriptor.signature,
            declared
        )));
    }

    debug!(
        variant = %linked.site().variant(),
        exclusive,
        origin = ?descriptor.origin,
        "linked range construction site"
    );
    Ok(linked)
}

fn narrow_pair(begin: &Integer, end: &Integer) -> RuntimeResult<(i64, i64)> {
    Ok((narrow_to_native(begin)?, narrow_to_native(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::literal::TextLiteral;
    use crate::language::signature::Signature;
    use crate::runtime::encoding::{CodeRange, Encoding};
    use crate::runtime::error::OverflowDirection;
    use crate::runtime::site::{SiteKind, SiteVariant};
    use pretty_assertions::assert_eq;

    fn raise() -> LinkOptions {
        LinkOptions::default()
    }

    #[test]
    fn descriptors_without_literals_link_generic() {
        let linked = link(&SiteDescriptor::generic(true), &raise()).unwrap();
        assert_eq!(linked, LinkedSite::direct(ConstructionSite::generic(true)));
    }

    #[test]
    fn native_integer_literals_link_integer_pair() {
        let linked = link(&SiteDescriptor::integers(1i64, 5i64, false), &raise()).unwrap();
        assert_eq!(linked.site().variant(), SiteVariant::IntegerLiteralPair);
        assert_eq!(linked.site().kind(), &SiteKind::IntegerPair { begin: 1, end: 5 });
        assert!(!linked.is_bound());
    }

    #[test]
    fn bignum_that_fits_still_links_integer_pair() {
        let descriptor = SiteDescriptor::literal(
            LiteralPayload::Integer {
                begin: Integer::Bignum(i64::MIN.into()),
                end: Integer::Bignum(i64::MAX.into()),
            },
            true,
        );
        let linked = link(&descriptor, &raise()).unwrap();
        assert_eq!(
            linked.site(),
            &ConstructionSite::integer_pair(i64::MIN, i64::MAX, true)
        );
    }

    #[test]
    fn text_literals_keep_their_classification() {
        let begin = TextLiteral::new(&b"\xff"[..], Encoding::Utf8, CodeRange::Unknown);
        let end = TextLiteral::utf8("z");
        let descriptor = SiteDescriptor::texts(begin.clone(), end.clone(), false);
        let linked = link(&descriptor, &raise()).unwrap();
        assert_eq!(linked.site(), &ConstructionSite::text_pair(begin, end, false));
    }

    #[test]
    fn overflowing_literal_raises_too_big() {
        let descriptor = SiteDescriptor::integers(1i128 << 63, 0i64, false);
        let err = link(&descriptor, &raise()).unwrap_err();
        assert!(!err.is_fatal());
        assert!(matches!(
            err,
            RuntimeError::IntegerOverflow {
                direction: OverflowDirection::TooBig,
                target: "long",
                ..
            }
        ));
    }

    #[test]
    fn overflowing_literal_raises_too_small_on_end() {
        let descriptor = SiteDescriptor::integers(0i64, -(1i128 << 63) - 1, false);
        let err = link(&descriptor, &raise()).unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::IntegerOverflow {
                direction: OverflowDirection::TooSmall,
                ..
            }
        ));
    }

    #[test]
    fn degrade_binds_literals_to_a_generic_site() {
        let options = LinkOptions::with_overflow(OverflowPolicy::Degrade);
        let descriptor = SiteDescriptor::integers(1i128 << 63, 1i128 << 64, true);
        let linked = link(&descriptor, &options).unwrap();
        assert!(linked.is_bound());
        assert_eq!(linked.site().variant(), SiteVariant::Generic);
        assert_eq!(linked.arity(), 0);

        let range = linked.invoke(&[]).unwrap();
        assert_eq!(
            range,
            Value::range(
                Value::Int(Integer::from(1i128 << 63)),
                Value::Int(Integer::from(1i128 << 64)),
                true
            )
        );
        assert!(linked.invoke(&[Value::Nil]).unwrap_err().is_fatal());
    }

    #[test]
    fn signature_arity_must_match_variant() {
        let literal_with_args = SiteDescriptor::integers(1i64, 2i64, false)
            .with_signature(Signature::with_context(2));
        assert!(link(&literal_with_args, &raise()).unwrap_err().is_fatal());

        let generic_with_one =
            SiteDescriptor::generic(false).with_signature(Signature::new(true, 1));
        let err = link(&generic_with_one, &raise()).unwrap_err();
        assert!(matches!(err, RuntimeError::MalformedDescriptor { .. }));
    }

    #[test]
    fn linking_is_idempotent() {
        let descriptor =
            SiteDescriptor::texts(TextLiteral::utf8("a"), TextLiteral::utf8("z"), true)
                .at("ranges.rb", 4);
        assert_eq!(
            link(&descriptor, &raise()).unwrap(),
            link(&descriptor, &raise()).unwrap()
        );
    }
}
