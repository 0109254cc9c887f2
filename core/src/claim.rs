// Copyright (c) 2024 The Webcash Developers

//! Claim-code framing shared by the secret and public forms.
//!
//! A claim code is the ASCII string `e<amount>:<kind>:<payload>`. The
//! helpers here split the frame and handle the amount field with its `e`
//! sigil; the payload rules live with [`Secret`] and [`Public`].

use crate::{Amount, Error, Parsed, Public, Result, Secret};

/// Kind field of a secret claim code.
pub(crate) const KIND_SECRET: &str = "secret";

/// Kind field of a public claim code.
pub(crate) const KIND_PUBLIC: &str = "public";

/// Split a claim code at its first two colons.
///
/// The third field keeps any further colons. Fewer than two colons is
/// `Error::InvalidArgument`.
pub(crate) fn split_claim(input: &str) -> Result<(&str, &str, &str)> {
    let mut fields = input.splitn(3, ':');
    let head = fields.next().ok_or(Error::InvalidArgument)?;
    let kind = fields.next().ok_or(Error::InvalidArgument)?;
    let payload = fields.next().ok_or(Error::InvalidArgument)?;
    Ok((head, kind, payload))
}

/// Parse the amount field of a claim code, consuming the leading sigil.
///
/// The first character is expected to be `e`; any other character is
/// still consumed, with the result flagged noncanonical.
pub(crate) fn parse_amount_field(field: &str) -> Result<Parsed<Amount>> {
    let (rest, missing_sigil) = match field.strip_prefix('e') {
        Some(rest) => (rest, false),
        None => {
            let mut chars = field.chars();
            if chars.next().is_none() {
                return Err(Error::InvalidArgument);
            }
            (chars.as_str(), true)
        }
    };
    let amount = Amount::parse(rest)?;
    Ok(Parsed {
        value: amount.value,
        noncanonical: amount.noncanonical || missing_sigil,
    })
}

/// A claim code of either kind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimCode {
    /// A secret claim code: amount plus serial preimage.
    Secret(Secret),
    /// A public claim code: amount plus serial hash.
    Public(Public),
}

impl ClaimCode {
    /// Parse a claim code of either kind, dispatching on the kind field.
    pub fn parse(input: &str) -> Result<Parsed<Self>> {
        let (_, kind, _) = split_claim(input)?;
        match kind {
            KIND_SECRET => {
                let parsed = Secret::parse_claim(input)?;
                Ok(Parsed {
                    value: Self::Secret(parsed.value),
                    noncanonical: parsed.noncanonical,
                })
            }
            KIND_PUBLIC => {
                let parsed = Public::parse_claim(input)?;
                Ok(Parsed {
                    value: Self::Public(parsed.value),
                    noncanonical: parsed.noncanonical,
                })
            }
            _ => Err(Error::InvalidArgument),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_payload_colons() {
        let (head, kind, payload) = split_claim("e1:secret:a:b").unwrap();
        assert_eq!(head, "e1");
        assert_eq!(kind, "secret");
        assert_eq!(payload, "a:b");
    }

    #[test]
    fn split_requires_two_colons() {
        assert_eq!(split_claim("e1"), Err(Error::InvalidArgument));
        assert_eq!(split_claim("e1:secret"), Err(Error::InvalidArgument));
        assert_eq!(split_claim(""), Err(Error::InvalidArgument));
    }

    #[test]
    fn sigil_handling() {
        let parsed = parse_amount_field("e1.1").unwrap();
        assert_eq!(parsed.value.units(), 110_000_000);
        assert!(!parsed.noncanonical);

        let parsed = parse_amount_field("x1.1").unwrap();
        assert_eq!(parsed.value.units(), 110_000_000);
        assert!(parsed.noncanonical);

        // A multi-byte first character is consumed, not split.
        let parsed = parse_amount_field("€1").unwrap();
        assert!(parsed.noncanonical);

        assert_eq!(parse_amount_field(""), Err(Error::InvalidArgument));
        assert_eq!(parse_amount_field("e"), Err(Error::InvalidArgument));
    }

    #[test]
    fn dispatch_on_kind() {
        let parsed = ClaimCode::parse("e1:secret:abc").unwrap();
        assert!(matches!(parsed.value, ClaimCode::Secret(_)));

        let parsed = ClaimCode::parse(
            "e1:public:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        )
        .unwrap();
        assert!(matches!(parsed.value, ClaimCode::Public(_)));

        assert_eq!(
            ClaimCode::parse("e1:voucher:abc"),
            Err(Error::InvalidArgument)
        );
    }
}
