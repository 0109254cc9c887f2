// Copyright (c) 2024 The Webcash Developers

//! Public webcash: the hash-only form safe to show a server.
//!
//! A public pairs an amount with the SHA-256 hash of a serial. It
//! identifies a webcash unit without granting control of it, so it
//! carries no scrubbing obligations.

use alloc::format;
use alloc::string::String;

use sha2::{Digest, Sha256};

use crate::claim::{parse_amount_field, split_claim, KIND_PUBLIC};
use crate::{Amount, Error, Parsed, Result, Secret};

/// Length of the hex-encoded hash payload in a public claim code.
const HASH_HEX_LEN: usize = 64;

/// A webcash amount and the SHA-256 hash of its serial.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Public {
    amount: Amount,
    hash: [u8; 32],
}

impl Public {
    /// Construct a public from an amount and serial hash.
    pub const fn new(amount: Amount, hash: [u8; 32]) -> Self {
        Self { amount, hash }
    }

    /// Derive the public form of `secret` by hashing its serial.
    pub fn from_secret(secret: &Secret) -> Self {
        Self {
            amount: secret.amount(),
            hash: Sha256::digest(secret.serial().as_bytes()).into(),
        }
    }

    /// The amount of the webcash unit.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The SHA-256 hash of the serial.
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Check the public's invariant: a strictly positive amount.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Whether [`Public::validate`] would succeed.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Serialize as a public claim code,
    /// `e<amount>:public:<64 lowercase hex>`.
    pub fn to_claim_string(&self) -> Result<String> {
        if !self.amount.is_positive() {
            return Err(Error::InvalidArgument);
        }
        Ok(format!("e{}:public:{}", self.amount, hex::encode(self.hash)))
    }

    /// Parse a public claim code.
    ///
    /// The payload after the second colon must be exactly 64 hex digits.
    /// Uppercase digits are accepted and flagged noncanonical, as are a
    /// missing `e` sigil and noncanonical amount spellings.
    pub fn parse_claim(input: &str) -> Result<Parsed<Self>> {
        let (head, kind, payload) = split_claim(input)?;
        if kind != KIND_PUBLIC {
            return Err(Error::InvalidArgument);
        }
        let amount = parse_amount_field(head)?;
        if payload.len() != HASH_HEX_LEN {
            return Err(Error::InvalidArgument);
        }
        let mut hash = [0u8; 32];
        hex::decode_to_slice(payload, &mut hash).map_err(|_| Error::InvalidArgument)?;
        let uppercase = payload.bytes().any(|b| b.is_ascii_uppercase());
        Ok(Parsed {
            value: Self::new(amount.value, hash),
            noncanonical: amount.noncanonical || uppercase,
        })
    }
}

impl From<&Secret> for Public {
    fn from(secret: &Secret) -> Self {
        Self::from_secret(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// sha256(b"abc")
    const ABC_HASH: [u8; 32] = [
        0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
        0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
        0xf2, 0x00, 0x15, 0xad,
    ];

    #[test]
    fn default_is_zeroed() {
        let public = Public::default();
        assert_eq!(public.amount(), Amount::ZERO);
        assert_eq!(public.hash(), &[0u8; 32]);
        assert!(!public.is_valid());
    }

    #[test]
    fn from_secret_hashes_the_serial() {
        let secret = Secret::from_serial(Amount::from_units(1), "abc");
        let public = Public::from_secret(&secret);
        assert_eq!(public.amount().units(), 1);
        assert_eq!(public.hash(), &ABC_HASH);
        assert_eq!(Public::from(&secret), public);
    }

    #[test]
    fn validity_requires_a_positive_amount() {
        assert!(!Public::new(Amount::ZERO, ABC_HASH).is_valid());
        assert!(!Public::new(Amount::from_units(-1), ABC_HASH).is_valid());
        assert!(Public::new(Amount::from_units(1), ABC_HASH).is_valid());
    }

    #[test]
    fn claim_string_vector() {
        let public = Public::new(Amount::from_units(1_234_567_800), ABC_HASH);
        assert_eq!(
            public.to_claim_string().unwrap(),
            "e12.345678:public:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            Public::new(Amount::ZERO, ABC_HASH).to_claim_string(),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn smallest_unit_claim_string() {
        let secret = Secret::from_serial(Amount::from_units(1), "abc");
        let claim = Public::from_secret(&secret).to_claim_string().unwrap();
        assert_eq!(
            claim,
            "e0.00000001:public:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn claim_round_trip() {
        let public = Public::new(Amount::from_units(1_234_567_800), ABC_HASH);
        let claim = public.to_claim_string().unwrap();
        let parsed = Public::parse_claim(&claim).unwrap();
        assert_eq!(parsed.value, public);
        assert!(!parsed.noncanonical);
    }

    #[test]
    fn uppercase_hex_is_noncanonical() {
        let parsed = Public::parse_claim(
            "e12.345678:public:BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD",
        )
        .unwrap();
        assert_eq!(parsed.value.hash(), &ABC_HASH);
        assert!(parsed.noncanonical);
    }

    #[test]
    fn malformed_claims_are_rejected() {
        // Payload too short, too long, or not hex at all.
        assert_eq!(
            Public::parse_claim("e1:public:ba7816"),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            Public::parse_claim(
                "e1:public:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad00"
            ),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            Public::parse_claim(
                "e1:public:zz7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
            ),
            Err(Error::InvalidArgument)
        );
        // Wrong kind field.
        assert_eq!(
            Public::parse_claim(
                "e1:secret:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
            ),
            Err(Error::InvalidArgument)
        );
    }

    proptest::proptest! {
        /// Every valid public survives a claim-code round trip, and the
        /// canonical wire form parses as canonical.
        #[test]
        fn claim_round_trips_for_valid_publics(
            units in 1..=i64::MAX,
            hash in proptest::prelude::any::<[u8; 32]>(),
        ) {
            let public = Public::new(Amount::from_units(units), hash);
            let claim = public.to_claim_string().unwrap();
            let parsed = Public::parse_claim(&claim).unwrap();
            proptest::prop_assert_eq!(parsed.value, public);
            proptest::prop_assert!(!parsed.noncanonical);
        }
    }
}
