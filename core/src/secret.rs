// Copyright (c) 2024 The Webcash Developers

//! Webcash secrets: the hash preimages that protect value.
//!
//! A secret pairs an amount with its serial, the unicode string whose
//! SHA-256 hash the server keeps. Anyone who can present the serial can
//! spend the amount, so serial bytes are scrubbed from memory when a
//! secret is dropped.

use alloc::format;
use alloc::string::String;
use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::claim::{parse_amount_field, split_claim, KIND_SECRET};
use crate::{Amount, Error, Parsed, Result};

/// Serial capacity preallocated for freshly created secrets.
const SERIAL_PREALLOC: usize = 64;

/// A webcash secret and the amount it protects.
#[derive(Clone, Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    amount: Amount,
    serial: String,
}

impl Default for Secret {
    fn default() -> Self {
        Self::new()
    }
}

impl Secret {
    /// Create a zero-amount secret with an empty, preallocated serial.
    pub fn new() -> Self {
        Self {
            amount: Amount::ZERO,
            serial: String::with_capacity(SERIAL_PREALLOC),
        }
    }

    /// Create a secret by copying `serial`.
    pub fn from_serial(amount: Amount, serial: &str) -> Self {
        Self {
            amount,
            serial: String::from(serial),
        }
    }

    /// Create a secret by taking ownership of `serial`.
    pub fn from_serial_owned(amount: Amount, serial: String) -> Self {
        Self { amount, serial }
    }

    /// The amount this secret protects.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The serial, the preimage of the server-side hash.
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Check the secret's invariants.
    ///
    /// A usable secret has a strictly positive amount and a nonempty
    /// serial free of NUL bytes; anything else is `Error::InvalidArgument`.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(Error::InvalidArgument);
        }
        if self.serial.is_empty() || self.serial.bytes().any(|b| b == 0) {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Whether [`Secret::validate`] would succeed.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Serialize as a secret claim code, `e<amount>:secret:<serial>`.
    ///
    /// Requires a positive amount and a nonempty serial.
    pub fn to_claim_string(&self) -> Result<String> {
        if !self.amount.is_positive() || self.serial.is_empty() {
            return Err(Error::InvalidArgument);
        }
        Ok(format!("e{}:secret:{}", self.amount, self.serial))
    }

    /// Parse a secret claim code.
    ///
    /// The serial is everything after the second colon and may be empty;
    /// claim parsing does not enforce [`Secret::validate`], which remains
    /// a separate check. A leading character other than `e` and any
    /// noncanonical amount spelling are accepted and flagged.
    pub fn parse_claim(input: &str) -> Result<Parsed<Self>> {
        let (head, kind, serial) = split_claim(input)?;
        if kind != KIND_SECRET {
            return Err(Error::InvalidArgument);
        }
        let amount = parse_amount_field(head)?;
        Ok(Parsed {
            value: Self::from_serial(amount.value, serial),
            noncanonical: amount.noncanonical,
        })
    }
}

/// Serial bytes never appear in debug output.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("amount", &self.amount)
            .field("serial", &"<redacted>")
            .finish()
    }
}
