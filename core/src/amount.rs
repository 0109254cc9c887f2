// Copyright (c) 2024 The Webcash Developers

//! The canonical webcash amount codec.
//!
//! Amounts are signed fixed-point values at 10⁻⁸ precision, stored as a
//! scaled 64-bit integer. The textual form is a plain decimal number with
//! up to eight fractional digits; the formatter produces exactly one
//! canonical spelling per value, and the parser reports whether its input
//! matched that spelling.

use core::fmt;
use core::str::FromStr;

use zeroize::Zeroize;

use crate::{Error, Result};

/// Scale factor between whole webcash and its smallest representable unit.
pub const AMOUNT_SCALE: i64 = 100_000_000;

/// Maximum number of significant fractional digits.
const FRAC_DIGITS: usize = 8;

/// A webcash value, in units of 10⁻⁸ webcash.
///
/// The representable range is exactly that of `i64`. The most negative
/// value has the single canonical spelling `-92233720368.54775808`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Zeroize)]
pub struct Amount(i64);

/// A successfully parsed value together with its canonicality flag.
///
/// `noncanonical` is set when the input was understood but is not the
/// spelling the formatter would produce. It is a distinction, not an
/// error: callers tolerate legacy encodings or reject them uniformly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Parsed<T> {
    /// The parsed value.
    pub value: T,
    /// Whether the input deviated from the canonical encoding.
    pub noncanonical: bool,
}

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Construct an amount from a count of 10⁻⁸ webcash units.
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// The amount as a count of 10⁻⁸ webcash units.
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly positive.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition, `None` on overflow.
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Checked subtraction, `None` on overflow.
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Parse a decimal amount string.
    ///
    /// Accepts an optional minus sign, a whole part, and up to eight
    /// fractional digits; further digits are tolerated only if zero.
    /// Deviations the formatter would not produce (leading zeros, a bare
    /// trailing point, trailing fractional zeros, negative zero) parse
    /// successfully with the noncanonical flag set. Anything else is
    /// `Error::InvalidArgument`, and values outside the 64-bit range are
    /// `Error::Overflow`.
    pub fn parse(input: &str) -> Result<Parsed<Self>> {
        Self::parse_impl(input, false)
    }

    /// Parse a decimal amount that may be wrapped in double quotes.
    ///
    /// Amounts arriving inside JSON documents are sometimes spelled as
    /// strings; symmetric surrounding quotes are accepted here and mark
    /// the result noncanonical. All other rules match [`Amount::parse`].
    pub fn parse_quoted(input: &str) -> Result<Parsed<Self>> {
        Self::parse_impl(input, true)
    }

    fn parse_impl(input: &str, allow_quotes: bool) -> Result<Parsed<Self>> {
        let mut bytes = input.as_bytes();
        let mut noncanonical = false;

        if allow_quotes && bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
            bytes = &bytes[1..bytes.len() - 1];
            noncanonical = true;
        }

        let negative = match bytes.first() {
            Some(b'-') => {
                bytes = &bytes[1..];
                true
            }
            _ => false,
        };

        let (whole, frac) = match bytes.iter().position(|&b| b == b'.') {
            Some(point) => (&bytes[..point], Some(&bytes[point + 1..])),
            None => (bytes, None),
        };

        if whole.is_empty() || whole.iter().any(|b| !b.is_ascii_digit()) {
            return Err(Error::InvalidArgument);
        }
        if whole[0] == b'0' && whole.len() > 1 {
            noncanonical = true;
        }

        let mut magnitude: u64 = 0;
        for &digit in whole {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u64::from(digit - b'0')))
                .ok_or(Error::Overflow)?;
        }
        magnitude = magnitude
            .checked_mul(AMOUNT_SCALE as u64)
            .ok_or(Error::Overflow)?;

        if let Some(frac) = frac {
            if frac.iter().any(|b| !b.is_ascii_digit()) {
                return Err(Error::InvalidArgument);
            }
            let mut scaled: u64 = 0;
            for (index, &digit) in frac.iter().enumerate() {
                if index < FRAC_DIGITS {
                    scaled = scaled * 10 + u64::from(digit - b'0');
                } else if digit != b'0' {
                    // A ninth significant fractional digit cannot be
                    // represented at this scale.
                    return Err(Error::InvalidArgument);
                }
            }
            for _ in frac.len()..FRAC_DIGITS {
                scaled *= 10;
            }
            magnitude = magnitude.checked_add(scaled).ok_or(Error::Overflow)?;
            // A canonical fractional part is nonempty and ends in a
            // nonzero digit; an all-zero tail adds nothing.
            match frac.last() {
                None | Some(b'0') => noncanonical = true,
                Some(_) => {}
            }
        }

        let limit = (i64::MAX as u64) + u64::from(negative);
        if magnitude > limit {
            return Err(Error::Overflow);
        }
        if negative && magnitude == 0 {
            noncanonical = true;
        }

        let units = if negative {
            (magnitude as i64).wrapping_neg()
        } else {
            magnitude as i64
        };
        Ok(Parsed {
            value: Self(units),
            noncanonical,
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // unsigned_abs keeps the most negative value in range.
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / AMOUNT_SCALE as u64;
        let frac = magnitude % AMOUNT_SCALE as u64;
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}", whole)?;
        if frac != 0 {
            let mut digits = alloc::format!("{:08}", frac);
            while digits.ends_with('0') {
                digits.pop();
            }
            write!(f, ".{}", digits)?;
        }
        Ok(())
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Ok(Self::parse(input)?.value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        use alloc::string::ToString;
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct AmountVisitor;

        impl serde::de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal webcash amount string")
            }

            fn visit_str<E: serde::de::Error>(self, input: &str) -> core::result::Result<Amount, E> {
                Amount::parse(input)
                    .map(|parsed| parsed.value)
                    .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(input), &self))
            }
        }

        deserializer.deserialize_str(AmountVisitor)
    }
}
