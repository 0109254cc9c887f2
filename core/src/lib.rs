// Copyright (c) 2024 The Webcash Developers

#![no_std]
#![warn(missing_docs)]
#![deny(unsafe_code)]

//! Core value and claim-code types for the webcash digital cash scheme.
//!
//! Webcash value lives in unicode serial strings. The server stores only
//! the SHA-256 hash of each serial; whoever can present the preimage
//! controls the amount it protects. This crate defines the canonical
//! fixed-point amount codec, the secret and public claim-code forms, and
//! the library-wide error type.

extern crate alloc;

#[cfg(test)]
extern crate std;

mod amount;
mod claim;
mod error;
mod public;
mod secret;

pub use crate::{
    amount::{Amount, Parsed, AMOUNT_SCALE},
    claim::ClaimCode,
    error::{Error, Result},
    public::Public,
    secret::Secret,
};
