// Copyright (c) 2024 The Webcash Developers

#![warn(missing_docs)]
#![deny(unsafe_code)]

//! Deterministic serial derivation and mining primitives for webcash.
//!
//! Wallets derive their serials from a 32-byte root by hashing, under a
//! tagged SHA-256 midstate, an index made of a chaincode and a depth.
//! Mining completes large numbers of near-identical hashes whose inputs
//! differ only in a short trailing nonce region. Both workloads reduce to
//! single SHA-256 compression calls from precomputed midstates; this
//! crate holds those hot inner primitives and the precomputed nonce
//! tables the mining loop splices into its submissions.

mod derive;
mod midstate;
mod mining;
mod nonces;

pub use crate::{
    derive::{derive_serial, derive_serials, derive_serials_into, SERIAL_HEX_LEN},
    midstate::{init, tagged_midstate, Sha256Midstate, DERIVATION_TAG},
    mining::{mining_8way, MINING_LANES},
    nonces::{MINING_FINAL, MINING_NONCES},
};
