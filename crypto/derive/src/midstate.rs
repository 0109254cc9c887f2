// Copyright (c) 2024 The Webcash Developers

//! The process-wide tagged SHA-256 midstate.
//!
//! Serial derivation domain-separates its hashes BIP340-style: the
//! message is prefixed with two copies of `SHA256(tag)`. The two copies
//! fill exactly one compression block, so the prefix is absorbed once per
//! process and the resulting state shared read-only across threads.

use std::sync::LazyLock;

use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha256};

/// Domain-separation tag for wallet serial derivation.
pub const DERIVATION_TAG: &[u8] = b"webcashwalletv1";

/// SHA-256 initial hash values (FIPS 180-4, section 5.3.3).
const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
    0x5be0cd19,
];

/// A SHA-256 compression state and the number of bytes absorbed into it.
///
/// A midstate never carries buffered partial input: the byte count is
/// always a multiple of 64, the compression block size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sha256Midstate {
    /// The eight 32-bit words of compression state.
    pub state: [u32; 8],
    /// Bytes absorbed so far.
    pub bytes: u64,
}

impl Sha256Midstate {
    /// The initial SHA-256 state, nothing absorbed.
    pub const INIT: Self = Self {
        state: SHA256_IV,
        bytes: 0,
    };
}

static TAGGED_MIDSTATE: LazyLock<Sha256Midstate> = LazyLock::new(|| {
    let tag_hash = Sha256::digest(DERIVATION_TAG);
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(&tag_hash);
    block[32..].copy_from_slice(&tag_hash);
    let mut state = SHA256_IV;
    compress_block(&mut state, &block);
    Sha256Midstate { state, bytes: 64 }
});

/// The tagged derivation midstate, computed on first use.
pub fn tagged_midstate() -> &'static Sha256Midstate {
    &TAGGED_MIDSTATE
}

/// Force computation of the tagged midstate.
///
/// Idempotent and safe to call from any thread. Derivation initializes
/// lazily regardless; calling this merely front-loads the one-time cost.
pub fn init() {
    LazyLock::force(&TAGGED_MIDSTATE);
}

/// Run one SHA-256 compression over a single 64-byte block.
pub(crate) fn compress_block(state: &mut [u32; 8], block: &[u8; 64]) {
    sha2::compress256(state, core::slice::from_ref(GenericArray::from_slice(block)));
}

/// Serialize a compression state as a big-endian 32-byte digest.
pub(crate) fn state_to_digest(state: &[u32; 8]) -> [u8; 32] {
    let mut digest = [0u8; 32];
    for (chunk, word) in digest.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hashing one manually padded block must agree with the sha2 crate.
    #[test]
    fn compress_block_matches_sha2() {
        let mut block = [0u8; 64];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[56..].copy_from_slice(&(24u64).to_be_bytes());
        let mut state = SHA256_IV;
        compress_block(&mut state, &block);
        let expected: [u8; 32] = Sha256::digest(b"abc").into();
        assert_eq!(state_to_digest(&state), expected);
    }

    #[test]
    fn tagged_midstate_absorbs_one_block() {
        init();
        init();
        let midstate = tagged_midstate();
        assert_eq!(midstate.bytes, 64);
        assert_ne!(midstate.state, SHA256_IV);
    }

    #[test]
    fn tagged_midstate_is_the_double_tag_prefix() {
        let tag_hash = Sha256::digest(DERIVATION_TAG);
        let mut block = [0u8; 64];
        block[..32].copy_from_slice(&tag_hash);
        block[32..].copy_from_slice(&tag_hash);
        let mut state = SHA256_IV;
        compress_block(&mut state, &block);
        assert_eq!(state, tagged_midstate().state);
    }

    #[test]
    fn init_state_matches_empty_hash() {
        // Padding an empty message through INIT reproduces sha256("").
        let mut block = [0u8; 64];
        block[0] = 0x80;
        let mut state = Sha256Midstate::INIT.state;
        compress_block(&mut state, &block);
        let expected: [u8; 32] = Sha256::digest(b"").into();
        assert_eq!(state_to_digest(&state), expected);
    }
}
