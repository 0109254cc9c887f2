// Copyright (c) 2024 The Webcash Developers

//! The 8-way mining finalizer.
//!
//! Mining hashes one candidate submission per nonce, but every candidate
//! shares a long absorbed prefix and differs only in twelve trailing
//! bytes. Given the shared midstate, the finalizer completes eight such
//! hashes in one call: each lane's terminal block is the twelve bytes of
//! `nonce1 || nonce2[lane] || tail` plus SHA-256 padding.

use crate::midstate::{compress_block, state_to_digest, Sha256Midstate};

/// Number of hashes completed per finalizer call.
pub const MINING_LANES: usize = 8;

/// Trailing bytes appended to the absorbed prefix per lane.
const TAIL_LEN: u64 = 12;

/// Complete eight SHA-256 hashes from a shared midstate.
///
/// Each lane's digest is bit-identical to a scalar SHA-256 over the
/// absorbed prefix followed by `nonce1 || nonce2[lane] || tail`. The
/// midstate must hold no buffered partial input; its byte count is a
/// multiple of 64.
pub fn mining_8way(
    hashes: &mut [[u8; 32]; MINING_LANES],
    midstate: &Sha256Midstate,
    nonce1: &[u8; 4],
    nonce2: &[[u8; 4]; MINING_LANES],
    tail: &[u8; 4],
) {
    debug_assert_eq!(midstate.bytes % 64, 0, "midstate must be block aligned");
    let mut block = [0u8; 64];
    block[..4].copy_from_slice(nonce1);
    block[8..12].copy_from_slice(tail);
    block[12] = 0x80;
    let bit_len = (midstate.bytes + TAIL_LEN) * 8;
    block[56..].copy_from_slice(&bit_len.to_be_bytes());

    for (lane, digest) in hashes.iter_mut().enumerate() {
        block[4..8].copy_from_slice(&nonce2[lane]);
        let mut state = midstate.state;
        compress_block(&mut state, &block);
        *digest = state_to_digest(&state);
    }
}
