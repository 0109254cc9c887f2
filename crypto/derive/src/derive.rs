// Copyright (c) 2024 The Webcash Developers

//! Deterministic serial derivation.
//!
//! A serial is the lowercase hex digest of the tagged hash of a 48-byte
//! payload, `root || be64(chaincode) || be64(depth)`. Payload plus
//! padding fit one compression block, so each serial costs exactly one
//! compression from the shared tagged midstate. Bulk derivation prepares
//! up to eight blocks per pass; the first pass is sized so every later
//! pass is a full eight lanes.

use zeroize::Zeroize;

use crate::midstate::{compress_block, state_to_digest, tagged_midstate, Sha256Midstate};

/// Hex characters per derived serial.
pub const SERIAL_HEX_LEN: usize = 64;

/// Lanes prepared per bulk-derivation pass.
const LANES: usize = 8;

/// Bytes of derivation payload in the terminal block.
const PAYLOAD_LEN: usize = 48;

/// Build the padded terminal block for one serial.
fn payload_block(
    midstate: &Sha256Midstate,
    root: &[u8; 32],
    chaincode: u64,
    depth: u64,
) -> [u8; 64] {
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(root);
    block[32..40].copy_from_slice(&chaincode.to_be_bytes());
    block[40..48].copy_from_slice(&depth.to_be_bytes());
    block[PAYLOAD_LEN] = 0x80;
    let bit_len = (midstate.bytes + PAYLOAD_LEN as u64) * 8;
    block[56..].copy_from_slice(&bit_len.to_be_bytes());
    block
}

/// Derive the serial for `(root, chaincode, depth)`.
///
/// Returns 64 lowercase hex characters.
pub fn derive_serial(root: &[u8; 32], chaincode: u64, depth: u64) -> String {
    let midstate = tagged_midstate();
    let mut block = payload_block(midstate, root, chaincode, depth);
    let mut state = midstate.state;
    compress_block(&mut state, &block);
    block.zeroize();
    hex::encode(state_to_digest(&state))
}

/// Derive `count` consecutive serials starting at `depth`.
///
/// Writes exactly `count * 64` hex bytes into `out`, in ascending depth
/// order; a count of zero writes nothing. This function cannot fail.
///
/// # Panics
///
/// Panics if `out` is not exactly `count * 64` bytes.
pub fn derive_serials_into(
    out: &mut [u8],
    root: &[u8; 32],
    chaincode: u64,
    depth: u64,
    count: usize,
) {
    assert_eq!(
        out.len(),
        count * SERIAL_HEX_LEN,
        "output buffer must hold exactly count * 64 hex bytes"
    );
    if count == 0 {
        return;
    }
    let midstate = tagged_midstate();

    // Size the first pass so the remaining count is a multiple of eight.
    let mut lanes = (count - 1) % LANES + 1;
    let mut next_depth = depth;
    let mut written = 0usize;
    let mut blocks = [[0u8; 64]; LANES];

    while written < count {
        for (lane, block) in blocks.iter_mut().enumerate().take(lanes) {
            *block = payload_block(
                midstate,
                root,
                chaincode,
                next_depth.wrapping_add(lane as u64),
            );
        }
        for (lane, block) in blocks.iter().enumerate().take(lanes) {
            let mut state = midstate.state;
            compress_block(&mut state, block);
            let offset = (written + lane) * SERIAL_HEX_LEN;
            hex::encode_to_slice(
                state_to_digest(&state),
                &mut out[offset..offset + SERIAL_HEX_LEN],
            )
            .expect("destination slice is sized for the digest");
        }
        next_depth = next_depth.wrapping_add(lanes as u64);
        written += lanes;
        lanes = LANES;
    }

    // The prepared blocks carry the caller's root material.
    for block in &mut blocks {
        block.zeroize();
    }
}

/// Derive `count` consecutive serials into a fresh buffer.
pub fn derive_serials(root: &[u8; 32], chaincode: u64, depth: u64, count: usize) -> Vec<u8> {
    let mut out = vec![0u8; count * SERIAL_HEX_LEN];
    derive_serials_into(&mut out, root, chaincode, depth, count);
    out
}
