//! Deterministic stand-in for the zk prover.
//!
//! A proof is a keccak commitment to the roots and values it proves, so it
//! verifies exactly when the runtime still holds the same root at the
//! referenced root index and the instruction proves the same values.

use light_address::Keccak;
use light_address_client::indexer::CompressedProof;

const DOMAIN: &[u8] = b"light-address-program-test-proof";

/// `inclusion` holds `(root, leaf)` pairs, `non_inclusion` holds
/// `(root, address)` pairs, both in request order.
pub fn prove(
    inclusion: &[([u8; 32], [u8; 32])],
    non_inclusion: &[([u8; 32], [u8; 32])],
) -> CompressedProof {
    let mut inputs: Vec<&[u8]> = vec![DOMAIN];
    let num_inclusion = (inclusion.len() as u32).to_le_bytes();
    inputs.push(&num_inclusion);
    for (root, value) in inclusion.iter().chain(non_inclusion) {
        inputs.push(root);
        inputs.push(value);
    }
    let digest = Keccak::hashv(&inputs);

    let mut b = [0u8; 64];
    b[..32].copy_from_slice(&Keccak::hashv(&[&digest, b"b0"]));
    b[32..].copy_from_slice(&Keccak::hashv(&[&digest, b"b1"]));
    CompressedProof {
        a: Keccak::hashv(&[&digest, b"a"]),
        b,
        c: Keccak::hashv(&[&digest, b"c"]),
    }
}

pub fn verify(
    proof: &CompressedProof,
    inclusion: &[([u8; 32], [u8; 32])],
    non_inclusion: &[([u8; 32], [u8; 32])],
) -> bool {
    prove(inclusion, non_inclusion) == *proof
}
