//! Regression tests for address derivation.
//!
//! The on-chain verifier derives the same address from the instruction inputs,
//! any change to these values is a breaking change.

use std::collections::HashSet;

use light_address::{v1, AddressSeed};
use rand::{rngs::StdRng, Rng, SeedableRng};
use solana_pubkey::Pubkey;

const PROGRAM_ID: [u8; 32] = [
    100, 107, 175, 177, 40, 13, 216, 39, 157, 127, 44, 88, 81, 65, 139, 243, 208, 214, 99, 121, 7,
    157, 114, 42, 73, 26, 197, 102, 50, 36, 40, 122,
];

const FOO_BAR_SEED: [u8; 32] = [
    0, 144, 35, 68, 111, 204, 23, 151, 120, 31, 223, 158, 197, 136, 5, 247, 175, 29, 75, 0, 98,
    141, 6, 70, 59, 251, 227, 126, 157, 101, 113, 15,
];

#[test]
fn test_v1_derive_address_seed_single() {
    let address_seed = v1::derive_address_seed(&[b"counter"], &PROGRAM_ID).unwrap();

    let expected_seed: [u8; 32] = [
        0, 245, 19, 201, 93, 115, 34, 4, 40, 137, 210, 14, 49, 244, 116, 217, 75, 141, 75, 174, 91,
        204, 52, 232, 23, 205, 206, 11, 156, 153, 138, 2,
    ];

    assert_eq!(address_seed, AddressSeed::from(expected_seed));
}

#[test]
fn test_v1_derive_address_seed_multiple() {
    let address_seed = v1::derive_address_seed(&[b"foo", b"bar"], &PROGRAM_ID).unwrap();
    assert_eq!(address_seed, AddressSeed::from(FOO_BAR_SEED));
}

#[test]
fn test_v1_derive_address() {
    let address_tree_pubkey = [0u8; 32];

    let (address, address_seed) =
        v1::derive_address(&[b"foo", b"bar"], &address_tree_pubkey, &PROGRAM_ID).unwrap();

    let expected_address: [u8; 32] = [
        0, 76, 248, 62, 238, 197, 1, 141, 147, 231, 141, 73, 114, 55, 148, 180, 248, 40, 93, 185,
        22, 21, 249, 166, 123, 52, 176, 211, 176, 181, 40, 137,
    ];

    assert_eq!(address_seed, AddressSeed::from(FOO_BAR_SEED));
    assert_eq!(address, expected_address);
    assert_eq!(
        v1::derive_address_from_seed(&address_seed, &address_tree_pubkey),
        expected_address
    );
}

#[test]
fn test_v1_derive_address_nonzero_tree() {
    let address_tree_pubkey = [1u8; 32];

    let (address, address_seed) =
        v1::derive_address(&[b"foo", b"bar"], &address_tree_pubkey, &PROGRAM_ID).unwrap();

    let expected_address: [u8; 32] = [
        0, 255, 198, 80, 93, 192, 235, 41, 155, 22, 132, 77, 249, 213, 151, 62, 5, 48, 131, 228,
        84, 7, 246, 208, 228, 186, 166, 253, 226, 207, 140, 63,
    ];

    assert_eq!(
        address_seed,
        AddressSeed::from(FOO_BAR_SEED),
        "Seed should be independent of address tree"
    );
    assert_eq!(address, expected_address);
}

#[test]
fn test_derivation_is_deterministic() {
    let signer = Pubkey::new_unique();
    let address_tree = Pubkey::new_unique();
    let seeds: &[&[u8]] = &[b"counter", signer.as_ref()];

    let first = v1::derive_address(seeds, &address_tree.to_bytes(), &PROGRAM_ID).unwrap();
    for _ in 0..100 {
        assert_eq!(
            v1::derive_address(seeds, &address_tree.to_bytes(), &PROGRAM_ID).unwrap(),
            first
        );
    }
}

#[test]
fn test_random_seed_sets_do_not_collide() {
    let mut rng = StdRng::seed_from_u64(0);
    let address_tree = [7u8; 32];
    let mut seen_seeds = HashSet::new();
    let mut seen_addresses = HashSet::new();

    for i in 0..10_000u32 {
        let num_seeds = rng.gen_range(1..=4);
        let seeds = (0..num_seeds)
            .map(|_| {
                let len = rng.gen_range(0..=40);
                (0..len).map(|_| rng.gen()).collect::<Vec<u8>>()
            })
            .collect::<Vec<_>>();
        // The counter makes every seed set distinct even if the random parts repeat.
        let counter = i.to_le_bytes();
        let mut seed_refs = seeds.iter().map(|x| x.as_slice()).collect::<Vec<_>>();
        seed_refs.push(counter.as_slice());

        let (address, address_seed) =
            v1::derive_address(&seed_refs, &address_tree, &PROGRAM_ID).unwrap();
        assert_eq!(address[0], 0);
        assert!(seen_seeds.insert(address_seed), "seed collision at {}", i);
        assert!(seen_addresses.insert(address), "address collision at {}", i);
    }
}
