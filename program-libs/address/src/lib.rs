pub mod errors;
pub mod hash_to_field_size;
pub mod keccak;

pub use errors::AddressError;
pub use keccak::Keccak;

pub const HASH_BYTES: usize = 32;

pub type Hash = [u8; HASH_BYTES];

pub type CompressedAddress = [u8; 32];

/// Maximum number of seeds. The on-chain verifier hashes at most 16 inputs,
/// the first of which is the program id.
pub const MAX_SEEDS: usize = 15;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct AddressSeed(pub [u8; 32]);

impl From<[u8; 32]> for AddressSeed {
    fn from(value: [u8; 32]) -> Self {
        AddressSeed(value)
    }
}

impl From<AddressSeed> for [u8; 32] {
    fn from(address_seed: AddressSeed) -> Self {
        address_seed.0
    }
}

impl AsRef<[u8]> for AddressSeed {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

pub mod v1 {
    use super::{AddressError, AddressSeed, CompressedAddress, MAX_SEEDS};
    use crate::hash_to_field_size::{
        hashv_to_bn254_field_size_be, hashv_to_bn254_field_size_be_legacy,
    };

    /// Derives a single address seed for a compressed account, based on the
    /// provided multiple `seeds` and `program_id`.
    ///
    /// The program id is hashed first so that two programs using identical
    /// literal seeds never share an address seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use light_address::v1::derive_address_seed;
    ///
    /// let program_id = [1u8; 32];
    /// let seed = derive_address_seed(&[b"counter", &[2u8; 32]], &program_id).unwrap();
    /// assert_eq!(seed.0[0], 0);
    /// ```
    pub fn derive_address_seed(
        seeds: &[&[u8]],
        program_id: &[u8; 32],
    ) -> Result<AddressSeed, AddressError> {
        if seeds.is_empty() {
            return Err(AddressError::EmptySeeds);
        }
        if seeds.len() > MAX_SEEDS {
            return Err(AddressError::TooManySeeds {
                max: MAX_SEEDS,
                actual: seeds.len(),
            });
        }
        let mut inputs: [&[u8]; MAX_SEEDS + 1] = [&[]; MAX_SEEDS + 1];

        inputs[0] = program_id.as_slice();

        for (i, seed) in seeds.iter().enumerate() {
            inputs[i + 1] = seed;
        }

        Ok(AddressSeed(hashv_to_bn254_field_size_be_legacy(
            inputs.as_slice(),
        )))
    }

    /// Derives an address for a compressed account, based on the provided singular
    /// `seed` and `address_tree_pubkey`.
    pub fn derive_address_from_seed(
        address_seed: &AddressSeed,
        address_tree_pubkey: &[u8; 32],
    ) -> CompressedAddress {
        let input = [address_tree_pubkey.as_slice(), address_seed.0.as_slice()];
        hashv_to_bn254_field_size_be(input.as_slice())
    }

    /// Derives an address from provided seeds. Returns that address and a singular
    /// seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use light_address::v1::derive_address;
    ///
    /// let address_tree = [3u8; 32];
    /// let program_id = [1u8; 32];
    /// let (address, address_seed) =
    ///     derive_address(&[b"my_compressed_account"], &address_tree, &program_id).unwrap();
    /// assert_ne!(address, address_seed.0);
    /// ```
    pub fn derive_address(
        seeds: &[&[u8]],
        address_tree_pubkey: &[u8; 32],
        program_id: &[u8; 32],
    ) -> Result<(CompressedAddress, AddressSeed), AddressError> {
        let address_seed = derive_address_seed(seeds, program_id)?;
        let address = derive_address_from_seed(&address_seed, address_tree_pubkey);

        Ok((address, address_seed))
    }
}
