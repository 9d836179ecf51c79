use crate::{keccak::Keccak, Hash};

pub const HASH_TO_FIELD_SIZE_SEED: u8 = u8::MAX;

/// Hashes `bytes` with a trailing bump seed and truncates the result so that
/// it is smaller than the BN254 field modulus.
pub fn hashv_to_bn254_field_size_be(bytes: &[&[u8]]) -> Hash {
    let bump_seed = [HASH_TO_FIELD_SIZE_SEED];
    let mut slices = Vec::with_capacity(bytes.len() + 1);
    slices.extend_from_slice(bytes);
    slices.push(bump_seed.as_slice());
    truncate_to_field_size(Keccak::hashv(&slices))
}

/// Hash to field size without the bump seed. Address seeds of v1 trees are
/// derived with this variant.
pub fn hashv_to_bn254_field_size_be_legacy(bytes: &[&[u8]]) -> Hash {
    truncate_to_field_size(Keccak::hashv(bytes))
}

fn truncate_to_field_size(mut hashed_value: Hash) -> Hash {
    // Truncates to 31 bytes so that value is less than bn254 Fr modulo
    // field size.
    hashed_value[0] = 0;
    hashed_value
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_first_byte_is_zero() {
        for i in 0..=u8::MAX {
            assert_eq!(hashv_to_bn254_field_size_be(&[&[i]])[0], 0);
            assert_eq!(hashv_to_bn254_field_size_be_legacy(&[&[i]])[0], 0);
        }
    }

    #[test]
    fn test_bump_seed_is_appended() {
        let with_bump = hashv_to_bn254_field_size_be(&[b"foo"]);
        let legacy = hashv_to_bn254_field_size_be_legacy(&[b"foo", &[HASH_TO_FIELD_SIZE_SEED]]);
        assert_eq!(with_bump, legacy);
        assert_ne!(with_bump, hashv_to_bn254_field_size_be_legacy(&[b"foo"]));
    }
}
