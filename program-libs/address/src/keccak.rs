use sha3::{Digest, Keccak256};

use crate::Hash;

/// Keccak-256 over the concatenation of `vals`.
///
/// This is the same hash the on-chain verifier computes through the
/// `sol_keccak256` syscall, so empty slices contribute nothing.
pub struct Keccak;

impl Keccak {
    pub fn hash(val: &[u8]) -> Hash {
        Self::hashv(&[val])
    }

    pub fn hashv(vals: &[&[u8]]) -> Hash {
        let mut hasher = Keccak256::default();
        for val in vals {
            hasher.update(val);
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            Keccak::hash(&[]),
            [
                197, 210, 70, 1, 134, 247, 35, 60, 146, 126, 125, 178, 220, 199, 3, 192, 229, 0,
                182, 83, 202, 130, 39, 59, 123, 250, 216, 4, 93, 133, 164, 112
            ]
        );
    }

    #[test]
    fn test_keccak_hashv_is_concatenation() {
        let joined = Keccak::hash(b"foobar");
        assert_eq!(Keccak::hashv(&[b"foo", b"bar"]), joined);
        assert_eq!(Keccak::hashv(&[b"foo", b"", b"bar"]), joined);
    }
}
