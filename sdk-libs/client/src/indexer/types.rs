use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use super::IndexerError;

pub type Address = [u8; 32];
pub type Hash = [u8; 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressMerkleTreeAccounts {
    pub merkle_tree: Pubkey,
    pub queue: Pubkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMerkleTreeAccounts {
    pub merkle_tree: Pubkey,
    pub nullifier_queue: Pubkey,
}

/// Non-inclusion query: `address` must be absent from `tree`.
///
/// The queue is not sent to the indexer, it travels with the query so that
/// the caller can pack it into the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressWithTree {
    pub address: Address,
    pub tree: Pubkey,
    pub queue: Pubkey,
}

impl AddressWithTree {
    pub fn new(address: Address, address_tree: &AddressMerkleTreeAccounts) -> Self {
        Self {
            address,
            tree: address_tree.merkle_tree,
            queue: address_tree.queue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct CompressedProof {
    pub a: [u8; 32],
    pub b: [u8; 64],
    pub c: [u8; 32],
}

impl Default for CompressedProof {
    fn default() -> Self {
        Self {
            a: [0; 32],
            b: [0; 64],
            c: [0; 32],
        }
    }
}

/// Instruction data form of a proof. `None` if every input is proven by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BorshDeserialize, BorshSerialize)]
pub struct ValidityProof(pub Option<CompressedProof>);

impl From<CompressedProof> for ValidityProof {
    fn from(proof: CompressedProof) -> Self {
        Self(Some(proof))
    }
}

impl From<Option<CompressedProof>> for ValidityProof {
    fn from(proof: Option<CompressedProof>) -> Self {
        Self(proof)
    }
}

/// Response of a validity proof request.
///
/// `root_indices` is aligned with the queries: first one entry per account
/// hash (inclusion), then one per new address (non-inclusion).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidityProofWithContext {
    pub proof: ValidityProof,
    pub root_indices: Vec<u16>,
    pub num_accounts: usize,
}

impl ValidityProofWithContext {
    pub fn new(
        proof: ValidityProof,
        root_indices: Vec<u16>,
        num_accounts: usize,
        num_addresses: usize,
    ) -> Result<Self, IndexerError> {
        let expected = num_accounts + num_addresses;
        if root_indices.len() != expected {
            return Err(IndexerError::RootIndicesMismatch {
                expected,
                actual: root_indices.len(),
            });
        }
        Ok(Self {
            proof,
            root_indices,
            num_accounts,
        })
    }

    pub fn account_root_indices(&self) -> &[u16] {
        &self.root_indices[..self.num_accounts]
    }

    pub fn address_root_indices(&self) -> &[u16] {
        &self.root_indices[self.num_accounts..]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_root_indices_alignment() {
        let proof = ValidityProofWithContext::new(
            CompressedProof::default().into(),
            vec![1, 2, 3],
            2,
            1,
        )
        .unwrap();
        assert_eq!(proof.account_root_indices(), &[1, 2]);
        assert_eq!(proof.address_root_indices(), &[3]);

        assert_eq!(
            ValidityProofWithContext::new(ValidityProof::default(), vec![1, 2], 2, 1),
            Err(IndexerError::RootIndicesMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_validity_proof_serialization() {
        let proof = CompressedProof {
            a: [1; 32],
            b: [2; 64],
            c: [3; 32],
        };
        let bytes = borsh::to_vec(&ValidityProof::from(proof)).unwrap();
        assert_eq!(bytes.len(), 1 + 128);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..33], &[1; 32]);
        assert_eq!(&bytes[97..], &[3; 32]);

        let none = borsh::to_vec(&ValidityProof(None)).unwrap();
        assert_eq!(none, vec![0]);
    }
}
