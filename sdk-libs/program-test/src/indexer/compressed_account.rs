use borsh::{BorshDeserialize, BorshSerialize};
use light_address::{hash_to_field_size::hashv_to_bn254_field_size_be_legacy, Keccak};
use solana_pubkey::Pubkey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAccountData {
    pub discriminator: [u8; 8],
    pub data: Vec<u8>,
    pub data_hash: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAccount {
    pub owner: Pubkey,
    pub lamports: u64,
    pub address: Option<[u8; 32]>,
    pub data: Option<CompressedAccountData>,
}

impl CompressedAccount {
    /// Leaf hash of the account at `leaf_index` in `merkle_tree`.
    pub fn hash(&self, merkle_tree: &Pubkey, leaf_index: u32) -> [u8; 32] {
        let (discriminator, data_hash) = match &self.data {
            Some(data) => (data.discriminator, data.data_hash),
            None => ([0; 8], [0; 32]),
        };
        let address = self.address.unwrap_or_default();
        hashv_to_bn254_field_size_be_legacy(&[
            self.owner.as_ref(),
            &self.lamports.to_le_bytes(),
            &leaf_index.to_le_bytes(),
            merkle_tree.as_ref(),
            &address,
            &discriminator,
            &data_hash,
        ])
    }

    /// Borsh deserializes the account data as `T`.
    pub fn deserialize_data<T: BorshDeserialize>(&self) -> Option<T> {
        self.data
            .as_ref()
            .and_then(|data| T::try_from_slice(&data.data).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAccountWithMerkleContext {
    pub compressed_account: CompressedAccount,
    pub merkle_tree: Pubkey,
    pub leaf_index: u32,
    pub hash: [u8; 32],
}

/// `sha256("CounterCompressedAccount")[..8]`
pub const COUNTER_ACCOUNT_DISCRIMINATOR: [u8; 8] = [172, 15, 142, 171, 199, 240, 149, 236];

/// Account created by the counter program's `create` instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CounterCompressedAccount {
    pub owner: Pubkey,
    pub counter: u64,
}

impl CounterCompressedAccount {
    pub fn to_account_data(&self) -> CompressedAccountData {
        let data = borsh::to_vec(self).unwrap_or_default();
        let mut data_hash = Keccak::hashv(&[self.owner.as_ref(), &self.counter.to_le_bytes()]);
        data_hash[0] = 0;
        CompressedAccountData {
            discriminator: COUNTER_ACCOUNT_DISCRIMINATOR,
            data,
            data_hash,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_counter_account_data() {
        let counter = CounterCompressedAccount {
            owner: Pubkey::new_unique(),
            counter: 0,
        };
        let account = CompressedAccount {
            owner: Pubkey::new_unique(),
            lamports: 0,
            address: Some([0; 32]),
            data: Some(counter.to_account_data()),
        };
        assert_eq!(account.data.as_ref().unwrap().data.len(), 40);
        assert_eq!(account.deserialize_data::<CounterCompressedAccount>(), Some(counter));

        let tree = Pubkey::new_unique();
        assert_ne!(account.hash(&tree, 0), account.hash(&tree, 1));
        assert_eq!(account.hash(&tree, 0)[0], 0);
    }
}
