use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressMerkleContext {
    pub address_merkle_tree_pubkey: Pubkey,
    pub address_queue_pubkey: Pubkey,
}

/// Address Merkle context as it is passed in instruction data. The indices
/// point into the packed section of the remaining accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BorshDeserialize, BorshSerialize)]
pub struct PackedAddressMerkleContext {
    pub address_merkle_tree_pubkey_index: u8,
    pub address_queue_pubkey_index: u8,
    pub root_index: u16,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::instruction::{PackedAccounts, PackedAccountsLayout};

    #[test]
    fn test_packed_indices_resolve_to_accounts() {
        let context = AddressMerkleContext {
            address_merkle_tree_pubkey: Pubkey::new_unique(),
            address_queue_pubkey: Pubkey::new_unique(),
        };
        let mut remaining_accounts = PackedAccounts::default();
        let (packed, _) = PackedAccountsLayout::V1
            .pack(&context, Pubkey::new_unique(), 3, &mut remaining_accounts)
            .unwrap();
        let metas = remaining_accounts.to_account_metas().0;

        assert_eq!(packed.address_queue_pubkey_index, 0);
        assert_eq!(packed.address_merkle_tree_pubkey_index, 1);
        assert_eq!(
            metas[packed.address_queue_pubkey_index as usize].pubkey,
            context.address_queue_pubkey
        );
        assert_eq!(
            metas[packed.address_merkle_tree_pubkey_index as usize].pubkey,
            context.address_merkle_tree_pubkey
        );
        assert_eq!(packed.root_index, 3);
    }

    #[test]
    fn test_borsh_layout() {
        let packed = PackedAddressMerkleContext {
            address_merkle_tree_pubkey_index: 1,
            address_queue_pubkey_index: 0,
            root_index: 0x0102,
        };
        assert_eq!(borsh::to_vec(&packed).unwrap(), vec![1, 0, 0x02, 0x01]);
    }
}
