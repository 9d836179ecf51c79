use light_address::Keccak;
use light_address_client::indexer::StateMerkleTreeAccounts;

use super::root_history::RootHistory;

#[derive(Debug, Clone)]
pub struct StateMerkleTreeBundle {
    pub accounts: StateMerkleTreeAccounts,
    pub leaves: Vec<[u8; 32]>,
    pub root_history: RootHistory,
}

impl StateMerkleTreeBundle {
    pub fn new(accounts: StateMerkleTreeAccounts, root_history_capacity: usize) -> Self {
        let initial_root = Keccak::hashv(&[b"state_tree", accounts.merkle_tree.as_ref()]);
        Self {
            accounts,
            leaves: Vec::new(),
            root_history: RootHistory::new(root_history_capacity, initial_root),
        }
    }

    /// Appends `leaf` and returns its leaf index.
    pub fn append(&mut self, leaf: [u8; 32]) -> u32 {
        let leaf_index = self.leaves.len() as u32;
        self.leaves.push(leaf);
        let root = Keccak::hashv(&[self.root_history.current_root().as_slice(), &leaf]);
        self.root_history.push(root);
        leaf_index
    }

    pub fn contains(&self, leaf: &[u8; 32]) -> bool {
        self.leaves.contains(leaf)
    }
}

#[cfg(test)]
mod test {
    use solana_pubkey::Pubkey;

    use super::*;

    #[test]
    fn test_append() {
        let mut bundle = StateMerkleTreeBundle::new(
            StateMerkleTreeAccounts {
                merkle_tree: Pubkey::new_unique(),
                nullifier_queue: Pubkey::new_unique(),
            },
            2400,
        );
        assert_eq!(bundle.append([1; 32]), 0);
        assert_eq!(bundle.append([2; 32]), 1);
        assert!(bundle.contains(&[2; 32]));
        assert_eq!(bundle.root_history.current_index(), 2);
    }
}
