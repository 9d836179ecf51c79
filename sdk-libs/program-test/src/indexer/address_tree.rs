use std::collections::HashSet;

use light_address::Keccak;
use light_address_client::indexer::AddressMerkleTreeAccounts;

use super::root_history::RootHistory;
use crate::errors::ProgramTestError;

/// Address tree and its queue.
///
/// New addresses are inserted into the queue by transactions and moved into
/// the tree by the forester. Every tree insertion produces a new root.
#[derive(Debug, Clone)]
pub struct AddressMerkleTreeBundle {
    pub accounts: AddressMerkleTreeAccounts,
    elements: HashSet<[u8; 32]>,
    queue: Vec<[u8; 32]>,
    pub root_history: RootHistory,
}

impl AddressMerkleTreeBundle {
    pub fn new(accounts: AddressMerkleTreeAccounts, root_history_capacity: usize) -> Self {
        let initial_root = Keccak::hashv(&[b"address_tree", accounts.merkle_tree.as_ref()]);
        Self {
            accounts,
            elements: HashSet::new(),
            queue: Vec::new(),
            root_history: RootHistory::new(root_history_capacity, initial_root),
        }
    }

    pub fn is_in_tree(&self, address: &[u8; 32]) -> bool {
        self.elements.contains(address)
    }

    pub fn is_in_queue(&self, address: &[u8; 32]) -> bool {
        self.queue.contains(address)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn insert_into_queue(&mut self, address: [u8; 32]) -> Result<(), ProgramTestError> {
        if self.is_in_tree(&address) || self.is_in_queue(&address) {
            return Err(ProgramTestError::ElementAlreadyExists);
        }
        self.queue.push(address);
        Ok(())
    }

    pub fn insert_into_tree(&mut self, address: [u8; 32]) -> Result<(), ProgramTestError> {
        if !self.elements.insert(address) {
            return Err(ProgramTestError::ElementAlreadyExists);
        }
        let root = Keccak::hashv(&[self.root_history.current_root().as_slice(), &address]);
        self.root_history.push(root);
        Ok(())
    }

    /// Moves all queued addresses into the tree. Returns the number of
    /// inserted addresses.
    pub fn empty_queue(&mut self) -> usize {
        let queue = std::mem::take(&mut self.queue);
        let num_inserted = queue.len();
        for address in queue {
            // Queue insertion already rejected duplicates.
            let _ = self.insert_into_tree(address);
        }
        num_inserted
    }
}
