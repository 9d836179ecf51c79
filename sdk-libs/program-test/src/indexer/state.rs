use std::collections::HashMap;

use light_address_client::{
    indexer::{AddressMerkleTreeAccounts, StateMerkleTreeAccounts},
    instruction::AccountRole,
};
use solana_pubkey::Pubkey;

use super::{
    address_tree::AddressMerkleTreeBundle, compressed_account::CompressedAccountWithMerkleContext,
    state_tree::StateMerkleTreeBundle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAccountKind {
    AddressMerkleTree,
    AddressQueue,
    StateMerkleTree,
    NullifierQueue,
}

impl TreeAccountKind {
    /// Role the account can take in a `create` instruction.
    pub fn role(&self) -> Option<AccountRole> {
        match self {
            TreeAccountKind::AddressMerkleTree => Some(AccountRole::AddressMerkleTree),
            TreeAccountKind::AddressQueue => Some(AccountRole::AddressQueue),
            TreeAccountKind::StateMerkleTree => Some(AccountRole::OutputStateTree),
            TreeAccountKind::NullifierQueue => None,
        }
    }
}

/// State shared by the runtime, the indexer and the forester.
#[derive(Debug, Clone, Default)]
pub struct TestState {
    pub slot: u64,
    pub lamports: HashMap<Pubkey, u64>,
    pub address_trees: Vec<AddressMerkleTreeBundle>,
    pub state_trees: Vec<StateMerkleTreeBundle>,
    pub compressed_accounts: Vec<CompressedAccountWithMerkleContext>,
    pub transaction_counter: u64,
}

impl TestState {
    pub fn add_address_merkle_tree(
        &mut self,
        accounts: AddressMerkleTreeAccounts,
        root_history_capacity: usize,
    ) {
        self.address_trees
            .push(AddressMerkleTreeBundle::new(accounts, root_history_capacity));
    }

    pub fn add_state_merkle_tree(
        &mut self,
        accounts: StateMerkleTreeAccounts,
        root_history_capacity: usize,
    ) {
        self.state_trees
            .push(StateMerkleTreeBundle::new(accounts, root_history_capacity));
    }

    /// `None` for accounts that are not a registered tree or queue.
    pub fn tree_account_kind(&self, pubkey: &Pubkey) -> Option<TreeAccountKind> {
        if self.address_trees.iter().any(|x| x.accounts.merkle_tree == *pubkey) {
            return Some(TreeAccountKind::AddressMerkleTree);
        }
        if self.address_trees.iter().any(|x| x.accounts.queue == *pubkey) {
            return Some(TreeAccountKind::AddressQueue);
        }
        if self.state_trees.iter().any(|x| x.accounts.merkle_tree == *pubkey) {
            return Some(TreeAccountKind::StateMerkleTree);
        }
        if self
            .state_trees
            .iter()
            .any(|x| x.accounts.nullifier_queue == *pubkey)
        {
            return Some(TreeAccountKind::NullifierQueue);
        }
        None
    }

    pub fn address_tree(&self, merkle_tree: &Pubkey) -> Option<&AddressMerkleTreeBundle> {
        self.address_trees
            .iter()
            .find(|x| x.accounts.merkle_tree == *merkle_tree)
    }

    pub fn address_tree_mut(
        &mut self,
        merkle_tree: &Pubkey,
    ) -> Option<&mut AddressMerkleTreeBundle> {
        self.address_trees
            .iter_mut()
            .find(|x| x.accounts.merkle_tree == *merkle_tree)
    }

    pub fn state_tree(&self, merkle_tree: &Pubkey) -> Option<&StateMerkleTreeBundle> {
        self.state_trees
            .iter()
            .find(|x| x.accounts.merkle_tree == *merkle_tree)
    }

    pub fn state_tree_mut(
        &mut self,
        merkle_tree: &Pubkey,
    ) -> Option<&mut StateMerkleTreeBundle> {
        self.state_trees
            .iter_mut()
            .find(|x| x.accounts.merkle_tree == *merkle_tree)
    }

    pub fn compressed_account_by_hash(
        &self,
        hash: &[u8; 32],
    ) -> Option<&CompressedAccountWithMerkleContext> {
        self.compressed_accounts.iter().find(|x| x.hash == *hash)
    }

    pub fn balance(&self, pubkey: &Pubkey) -> u64 {
        self.lamports.get(pubkey).copied().unwrap_or_default()
    }
}
