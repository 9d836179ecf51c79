use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use async_trait::async_trait;
use light_address_client::indexer::{
    AddressWithTree, Base58Conversions, Hash, IndexerError, IndexerRpcConfig, ProofProvider,
    ValidityProofWithContext,
};
use solana_pubkey::Pubkey;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    compressed_account::CompressedAccountWithMerkleContext, prover::prove, state::TestState,
};

/// In-memory indexer and prover.
///
/// Reads the same state the runtime writes, so proofs always reflect the
/// latest processed transaction.
#[derive(Clone)]
pub struct TestIndexer {
    state: Arc<RwLock<TestState>>,
}

impl Debug for TestIndexer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestIndexer").finish()
    }
}

impl TestIndexer {
    pub fn new(state: Arc<RwLock<TestState>>) -> Self {
        Self { state }
    }

    pub async fn get_compressed_account(
        &self,
        address: &[u8; 32],
    ) -> Option<CompressedAccountWithMerkleContext> {
        self.state
            .read()
            .await
            .compressed_accounts
            .iter()
            .find(|x| x.compressed_account.address.as_ref() == Some(address))
            .cloned()
    }

    pub async fn get_compressed_accounts_by_owner(
        &self,
        owner: &Pubkey,
    ) -> Vec<CompressedAccountWithMerkleContext> {
        self.state
            .read()
            .await
            .compressed_accounts
            .iter()
            .filter(|x| x.compressed_account.owner == *owner)
            .cloned()
            .collect()
    }

    /// Current root index of an address tree.
    pub async fn get_address_tree_root_index(&self, merkle_tree: &Pubkey) -> Option<u16> {
        self.state
            .read()
            .await
            .address_tree(merkle_tree)
            .map(|x| x.root_history.current_index())
    }
}

#[async_trait]
impl ProofProvider for TestIndexer {
    async fn get_validity_proof(
        &self,
        hashes: Vec<Hash>,
        new_addresses_with_trees: Vec<AddressWithTree>,
        config: Option<IndexerRpcConfig>,
    ) -> Result<ValidityProofWithContext, IndexerError> {
        if hashes.is_empty() && new_addresses_with_trees.is_empty() {
            return Err(IndexerError::InvalidParameters(
                "No hashes or new addresses provided for proof generation".to_string(),
            ));
        }
        let state = self.state.read().await;
        if let Some(config) = config {
            if state.slot < config.slot {
                return Err(IndexerError::IndexerNotSyncedToSlot);
            }
        }

        let mut root_indices = Vec::with_capacity(hashes.len() + new_addresses_with_trees.len());

        let mut inclusion = Vec::with_capacity(hashes.len());
        for hash in hashes.iter() {
            let account = state
                .compressed_account_by_hash(hash)
                .ok_or(IndexerError::AccountNotFound(*hash))?;
            let tree = state
                .state_tree(&account.merkle_tree)
                .ok_or_else(|| IndexerError::UnknownMerkleTree(account.merkle_tree.to_string()))?;
            root_indices.push(tree.root_history.current_index());
            inclusion.push((tree.root_history.current_root(), *hash));
        }

        let mut non_inclusion = Vec::with_capacity(new_addresses_with_trees.len());
        for address_with_tree in new_addresses_with_trees.iter() {
            let tree = state
                .address_tree(&address_with_tree.tree)
                .ok_or_else(|| IndexerError::UnknownMerkleTree(address_with_tree.tree.to_string()))?;
            if tree.is_in_tree(&address_with_tree.address) {
                return Err(IndexerError::AddressAlreadyExists {
                    address: address_with_tree.address,
                    tree: address_with_tree.tree.to_string(),
                });
            }
            root_indices.push(tree.root_history.current_index());
            non_inclusion.push((tree.root_history.current_root(), address_with_tree.address));
        }

        debug!(
            "Validity proof for {} hashes and addresses {:?}, root indices {:?}",
            hashes.len(),
            new_addresses_with_trees
                .iter()
                .map(|x| x.address.to_base58())
                .collect::<Vec<_>>(),
            root_indices
        );

        ValidityProofWithContext::new(
            prove(&inclusion, &non_inclusion).into(),
            root_indices,
            hashes.len(),
            new_addresses_with_trees.len(),
        )
    }
}
