//! Tree maintenance the forester performs on a live cluster.

use std::sync::Arc;

use light_address_client::rpc::RpcError;
use solana_pubkey::Pubkey;
use tokio::sync::RwLock;
use tracing::debug;

use crate::indexer::TestState;

#[derive(Debug, Clone)]
pub struct TestForester {
    state: Arc<RwLock<TestState>>,
}

impl TestForester {
    pub fn new(state: Arc<RwLock<TestState>>) -> Self {
        Self { state }
    }

    /// Moves all queued addresses of `merkle_tree` into the tree. Each
    /// insertion advances the root history by one.
    pub async fn empty_address_queue(&self, merkle_tree: &Pubkey) -> Result<usize, RpcError> {
        let mut state = self.state.write().await;
        let tree = state.address_tree_mut(merkle_tree).ok_or_else(|| {
            RpcError::CustomError(format!("Unknown address tree {}", merkle_tree))
        })?;
        let num_inserted = tree.empty_queue();
        debug!(
            "Inserted {} addresses into {}, root index {}",
            num_inserted,
            merkle_tree,
            tree.root_history.current_index()
        );
        Ok(num_inserted)
    }

    /// Inserts `addresses` straight into the tree, as if other programs had
    /// created them and the queue had been emptied.
    pub async fn insert_addresses(
        &self,
        merkle_tree: &Pubkey,
        addresses: &[[u8; 32]],
    ) -> Result<(), RpcError> {
        let mut state = self.state.write().await;
        let tree = state.address_tree_mut(merkle_tree).ok_or_else(|| {
            RpcError::CustomError(format!("Unknown address tree {}", merkle_tree))
        })?;
        for address in addresses {
            tree.insert_into_tree(*address)
                .map_err(|e| RpcError::CustomError(format!("{}: {:?}", e, address)))?;
        }
        Ok(())
    }
}
