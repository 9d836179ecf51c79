use std::fmt::Debug;

use async_trait::async_trait;

use super::{AddressWithTree, Hash, IndexerError, IndexerRpcConfig, ValidityProofWithContext};

/// Source of validity proofs.
///
/// Implemented by [`PhotonIndexer`](super::photon_indexer::PhotonIndexer)
/// for live clusters and by the in-memory test indexer. A request is a query,
/// it never mutates tree state.
#[async_trait]
pub trait ProofProvider: Send + Sync + Debug {
    /// Returns one proof for all queries. `root_indices` of the result holds
    /// one entry per `hashes` element followed by one per
    /// `new_addresses_with_trees` element, in request order.
    async fn get_validity_proof(
        &self,
        hashes: Vec<Hash>,
        new_addresses_with_trees: Vec<AddressWithTree>,
        config: Option<IndexerRpcConfig>,
    ) -> Result<ValidityProofWithContext, IndexerError>;
}
