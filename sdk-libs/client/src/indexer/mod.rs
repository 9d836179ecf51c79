pub mod photon_indexer;

mod base58;
mod config;
mod error;
mod proof_provider;
mod types;

pub use base58::{decode_base58_to_fixed_array, Base58Conversions};
pub use config::{IndexerRpcConfig, RetryConfig};
pub use error::IndexerError;
pub use photon_indexer::PhotonIndexer;
pub use proof_provider::ProofProvider;
pub use types::{
    Address, AddressMerkleTreeAccounts, AddressWithTree, CompressedProof, Hash,
    StateMerkleTreeAccounts, ValidityProof, ValidityProofWithContext,
};
