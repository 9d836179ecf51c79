//! Client for creating compressed accounts with new, unique addresses.
//!
//! [`creator::AddressCreator`] derives the address, requests a non-inclusion
//! proof from a [`indexer::ProofProvider`], builds the `create` instruction
//! and submits it through an [`rpc::Rpc`] backend.

pub mod constants;
pub mod creator;
pub mod error;
pub mod indexer;
pub mod instruction;
pub mod rpc;

pub use creator::{AddressCreator, CreateAddressConfig, CreatedAddress, StaleProofRetryPolicy};
pub use error::{CreateAddressError, CreationStage, PackingError};
pub use light_address;
