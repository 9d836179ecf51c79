use std::fmt::{Display, Formatter};

use light_address::AddressError;
use thiserror::Error;

use crate::{indexer::IndexerError, instruction::AccountRole, rpc::RpcError};

#[derive(Error, Debug)]
pub enum PackingError {
    #[error("Account with role {role:?} packed at index {actual}, layout expects {expected}")]
    PositionMismatch {
        role: AccountRole,
        expected: u8,
        actual: u8,
    },

    #[error("Invalid packed accounts layout: {0}")]
    InvalidLayout(String),

    #[error("Validity proof carries no address root index")]
    MissingAddressRootIndex,

    #[error("Invalid instruction discriminator")]
    InvalidDiscriminator,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// States of a single address creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStage {
    Derive,
    RequestProof,
    BuildTransaction,
    Submit,
    Confirmed,
    Rejected,
}

impl Display for CreationStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            CreationStage::Derive => "derive",
            CreationStage::RequestProof => "request proof",
            CreationStage::BuildTransaction => "build transaction",
            CreationStage::Submit => "submit",
            CreationStage::Confirmed => "confirmed",
            CreationStage::Rejected => "rejected",
        };
        write!(f, "{}", str)
    }
}

#[derive(Error, Debug)]
pub enum CreateAddressError {
    #[error("Address derivation failed: {0}")]
    Derive(#[from] AddressError),

    #[error("Validity proof request failed: {0}")]
    Proof(#[from] IndexerError),

    #[error("Failed to build transaction: {0}")]
    Build(#[from] PackingError),

    #[error("Transaction failed after {attempts} attempt(s): {source}")]
    Submit {
        attempts: u32,
        #[source]
        source: RpcError,
    },
}

impl CreateAddressError {
    /// Stage the creation stopped in. Submissions that the runtime rejected
    /// with a program error report [`CreationStage::Rejected`].
    pub fn stage(&self) -> CreationStage {
        match self {
            CreateAddressError::Derive(_) => CreationStage::Derive,
            CreateAddressError::Proof(_) => CreationStage::RequestProof,
            CreateAddressError::Build(_) => CreationStage::BuildTransaction,
            CreateAddressError::Submit { source, .. } => {
                if source.custom_error_code().is_some() {
                    CreationStage::Rejected
                } else {
                    CreationStage::Submit
                }
            }
        }
    }

    pub fn custom_error_code(&self) -> Option<u32> {
        match self {
            CreateAddressError::Submit { source, .. } => source.custom_error_code(),
            _ => None,
        }
    }
}
