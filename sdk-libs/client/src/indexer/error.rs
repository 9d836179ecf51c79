use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum IndexerError {
    #[error("Photon API error in {context}: {message}")]
    PhotonError { context: String, message: String },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to deserialize response: {0}")]
    DeserializeError(String),

    #[error("Base58 decode error: {field} - {message}")]
    Base58DecodeError { field: String, message: String },

    #[error("Invalid response data")]
    InvalidResponseData,

    #[error("Missing result from {context}")]
    MissingResult { context: String },

    #[error("Indexer not synced to slot")]
    IndexerNotSyncedToSlot,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Address {address:?} already exists in tree {tree}")]
    AddressAlreadyExists { address: [u8; 32], tree: String },

    #[error("Account with hash {0:?} not found")]
    AccountNotFound([u8; 32]),

    #[error("Unknown Merkle tree {0}")]
    UnknownMerkleTree(String),

    #[error("Expected {expected} root indices, got {actual}")]
    RootIndicesMismatch { expected: usize, actual: usize },

    #[error("Error: `{0}`")]
    CustomError(String),
}

impl From<reqwest::Error> for IndexerError {
    fn from(e: reqwest::Error) -> Self {
        IndexerError::ApiError(e.to_string())
    }
}

impl From<serde_json::Error> for IndexerError {
    fn from(e: serde_json::Error) -> Self {
        IndexerError::DeserializeError(e.to_string())
    }
}
