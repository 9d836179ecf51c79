use std::{fmt::Debug, io};

use solana_instruction::error::InstructionError;
use solana_rpc_client_api::client_error::Error as ClientError;
use solana_signer::SignerError;
use solana_transaction_error::TransactionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("TransactionError: {0}")]
    TransactionError(#[from] Box<TransactionError>),

    #[error("ClientError: {0}")]
    ClientError(#[from] Box<ClientError>),

    #[error("IoError: {0}")]
    IoError(#[from] Box<io::Error>),

    #[error("SignerError: {0}")]
    SignerError(#[from] SignerError),

    #[error("Error: `{0}`")]
    CustomError(String),

    #[error("Assert Rpc Error: {0}")]
    AssertRpcError(String),
}

impl RpcError {
    /// Custom program error code of a rejected transaction, if any.
    pub fn custom_error_code(&self) -> Option<u32> {
        let transaction_error = match self {
            RpcError::TransactionError(e) => Some(e.as_ref().clone()),
            RpcError::ClientError(e) => e.get_transaction_error(),
            _ => None,
        };
        match transaction_error {
            Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) => {
                Some(code)
            }
            _ => None,
        }
    }
}

impl From<TransactionError> for RpcError {
    fn from(err: TransactionError) -> Self {
        RpcError::TransactionError(Box::new(err))
    }
}

impl From<ClientError> for RpcError {
    fn from(err: ClientError) -> Self {
        // Surface program rejections as transaction errors so that callers can
        // match on the custom error code regardless of the backend.
        match err.get_transaction_error() {
            Some(transaction_error) => RpcError::TransactionError(Box::new(transaction_error)),
            None => RpcError::ClientError(Box::new(err)),
        }
    }
}

impl From<io::Error> for RpcError {
    fn from(err: io::Error) -> Self {
        RpcError::IoError(Box::new(err))
    }
}

/// Asserts that `result` failed in instruction `i` with custom error
/// `expected_error_code`.
pub fn assert_rpc_error<T: Debug>(
    result: Result<T, RpcError>,
    i: u8,
    expected_error_code: u32,
) -> Result<(), RpcError> {
    match result {
        Err(RpcError::TransactionError(ref box_err)) => match **box_err {
            TransactionError::InstructionError(index, InstructionError::Custom(error_code))
                if index == i && error_code == expected_error_code =>
            {
                Ok(())
            }
            TransactionError::InstructionError(index, InstructionError::Custom(error_code)) => {
                Err(RpcError::AssertRpcError(format!(
                    "Expected error code {} in instruction {}, got {} in instruction {}",
                    expected_error_code, i, error_code, index
                )))
            }
            _ => Err(RpcError::AssertRpcError(format!(
                "Unexpected transaction error: {:?}",
                box_err
            ))),
        },
        Err(e) => Err(RpcError::AssertRpcError(format!(
            "Unexpected error type: {:?}",
            e
        ))),
        Ok(_) => Err(RpcError::AssertRpcError(format!(
            "Expected error code {}, transaction succeeded",
            expected_error_code
        ))),
    }
}
