use solana_instruction::error::InstructionError;
use thiserror::Error;

/// Custom program errors the in-memory runtime rejects instructions with.
///
/// Codes match the programs they stand in for: anchor account checks,
/// the light system program, account compression and the proof verifier.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProgramTestError {
    #[error("AccountDiscriminatorMismatch")]
    AccountDiscriminatorMismatch,
    #[error("AccountNotEnoughKeys")]
    AccountNotEnoughKeys,
    #[error("AccountNotInitialized")]
    AccountNotInitialized,
    #[error("ProofIsNone")]
    ProofIsNone,
    #[error("ElementAlreadyExists")]
    ElementAlreadyExists,
    #[error("ProofVerificationFailed")]
    ProofVerificationFailed,
}

impl From<ProgramTestError> for u32 {
    fn from(e: ProgramTestError) -> u32 {
        match e {
            ProgramTestError::AccountDiscriminatorMismatch => 3002,
            ProgramTestError::AccountNotEnoughKeys => 3005,
            ProgramTestError::AccountNotInitialized => 3012,
            ProgramTestError::ProofIsNone => 6018,
            ProgramTestError::ElementAlreadyExists => 9002,
            ProgramTestError::ProofVerificationFailed => 13006,
        }
    }
}

impl From<ProgramTestError> for InstructionError {
    fn from(e: ProgramTestError) -> Self {
        InstructionError::Custom(e.into())
    }
}

#[cfg(test)]
mod test {
    use light_address_client::constants::{
        ELEMENT_ALREADY_EXISTS_ERROR_CODE, PROOF_VERIFICATION_FAILED_ERROR_CODE,
    };

    use super::*;

    #[test]
    fn test_error_codes_match_client_constants() {
        assert_eq!(
            u32::from(ProgramTestError::ProofVerificationFailed),
            PROOF_VERIFICATION_FAILED_ERROR_CODE
        );
        assert_eq!(
            u32::from(ProgramTestError::ElementAlreadyExists),
            ELEMENT_ALREADY_EXISTS_ERROR_CODE
        );
        assert_eq!(
            InstructionError::from(ProgramTestError::AccountDiscriminatorMismatch),
            InstructionError::Custom(3002)
        );
    }
}
