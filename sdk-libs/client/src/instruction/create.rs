use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use super::{
    layout::PackedAccountsLayout,
    merkle_context::{AddressMerkleContext, PackedAddressMerkleContext},
    pack_accounts::PackedAccounts,
    system_accounts::SystemAccountMetaConfig,
};
use crate::{
    error::PackingError,
    indexer::{ValidityProof, ValidityProofWithContext},
};

/// `sha256("global:create")[..8]`
pub const CREATE_DISCRIMINATOR: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];

/// Anchor instruction discriminator of `name`.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{}", name).as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct CreateInstructionData {
    pub proof: ValidityProof,
    pub address_merkle_context: PackedAddressMerkleContext,
    pub output_merkle_tree_index: u8,
}

impl CreateInstructionData {
    pub fn data(&self) -> Result<Vec<u8>, PackingError> {
        let mut data = CREATE_DISCRIMINATOR.to_vec();
        self.serialize(&mut data)
            .map_err(|e| PackingError::Serialization(e.to_string()))?;
        Ok(data)
    }

    pub fn try_from_instruction_data(data: &[u8]) -> Result<Self, PackingError> {
        if data.len() < CREATE_DISCRIMINATOR.len()
            || data[..CREATE_DISCRIMINATOR.len()] != CREATE_DISCRIMINATOR
        {
            return Err(PackingError::InvalidDiscriminator);
        }
        let mut rest = &data[CREATE_DISCRIMINATOR.len()..];
        Self::deserialize(&mut rest).map_err(|e| PackingError::Serialization(e.to_string()))
    }
}

/// Builds the `create` instruction of `program_id`.
///
/// Accounts: `[payer (signer, writable)] ‖ light system accounts ‖ packed
/// accounts in `layout` order`. The address root index is taken from the
/// first non-inclusion entry of `proof`.
pub fn create_account_instruction(
    program_id: Pubkey,
    payer: Pubkey,
    proof: ValidityProofWithContext,
    address_merkle_context: &AddressMerkleContext,
    output_merkle_tree: Pubkey,
    layout: &PackedAccountsLayout,
) -> Result<Instruction, PackingError> {
    let root_index = *proof
        .address_root_indices()
        .first()
        .ok_or(PackingError::MissingAddressRootIndex)?;

    let mut remaining_accounts = PackedAccounts::default();
    remaining_accounts.add_pre_accounts_signer_mut(payer);
    remaining_accounts.add_system_accounts(SystemAccountMetaConfig::new(program_id));

    let (address_merkle_context, output_merkle_tree_index) = layout.pack(
        address_merkle_context,
        output_merkle_tree,
        root_index,
        &mut remaining_accounts,
    )?;

    let instruction_data = CreateInstructionData {
        proof: proof.proof,
        address_merkle_context,
        output_merkle_tree_index,
    };
    let (accounts, _, _): (Vec<AccountMeta>, _, _) = remaining_accounts.to_account_metas();

    Ok(Instruction {
        program_id,
        accounts,
        data: instruction_data.data()?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        indexer::CompressedProof,
        instruction::system_accounts::{get_light_system_account_metas, SYSTEM_ACCOUNTS_LEN},
    };

    #[test]
    fn test_create_discriminator() {
        assert_eq!(instruction_discriminator("create"), CREATE_DISCRIMINATOR);
    }

    #[test]
    fn test_create_account_instruction() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let output_merkle_tree = Pubkey::new_unique();
        let address_merkle_context = AddressMerkleContext {
            address_merkle_tree_pubkey: Pubkey::new_unique(),
            address_queue_pubkey: Pubkey::new_unique(),
        };
        let compressed_proof = CompressedProof {
            a: [1; 32],
            b: [2; 64],
            c: [3; 32],
        };
        let proof =
            ValidityProofWithContext::new(compressed_proof.into(), vec![42], 0, 1).unwrap();

        let instruction = create_account_instruction(
            program_id,
            payer,
            proof,
            &address_merkle_context,
            output_merkle_tree,
            &PackedAccountsLayout::V1,
        )
        .unwrap();

        assert_eq!(instruction.program_id, program_id);
        assert_eq!(instruction.accounts.len(), 1 + SYSTEM_ACCOUNTS_LEN + 3);
        assert_eq!(instruction.accounts[0], AccountMeta::new(payer, true));
        assert_eq!(
            instruction.accounts[1..1 + SYSTEM_ACCOUNTS_LEN],
            get_light_system_account_metas(SystemAccountMetaConfig::new(program_id))[..]
        );
        let packed = &instruction.accounts[1 + SYSTEM_ACCOUNTS_LEN..];
        assert_eq!(packed[0].pubkey, address_merkle_context.address_queue_pubkey);
        assert_eq!(
            packed[1].pubkey,
            address_merkle_context.address_merkle_tree_pubkey
        );
        assert_eq!(packed[2].pubkey, output_merkle_tree);

        assert_eq!(&instruction.data[..8], &CREATE_DISCRIMINATOR);
        // discriminator, option tag, proof, tree index, queue index, root index, output index
        assert_eq!(instruction.data.len(), 8 + 1 + 128 + 1 + 1 + 2 + 1);

        let data = CreateInstructionData::try_from_instruction_data(&instruction.data).unwrap();
        assert_eq!(
            data,
            CreateInstructionData {
                proof: compressed_proof.into(),
                address_merkle_context: PackedAddressMerkleContext {
                    address_merkle_tree_pubkey_index: 1,
                    address_queue_pubkey_index: 0,
                    root_index: 42,
                },
                output_merkle_tree_index: 2,
            }
        );
    }

    #[test]
    fn test_missing_address_root_index() {
        let proof = ValidityProofWithContext::new(ValidityProof(None), vec![3], 1, 0).unwrap();
        let result = create_account_instruction(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            proof,
            &AddressMerkleContext::default(),
            Pubkey::new_unique(),
            &PackedAccountsLayout::V1,
        );
        assert!(matches!(result, Err(PackingError::MissingAddressRootIndex)));
    }

    #[test]
    fn test_invalid_discriminator() {
        assert!(matches!(
            CreateInstructionData::try_from_instruction_data(&[0; 4]),
            Err(PackingError::InvalidDiscriminator)
        ));
        assert!(matches!(
            CreateInstructionData::try_from_instruction_data(&[0; 20]),
            Err(PackingError::InvalidDiscriminator)
        ));
    }
}
