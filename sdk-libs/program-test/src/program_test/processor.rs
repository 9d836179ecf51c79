//! Execution of the counter program's `create` instruction together with
//! the light system program checks it triggers.

use light_address::v1::derive_address;
use light_address_client::{
    indexer::ValidityProof,
    instruction::{
        get_light_system_account_metas, AccountRole, CreateInstructionData,
        SystemAccountMetaConfig, SYSTEM_ACCOUNTS_LEN,
    },
};
use solana_instruction::error::InstructionError;
use solana_pubkey::Pubkey;

use crate::{
    errors::ProgramTestError,
    indexer::{
        prover, CompressedAccount, CompressedAccountWithMerkleContext, CounterCompressedAccount,
        TestState,
    },
};

/// Account of a compiled instruction, resolved against the message.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InstructionAccount {
    pub pubkey: Pubkey,
    pub is_signer: bool,
}

fn tree_account(
    state: &TestState,
    tree_accounts: &[InstructionAccount],
    index: u8,
    expected: AccountRole,
) -> Result<Pubkey, ProgramTestError> {
    let account = tree_accounts
        .get(index as usize)
        .ok_or(ProgramTestError::AccountNotEnoughKeys)?;
    let kind = state
        .tree_account_kind(&account.pubkey)
        .ok_or(ProgramTestError::AccountNotInitialized)?;
    if kind.role() != Some(expected) {
        return Err(ProgramTestError::AccountDiscriminatorMismatch);
    }
    Ok(account.pubkey)
}

/// Executes `create` against `state`. The caller discards `state` if this
/// fails.
pub(crate) fn process_create(
    state: &mut TestState,
    program_id: &Pubkey,
    accounts: &[InstructionAccount],
    data: &[u8],
    logs: &mut Vec<String>,
) -> Result<(), InstructionError> {
    let CreateInstructionData {
        proof,
        address_merkle_context,
        output_merkle_tree_index,
    } = CreateInstructionData::try_from_instruction_data(data)
        .map_err(|_| InstructionError::InvalidInstructionData)?;
    logs.push("Program log: Instruction: Create".to_string());

    let signer = accounts
        .first()
        .ok_or(ProgramTestError::AccountNotEnoughKeys)?;
    if !signer.is_signer {
        return Err(InstructionError::MissingRequiredSignature);
    }

    let remaining_accounts = &accounts[1..];
    if remaining_accounts.len() < SYSTEM_ACCOUNTS_LEN {
        return Err(ProgramTestError::AccountNotEnoughKeys.into());
    }
    let (system_accounts, tree_accounts) = remaining_accounts.split_at(SYSTEM_ACCOUNTS_LEN);
    let expected_system_accounts =
        get_light_system_account_metas(SystemAccountMetaConfig::new(*program_id));
    if system_accounts
        .iter()
        .zip(expected_system_accounts.iter())
        .any(|(account, expected)| account.pubkey != expected.pubkey)
    {
        logs.push("Program log: Invalid light system accounts".to_string());
        return Err(InstructionError::IncorrectProgramId);
    }

    let address_merkle_tree = tree_account(
        state,
        tree_accounts,
        address_merkle_context.address_merkle_tree_pubkey_index,
        AccountRole::AddressMerkleTree,
    )?;
    let address_queue = tree_account(
        state,
        tree_accounts,
        address_merkle_context.address_queue_pubkey_index,
        AccountRole::AddressQueue,
    )?;
    let output_merkle_tree = tree_account(
        state,
        tree_accounts,
        output_merkle_tree_index,
        AccountRole::OutputStateTree,
    )?;

    let (address, _) = derive_address(
        &[b"counter", signer.pubkey.as_ref()],
        &address_merkle_tree.to_bytes(),
        &program_id.to_bytes(),
    )
    .map_err(|e| InstructionError::Custom(e.into()))?;

    let ValidityProof(Some(proof)) = proof else {
        return Err(ProgramTestError::ProofIsNone.into());
    };

    let address_tree = state
        .address_tree_mut(&address_merkle_tree)
        .ok_or(ProgramTestError::AccountNotInitialized)?;
    if address_tree.accounts.queue != address_queue {
        logs.push("Program log: Address queue is not associated with the tree".to_string());
        return Err(ProgramTestError::AccountDiscriminatorMismatch.into());
    }

    let root = address_tree
        .root_history
        .get(address_merkle_context.root_index)
        .copied()
        .ok_or(ProgramTestError::ProofVerificationFailed)?;
    if !prover::verify(&proof, &[], &[(root, address)]) {
        logs.push(format!(
            "Program log: Proof verification failed for root index {}",
            address_merkle_context.root_index
        ));
        return Err(ProgramTestError::ProofVerificationFailed.into());
    }

    address_tree.insert_into_queue(address)?;

    let compressed_account = CompressedAccount {
        owner: *program_id,
        lamports: 0,
        address: Some(address),
        data: Some(
            CounterCompressedAccount {
                owner: signer.pubkey,
                counter: 0,
            }
            .to_account_data(),
        ),
    };
    let state_tree = state
        .state_tree_mut(&output_merkle_tree)
        .ok_or(ProgramTestError::AccountNotInitialized)?;
    let leaf_index = state_tree.leaves.len() as u32;
    let hash = compressed_account.hash(&output_merkle_tree, leaf_index);
    state_tree.append(hash);
    state.compressed_accounts.push(CompressedAccountWithMerkleContext {
        compressed_account,
        merkle_tree: output_merkle_tree,
        leaf_index,
        hash,
    });
    logs.push(format!(
        "Program log: Created compressed account at leaf index {}",
        leaf_index
    ));

    Ok(())
}
