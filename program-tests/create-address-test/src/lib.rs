//! Helpers shared by the end-to-end tests.

use light_address::v1::derive_address;
use light_address_client::{
    indexer::{AddressMerkleTreeAccounts, AddressWithTree, ProofProvider},
    instruction::{create_account_instruction, AddressMerkleContext, PackedAccountsLayout},
    rpc::{Rpc, RpcError},
};
use light_address_program_test::LightProgramTest;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;

/// Seeds the counter program derives its address from.
pub fn counter_seeds(signer: &Pubkey) -> [&[u8]; 2] {
    [b"counter", signer.as_ref()]
}

pub fn counter_address(
    signer: &Pubkey,
    program_id: &Pubkey,
    address_tree: &AddressMerkleTreeAccounts,
) -> [u8; 32] {
    let (address, _) = derive_address(
        &counter_seeds(signer),
        &address_tree.merkle_tree.to_bytes(),
        &program_id.to_bytes(),
    )
    .unwrap();
    address
}

/// Requests a fresh proof for `signer`'s counter address and builds the
/// `create` instruction with the v1 layout.
pub async fn build_create_instruction(
    rpc: &LightProgramTest,
    signer: &Pubkey,
) -> Instruction {
    let address_tree = rpc.get_address_merkle_tree();
    let program_id = rpc.config.program_id;
    let address = counter_address(signer, &program_id, &address_tree);
    let proof = rpc
        .indexer()
        .get_validity_proof(
            Vec::new(),
            vec![AddressWithTree::new(address, &address_tree)],
            None,
        )
        .await
        .unwrap();
    create_account_instruction(
        program_id,
        *signer,
        proof,
        &AddressMerkleContext {
            address_merkle_tree_pubkey: address_tree.merkle_tree,
            address_queue_pubkey: address_tree.queue,
        },
        rpc.get_state_merkle_tree().merkle_tree,
        &PackedAccountsLayout::V1,
    )
    .unwrap()
}

pub async fn send(
    rpc: &mut LightProgramTest,
    instruction: Instruction,
    payer: &Keypair,
) -> Result<Signature, RpcError> {
    rpc.create_and_send_transaction(&[instruction], &payer.pubkey(), &[payer])
        .await
}

/// A payer funded with one SOL.
pub async fn funded_keypair(rpc: &mut LightProgramTest) -> Keypair {
    let keypair = Keypair::new();
    rpc.airdrop_lamports(&keypair.pubkey(), 1_000_000_000)
        .await
        .unwrap();
    keypair
}
