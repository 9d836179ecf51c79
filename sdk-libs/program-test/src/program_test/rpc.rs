use async_trait::async_trait;
use light_address::Keccak;
use light_address_client::rpc::{Rpc, RpcError};
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;

use crate::program_test::LightProgramTest;

#[async_trait]
impl Rpc for LightProgramTest {
    fn get_payer(&self) -> &Keypair {
        &self.payer
    }

    fn get_url(&self) -> String {
        "get_url doesn't make sense for LightProgramTest".to_string()
    }

    async fn get_latest_blockhash(&mut self) -> Result<Hash, RpcError> {
        let slot = self.get_slot().await;
        Ok(Hash::new_from_array(Keccak::hash(&slot.to_le_bytes())))
    }

    async fn process_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, RpcError> {
        self.execute_transaction(transaction).await
    }

    async fn airdrop_lamports(
        &mut self,
        to: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, RpcError> {
        let mut state = self.state().write().await;
        let balance = state.lamports.entry(*to).or_default();
        *balance = balance
            .checked_add(lamports)
            .ok_or_else(|| RpcError::CustomError("Lamports overflow".to_string()))?;
        state.transaction_counter += 1;

        let counter = state.transaction_counter.to_le_bytes();
        let mut signature = [0u8; 64];
        signature[..32].copy_from_slice(&Keccak::hashv(&[b"airdrop", to.as_ref(), &counter]));
        signature[32..].copy_from_slice(&Keccak::hashv(&[to.as_ref(), &counter]));
        Ok(Signature::from(signature))
    }

    async fn get_balance(&mut self, pubkey: &Pubkey) -> Result<u64, RpcError> {
        Ok(self.state().read().await.balance(pubkey))
    }
}
