use std::fmt::Debug;

use async_trait::async_trait;
use solana_commitment_config::CommitmentConfig;
use solana_hash::Hash;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;

use super::errors::RpcError;

#[derive(Debug, Clone)]
pub struct LightClientConfig {
    pub url: String,
    pub commitment_config: Option<CommitmentConfig>,
    /// Photon indexer url. No indexer is attached if `None`.
    pub photon_url: Option<String>,
    pub api_key: Option<String>,
}

impl LightClientConfig {
    pub fn new(url: String, photon_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            url,
            commitment_config: Some(CommitmentConfig::confirmed()),
            photon_url,
            api_key,
        }
    }

    /// Local validator with a Photon indexer on its default port.
    pub fn local() -> Self {
        Self {
            url: "http://127.0.0.1:8899".to_string(),
            commitment_config: Some(CommitmentConfig::processed()),
            photon_url: Some("http://127.0.0.1:8784".to_string()),
            api_key: None,
        }
    }

    pub fn devnet(api_key: Option<String>) -> Self {
        Self {
            url: "https://api.devnet.solana.com".to_string(),
            commitment_config: Some(CommitmentConfig::confirmed()),
            photon_url: Some("https://devnet.helius-rpc.com".to_string()),
            api_key,
        }
    }
}

/// Transaction submission backend.
///
/// Implemented by [`LightClient`](super::LightClient) for live clusters and
/// by the in-memory test runtime.
#[async_trait]
pub trait Rpc: Send + Sync + Debug + 'static {
    fn get_payer(&self) -> &Keypair;
    fn get_url(&self) -> String;

    async fn get_latest_blockhash(&mut self) -> Result<Hash, RpcError>;

    /// Submits a signed transaction and waits until it is confirmed or
    /// rejected.
    async fn process_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, RpcError>;

    async fn create_and_send_transaction<'a>(
        &'a mut self,
        instructions: &'a [Instruction],
        payer: &'a Pubkey,
        signers: &'a [&'a Keypair],
    ) -> Result<Signature, RpcError> {
        let blockhash = self.get_latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(instructions, Some(payer));
        transaction.try_sign(signers, blockhash)?;
        self.process_transaction(transaction).await
    }

    async fn airdrop_lamports(&mut self, to: &Pubkey, lamports: u64)
        -> Result<Signature, RpcError>;

    async fn get_balance(&mut self, pubkey: &Pubkey) -> Result<u64, RpcError>;
}
