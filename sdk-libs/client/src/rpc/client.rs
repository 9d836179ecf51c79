use std::{
    fmt::{Debug, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use solana_commitment_config::CommitmentConfig;
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_rpc_client::rpc_client::RpcClient;
use solana_signature::Signature;
use solana_transaction::Transaction;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::{errors::RpcError, rpc_trait::LightClientConfig, Rpc};
use crate::indexer::PhotonIndexer;

#[derive(Clone, Debug, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 10,
            retry_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(60),
        }
    }
}

/// [`Rpc`] backed by a Solana json rpc node, optionally paired with a Photon
/// indexer that serves validity proofs.
///
/// The underlying `RpcClient` blocks via `tokio::task::block_in_place`, so
/// calls must run on a multi-thread tokio runtime.
pub struct LightClient {
    pub client: RpcClient,
    pub payer: Keypair,
    pub retry_config: RetryConfig,
    pub indexer: Option<PhotonIndexer>,
}

impl Debug for LightClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LightClient {{ client: {:?} }}", self.client.url())
    }
}

impl LightClient {
    pub fn new(config: LightClientConfig) -> Self {
        Self::new_with_retry(config, None)
    }

    pub fn new_with_retry(config: LightClientConfig, retry_config: Option<RetryConfig>) -> Self {
        let commitment_config = config
            .commitment_config
            .unwrap_or(CommitmentConfig::confirmed());
        let client = RpcClient::new_with_commitment(config.url, commitment_config);
        let indexer = config
            .photon_url
            .map(|url| PhotonIndexer::new(url, config.api_key));
        Self {
            client,
            payer: Keypair::new(),
            retry_config: retry_config.unwrap_or_default(),
            indexer,
        }
    }

    pub fn with_payer(mut self, payer: Keypair) -> Self {
        self.payer = payer;
        self
    }

    pub fn indexer(&self) -> Result<&PhotonIndexer, RpcError> {
        self.indexer
            .as_ref()
            .ok_or_else(|| RpcError::CustomError("Indexer not initialized".to_string()))
    }

    /// Transport failures are retried, program rejections are returned as is.
    fn should_retry(error: &RpcError) -> bool {
        matches!(error, RpcError::ClientError(_))
    }

    async fn retry<F, Fut, T>(&self, operation: F) -> Result<T, RpcError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, RpcError>>,
    {
        let mut attempts = 0;
        let start_time = Instant::now();
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !Self::should_retry(&e) {
                        return Err(e);
                    }
                    attempts += 1;
                    if attempts >= self.retry_config.max_retries
                        || start_time.elapsed() >= self.retry_config.timeout
                    {
                        return Err(e);
                    }
                    warn!(
                        "Operation failed, retrying in {:?} (attempt {}/{}): {:?}",
                        self.retry_config.retry_delay,
                        attempts,
                        self.retry_config.max_retries,
                        e
                    );
                    tokio::task::yield_now().await;
                    sleep(self.retry_config.retry_delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl Rpc for LightClient {
    fn get_payer(&self) -> &Keypair {
        &self.payer
    }

    fn get_url(&self) -> String {
        self.client.url()
    }

    async fn get_latest_blockhash(&mut self) -> Result<Hash, RpcError> {
        self.retry(|| async {
            self.client
                .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
                .map(|(blockhash, _)| blockhash)
                .map_err(RpcError::from)
        })
        .await
    }

    async fn process_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Signature, RpcError> {
        let signature = self
            .retry(|| async {
                self.client
                    .send_and_confirm_transaction(&transaction)
                    .map_err(RpcError::from)
            })
            .await?;
        debug!("Confirmed transaction {}", signature);
        Ok(signature)
    }

    async fn airdrop_lamports(
        &mut self,
        to: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, RpcError> {
        self.retry(|| async {
            let signature = self.client.request_airdrop(to, lamports)?;
            self.retry(|| async {
                if self
                    .client
                    .confirm_transaction_with_commitment(&signature, self.client.commitment())?
                    .value
                {
                    Ok(())
                } else {
                    Err(RpcError::CustomError("Airdrop not confirmed".into()))
                }
            })
            .await?;

            Ok(signature)
        })
        .await
    }

    async fn get_balance(&mut self, pubkey: &Pubkey) -> Result<u64, RpcError> {
        self.retry(|| async { self.client.get_balance(pubkey).map_err(RpcError::from) })
            .await
    }
}

#[cfg(test)]
mod test {
    use solana_signer::Signer;

    use super::*;

    #[test]
    fn test_config_presets() {
        let client = LightClient::new(LightClientConfig::local());
        assert_eq!(client.get_url(), "http://127.0.0.1:8899");
        assert_eq!(client.indexer().unwrap().url(), "http://127.0.0.1:8784");

        let client = LightClient::new(LightClientConfig::new(
            "http://127.0.0.1:8899".to_string(),
            None,
            None,
        ));
        assert!(client.indexer().is_err());
    }

    #[test]
    fn test_with_payer() {
        let payer = Keypair::new();
        let pubkey = payer.pubkey();
        let client = LightClient::new(LightClientConfig::local()).with_payer(payer);
        assert_eq!(client.get_payer().pubkey(), pubkey);
    }
}
