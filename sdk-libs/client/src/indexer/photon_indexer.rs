use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, trace, warn};

use super::{
    base58::Base58Conversions, config::RetryConfig, AddressWithTree, CompressedProof, Hash,
    IndexerError, IndexerRpcConfig, ProofProvider, ValidityProofWithContext,
};

// Tested against a local validator in program-tests/create-address-test/tests/photon.rs.
pub struct PhotonIndexer {
    url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl Debug for PhotonIndexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotonIndexer")
            .field("url", &self.url)
            .finish()
    }
}

impl PhotonIndexer {
    pub fn new(url: String, api_key: Option<String>) -> Self {
        Self {
            url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn retry<F, Fut, T>(
        &self,
        config: RetryConfig,
        mut operation: F,
    ) -> Result<T, IndexerError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, IndexerError>>,
    {
        let max_retries = config.num_retries;
        let mut attempts = 0;
        let mut delay_ms = config.delay_ms;
        let max_delay_ms = config.max_delay_ms;

        loop {
            attempts += 1;

            trace!("Attempt {}/{}: Executing operation", attempts, max_retries);
            let result = operation().await;

            match result {
                Ok(value) => {
                    trace!("Attempt {}/{}: Operation succeeded.", attempts, max_retries);
                    return Ok(value);
                }
                Err(e) => {
                    let is_retryable = match &e {
                        IndexerError::ApiError(_) => {
                            warn!("API Error: {}", e);
                            true
                        }
                        IndexerError::PhotonError { .. } => {
                            warn!("Operation failed, checking if retryable...");
                            true
                        }
                        IndexerError::IndexerNotSyncedToSlot => true,
                        _ => false,
                    };

                    if is_retryable && attempts < max_retries {
                        warn!(
                            "Attempt {}/{}: Operation failed. Retrying",
                            attempts, max_retries
                        );

                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms = std::cmp::min(delay_ms * 2, max_delay_ms);
                    } else {
                        if is_retryable {
                            error!("Operation failed after max retries.");
                        } else {
                            error!("Operation failed with non-retryable error.");
                        }
                        return Err(e);
                    }
                }
            }
        }
    }

    async fn send_request<P, R>(&self, method: &str, params: &P) -> Result<Context<R>, IndexerError>
    where
        P: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id: "light-address-client",
            method,
            params,
        };
        let mut request = self.client.post(&self.url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("api-key", api_key)]);
        }
        let response: JsonRpcResponse<Context<R>> = request.send().await?.json().await?;
        if let Some(error) = response.error {
            return Err(IndexerError::PhotonError {
                context: method.to_string(),
                message: error.message,
            });
        }
        response.result.ok_or_else(|| IndexerError::MissingResult {
            context: method.to_string(),
        })
    }
}

#[async_trait]
impl ProofProvider for PhotonIndexer {
    async fn get_validity_proof(
        &self,
        hashes: Vec<Hash>,
        new_addresses_with_trees: Vec<AddressWithTree>,
        config: Option<IndexerRpcConfig>,
    ) -> Result<ValidityProofWithContext, IndexerError> {
        let config = config.unwrap_or_default();
        let params = GetValidityProofParams {
            hashes: hashes.iter().map(|x| x.to_base58()).collect(),
            new_addresses_with_trees: new_addresses_with_trees
                .iter()
                .map(|x| ApiAddressWithTree {
                    address: x.address.to_base58(),
                    tree: x.tree.to_base58(),
                })
                .collect(),
        };
        self.retry(config.retry_config.clone(), || async {
            let response: Context<ApiValidityProof> =
                self.send_request("getValidityProof", &params).await?;
            if response.context.slot < config.slot {
                return Err(IndexerError::IndexerNotSyncedToSlot);
            }
            response
                .value
                .into_validity_proof(hashes.len(), new_addresses_with_trees.len())
        })
        .await
    }
}

#[derive(Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    params: &'a P,
}

#[derive(Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    message: String,
}

#[derive(Deserialize)]
struct Context<R> {
    context: SlotContext,
    value: R,
}

#[derive(Deserialize)]
struct SlotContext {
    slot: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GetValidityProofParams {
    hashes: Vec<String>,
    new_addresses_with_trees: Vec<ApiAddressWithTree>,
}

#[derive(Serialize)]
struct ApiAddressWithTree {
    address: String,
    tree: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiValidityProof {
    compressed_proof: Option<ApiCompressedProof>,
    root_indices: Vec<u64>,
}

#[derive(Deserialize)]
struct ApiCompressedProof {
    a: Vec<u8>,
    b: Vec<u8>,
    c: Vec<u8>,
}

impl ApiValidityProof {
    fn into_validity_proof(
        self,
        num_accounts: usize,
        num_addresses: usize,
    ) -> Result<ValidityProofWithContext, IndexerError> {
        let proof = self
            .compressed_proof
            .map(|proof| -> Result<CompressedProof, IndexerError> {
                Ok(CompressedProof {
                    a: proof
                        .a
                        .try_into()
                        .map_err(|_| IndexerError::InvalidResponseData)?,
                    b: proof
                        .b
                        .try_into()
                        .map_err(|_| IndexerError::InvalidResponseData)?,
                    c: proof
                        .c
                        .try_into()
                        .map_err(|_| IndexerError::InvalidResponseData)?,
                })
            })
            .transpose()?;
        let root_indices = self
            .root_indices
            .into_iter()
            .map(|x| u16::try_from(x).map_err(|_| IndexerError::InvalidResponseData))
            .collect::<Result<Vec<_>, _>>()?;
        ValidityProofWithContext::new(proof.into(), root_indices, num_accounts, num_addresses)
    }
}
