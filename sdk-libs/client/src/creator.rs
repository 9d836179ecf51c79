//! Address creation pipeline.
//!
//! `DERIVE -> REQUEST PROOF -> BUILD TRANSACTION -> SUBMIT -> CONFIRMED | REJECTED`
//!
//! A rejection whose custom error code is listed in
//! [`StaleProofRetryPolicy::retryable_error_codes`] restarts at the proof
//! request with the same address until `max_attempts` is reached.

use std::time::Duration;

use light_address::{v1::derive_address, AddressSeed, CompressedAddress};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use tracing::{debug, info, warn};

use crate::{
    constants::{
        ADDRESS_QUEUE_V1, ADDRESS_TREE_V1, PROOF_VERIFICATION_FAILED_ERROR_CODE, STATE_TREE_V1,
    },
    error::{CreateAddressError, CreationStage},
    indexer::{
        AddressMerkleTreeAccounts, AddressWithTree, IndexerRpcConfig, ProofProvider,
    },
    instruction::{create_account_instruction, AddressMerkleContext, PackedAccountsLayout},
    rpc::{Rpc, RpcError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleProofRetryPolicy {
    /// Total submissions, including the first one.
    pub max_attempts: u32,
    pub delay_ms: u64,
    pub max_delay_ms: u64,
    pub retryable_error_codes: Vec<u32>,
}

impl Default for StaleProofRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            delay_ms: 400,
            max_delay_ms: 8000,
            retryable_error_codes: vec![PROOF_VERIFICATION_FAILED_ERROR_CODE],
        }
    }
}

impl StaleProofRetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    pub fn is_retryable(&self, error: &RpcError) -> bool {
        error
            .custom_error_code()
            .map(|code| self.retryable_error_codes.contains(&code))
            .unwrap_or(false)
    }

    /// Delay before attempt `attempt + 1`, doubling up to `max_delay_ms`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(
            self.delay_ms
                .saturating_mul(factor)
                .min(self.max_delay_ms),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAddressConfig {
    /// Program that owns the new compressed account and whose `create`
    /// instruction is invoked.
    pub program_id: Pubkey,
    pub address_tree: AddressMerkleTreeAccounts,
    pub output_state_tree: Pubkey,
    pub layout: PackedAccountsLayout,
    pub retry: StaleProofRetryPolicy,
    pub indexer_config: Option<IndexerRpcConfig>,
}

impl CreateAddressConfig {
    pub fn new(
        program_id: Pubkey,
        address_tree: AddressMerkleTreeAccounts,
        output_state_tree: Pubkey,
    ) -> Self {
        Self {
            program_id,
            address_tree,
            output_state_tree,
            layout: PackedAccountsLayout::V1,
            retry: StaleProofRetryPolicy::default(),
            indexer_config: None,
        }
    }

    /// Default v1 address tree, address queue and state tree.
    pub fn default_v1(program_id: Pubkey) -> Self {
        Self::new(
            program_id,
            AddressMerkleTreeAccounts {
                merkle_tree: ADDRESS_TREE_V1,
                queue: ADDRESS_QUEUE_V1,
            },
            STATE_TREE_V1,
        )
    }

    pub fn with_retry(mut self, retry: StaleProofRetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_layout(mut self, layout: PackedAccountsLayout) -> Self {
        self.layout = layout;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedAddress {
    pub address: CompressedAddress,
    pub address_seed: AddressSeed,
    pub signature: Signature,
    pub attempts: u32,
}

#[derive(Debug, Clone)]
pub struct AddressCreator {
    config: CreateAddressConfig,
}

impl AddressCreator {
    pub fn new(config: CreateAddressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CreateAddressConfig {
        &self.config
    }

    pub fn derive(
        &self,
        seeds: &[&[u8]],
    ) -> Result<(CompressedAddress, AddressSeed), CreateAddressError> {
        Ok(derive_address(
            seeds,
            &self.config.address_tree.merkle_tree.to_bytes(),
            &self.config.program_id.to_bytes(),
        )?)
    }

    /// Creates a compressed account at the address derived from `seeds`.
    ///
    /// `payer` signs and pays for the transaction.
    pub async fn create<R, P>(
        &self,
        rpc: &mut R,
        proof_provider: &P,
        payer: &Keypair,
        seeds: &[&[u8]],
    ) -> Result<CreatedAddress, CreateAddressError>
    where
        R: Rpc,
        P: ProofProvider + ?Sized,
    {
        let (address, address_seed) = self.derive(seeds)?;
        debug!(
            stage = %CreationStage::Derive,
            address = ?address,
            "Derived address"
        );

        let address_merkle_context = AddressMerkleContext {
            address_merkle_tree_pubkey: self.config.address_tree.merkle_tree,
            address_queue_pubkey: self.config.address_tree.queue,
        };
        let max_attempts = self.config.retry.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;

            debug!(stage = %CreationStage::RequestProof, attempt = attempts);
            let proof = proof_provider
                .get_validity_proof(
                    Vec::new(),
                    vec![AddressWithTree::new(address, &self.config.address_tree)],
                    self.config.indexer_config.clone(),
                )
                .await?;

            debug!(
                stage = %CreationStage::BuildTransaction,
                root_indices = ?proof.root_indices
            );
            let instruction = create_account_instruction(
                self.config.program_id,
                payer.pubkey(),
                proof,
                &address_merkle_context,
                self.config.output_state_tree,
                &self.config.layout,
            )?;

            debug!(stage = %CreationStage::Submit, attempt = attempts);
            match rpc
                .create_and_send_transaction(&[instruction], &payer.pubkey(), &[payer])
                .await
            {
                Ok(signature) => {
                    info!(
                        stage = %CreationStage::Confirmed,
                        %signature,
                        attempts,
                        "Created compressed account"
                    );
                    return Ok(CreatedAddress {
                        address,
                        address_seed,
                        signature,
                        attempts,
                    });
                }
                Err(e) if attempts < max_attempts && self.config.retry.is_retryable(&e) => {
                    let delay = self.config.retry.delay(attempts);
                    warn!(
                        "Transaction rejected with a stale proof, retrying in {:?} (attempt {}/{}): {:?}",
                        delay, attempts, max_attempts, e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    let error = CreateAddressError::Submit {
                        attempts,
                        source: e,
                    };
                    warn!(stage = %error.stage(), "{}", error);
                    return Err(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::{
        collections::VecDeque,
        sync::atomic::{AtomicU16, Ordering},
    };

    use async_trait::async_trait;
    use solana_hash::Hash;
    use solana_instruction::error::InstructionError;
    use solana_transaction::Transaction;
    use solana_transaction_error::TransactionError;

    use super::*;
    use crate::{
        constants::ELEMENT_ALREADY_EXISTS_ERROR_CODE,
        indexer::{CompressedProof, Hash as IndexerHash, IndexerError, ValidityProofWithContext},
        instruction::CreateInstructionData,
    };

    /// Returns root index `n` on the `n`-th request.
    #[derive(Debug, Default)]
    struct CountingProofProvider {
        requests: AtomicU16,
    }

    #[async_trait]
    impl ProofProvider for CountingProofProvider {
        async fn get_validity_proof(
            &self,
            hashes: Vec<IndexerHash>,
            new_addresses_with_trees: Vec<AddressWithTree>,
            _config: Option<IndexerRpcConfig>,
        ) -> Result<ValidityProofWithContext, IndexerError> {
            let root_index = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
            ValidityProofWithContext::new(
                CompressedProof::default().into(),
                vec![root_index; hashes.len() + new_addresses_with_trees.len()],
                hashes.len(),
                new_addresses_with_trees.len(),
            )
        }
    }

    #[derive(Debug)]
    struct MockRpc {
        payer: Keypair,
        responses: VecDeque<Option<u32>>,
        submitted: Vec<Transaction>,
    }

    impl MockRpc {
        /// `None` confirms, `Some(code)` rejects with a custom error.
        fn new(responses: Vec<Option<u32>>) -> Self {
            Self {
                payer: Keypair::new(),
                responses: responses.into(),
                submitted: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl Rpc for MockRpc {
        fn get_payer(&self) -> &Keypair {
            &self.payer
        }

        fn get_url(&self) -> String {
            "mock".to_string()
        }

        async fn get_latest_blockhash(&mut self) -> Result<Hash, RpcError> {
            Ok(Hash::new_from_array([7; 32]))
        }

        async fn process_transaction(
            &mut self,
            transaction: Transaction,
        ) -> Result<Signature, RpcError> {
            let signature = transaction.signatures[0];
            self.submitted.push(transaction);
            match self.responses.pop_front().flatten() {
                None => Ok(signature),
                Some(code) => Err(TransactionError::InstructionError(
                    0,
                    InstructionError::Custom(code),
                )
                .into()),
            }
        }

        async fn airdrop_lamports(
            &mut self,
            _to: &Pubkey,
            _lamports: u64,
        ) -> Result<Signature, RpcError> {
            Ok(Signature::from([0u8; 64]))
        }

        async fn get_balance(&mut self, _pubkey: &Pubkey) -> Result<u64, RpcError> {
            Ok(0)
        }
    }

    fn root_index_of(transaction: &Transaction) -> u16 {
        let data = &transaction.message.instructions[0].data;
        CreateInstructionData::try_from_instruction_data(data)
            .unwrap()
            .address_merkle_context
            .root_index
    }

    fn retry_policy(max_attempts: u32) -> StaleProofRetryPolicy {
        StaleProofRetryPolicy {
            delay_ms: 0,
            ..StaleProofRetryPolicy::new(max_attempts)
        }
    }

    #[tokio::test]
    async fn test_create_confirmed() {
        let program_id = Pubkey::new_unique();
        let creator = AddressCreator::new(CreateAddressConfig::default_v1(program_id));
        let mut rpc = MockRpc::new(vec![None]);
        let payer = Keypair::new();

        let created = creator
            .create(
                &mut rpc,
                &CountingProofProvider::default(),
                &payer,
                &[b"counter", payer.pubkey().as_ref()],
            )
            .await
            .unwrap();

        let (address, address_seed) = derive_address(
            &[b"counter", payer.pubkey().as_ref()],
            &ADDRESS_TREE_V1.to_bytes(),
            &program_id.to_bytes(),
        )
        .unwrap();
        assert_eq!(created.address, address);
        assert_eq!(created.address_seed, address_seed);
        assert_eq!(created.attempts, 1);
        assert_eq!(created.signature, rpc.submitted[0].signatures[0]);
        assert_eq!(rpc.submitted[0].message.account_keys[0], payer.pubkey());
        assert_eq!(root_index_of(&rpc.submitted[0]), 1);
    }

    #[tokio::test]
    async fn test_stale_proof_without_retry() {
        let creator =
            AddressCreator::new(CreateAddressConfig::default_v1(Pubkey::new_unique()));
        let mut rpc = MockRpc::new(vec![Some(PROOF_VERIFICATION_FAILED_ERROR_CODE), None]);
        let payer = Keypair::new();

        let error = creator
            .create(&mut rpc, &CountingProofProvider::default(), &payer, &[b"seed"])
            .await
            .unwrap_err();
        assert_eq!(error.stage(), CreationStage::Rejected);
        assert_eq!(
            error.custom_error_code(),
            Some(PROOF_VERIFICATION_FAILED_ERROR_CODE)
        );
        assert!(matches!(error, CreateAddressError::Submit { attempts: 1, .. }));
        assert_eq!(rpc.submitted.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_proof_retry_refreshes_proof() {
        let creator = AddressCreator::new(
            CreateAddressConfig::default_v1(Pubkey::new_unique()).with_retry(retry_policy(3)),
        );
        let mut rpc = MockRpc::new(vec![
            Some(PROOF_VERIFICATION_FAILED_ERROR_CODE),
            Some(PROOF_VERIFICATION_FAILED_ERROR_CODE),
            None,
        ]);
        let payer = Keypair::new();

        let created = creator
            .create(&mut rpc, &CountingProofProvider::default(), &payer, &[b"seed"])
            .await
            .unwrap();
        assert_eq!(created.attempts, 3);
        let root_indices = rpc.submitted.iter().map(root_index_of).collect::<Vec<_>>();
        assert_eq!(root_indices, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_retry_exhausted() {
        let creator = AddressCreator::new(
            CreateAddressConfig::default_v1(Pubkey::new_unique()).with_retry(retry_policy(2)),
        );
        let mut rpc = MockRpc::new(vec![
            Some(PROOF_VERIFICATION_FAILED_ERROR_CODE),
            Some(PROOF_VERIFICATION_FAILED_ERROR_CODE),
            None,
        ]);

        let error = creator
            .create(&mut rpc, &CountingProofProvider::default(), &Keypair::new(), &[b"seed"])
            .await
            .unwrap_err();
        assert!(matches!(error, CreateAddressError::Submit { attempts: 2, .. }));
        assert_eq!(rpc.submitted.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_address_is_terminal() {
        let creator = AddressCreator::new(
            CreateAddressConfig::default_v1(Pubkey::new_unique()).with_retry(retry_policy(5)),
        );
        let mut rpc = MockRpc::new(vec![Some(ELEMENT_ALREADY_EXISTS_ERROR_CODE), None]);

        let error = creator
            .create(&mut rpc, &CountingProofProvider::default(), &Keypair::new(), &[b"seed"])
            .await
            .unwrap_err();
        assert_eq!(
            error.custom_error_code(),
            Some(ELEMENT_ALREADY_EXISTS_ERROR_CODE)
        );
        assert_eq!(rpc.submitted.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_seeds_fail_before_io() {
        let creator =
            AddressCreator::new(CreateAddressConfig::default_v1(Pubkey::new_unique()));
        let mut rpc = MockRpc::new(vec![None]);
        let proof_provider = CountingProofProvider::default();

        let error = creator
            .create(&mut rpc, &proof_provider, &Keypair::new(), &[])
            .await
            .unwrap_err();
        assert_eq!(error.stage(), CreationStage::Derive);
        assert_eq!(proof_provider.requests.load(Ordering::SeqCst), 0);
        assert!(rpc.submitted.is_empty());
    }

    #[test]
    fn test_retry_delay() {
        let policy = StaleProofRetryPolicy::default();
        assert_eq!(policy.delay(1), Duration::from_millis(400));
        assert_eq!(policy.delay(2), Duration::from_millis(800));
        assert_eq!(policy.delay(10), Duration::from_millis(8000));
        assert_eq!(policy.max_attempts, 1);
    }
}
