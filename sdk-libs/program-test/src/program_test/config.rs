use light_address_client::constants::{ADDRESS_MERKLE_TREE_ROOTS, STATE_MERKLE_TREE_ROOTS};
use solana_pubkey::{pubkey, Pubkey};

/// Counter program that owns the created compressed accounts.
pub const COUNTER_PROGRAM_ID: Pubkey = pubkey!("FF2MW9aoDAiUUkZtuCkAWzyNnHjY4DjKxB4F35hn38Pq");

#[derive(Debug, Clone)]
pub struct ProgramTestConfig {
    /// Program whose `create` instruction the runtime executes.
    pub program_id: Pubkey,
    /// Number of address tree roots a proof can reference before it goes
    /// stale.
    pub address_tree_root_history: usize,
    pub state_tree_root_history: usize,
    pub log_failed_tx: bool,
    /// Funded to the payer on startup.
    pub airdrop_lamports: u64,
}

impl ProgramTestConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            ..Default::default()
        }
    }

    pub fn with_address_tree_root_history(mut self, address_tree_root_history: usize) -> Self {
        self.address_tree_root_history = address_tree_root_history;
        self
    }
}

impl Default for ProgramTestConfig {
    fn default() -> Self {
        Self {
            program_id: COUNTER_PROGRAM_ID,
            address_tree_root_history: ADDRESS_MERKLE_TREE_ROOTS,
            state_tree_root_history: STATE_MERKLE_TREE_ROOTS,
            log_failed_tx: true,
            airdrop_lamports: 100_000_000_000,
        }
    }
}
