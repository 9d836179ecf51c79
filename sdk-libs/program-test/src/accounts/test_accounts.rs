use light_address_client::{
    constants::{ADDRESS_QUEUE_V1, ADDRESS_TREE_V1, NULLIFIER_QUEUE_V1, STATE_TREE_V1},
    indexer::{AddressMerkleTreeAccounts, StateMerkleTreeAccounts},
};

/// Tree accounts the test environment is initialized with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAccounts {
    pub v1_address_trees: Vec<AddressMerkleTreeAccounts>,
    pub v1_state_trees: Vec<StateMerkleTreeAccounts>,
}

impl TestAccounts {
    /// The public v1 trees, so that addresses derived in tests equal the ones
    /// derived against a live cluster.
    pub fn get_program_test_test_accounts() -> TestAccounts {
        TestAccounts {
            v1_address_trees: vec![AddressMerkleTreeAccounts {
                merkle_tree: ADDRESS_TREE_V1,
                queue: ADDRESS_QUEUE_V1,
            }],
            v1_state_trees: vec![StateMerkleTreeAccounts {
                merkle_tree: STATE_TREE_V1,
                nullifier_queue: NULLIFIER_QUEUE_V1,
            }],
        }
    }
}
