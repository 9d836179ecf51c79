mod address_tree;
mod compressed_account;
pub mod prover;
mod root_history;
mod state;
mod state_tree;
mod test_indexer;

pub use address_tree::AddressMerkleTreeBundle;
pub use compressed_account::{
    CompressedAccount, CompressedAccountData, CompressedAccountWithMerkleContext,
    CounterCompressedAccount, COUNTER_ACCOUNT_DISCRIMINATOR,
};
pub use root_history::RootHistory;
pub use state::{TestState, TreeAccountKind};
pub use state_tree::StateMerkleTreeBundle;
pub use test_indexer::TestIndexer;
