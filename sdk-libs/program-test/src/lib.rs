//! In-memory test environment for compressed address creation.
//!
//! [`LightProgramTest`] executes the counter program's `create` instruction,
//! [`TestIndexer`] serves validity proofs for the same state and
//! [`forester::TestForester`] moves queued addresses into the address tree.

pub mod accounts;
pub mod errors;
pub mod forester;
pub mod indexer;
pub mod logging;
pub mod program_test;

pub use errors::ProgramTestError;
pub use indexer::TestIndexer;
pub use program_test::{LightProgramTest, ProgramTestConfig, COUNTER_PROGRAM_ID};
