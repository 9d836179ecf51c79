pub mod config;
mod processor;
mod rpc;

pub use config::{ProgramTestConfig, COUNTER_PROGRAM_ID};
pub use light_program_test::LightProgramTest;
