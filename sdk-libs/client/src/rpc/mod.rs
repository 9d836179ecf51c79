#![allow(clippy::result_large_err)]

pub mod client;
pub mod errors;
mod rpc_trait;

pub use client::{LightClient, RetryConfig};
pub use errors::{assert_rpc_error, RpcError};
pub use rpc_trait::{LightClientConfig, Rpc};
