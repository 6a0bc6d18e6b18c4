//! Configuration loaded from the environment.

use alloy::primitives::Address;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;

/// Tool configuration, constructed once in the entry point and passed down.
///
/// The three endpoints are required: there are no defaults and no partial
/// operation, so absence of any of them is an error the caller turns into a
/// non-zero exit before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of an Ethereum-compatible node
    pub rpc_url: String,

    /// Address of the prediction-market contract
    pub market_address: Address,

    /// Address of the ERC20 payment token
    pub token_address: Address,

    /// Directory holding the two ABI documents
    pub abi_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let rpc_url = require_var("RPC_URL")?;

        let market_address = require_var("PREDICTION_MARKET_ADDRESS")?
            .parse()
            .context("PREDICTION_MARKET_ADDRESS is not a valid address")?;

        let token_address = require_var("TOKEN_ADDRESS")?
            .parse()
            .context("TOKEN_ADDRESS is not a valid address")?;

        let abi_dir = env::var("ABI_DIR")
            .unwrap_or_else(|_| "abis".to_string())
            .into();

        Ok(Self {
            rpc_url,
            market_address,
            token_address,
            abi_dir,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow!("{name} must be set"))
}
