//! RPC connection and signing identity.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use tracing::debug;

use crate::units;

/// An established node connection with a signing identity attached.
pub struct Chain {
    pub provider: DynProvider,
    pub signer: Address,
}

/// Derive a signer from the private key and connect it to the node.
///
/// Also reads the signer's native balance so the caller can display it;
/// the balance is informational only and never validated against a minimum.
pub async fn connect(rpc_url: &str, private_key: &str) -> Result<Chain> {
    let signer: PrivateKeySigner = private_key
        .trim()
        .parse()
        .context("failed to parse private key")?;
    let address = signer.address();
    debug!("derived signer address {address}");

    let wallet = EthereumWallet::from(signer);
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect(rpc_url)
        .await
        .with_context(|| format!("failed to connect to RPC endpoint {rpc_url}"))?
        .erased();

    Ok(Chain {
        provider,
        signer: address,
    })
}

impl Chain {
    /// Native-currency balance of the signer, formatted for display.
    pub async fn native_balance_display(&self) -> Result<String> {
        let balance = self
            .provider
            .get_balance(self.signer)
            .await
            .context("failed to read native balance")?;
        Ok(units::format_units(balance, 18))
    }
}
