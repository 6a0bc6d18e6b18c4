//! Payment-token metadata.

use alloy::primitives::U256;
use anyhow::{Context, Result};

use crate::contracts::Erc20;
use crate::units;

/// Token metadata fetched once per run; all display formatting derives from it.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl TokenInfo {
    /// Format a base-unit amount with the token symbol.
    pub fn format_amount(&self, value: U256) -> String {
        format!("{} {}", units::format_units(value, self.decimals), self.symbol)
    }
}

/// Read `decimals`, `symbol` and `name` from the token contract.
///
/// The three reads are independent, so they are issued concurrently and
/// joined before proceeding. This is the only concurrency in the program.
pub async fn fetch_token_info(token: &Erc20) -> Result<TokenInfo> {
    // The builders must outlive the join; the call futures borrow them.
    let decimals_call = token.decimals();
    let symbol_call = token.symbol();
    let name_call = token.name();
    let (decimals, symbol, name) =
        tokio::try_join!(decimals_call.call(), symbol_call.call(), name_call.call())
            .context("failed to read token metadata")?;

    Ok(TokenInfo {
        decimals,
        symbol,
        name,
    })
}
