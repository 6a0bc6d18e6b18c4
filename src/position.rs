//! User position reporting.
//!
//! Purely informational: the position is read before and after the main
//! action, and a failed read never aborts the run.

use alloy::primitives::{Address, U256};
use tracing::warn;

use crate::contracts::Market;
use crate::token::TokenInfo;

/// Snapshot of a user's stake in one market at query time.
#[derive(Debug, Clone)]
pub struct UserPosition {
    pub liquidity: U256,
    pub outcome_shares: Vec<U256>,
}

/// Read the user's liquidity and per-outcome shares.
///
/// A revert or RPC failure is logged and yields `None`; the caller continues.
pub async fn read_position(market: &Market, market_id: U256, user: Address) -> Option<UserPosition> {
    match market.getUserMarketShares(market_id, user).call().await {
        Ok(shares) => Some(UserPosition {
            liquidity: shares.liquidity,
            outcome_shares: shares.outcomeShares,
        }),
        Err(e) => {
            warn!("failed to read position for market {market_id}: {e}");
            None
        }
    }
}

/// Print a position snapshot, formatted with the discovered token decimals.
pub fn print_position(label: &str, position: Option<&UserPosition>, info: &TokenInfo) {
    match position {
        Some(pos) => {
            println!("{label}:");
            println!("  Liquidity: {}", info.format_amount(pos.liquidity));
            for (outcome, shares) in pos.outcome_shares.iter().enumerate() {
                println!("  Outcome {outcome}: {}", info.format_amount(*shares));
            }
        }
        None => println!("{label}: unavailable"),
    }
}
