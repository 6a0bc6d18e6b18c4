//! Action execution: gas planning, submission and confirmation.
//!
//! Every on-chain write follows the same pipeline: estimate gas, read the
//! current gas price, submit with a 20%-buffered gas limit, block until the
//! node reports inclusion, and report the outcome. Buy additionally runs a
//! local balance pre-check and the allowance check before touching the market.

use alloy::contract::{CallBuilder, CallDecoder};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider};
use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::allowance::{ensure_allowance, Erc20Spender, TokenSpender};
use crate::contracts::{Erc20, Market};
use crate::token::TokenInfo;

/// The requested on-chain action with its typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Buy {
        market_id: U256,
        outcome_id: U256,
        value: U256,
        min_shares: U256,
    },
    Sell {
        market_id: U256,
        outcome_id: U256,
        value: U256,
        max_shares: U256,
    },
    ClaimWinnings {
        market_id: U256,
    },
}

impl Action {
    pub fn market_id(&self) -> U256 {
        match self {
            Action::Buy { market_id, .. }
            | Action::Sell { market_id, .. }
            | Action::ClaimWinnings { market_id } => *market_id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Buy { .. } => "buy",
            Action::Sell { .. } => "sell",
            Action::ClaimWinnings { .. } => "claimWinnings",
        }
    }
}

/// Result of one confirmed transaction.
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    pub hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
    pub gas_estimate: u64,
    pub gas_price: u128,
}

impl TransactionOutcome {
    pub fn gas_price_gwei(&self) -> f64 {
        self.gas_price as f64 / 1e9
    }
}

/// Gas limit with the 20% buffer applied, rounded up.
pub fn buffered_gas_limit(estimate: u64) -> u64 {
    estimate.saturating_mul(12).div_ceil(10)
}

/// Verify the signer can cover the requested spend.
pub fn check_balance(balance: U256, value: U256, info: &TokenInfo) -> Result<()> {
    if balance < value {
        bail!(
            "insufficient balance: have {}, need {}",
            info.format_amount(balance),
            info.format_amount(value)
        );
    }
    Ok(())
}

/// Buy pre-flight: the balance check, then the conditional approval.
///
/// A balance shortfall fails before the allowance is even read, so no
/// approval and no gas estimation are ever attempted for an unaffordable
/// buy. Returns the approval outcome when one was submitted.
pub async fn preflight_buy<T: TokenSpender>(
    token: &T,
    owner: Address,
    spender: Address,
    value: U256,
    info: &TokenInfo,
) -> Result<Option<TransactionOutcome>> {
    let balance = token.balance_of(owner).await?;
    check_balance(balance, value, info)?;
    ensure_allowance(token, owner, spender, value).await
}

/// Submit a prepared contract call through the estimate → submit → confirm
/// pipeline. Any estimation revert, rejection or failed receipt is an error.
pub async fn submit_call<P, D>(
    provider: &DynProvider,
    call: CallBuilder<P, D>,
    label: &str,
) -> Result<TransactionOutcome>
where
    P: Provider,
    D: CallDecoder,
{
    let gas_estimate = call
        .estimate_gas()
        .await
        .with_context(|| format!("gas estimation failed for {label}"))?;
    let gas_price = provider
        .get_gas_price()
        .await
        .context("failed to read gas price")?;
    let gas_limit = buffered_gas_limit(gas_estimate);

    info!(
        "{label}: gas estimate {gas_estimate} (limit {gas_limit}), gas price {:.2} gwei",
        gas_price as f64 / 1e9
    );

    let pending = call
        .gas(gas_limit)
        .gas_price(gas_price)
        .send()
        .await
        .with_context(|| format!("failed to submit {label} transaction"))?;
    let hash = *pending.tx_hash();
    println!("Submitted {label} transaction {hash}, waiting for confirmation...");

    let receipt = pending
        .get_receipt()
        .await
        .with_context(|| format!("confirmation failed for {label} transaction {hash}"))?;
    if !receipt.status() {
        bail!("{label} transaction {hash} reverted");
    }

    let outcome = TransactionOutcome {
        hash: receipt.transaction_hash,
        block_number: receipt.block_number.unwrap_or_default(),
        gas_used: receipt.gas_used,
        gas_estimate,
        gas_price,
    };
    debug!(
        "{label} confirmed in block {} using {} gas",
        outcome.block_number, outcome.gas_used
    );
    Ok(outcome)
}

/// Dispatches the requested action against the bound contracts.
pub struct Executor {
    market: Market,
    token: Erc20,
    provider: DynProvider,
    signer: Address,
    token_info: TokenInfo,
}

impl Executor {
    pub fn new(
        market: Market,
        token: Erc20,
        provider: DynProvider,
        signer: Address,
        token_info: TokenInfo,
    ) -> Self {
        Self {
            market,
            token,
            provider,
            signer,
            token_info,
        }
    }

    pub async fn execute(&self, action: &Action) -> Result<TransactionOutcome> {
        match *action {
            Action::Buy {
                market_id,
                outcome_id,
                value,
                min_shares,
            } => self.buy(market_id, outcome_id, value, min_shares).await,
            Action::Sell {
                market_id,
                outcome_id,
                value,
                max_shares,
            } => self.sell(market_id, outcome_id, value, max_shares).await,
            Action::ClaimWinnings { market_id } => self.claim_winnings(market_id).await,
        }
    }

    /// Buy outcome shares. Fails before any allowance check or gas estimation
    /// if the token balance does not cover the requested value.
    async fn buy(
        &self,
        market_id: U256,
        outcome_id: U256,
        value: U256,
        min_shares: U256,
    ) -> Result<TransactionOutcome> {
        let spender = *self.market.address();
        let gateway = Erc20Spender::new(&self.token, &self.provider);
        if let Some(approval) =
            preflight_buy(&gateway, self.signer, spender, value, &self.token_info).await?
        {
            println!(
                "Approval confirmed in block {} (tx {})",
                approval.block_number, approval.hash
            );
        } else {
            println!(
                "Allowance already covers {}",
                self.token_info.format_amount(value)
            );
        }

        let call = self.market.buy(market_id, outcome_id, min_shares, value);
        submit_call(&self.provider, call, "buy").await
    }

    /// Sell outcome shares. Share sufficiency is enforced by the chain, not
    /// checked locally.
    async fn sell(
        &self,
        market_id: U256,
        outcome_id: U256,
        value: U256,
        max_shares: U256,
    ) -> Result<TransactionOutcome> {
        let call = self.market.sell(market_id, outcome_id, value, max_shares);
        submit_call(&self.provider, call, "sell").await
    }

    async fn claim_winnings(&self, market_id: U256) -> Result<TransactionOutcome> {
        let call = self.market.claimWinnings(market_id);
        submit_call(&self.provider, call, "claimWinnings").await
    }
}
