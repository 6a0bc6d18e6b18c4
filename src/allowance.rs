//! ERC20 allowance check and conditional approval.
//!
//! The one decision point in the tool: approve exactly when the current
//! allowance is below the required spend, otherwise submit nothing. The
//! check-then-approve sequence is not atomic against other spenders of the
//! same allowance; acceptable for a single-shot invocation.

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use anyhow::{Context, Result};
use tracing::info;

use crate::contracts::Erc20;
use crate::executor::{submit_call, TransactionOutcome};

/// Seam over the token contract so the balance pre-flight and the approval
/// decision are testable without a node.
#[allow(async_fn_in_trait)]
pub trait TokenSpender {
    async fn balance_of(&self, owner: Address) -> Result<U256>;
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256>;
    async fn approve(&self, spender: Address, amount: U256) -> Result<TransactionOutcome>;
}

/// Production [`TokenSpender`] backed by the bound ERC20 contract.
pub struct Erc20Spender<'a> {
    token: &'a Erc20,
    provider: &'a DynProvider,
}

impl<'a> Erc20Spender<'a> {
    pub fn new(token: &'a Erc20, provider: &'a DynProvider) -> Self {
        Self { token, provider }
    }
}

impl TokenSpender for Erc20Spender<'_> {
    async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.token
            .balanceOf(owner)
            .call()
            .await
            .context("failed to read token balance")
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        self.token
            .allowance(owner, spender)
            .call()
            .await
            .context("failed to read token allowance")
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TransactionOutcome> {
        let call = self.token.approve(spender, amount);
        submit_call(self.provider, call, "approve").await
    }
}

/// Make sure the spender may take `required` from `owner`.
///
/// Returns the approval outcome when one was submitted, `None` when the
/// existing allowance already suffices. Approval is idempotent, so a failure
/// anywhere in the pipeline simply propagates; there is nothing to roll back.
pub async fn ensure_allowance<T: TokenSpender>(
    token: &T,
    owner: Address,
    spender: Address,
    required: U256,
) -> Result<Option<TransactionOutcome>> {
    let current = token.allowance(owner, spender).await?;

    if current >= required {
        info!("allowance {current} covers required {required}, no approval needed");
        return Ok(None);
    }

    info!("allowance {current} below required {required}, submitting approval");
    let outcome = token.approve(spender, required).await?;
    Ok(Some(outcome))
}
