//! Prediction-Market Trading CLI
//!
//! A command-line tool that issues `buy`, `sell` and `claimWinnings`
//! transactions against a fixed prediction-market contract, paying with an
//! ERC20 token. Each invocation is single-shot: resolve the signer, validate
//! the on-disk ABI documents, read token metadata and the current position,
//! conditionally approve the spend, submit the requested transaction with a
//! 20%-buffered gas limit, wait for inclusion, and print before/after state.

pub mod abi;
pub mod allowance;
pub mod chain;
pub mod config;
pub mod contracts;
pub mod executor;
pub mod position;
pub mod token;
pub mod units;

pub use config::Config;
pub use executor::{Action, Executor, TransactionOutcome};
pub use position::UserPosition;
pub use token::TokenInfo;
