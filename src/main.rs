//! Prediction-Market Trading CLI
//!
//! Issues buy, sell and claimWinnings transactions against a fixed
//! prediction-market contract using an ERC20 token for payment.

use alloy::primitives::U256;
use anyhow::Result;
use clap::{Parser, Subcommand};
use prediction_cli::contracts::{IERC20, IPredictionMarket};
use prediction_cli::{abi, chain, position, token, Action, Config, Executor};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "prediction-cli")]
#[command(about = "Trade on a prediction-market contract with ERC20 collateral")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Buy outcome shares with the payment token
    Buy {
        /// Private key of the signing account
        private_key: String,

        /// Market identifier
        #[arg(value_parser = parse_u256)]
        market_id: U256,

        /// Outcome identifier within the market
        #[arg(value_parser = parse_u256)]
        outcome_id: U256,

        /// Amount to spend, in token base units
        #[arg(value_parser = parse_u256)]
        value: U256,

        /// Minimum outcome shares to accept
        #[arg(value_parser = parse_u256, default_value = "0")]
        min_shares: U256,
    },

    /// Sell outcome shares back to the market
    Sell {
        /// Private key of the signing account
        private_key: String,

        /// Market identifier
        #[arg(value_parser = parse_u256)]
        market_id: U256,

        /// Outcome identifier within the market
        #[arg(value_parser = parse_u256)]
        outcome_id: U256,

        /// Amount to receive, in token base units
        #[arg(value_parser = parse_u256)]
        value: U256,

        /// Maximum outcome shares to give up (default: unlimited)
        #[arg(value_parser = parse_u256)]
        max_shares: Option<U256>,
    },

    /// Claim winnings from a resolved market
    #[command(name = "claimWinnings", alias = "claim-winnings")]
    ClaimWinnings {
        /// Private key of the signing account
        private_key: String,

        /// Market identifier
        #[arg(value_parser = parse_u256)]
        market_id: U256,
    },
}

impl Commands {
    /// Split into the private key and the typed action, applying the
    /// documented defaults.
    fn into_parts(self) -> (String, Action) {
        match self {
            Commands::Buy {
                private_key,
                market_id,
                outcome_id,
                value,
                min_shares,
            } => (
                private_key,
                Action::Buy {
                    market_id,
                    outcome_id,
                    value,
                    min_shares,
                },
            ),
            Commands::Sell {
                private_key,
                market_id,
                outcome_id,
                value,
                max_shares,
            } => (
                private_key,
                Action::Sell {
                    market_id,
                    outcome_id,
                    value,
                    max_shares: max_shares.unwrap_or(U256::MAX),
                },
            ),
            Commands::ClaimWinnings {
                private_key,
                market_id,
            } => (private_key, Action::ClaimWinnings { market_id }),
        }
    }
}

fn parse_u256(input: &str) -> Result<U256, String> {
    U256::from_str_radix(input, 10).map_err(|e| format!("not an unsigned 256-bit integer: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = Config::from_env()?;
    abi::verify_abi_documents(&config.abi_dir)?;

    let (private_key, action) = cli.command.into_parts();
    run(&config, &private_key, action).await
}

async fn run(config: &Config, private_key: &str, action: Action) -> Result<()> {
    let chain = chain::connect(&config.rpc_url, private_key).await?;

    println!("\n{}", "=".repeat(70));
    println!("  PREDICTION MARKET — {}", action.label().to_uppercase());
    println!("  Signer: {}", chain.signer);
    println!("  Market: {}", config.market_address);
    println!("{}\n", "=".repeat(70));

    let native = chain.native_balance_display().await?;
    println!("Native balance: {native}");

    let market = IPredictionMarket::new(config.market_address, chain.provider.clone());
    let token_contract = IERC20::new(config.token_address, chain.provider.clone());

    let token_info = token::fetch_token_info(&token_contract).await?;
    println!(
        "Payment token: {} ({}), {} decimals\n",
        token_info.name, token_info.symbol, token_info.decimals
    );

    let before = position::read_position(&market, action.market_id(), chain.signer).await;
    position::print_position("Position before", before.as_ref(), &token_info);

    let executor = Executor::new(
        market.clone(),
        token_contract,
        chain.provider.clone(),
        chain.signer,
        token_info.clone(),
    );
    let outcome = executor.execute(&action).await?;

    println!("\nTransaction confirmed:");
    println!("  Hash:         {}", outcome.hash);
    println!("  Block:        {}", outcome.block_number);
    println!("  Gas estimate: {}", outcome.gas_estimate);
    println!("  Gas price:    {:.2} gwei", outcome.gas_price_gwei());
    println!("  Gas used:     {}\n", outcome.gas_used);

    let after = position::read_position(&market, action.market_id(), chain.signer).await;
    position::print_position("Position after", after.as_ref(), &token_info);

    println!("\n{} completed successfully.", action.label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PK: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(Cli::try_parse_from(["prediction-cli", "stake", PK, "1"]).is_err());
    }

    #[test]
    fn test_buy_requires_three_parameters_after_key() {
        assert!(Cli::try_parse_from(["prediction-cli", "buy", PK]).is_err());
        assert!(Cli::try_parse_from(["prediction-cli", "buy", PK, "1"]).is_err());
        assert!(Cli::try_parse_from(["prediction-cli", "buy", PK, "1", "0"]).is_err());
        assert!(Cli::try_parse_from(["prediction-cli", "buy", PK, "1", "0", "1000"]).is_ok());
    }

    #[test]
    fn test_sell_requires_three_parameters_after_key() {
        assert!(Cli::try_parse_from(["prediction-cli", "sell", PK, "1", "0"]).is_err());
        assert!(Cli::try_parse_from(["prediction-cli", "sell", PK, "1", "0", "1000"]).is_ok());
    }

    #[test]
    fn test_claim_winnings_requires_market_id() {
        assert!(Cli::try_parse_from(["prediction-cli", "claimWinnings", PK]).is_err());
        assert!(Cli::try_parse_from(["prediction-cli", "claimWinnings", PK, "1"]).is_ok());
        assert!(Cli::try_parse_from(["prediction-cli", "claimWinnings", PK, "1", "2"]).is_err());
    }

    #[test]
    fn test_claim_winnings_kebab_alias() {
        assert!(Cli::try_parse_from(["prediction-cli", "claim-winnings", PK, "1"]).is_ok());
    }

    #[test]
    fn test_min_shares_defaults_to_zero() {
        let cli = Cli::try_parse_from(["prediction-cli", "buy", PK, "1", "0", "1000"]).unwrap();
        let (_, action) = cli.command.into_parts();
        assert_eq!(
            action,
            Action::Buy {
                market_id: U256::from(1u64),
                outcome_id: U256::ZERO,
                value: U256::from(1000u64),
                min_shares: U256::ZERO,
            }
        );
    }

    #[test]
    fn test_max_shares_defaults_to_uint256_max() {
        let cli = Cli::try_parse_from(["prediction-cli", "sell", PK, "1", "0", "1000"]).unwrap();
        let (_, action) = cli.command.into_parts();
        match action {
            Action::Sell { max_shares, .. } => assert_eq!(max_shares, U256::MAX),
            other => panic!("expected sell action, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["prediction-cli", "buy", PK, "one", "0", "1000"]).is_err());
        assert!(Cli::try_parse_from(["prediction-cli", "buy", PK, "1", "0", "-5"]).is_err());
    }
}
