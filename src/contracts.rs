//! Typed contract bindings for the prediction market and the payment token.
//!
//! Generated from the same interfaces the on-disk ABI documents describe;
//! [`crate::abi`] validates those documents against this method set at startup.

use alloy::providers::DynProvider;
use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IPredictionMarket {
        /// Buy outcome shares with the payment token
        function buy(
            uint256 marketId,
            uint256 outcomeId,
            uint256 minOutcomeSharesToBuy,
            uint256 value
        ) external;

        /// Sell outcome shares back to the market
        function sell(
            uint256 marketId,
            uint256 outcomeId,
            uint256 value,
            uint256 maxOutcomeSharesToSell
        ) external;

        /// Claim winnings from a resolved market
        function claimWinnings(uint256 marketId) external;

        /// Aggregate liquidity plus per-outcome share balances for a user
        function getUserMarketShares(uint256 marketId, address user)
            external
            view
            returns (uint256 liquidity, uint256[] outcomeShares);
    }

    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
        function name() external view returns (string);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
}

/// Market contract bound to the signing provider.
pub type Market = IPredictionMarket::IPredictionMarketInstance<DynProvider>;

/// Payment token bound to the signing provider.
pub type Erc20 = IERC20::IERC20Instance<DynProvider>;
