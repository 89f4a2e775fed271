//! Solidity bindings for every contract surface the SDK touches.
//!
//! Generated with alloy's `sol!` macro, so each function is a typed call
//! struct (`IElitraVault::previewRedeemCall { shares }`) whose argument
//! and return shapes are checked at compile time. Only the subset of the
//! vault ABI the client uses is declared.

use alloy::sol;

sol! {
    /// Elitra vault: ERC-4626 plus a redemption queue and `manage`.
    #[derive(Debug, PartialEq, Eq)]
    interface IElitraVault {
        // ERC-20 / metadata
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);

        // ERC-4626 views
        function asset() external view returns (address);
        function totalAssets() external view returns (uint256);
        function previewDeposit(uint256 assets) external view returns (uint256);
        function previewMint(uint256 shares) external view returns (uint256);
        function previewRedeem(uint256 shares) external view returns (uint256);
        function maxDeposit(address receiver) external view returns (uint256);
        function maxMint(address receiver) external view returns (uint256);
        function maxWithdraw(address owner) external view returns (uint256);
        function maxRedeem(address owner) external view returns (uint256);

        // Vault bookkeeping
        function getAvailableBalance() external view returns (uint256);
        function pendingRedeemRequest(address user) external view returns (uint256 assets, uint256 pendingShares);
        function aggregatedUnderlyingBalances() external view returns (uint256);
        function totalPendingAssets() external view returns (uint256);
        function paused() external view returns (bool);
        function lastBlockUpdated() external view returns (uint256);
        function lastPricePerShare() external view returns (uint256);
        function isAuthorized(address user, bytes4 functionSig) external view returns (bool);

        // User writes
        function deposit(uint256 assets, address receiver) external returns (uint256);
        function mint(uint256 shares, address receiver) external returns (uint256);
        function requestRedeem(uint256 shares, address receiver, address owner) external returns (uint256);

        // Privileged writes
        function manage(address target, bytes data, uint256 value) external returns (bytes result);
        function manageBatch(address[] targets, bytes[] data, uint256[] values) external;
        function updateBalance(uint256 newAggregatedBalance) external;
        function pause() external;
        function unpause() external;
        function fulfillRedeem(address receiver, uint256 shares, uint256 assets) external;
        function cancelRedeem(address receiver, uint256 shares, uint256 assets) external;

        event RedeemRequest(address indexed receiver, address indexed owner, uint256 assets, uint256 shares, bool instant);
    }
}

sol! {
    /// ERC-20 calls commonly routed through `manage`.
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

sol! {
    /// ERC-4626 calls for depositing vault funds into other vaults.
    interface IERC4626 {
        function deposit(uint256 assets, address receiver) external returns (uint256);
        function withdraw(uint256 assets, address receiver, address owner) external returns (uint256);
    }
}
