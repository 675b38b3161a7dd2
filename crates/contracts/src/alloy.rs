#![allow(clippy::too_many_arguments)]

use alloy::sol;

/// Deployment addresses on Ethereum mainnet.
pub mod deployments {
    use alloy::primitives::{Address, address};

    pub const USDC: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606EB48");
    pub const LINK: Address = address!("0x514910771AF9Ca656af840dff83E8264EcF986CA");
    /// Uniswap V3 `SwapRouter02`.
    pub const UNISWAP_V3_SWAP_ROUTER: Address =
        address!("0x68b3465833fb72A70ecDF485E0e4C7bD8665Fc45");
    pub const UNISWAP_V3_FACTORY: Address = address!("0x1F98431c8aD98523631AE4a59f267346ea31F984");
    /// Aave V2 `LendingPool` proxy.
    pub const AAVE_LENDING_POOL: Address = address!("0x7d2768dE32b0b80b7a3454c06Bdac90f169d52B1");
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);

        function approve(address spender, uint256 amount) external returns (bool);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IUniswapV3Factory {
        /// Returns the zero address if no pool exists for the pair and fee.
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IUniswapV3Pool {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function fee() external view returns (uint24);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IV3SwapRouter {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface ILendingPool {
        function deposit(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external;
    }
}
