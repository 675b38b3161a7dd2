//! Solidity bindings for the contracts the swap and deposit pipeline talks
//! to, together with their well known deployment addresses.
pub mod alloy;

pub use self::alloy::{IERC20, ILendingPool, IUniswapV3Factory, IUniswapV3Pool, IV3SwapRouter};
