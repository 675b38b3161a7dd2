//! Value types flowing through the swap and deposit pipeline.

use {
    alloy::primitives::{
        Address,
        B256,
        Log,
        U256,
        aliases::{U160, U24},
    },
    anyhow::{Result, anyhow},
    contracts::IV3SwapRouter,
    number::{NonZeroU256, units},
    std::{
        fmt::{self, Display, Formatter},
        str::FromStr,
    },
};

/// A base unit token amount handed from one step to the next. It can only
/// be constructed from a strictly positive value.
pub type Amount = NonZeroU256;

/// An ERC20 token taking part in the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Asset {
    pub address: Address,
    pub decimals: u8,
}

impl Asset {
    pub fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }

    /// Scales a human readable amount ("1.5") into base units of this asset.
    pub fn to_base_units(&self, amount: &str) -> Result<Amount> {
        units::to_base_units(amount, self.decimals)
    }

    /// Formats base units of this asset as a human readable amount.
    pub fn format(&self, amount: U256) -> String {
        units::format_units(amount, self.decimals)
    }
}

/// Fee tier identifying which Uniswap V3 pool variant to trade against.
/// The value is expressed in hundredths of a basis point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeeTier(u32);

impl FeeTier {
    pub const LOWEST: Self = Self(100);
    pub const LOW: Self = Self(500);
    pub const MEDIUM: Self = Self(3_000);
    pub const HIGH: Self = Self(10_000);

    const ALL: [Self; 4] = [Self::LOWEST, Self::LOW, Self::MEDIUM, Self::HIGH];

    pub fn as_u24(self) -> U24 {
        U24::from(self.0)
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = anyhow::Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.0 == value)
            .ok_or_else(|| anyhow!("{value} is not a Uniswap V3 fee tier (100, 500, 3000, 10000)"))
    }
}

impl FromStr for FeeTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s.trim().parse::<u32>()?)
    }
}

impl Display for FeeTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An AMM pool as reported by the factory and the pool contract itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
}

/// Arguments of an exact input single pool swap.
///
/// `amount_out_minimum` and `sqrt_price_limit_x96` are always zero: the swap
/// accepts any output amount and any execution price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapParameters {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub amount_in: Amount,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U160,
}

impl From<&SwapParameters> for IV3SwapRouter::ExactInputSingleParams {
    fn from(params: &SwapParameters) -> Self {
        Self {
            tokenIn: params.token_in,
            tokenOut: params.token_out,
            fee: U24::from(params.fee),
            recipient: params.recipient,
            amountIn: params.amount_in.get(),
            amountOutMinimum: params.amount_out_minimum,
            sqrtPriceLimitX96: params.sqrt_price_limit_x96,
        }
    }
}

/// Outcome of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub hash: B256,
    /// Whether the transaction executed successfully. A reverted transaction
    /// is mined but not confirmed.
    pub confirmed: bool,
    pub block_number: Option<u64>,
    pub logs: Vec<Log>,
}
