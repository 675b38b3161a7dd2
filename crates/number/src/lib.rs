pub mod units;

use {
    alloy::primitives::U256,
    anyhow::anyhow,
    std::fmt::{self, Display, Formatter},
};

/// A token amount that is guaranteed to be strictly positive.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NonZeroU256(U256);

impl TryFrom<U256> for NonZeroU256 {
    type Error = anyhow::Error;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        if value.is_zero() {
            Err(anyhow!("Value cannot be zero!"))
        } else {
            Ok(Self(value))
        }
    }
}

impl TryFrom<u128> for NonZeroU256 {
    type Error = anyhow::Error;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        NonZeroU256::try_from(U256::from(value))
    }
}

impl From<NonZeroU256> for U256 {
    fn from(value: NonZeroU256) -> Self {
        value.0
    }
}

impl Display for NonZeroU256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl NonZeroU256 {
    pub fn one() -> Self {
        Self(U256::from(1))
    }

    pub fn get(&self) -> U256 {
        self.0
    }
}
