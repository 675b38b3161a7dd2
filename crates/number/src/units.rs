//! Conversions between human readable token amounts and the base units
//! (`amount * 10^decimals`) that contracts operate on.

use {
    crate::NonZeroU256,
    alloy::primitives::{
        U256,
        utils::{ParseUnits, parse_units},
    },
    anyhow::{Context, Result, bail, ensure},
};

/// Scales a human readable amount like `"1.5"` into base units of a token
/// with the given number of decimals.
///
/// Negative and zero amounts are rejected, as are amounts with more
/// fractional digits than the token supports (those would otherwise be
/// silently truncated).
pub fn to_base_units(amount: &str, decimals: u8) -> Result<NonZeroU256> {
    let amount = amount.trim();
    if let Some((_, fraction)) = amount.split_once('.') {
        ensure!(
            fraction.len() <= usize::from(decimals),
            "{amount} has more than {decimals} fractional digits"
        );
    }
    let value = match parse_units(amount, decimals)
        .with_context(|| format!("invalid token amount {amount:?}"))?
    {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => bail!("token amount {amount} is negative"),
    };
    NonZeroU256::try_from(value).with_context(|| format!("token amount {amount} is zero"))
}

/// Converts an amount of base units of a token with the specified amount of
/// decimals into its decimal representation as a string.
pub fn format_units(amount: U256, decimals: u8) -> String {
    let decimals = usize::from(decimals);
    let str_amount = amount.to_string();
    if decimals == 0 {
        str_amount
    } else if str_amount.len() <= decimals {
        format!("0.{:0>pad_left$}", str_amount, pad_left = decimals)
    } else {
        format!(
            "{}.{}",
            &str_amount[0..str_amount.len() - decimals],
            &str_amount[str_amount.len() - decimals..]
        )
    }
}
