//! Uniswap V3 pool discovery.

use {
    crate::{
        domain::{Asset, FeeTier, PoolInfo},
        error::Error,
        traits::ChainRead,
    },
    alloy::primitives::Address,
};

/// Locates the pool for the token pair and fee tier through the factory and
/// reads its token ordering and fee.
///
/// Fails with [`Error::PoolNotFound`] if the factory doesn't know such a
/// pool.
pub async fn resolve(
    chain: &dyn ChainRead,
    factory: Address,
    token_a: &Asset,
    token_b: &Asset,
    fee: FeeTier,
) -> Result<PoolInfo, Error> {
    let address = chain
        .get_pool(factory, token_a.address, token_b.address, fee)
        .await
        .map_err(Error::Network)?;
    if address.is_zero() {
        return Err(Error::PoolNotFound {
            token_a: token_a.address,
            token_b: token_b.address,
            fee,
        });
    }

    // The three reads are independent of each other.
    let (token0, token1, fee) = futures::try_join!(
        chain.token0(address),
        chain.token1(address),
        chain.fee(address),
    )
    .map_err(Error::Network)?;

    let pool = PoolInfo {
        address,
        token0,
        token1,
        fee,
    };
    tracing::debug!(?pool, "resolved pool");
    Ok(pool)
}
