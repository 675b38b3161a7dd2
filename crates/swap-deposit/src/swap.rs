//! Exact input single pool swaps through the Uniswap V3 router.

use {
    crate::{
        domain::{Amount, Asset, PoolInfo, Receipt, SwapParameters},
        error::Error,
        traits::{ChainRead, ChainWrite, Interaction},
    },
    alloy::{
        primitives::{Address, U256, aliases::U160},
        sol_types::{SolCall, SolEvent},
    },
    contracts::{IERC20, IV3SwapRouter},
};

/// Assembles the swap of `amount_in` of `token_in` into `token_out` through
/// `pool`. The fee is read from the pool again right before trading so the
/// parameters always match the pool that actually gets traded against.
pub async fn build_params(
    chain: &dyn ChainRead,
    pool: &PoolInfo,
    token_in: &Asset,
    token_out: &Asset,
    recipient: Address,
    amount_in: Amount,
) -> Result<SwapParameters, Error> {
    let fee = chain.fee(pool.address).await.map_err(Error::Network)?;
    Ok(SwapParameters {
        token_in: token_in.address,
        token_out: token_out.address,
        fee,
        recipient,
        amount_in,
        amount_out_minimum: U256::ZERO,
        sqrt_price_limit_x96: U160::ZERO,
    })
}

pub fn swap_interaction(router: Address, params: &SwapParameters) -> Interaction {
    Interaction {
        target: router,
        calldata: IV3SwapRouter::exactInputSingleCall {
            params: params.into(),
        }
        .abi_encode()
        .into(),
    }
}

/// Submits the swap to the router and waits until it is mined.
pub async fn execute(
    signer: &dyn ChainWrite,
    router: Address,
    params: &SwapParameters,
) -> Result<Receipt, Error> {
    tracing::debug!(?params, "executing swap");
    signer
        .submit(swap_interaction(router, params))
        .await
        .and_then(Receipt::ensure_confirmed)
        .map_err(|err| Error::from_chain(err, Error::SwapExecution))
}

/// Sums up the `token` transfers to `recipient` emitted by a mined swap.
///
/// This is what the swap actually paid out, independent of any balance the
/// recipient already held before. `None` if nothing was paid out.
pub fn amount_received(receipt: &Receipt, token: Address, recipient: Address) -> Option<Amount> {
    let total = receipt
        .logs
        .iter()
        .filter(|log| log.address == token)
        .filter_map(|log| IERC20::Transfer::decode_log_data(&log.data).ok())
        .filter(|transfer| transfer.to == recipient)
        .fold(U256::ZERO, |total, transfer| {
            total.saturating_add(transfer.value)
        });

    Amount::try_from(total).ok()
}
