//! ERC20 allowance management.

use {
    crate::{
        domain::{Amount, Asset, Receipt},
        error::Error,
        traits::{ChainWrite, Interaction},
    },
    alloy::{primitives::Address, sol_types::SolCall},
    contracts::IERC20,
};

/// Allows `spender` to move up to `amount` of `asset` out of the signer's
/// balance and waits until the approval is mined.
///
/// `amount` has to be expressed in base units of `asset` itself. Approving
/// again overwrites the previous allowance instead of adding to it.
pub async fn approve(
    signer: &dyn ChainWrite,
    asset: &Asset,
    amount: Amount,
    spender: Address,
) -> Result<Receipt, Error> {
    tracing::debug!(token = %asset.address, %spender, %amount, "approving spender");
    signer
        .submit(approve_interaction(asset, amount, spender))
        .await
        .and_then(Receipt::ensure_confirmed)
        .map_err(|err| {
            Error::from_chain(err, |source| Error::Approval {
                token: asset.address,
                spender,
                source,
            })
        })
}

pub fn approve_interaction(asset: &Asset, amount: Amount, spender: Address) -> Interaction {
    Interaction {
        target: asset.address,
        calldata: IERC20::approveCall {
            spender,
            amount: amount.get(),
        }
        .abi_encode()
        .into(),
    }
}
