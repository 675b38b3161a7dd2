//! Deposits into the Aave lending pool.

use {
    crate::{
        domain::{Amount, Asset, Receipt},
        error::Error,
        traits::{ChainWrite, Interaction},
    },
    alloy::{primitives::Address, sol_types::SolCall},
    contracts::ILendingPool,
};

/// Deposits are not attributed to any integrator.
pub const REFERRAL_CODE: u16 = 0;

/// Supplies `amount` of `asset` to the lending pool on behalf of
/// `beneficiary` and waits until the deposit is mined.
///
/// The lending pool pulls the funds from the signer, so it needs an
/// allowance of at least `amount` beforehand.
pub async fn deposit(
    signer: &dyn ChainWrite,
    lending_pool: Address,
    asset: &Asset,
    amount: Amount,
    beneficiary: Address,
) -> Result<Receipt, Error> {
    tracing::debug!(token = %asset.address, %amount, %beneficiary, "depositing");
    signer
        .submit(deposit_interaction(lending_pool, asset, amount, beneficiary))
        .await
        .and_then(Receipt::ensure_confirmed)
        .map_err(|err| Error::from_chain(err, Error::Deposit))
}

pub fn deposit_interaction(
    lending_pool: Address,
    asset: &Asset,
    amount: Amount,
    beneficiary: Address,
) -> Interaction {
    Interaction {
        target: lending_pool,
        calldata: ILendingPool::depositCall {
            asset: asset.address,
            amount: amount.get(),
            onBehalfOf: beneficiary,
            referralCode: REFERRAL_CODE,
        }
        .abi_encode()
        .into(),
    }
}
