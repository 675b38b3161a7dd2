//! Boundary between the pipeline and the chain.
//!
//! Steps only see these traits, so tests can drive a whole run against
//! mocks.

use {
    crate::domain::{FeeTier, Receipt},
    alloy::primitives::{Address, B256, Bytes},
};

/// A contract call ready to be signed and submitted by the signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interaction {
    pub target: Address,
    pub calldata: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The node refused the transaction, e.g. because gas estimation
    /// reverted or the signer lacks funds.
    #[error("rejected by node: {0}")]
    Rejected(String),
    #[error("transaction {0} reverted")]
    Reverted(B256),
    /// A view call reverted or returned data that could not be decoded.
    #[error("contract call failed: {0}")]
    Call(String),
    /// The node could not be reached or did not answer properly.
    #[error("network failure: {0}")]
    Network(String),
}

impl Receipt {
    /// Turns a mined but reverted transaction into an error.
    pub fn ensure_confirmed(self) -> Result<Self, ChainError> {
        if self.confirmed {
            Ok(self)
        } else {
            Err(ChainError::Reverted(self.hash))
        }
    }
}

/// Abstracts blockchain read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainRead: Send + Sync {
    /// Asks the factory for the pool of the token pair and fee tier.
    ///
    /// Returns the zero address if no such pool exists.
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: FeeTier,
    ) -> Result<Address, ChainError>;

    async fn token0(&self, pool: Address) -> Result<Address, ChainError>;

    async fn token1(&self, pool: Address) -> Result<Address, ChainError>;

    /// Returns the pool fee in hundredths of a basis point.
    async fn fee(&self, pool: Address) -> Result<u32, ChainError>;
}

/// Abstracts blockchain write operations (transaction submission).
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainWrite: Send + Sync {
    /// Address of the account signing all submitted transactions.
    fn signer(&self) -> Address;

    /// Signs and submits the interaction, then suspends until the
    /// transaction is mined.
    ///
    /// The returned receipt may belong to a reverted transaction; callers
    /// have to check [`Receipt::confirmed`].
    async fn submit(&self, interaction: Interaction) -> Result<Receipt, ChainError>;
}
