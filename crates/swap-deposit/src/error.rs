use {
    crate::{domain::FeeTier, pipeline::Step, traits::ChainError},
    alloy::primitives::{Address, B256},
};

/// Reasons a pipeline step can fail. Every one of them aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("approving {spender} to spend {token} failed: {source}")]
    Approval {
        token: Address,
        spender: Address,
        #[source]
        source: ChainError,
    },
    #[error("no pool exists for {token_a}/{token_b} with fee tier {fee}")]
    PoolNotFound {
        token_a: Address,
        token_b: Address,
        fee: FeeTier,
    },
    #[error("swap failed: {0}")]
    SwapExecution(#[source] ChainError),
    /// The swap was mined but no output token reached the recipient.
    #[error("swap {tx} did not pay out any {token} to {recipient}")]
    SwapOutputMissing {
        tx: B256,
        token: Address,
        recipient: Address,
    },
    #[error("deposit failed: {0}")]
    Deposit(#[source] ChainError),
    #[error("network error: {0}")]
    Network(#[source] ChainError),
    #[error("transaction {tx} of step {step} is not confirmed")]
    Unconfirmed { step: Step, tx: B256 },
    #[error("step {step} produced an output that belongs to another step")]
    OutOfOrder { step: Step },
}

impl Error {
    /// Attributes a chain error to the step that caused it, unless the node
    /// could not be reached at all.
    pub(crate) fn from_chain(err: ChainError, step_error: impl FnOnce(ChainError) -> Self) -> Self {
        match err {
            ChainError::Network(_) => Self::Network(err),
            err => step_error(err),
        }
    }
}
