use {
    crate::{
        domain::{Amount, PoolInfo, Receipt, SwapParameters},
        error::Error,
    },
    std::sync::Arc,
};

/// The steps of a run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    ApproveSwapSpender,
    ResolvePool,
    BuildSwapParams,
    ExecuteSwap,
    ApproveLendingSpender,
    Deposit,
}

impl Step {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// What a successfully performed step hands to the state machine.
#[derive(Clone, Debug)]
pub enum Output {
    Approved(Receipt),
    Resolved(PoolInfo),
    Built(SwapParameters),
    /// A mined swap. `amount_out` is `None` if nothing reached the recipient.
    Swapped {
        receipt: Receipt,
        amount_out: Option<Amount>,
    },
    Deposited(Receipt),
}

impl Output {
    fn receipt(&self) -> Option<&Receipt> {
        match self {
            Self::Approved(receipt) | Self::Deposited(receipt) => Some(receipt),
            Self::Swapped { receipt, .. } => Some(receipt),
            Self::Resolved(_) | Self::Built(_) => None,
        }
    }
}

/// A step still to be performed together with everything earlier steps
/// produced that it needs.
#[derive(Clone, Debug)]
pub enum Pending {
    ApproveSwapSpender,
    ResolvePool,
    BuildSwapParams {
        pool: PoolInfo,
    },
    ExecuteSwap {
        pool: PoolInfo,
        params: SwapParameters,
    },
    ApproveLendingSpender {
        pool: PoolInfo,
        amount_out: Amount,
    },
    Deposit {
        pool: PoolInfo,
        amount_out: Amount,
    },
}

impl Pending {
    pub fn step(&self) -> Step {
        match self {
            Self::ApproveSwapSpender => Step::ApproveSwapSpender,
            Self::ResolvePool => Step::ResolvePool,
            Self::BuildSwapParams { .. } => Step::BuildSwapParams,
            Self::ExecuteSwap { .. } => Step::ExecuteSwap,
            Self::ApproveLendingSpender { .. } => Step::ApproveLendingSpender,
            Self::Deposit { .. } => Step::Deposit,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Stage {
    Pending(Pending),
    Done {
        pool: PoolInfo,
        amount_out: Amount,
    },
    Aborted {
        step: Step,
        error: Arc<Error>,
    },
}

impl Stage {
    fn aborted(step: Step, error: Error) -> Self {
        Self::Aborted {
            step,
            error: Arc::new(error),
        }
    }

    /// The step to perform next, `None` once the run has ended.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Pending(pending) => Some(pending.step()),
            Self::Done { .. } | Self::Aborted { .. } => None,
        }
    }
}

/// State of a single run. Only [`PipelineState::transition`] moves it
/// forward.
#[derive(Clone, Debug)]
pub struct PipelineState {
    pub stage: Stage,
    pub amount_in: Amount,
    /// Receipts of all confirmed transactions in submission order.
    pub receipts: Vec<(Step, Receipt)>,
}

impl PipelineState {
    pub fn new(amount_in: Amount) -> Self {
        Self {
            stage: Stage::Pending(Pending::ApproveSwapSpender),
            amount_in,
            receipts: Vec::new(),
        }
    }

    pub fn step(&self) -> Option<Step> {
        self.stage.step()
    }

    /// Advances the run by the outcome of the current step.
    ///
    /// A failed step, an unconfirmed receipt or an output that doesn't
    /// belong to the current step all end the run in [`Stage::Aborted`].
    /// Finished runs ignore any further outcome.
    pub fn transition(mut self, outcome: Result<Output, Error>) -> Self {
        let pending = match self.stage {
            Stage::Pending(pending) => pending,
            finished => {
                self.stage = finished;
                return self;
            }
        };
        self.stage = match outcome {
            Ok(output) => advance(pending, output, &mut self.receipts),
            Err(err) => Stage::aborted(pending.step(), err),
        };
        self
    }
}

/// Records the receipt of a confirmed transaction and determines the stage
/// following `pending`.
fn advance(pending: Pending, output: Output, receipts: &mut Vec<(Step, Receipt)>) -> Stage {
    let step = pending.step();
    if let Some(receipt) = output.receipt() {
        if !receipt.confirmed {
            let tx = receipt.hash;
            return Stage::aborted(step, Error::Unconfirmed { step, tx });
        }
    }

    let confirmed = output.receipt().cloned();
    let next = match (pending, output) {
        (Pending::ApproveSwapSpender, Output::Approved(_)) => Stage::Pending(Pending::ResolvePool),
        (Pending::ResolvePool, Output::Resolved(pool)) => {
            Stage::Pending(Pending::BuildSwapParams { pool })
        }
        (Pending::BuildSwapParams { pool }, Output::Built(params)) => {
            Stage::Pending(Pending::ExecuteSwap { pool, params })
        }
        (Pending::ExecuteSwap { pool, params }, Output::Swapped { receipt, amount_out }) => {
            match amount_out {
                Some(amount_out) => {
                    Stage::Pending(Pending::ApproveLendingSpender { pool, amount_out })
                }
                // The swap is mined nonetheless, so its receipt is still recorded.
                None => Stage::aborted(
                    step,
                    Error::SwapOutputMissing {
                        tx: receipt.hash,
                        token: params.token_out,
                        recipient: params.recipient,
                    },
                ),
            }
        }
        (Pending::ApproveLendingSpender { pool, amount_out }, Output::Approved(_)) => {
            Stage::Pending(Pending::Deposit { pool, amount_out })
        }
        (Pending::Deposit { pool, amount_out }, Output::Deposited(_)) => {
            Stage::Done { pool, amount_out }
        }
        (_, _) => return Stage::aborted(step, Error::OutOfOrder { step }),
    };
    receipts.extend(confirmed.map(|receipt| (step, receipt)));
    next
}
