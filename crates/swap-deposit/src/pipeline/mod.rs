//! Runs the swap and deposit steps one after another.
//!
//! Every step only starts once the previous one finished, which for steps
//! submitting a transaction means it was mined successfully. The first
//! failure ends the run. Transactions confirmed before that are left as they
//! are, e.g. swapped funds that never got deposited stay with the signer.

mod state;

pub use state::{Output, Pending, PipelineState, Stage, Step};
use {
    crate::{
        allowance,
        context::Context,
        deposit,
        domain::{Amount, PoolInfo, Receipt},
        error::Error,
        pool,
        swap,
    },
    std::sync::Arc,
};

pub struct Pipeline {
    ctx: Context,
}

/// Result of a run that made it through all steps.
#[derive(Debug)]
pub struct Summary {
    pub amount_in: Amount,
    /// Amount of the output token received by the swap and deposited.
    pub amount_out: Amount,
    pub pool: PoolInfo,
    pub receipts: Vec<(Step, Receipt)>,
}

/// A run that stopped early.
#[derive(Debug, thiserror::Error)]
#[error("pipeline aborted at step {step}: {error}")]
pub struct Aborted {
    pub step: Step,
    #[source]
    pub error: Arc<Error>,
    /// Transactions that were confirmed before the failure and remain in
    /// effect.
    pub receipts: Vec<(Step, Receipt)>,
}

impl Pipeline {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Swaps `amount_in` base units of the input token and deposits the
    /// proceeds into the lending pool on behalf of the signer.
    pub async fn run(&self, amount_in: Amount) -> Result<Summary, Aborted> {
        tracing::info!(
            amount_in = %self.ctx.token_in.format(amount_in.get()),
            token_in = %self.ctx.token_in.address,
            token_out = %self.ctx.token_out.address,
            "starting pipeline"
        );

        let mut state = PipelineState::new(amount_in);
        loop {
            let outcome = match &state.stage {
                Stage::Done { pool, amount_out } => {
                    tracing::info!(
                        amount_out = %self.ctx.token_out.format(amount_out.get()),
                        pool = %pool.address,
                        "pipeline done"
                    );
                    return Ok(Summary {
                        amount_in: state.amount_in,
                        amount_out: *amount_out,
                        pool: *pool,
                        receipts: state.receipts,
                    });
                }
                Stage::Aborted { step, error } => {
                    tracing::error!(%step, ?error, "pipeline aborted");
                    return Err(Aborted {
                        step: *step,
                        error: error.clone(),
                        receipts: state.receipts,
                    });
                }
                Stage::Pending(pending) => {
                    let step = pending.step();
                    tracing::debug!(%step, index = step.index(), "performing step");
                    self.perform(pending, state.amount_in).await
                }
            };

            let recorded = state.receipts.len();
            state = state.transition(outcome);
            if let Some((step, receipt)) = state.receipts.get(recorded) {
                tracing::info!(
                    %step,
                    tx = %receipt.hash,
                    block = ?receipt.block_number,
                    link = %self.ctx.explorer.tx(receipt.hash),
                    "transaction confirmed"
                );
            }
        }
    }

    async fn perform(&self, pending: &Pending, amount_in: Amount) -> Result<Output, Error> {
        let ctx = &self.ctx;
        match pending {
            Pending::ApproveSwapSpender => allowance::approve(
                ctx.writer.as_ref(),
                &ctx.token_in,
                amount_in,
                ctx.deployment.swap_router,
            )
            .await
            .map(Output::Approved),
            Pending::ResolvePool => pool::resolve(
                ctx.reader.as_ref(),
                ctx.deployment.factory,
                &ctx.token_in,
                &ctx.token_out,
                ctx.fee_tier,
            )
            .await
            .map(Output::Resolved),
            Pending::BuildSwapParams { pool } => swap::build_params(
                ctx.reader.as_ref(),
                pool,
                &ctx.token_in,
                &ctx.token_out,
                ctx.writer.signer(),
                amount_in,
            )
            .await
            .map(Output::Built),
            Pending::ExecuteSwap { params, .. } => {
                let receipt =
                    swap::execute(ctx.writer.as_ref(), ctx.deployment.swap_router, params).await?;
                let amount_out =
                    swap::amount_received(&receipt, params.token_out, params.recipient);
                Ok(Output::Swapped {
                    receipt,
                    amount_out,
                })
            }
            Pending::ApproveLendingSpender { amount_out, .. } => allowance::approve(
                ctx.writer.as_ref(),
                &ctx.token_out,
                *amount_out,
                ctx.deployment.lending_pool,
            )
            .await
            .map(Output::Approved),
            Pending::Deposit { amount_out, .. } => deposit::deposit(
                ctx.writer.as_ref(),
                ctx.deployment.lending_pool,
                &ctx.token_out,
                *amount_out,
                ctx.writer.signer(),
            )
            .await
            .map(Output::Deposited),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            context::{Deployment, Explorer},
            domain::{Asset, FeeTier},
            swap::tests::transfer_log,
            traits::{ChainError, Interaction, MockChainRead, MockChainWrite},
        },
        alloy::{
            primitives::{Address, B256, U256},
            sol_types::SolCall,
        },
        contracts::{IERC20, ILendingPool, IV3SwapRouter},
        mockall::{Sequence, predicate},
    };

    const TOKEN_IN: Address = Address::repeat_byte(0x01);
    const TOKEN_OUT: Address = Address::repeat_byte(0x02);
    const ROUTER: Address = Address::repeat_byte(0x10);
    const FACTORY: Address = Address::repeat_byte(0x11);
    const LENDING_POOL: Address = Address::repeat_byte(0x12);
    const POOL: Address = Address::repeat_byte(0x99);
    const SIGNER: Address = Address::repeat_byte(0xee);

    fn receipt(byte: u8, confirmed: bool) -> Receipt {
        Receipt {
            hash: B256::repeat_byte(byte),
            confirmed,
            block_number: Some(u64::from(byte)),
            logs: vec![],
        }
    }

    fn pipeline(reader: MockChainRead, mut writer: MockChainWrite) -> Pipeline {
        writer.expect_signer().return_const(SIGNER);
        Pipeline::new(Context {
            reader: Arc::new(reader),
            writer: Arc::new(writer),
            deployment: Deployment {
                swap_router: ROUTER,
                factory: FACTORY,
                lending_pool: LENDING_POOL,
            },
            token_in: Asset::new(TOKEN_IN, 6),
            token_out: Asset::new(TOKEN_OUT, 18),
            fee_tier: FeeTier::MEDIUM,
            explorer: Explorer::new("https://etherscan.io".parse().unwrap()),
        })
    }

    /// A reader that knows the pool. `fee` is read once while resolving and
    /// once more while building the swap.
    fn resolving_reader(seq: &mut Sequence) -> MockChainRead {
        let mut reader = MockChainRead::new();
        reader
            .expect_get_pool()
            .times(1)
            .in_sequence(seq)
            .with(
                predicate::eq(FACTORY),
                predicate::eq(TOKEN_IN),
                predicate::eq(TOKEN_OUT),
                predicate::eq(FeeTier::MEDIUM),
            )
            .returning(|_, _, _, _| Ok(POOL));
        reader.expect_token0().returning(|_| Ok(TOKEN_IN));
        reader.expect_token1().returning(|_| Ok(TOKEN_OUT));
        reader.expect_fee().times(2).returning(|_| Ok(3_000));
        reader
    }

    /// Matchers of all expectations see every submission, so decoding must
    /// not panic on calldata of another contract.
    fn approves(interaction: &Interaction, token: Address, spender: Address, amount: u64) -> bool {
        interaction.target == token
            && IERC20::approveCall::abi_decode(&interaction.calldata)
                .is_ok_and(|call| call.spender == spender && call.amount == U256::from(amount))
    }

    #[tokio::test]
    async fn swaps_and_deposits_swap_output() {
        observe::tracing::initialize_reentrant("swap_deposit=trace");
        let mut seq = Sequence::new();
        let mut writer = MockChainWrite::new();
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| approves(interaction, TOKEN_IN, ROUTER, 1_000_000))
            .returning(|_| Ok(receipt(1, true)));
        let reader = resolving_reader(&mut seq);
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| {
                interaction.target == ROUTER
                    && IV3SwapRouter::exactInputSingleCall::abi_decode(&interaction.calldata)
                        .is_ok_and(|call| {
                            call.params.amountIn == U256::from(1_000_000)
                                && call.params.tokenIn == TOKEN_IN
                                && call.params.tokenOut == TOKEN_OUT
                                && call.params.recipient == SIGNER
                                && call.params.amountOutMinimum.is_zero()
                        })
            })
            .returning(|_| {
                Ok(Receipt {
                    logs: vec![transfer_log(TOKEN_OUT, POOL, SIGNER, 42)],
                    ..receipt(2, true)
                })
            });
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| approves(interaction, TOKEN_OUT, LENDING_POOL, 42))
            .returning(|_| Ok(receipt(3, true)));
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| {
                interaction.target == LENDING_POOL
                    && ILendingPool::depositCall::abi_decode(&interaction.calldata).is_ok_and(
                        |call| {
                            call.asset == TOKEN_OUT
                                && call.amount == U256::from(42)
                                && call.onBehalfOf == SIGNER
                        },
                    )
            })
            .returning(|_| Ok(receipt(4, true)));

        let pipeline = pipeline(reader, writer);
        let amount_in = pipeline.ctx.token_in.to_base_units("1").unwrap();
        let summary = pipeline.run(amount_in).await.unwrap();

        assert_eq!(summary.amount_in.get(), U256::from(1_000_000));
        assert_eq!(summary.amount_out.get(), U256::from(42));
        assert_eq!(summary.pool.address, POOL);
        assert_eq!(
            summary
                .receipts
                .iter()
                .map(|(step, receipt)| (*step, receipt.hash))
                .collect::<Vec<_>>(),
            vec![
                (Step::ApproveSwapSpender, B256::repeat_byte(1)),
                (Step::ExecuteSwap, B256::repeat_byte(2)),
                (Step::ApproveLendingSpender, B256::repeat_byte(3)),
                (Step::Deposit, B256::repeat_byte(4)),
            ]
        );
    }

    #[tokio::test]
    async fn missing_pool_aborts_before_swapping() {
        let mut writer = MockChainWrite::new();
        writer
            .expect_submit()
            .times(1)
            .returning(|_| Ok(receipt(1, true)));
        let mut reader = MockChainRead::new();
        reader
            .expect_get_pool()
            .times(1)
            .returning(|_, _, _, _| Ok(Address::ZERO));

        let aborted = pipeline(reader, writer)
            .run(Amount::one())
            .await
            .unwrap_err();

        assert_eq!(aborted.step, Step::ResolvePool);
        assert!(matches!(*aborted.error, Error::PoolNotFound { .. }));
        assert_eq!(aborted.receipts.len(), 1);
    }

    #[tokio::test]
    async fn reverted_swap_aborts_without_deposit() {
        let mut seq = Sequence::new();
        let mut writer = MockChainWrite::new();
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| interaction.target == TOKEN_IN)
            .returning(|_| Ok(receipt(1, true)));
        let reader = resolving_reader(&mut seq);
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| interaction.target == ROUTER)
            .returning(|_| Ok(receipt(2, false)));

        let aborted = pipeline(reader, writer)
            .run(Amount::one())
            .await
            .unwrap_err();

        assert_eq!(aborted.step, Step::ExecuteSwap);
        assert!(matches!(
            *aborted.error,
            Error::SwapExecution(ChainError::Reverted(hash)) if hash == B256::repeat_byte(2)
        ));
        // The swap approval stays in place.
        assert_eq!(
            aborted.receipts,
            vec![(Step::ApproveSwapSpender, receipt(1, true))]
        );
    }

    #[tokio::test]
    async fn rejected_swap_aborts() {
        let mut seq = Sequence::new();
        let mut writer = MockChainWrite::new();
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| interaction.target == TOKEN_IN)
            .returning(|_| Ok(receipt(1, true)));
        let reader = resolving_reader(&mut seq);
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| interaction.target == ROUTER)
            .returning(|_| Err(ChainError::Rejected("STF".into())));

        let aborted = pipeline(reader, writer)
            .run(Amount::one())
            .await
            .unwrap_err();

        assert_eq!(aborted.step, Step::ExecuteSwap);
        assert!(matches!(
            *aborted.error,
            Error::SwapExecution(ChainError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn swap_without_output_aborts() {
        let mut seq = Sequence::new();
        let mut writer = MockChainWrite::new();
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| interaction.target == TOKEN_IN)
            .returning(|_| Ok(receipt(1, true)));
        let reader = resolving_reader(&mut seq);
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| interaction.target == ROUTER)
            .returning(|_| Ok(receipt(2, true)));

        let aborted = pipeline(reader, writer)
            .run(Amount::one())
            .await
            .unwrap_err();

        assert_eq!(aborted.step, Step::ExecuteSwap);
        assert!(matches!(
            *aborted.error,
            Error::SwapOutputMissing { tx, .. } if tx == B256::repeat_byte(2)
        ));
        // The swap is mined and has to show up for manual clean up.
        assert_eq!(
            aborted.receipts,
            vec![
                (Step::ApproveSwapSpender, receipt(1, true)),
                (Step::ExecuteSwap, receipt(2, true)),
            ]
        );
    }

    /// Mocks for a run that gets through the swap and receives 42 units of
    /// the output token.
    fn swapped(seq: &mut Sequence) -> (MockChainRead, MockChainWrite) {
        let mut writer = MockChainWrite::new();
        writer
            .expect_submit()
            .times(1)
            .in_sequence(seq)
            .withf(|interaction| interaction.target == TOKEN_IN)
            .returning(|_| Ok(receipt(1, true)));
        let reader = resolving_reader(seq);
        writer
            .expect_submit()
            .times(1)
            .in_sequence(seq)
            .withf(|interaction| interaction.target == ROUTER)
            .returning(|_| Ok(swap_receipt()));
        (reader, writer)
    }

    fn swap_receipt() -> Receipt {
        Receipt {
            logs: vec![transfer_log(TOKEN_OUT, POOL, SIGNER, 42)],
            ..receipt(2, true)
        }
    }

    #[tokio::test]
    async fn reverted_lending_approval_aborts_without_deposit() {
        let mut seq = Sequence::new();
        let (reader, mut writer) = swapped(&mut seq);
        // No expectation for the lending pool, depositing fails the test.
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| approves(interaction, TOKEN_OUT, LENDING_POOL, 42))
            .returning(|_| Ok(receipt(3, false)));

        let aborted = pipeline(reader, writer)
            .run(Amount::one())
            .await
            .unwrap_err();

        assert_eq!(aborted.step, Step::ApproveLendingSpender);
        assert!(matches!(
            *aborted.error,
            Error::Approval {
                token,
                spender,
                source: ChainError::Reverted(_),
            } if token == TOKEN_OUT && spender == LENDING_POOL
        ));
        assert_eq!(
            aborted.receipts,
            vec![
                (Step::ApproveSwapSpender, receipt(1, true)),
                (Step::ExecuteSwap, swap_receipt()),
            ]
        );
    }

    #[tokio::test]
    async fn reverted_deposit_aborts() {
        let mut seq = Sequence::new();
        let (reader, mut writer) = swapped(&mut seq);
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| approves(interaction, TOKEN_OUT, LENDING_POOL, 42))
            .returning(|_| Ok(receipt(3, true)));
        writer
            .expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|interaction| interaction.target == LENDING_POOL)
            .returning(|_| Ok(receipt(4, false)));

        let aborted = pipeline(reader, writer)
            .run(Amount::one())
            .await
            .unwrap_err();

        assert_eq!(aborted.step, Step::Deposit);
        assert!(matches!(
            *aborted.error,
            Error::Deposit(ChainError::Reverted(hash)) if hash == B256::repeat_byte(4)
        ));
        assert_eq!(
            aborted.receipts,
            vec![
                (Step::ApproveSwapSpender, receipt(1, true)),
                (Step::ExecuteSwap, swap_receipt()),
                (Step::ApproveLendingSpender, receipt(3, true)),
            ]
        );
    }

    #[tokio::test]
    async fn network_failure_stops_everything() {
        let mut writer = MockChainWrite::new();
        writer
            .expect_submit()
            .times(1)
            .returning(|_| Err(ChainError::Network("connection refused".into())));
        // The reader has no expectations, any call to it fails the test.
        let reader = MockChainRead::new();

        let aborted = pipeline(reader, writer)
            .run(Amount::one())
            .await
            .unwrap_err();

        assert_eq!(aborted.step, Step::ApproveSwapSpender);
        assert!(matches!(*aborted.error, Error::Network(_)));
        assert!(aborted.receipts.is_empty());
        assert_eq!(
            aborted.to_string(),
            "pipeline aborted at step approve_swap_spender: network error: network failure: \
             connection refused"
        );
    }
}
