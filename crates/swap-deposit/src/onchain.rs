//! [`ChainRead`] and [`ChainWrite`] backed by a JSON RPC node.

use {
    crate::{
        domain::{FeeTier, Receipt},
        traits::{ChainError, ChainRead, ChainWrite, Interaction},
    },
    alloy::{
        contract::Error as ContractError,
        network::ReceiptResponse,
        primitives::Address,
        providers::Provider,
        rpc::types::{TransactionReceipt, TransactionRequest},
    },
    contracts::{IUniswapV3Factory, IUniswapV3Pool},
    ethrpc::{
        AlloyProvider,
        errors::{ContractErrorExt, TransportErrorExt},
    },
};

pub struct Onchain {
    provider: AlloyProvider,
    signer: Address,
}

impl Onchain {
    /// `provider` has to be able to sign transactions of `signer`.
    pub fn new(provider: AlloyProvider, signer: Address) -> Self {
        Self { provider, signer }
    }

    fn pool(&self, address: Address) -> IUniswapV3Pool::IUniswapV3PoolInstance<AlloyProvider> {
        IUniswapV3Pool::new(address, self.provider.clone())
    }
}

fn read_error(err: ContractError) -> ChainError {
    if err.is_contract_error() {
        ChainError::Call(err.to_string())
    } else {
        ChainError::Network(err.to_string())
    }
}

/// Mined receipts are returned as is, reverted ones included.
fn to_receipt(receipt: &TransactionReceipt) -> Receipt {
    Receipt {
        hash: receipt.transaction_hash(),
        confirmed: receipt.status(),
        block_number: receipt.block_number(),
        logs: receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect(),
    }
}

#[async_trait::async_trait]
impl ChainRead for Onchain {
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: FeeTier,
    ) -> Result<Address, ChainError> {
        IUniswapV3Factory::new(factory, self.provider.clone())
            .getPool(token_a, token_b, fee.as_u24())
            .call()
            .await
            .map_err(read_error)
    }

    async fn token0(&self, pool: Address) -> Result<Address, ChainError> {
        self.pool(pool).token0().call().await.map_err(read_error)
    }

    async fn token1(&self, pool: Address) -> Result<Address, ChainError> {
        self.pool(pool).token1().call().await.map_err(read_error)
    }

    async fn fee(&self, pool: Address) -> Result<u32, ChainError> {
        let fee = self.pool(pool).fee().call().await.map_err(read_error)?;
        Ok(fee.to::<u32>())
    }
}

#[async_trait::async_trait]
impl ChainWrite for Onchain {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn submit(&self, interaction: Interaction) -> Result<Receipt, ChainError> {
        let tx = TransactionRequest::default()
            .from(self.signer)
            .to(interaction.target)
            .input(interaction.calldata.into());
        let pending = self.provider.send_transaction(tx).await.map_err(|err| {
            if err.is_rejection() {
                ChainError::Rejected(err.to_string())
            } else {
                ChainError::Network(err.to_string())
            }
        })?;
        tracing::info!(tx = %pending.tx_hash(), to = %interaction.target, "transaction sent");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|err| ChainError::Network(err.to_string()))?;
        Ok(to_receipt(&receipt))
    }
}
