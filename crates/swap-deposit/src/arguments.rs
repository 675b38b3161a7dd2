use {
    crate::domain::FeeTier,
    alloy::{primitives::Address, signers::local::PrivateKeySigner},
    clap::Parser,
    contracts::alloy::deployments,
    std::fmt::{self, Display, Formatter},
    url::Url,
};

/// Swaps an input token on Uniswap V3 and deposits the proceeds into an
/// Aave lending pool.
#[derive(Parser)]
#[clap(version)]
pub struct Arguments {
    /// Amount of the input token to swap in whole units, e.g. "1.5".
    pub amount: String,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub rpc_url: Url,

    /// Key signing all transactions. The deposit is credited to its address.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: PrivateKeySigner,

    #[clap(long, env, default_value_t = deployments::USDC)]
    pub token_in: Address,

    #[clap(long, env, default_value = "6")]
    pub token_in_decimals: u8,

    #[clap(long, env, default_value_t = deployments::LINK)]
    pub token_out: Address,

    #[clap(long, env, default_value = "18")]
    pub token_out_decimals: u8,

    /// Fee tier of the pool to swap through in hundredths of a basis point.
    #[clap(long, env, default_value_t = FeeTier::MEDIUM)]
    pub fee_tier: FeeTier,

    #[clap(long, env, default_value_t = deployments::UNISWAP_V3_SWAP_ROUTER)]
    pub swap_router: Address,

    #[clap(long, env, default_value_t = deployments::UNISWAP_V3_FACTORY)]
    pub uniswap_factory: Address,

    #[clap(long, env, default_value_t = deployments::AAVE_LENDING_POOL)]
    pub lending_pool: Address,

    /// Block explorer used for transaction links in the logs.
    #[clap(long, env, default_value = "https://etherscan.io")]
    pub explorer_url: Url,

    #[clap(long, env, default_value = "warn,swap_deposit=debug,ethrpc=info,observe=info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: tracing::Level,

    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            amount,
            rpc_url,
            private_key,
            token_in,
            token_in_decimals,
            token_out,
            token_out_decimals,
            fee_tier,
            swap_router,
            uniswap_factory,
            lending_pool,
            explorer_url,
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "amount: {amount}")?;
        writeln!(f, "rpc_url: {rpc_url}")?;
        writeln!(f, "private_key: SECRET ({})", private_key.address())?;
        writeln!(f, "token_in: {token_in} ({token_in_decimals} decimals)")?;
        writeln!(f, "token_out: {token_out} ({token_out_decimals} decimals)")?;
        writeln!(f, "fee_tier: {fee_tier}")?;
        writeln!(f, "swap_router: {swap_router}")?;
        writeln!(f, "uniswap_factory: {uniswap_factory}")?;
        writeln!(f, "lending_pool: {lending_pool}")?;
        writeln!(f, "explorer_url: {explorer_url}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}
