pub mod allowance;
pub mod arguments;
pub mod context;
pub mod deposit;
pub mod domain;
pub mod error;
pub mod onchain;
pub mod pipeline;
pub mod pool;
pub mod swap;
pub mod traits;

use {
    anyhow::{Context as _, Result},
    arguments::Arguments,
    context::{Context, Deployment, Explorer},
    domain::Asset,
    onchain::Onchain,
    pipeline::{Pipeline, Summary},
    std::sync::Arc,
};

/// Connects to the node, then swaps `args.amount` of the input token and
/// deposits the proceeds on behalf of the signer.
pub async fn start(args: Arguments) -> Result<Summary> {
    let token_in = Asset::new(args.token_in, args.token_in_decimals);
    let token_out = Asset::new(args.token_out, args.token_out_decimals);
    let amount_in = token_in
        .to_base_units(&args.amount)
        .with_context(|| format!("invalid swap amount {:?}", args.amount))?;

    let signer = args.private_key.address();
    let provider = ethrpc::provider_with_signer(&args.rpc_url, args.private_key);
    let chain = Arc::new(Onchain::new(provider, signer));

    let ctx = Context {
        reader: chain.clone(),
        writer: chain,
        deployment: Deployment {
            swap_router: args.swap_router,
            factory: args.uniswap_factory,
            lending_pool: args.lending_pool,
        },
        token_in,
        token_out,
        fee_tier: args.fee_tier,
        explorer: Explorer::new(args.explorer_url),
    };
    tracing::info!(%signer, fee_tier = %args.fee_tier, "connected to node");

    let summary = Pipeline::new(ctx).run(amount_in).await?;
    Ok(summary)
}
