use {
    crate::{
        domain::{Asset, FeeTier},
        traits::{ChainRead, ChainWrite},
    },
    alloy::primitives::{Address, B256},
    std::sync::Arc,
    url::Url,
};

/// Contracts the pipeline talks to besides the two tokens.
#[derive(Clone, Copy, Debug)]
pub struct Deployment {
    pub swap_router: Address,
    pub factory: Address,
    pub lending_pool: Address,
}

/// Builds human friendly links to transactions.
#[derive(Clone, Debug)]
pub struct Explorer {
    base: Url,
}

impl Explorer {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn tx(&self, hash: B256) -> String {
        format!("{}/tx/{hash}", self.base.as_str().trim_end_matches('/'))
    }
}

/// Everything a run needs apart from the amount to swap.
#[derive(Clone)]
pub struct Context {
    pub reader: Arc<dyn ChainRead>,
    pub writer: Arc<dyn ChainWrite>,
    pub deployment: Deployment,
    pub token_in: Asset,
    pub token_out: Asset,
    pub fee_tier: FeeTier,
    pub explorer: Explorer,
}
