use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::aggregator::Aggregator;
use crate::api::{router, serve_api};
use crate::chain::{AlloyTokenContract, ChainReader};
use crate::config::HolderscanConfig;
use crate::explorer::{ExplorerTransport, HolderDirectory};
use crate::facade::QueryFacade;
use crate::provider::{create_http_provider, EthereumHttpProvider};

/// The facade wired to a live RPC endpoint and block explorer.
pub type LiveFacade = QueryFacade<AlloyTokenContract<EthereumHttpProvider>, ExplorerTransport>;

/// Wire the query pipeline from `config`.
pub fn build_facade(config: &HolderscanConfig) -> anyhow::Result<LiveFacade> {
    let provider = create_http_provider(config.rpc.clone())?;

    let chain = ChainReader::new(AlloyTokenContract::new(config.token_address, provider))
        .with_call_timeout(config.rpc_timeout)
        .with_max_concurrency(config.max_concurrency);

    let transport = ExplorerTransport::new(config.token_address, config.explorer.clone())?;
    let directory = HolderDirectory::new(config.token_address, transport, &config.explorer);

    Ok(QueryFacade::new(Aggregator::new(chain, directory)))
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Environment, with .env loaded first
    let config = HolderscanConfig::from_env()?;
    info!(
        token = %config.token_address,
        explorer = %config.explorer.api_url,
        rpc_rate_limit = ?config.rpc.rate_limit_per_second,
        max_concurrency = config.max_concurrency,
        "Loaded configuration"
    );

    let facade = build_facade(&config)?;

    let listener = TcpListener::bind(("0.0.0.0", config.api_port)).await?;

    serve_api(listener, router(Arc::new(facade))).await?;

    Ok(())
}
