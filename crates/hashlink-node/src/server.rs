//! Router assembly and the serve loop.

use std::future::Future;

use anyhow::Context;
use axum::Router;
use hashlink::Chain;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::NodeConfig;
use crate::routes;
use crate::state::AppState;

/// The full application: routes plus middleware.
pub fn app(state: AppState, config: &NodeConfig) -> Router {
    routes::router()
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Generate the identity, bind, and serve until ctrl-c.
///
/// Identity or genesis failure ends the process with an error.
pub async fn run(config: NodeConfig) -> anyhow::Result<()> {
    let chain_config = config.chain_config();
    let chain = tokio::task::spawn_blocking(move || Chain::bootstrap(chain_config))
        .await?
        .context("failed to generate the signing identity")?;

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    serve(listener, chain, &config, shutdown_signal()).await
}

/// Serve `chain` on `listener`, mining genesis concurrently.
///
/// Requests are answered as soon as this is called; until genesis is
/// installed they get 503. Returns an error if genesis cannot be created,
/// otherwise when `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    chain: Chain,
    config: &NodeConfig,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let genesis_chain = chain.clone();
    let genesis = tokio::task::spawn_blocking(move || genesis_chain.initialize_genesis());

    let app = app(AppState::new(chain.clone()), config);
    tracing::info!(
        addr = %listener.local_addr()?,
        difficulty = chain.difficulty(),
        "hashlink node listening"
    );

    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    };
    tokio::pin!(server);

    tokio::select! {
        served = &mut server => {
            served?;
            return Ok(());
        }
        mined = genesis => {
            mined?.context("failed to create the genesis record")?;
        }
    }

    server.await?;
    tracing::info!("hashlink node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutdown signal received");
}
