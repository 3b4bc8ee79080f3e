//! Verity HTTP server entrypoint.

use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use verity::claims::ExtractorConfig;
use verity::config::Config;
use verity::evidence::{
    CredentialPool, EvidenceRetriever, NewsApiClient, RetrieverConfig, new_evidence_cache,
};
use verity::gateway::{HandlerState, create_router_with_state};
use verity::nli::{HttpNliClient, NliBackend, NliConfig, NliScorer, new_nli_cache};
use verity::pipeline::Pipeline;
use verity::text::TextNormalizer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr = config.socket_addr();

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        search_credentials = config.search_api_keys.len(),
        nli_endpoint = config.nli_url.is_some(),
        "Verity starting"
    );

    let search = Arc::new(NewsApiClient::new(
        config.search_url.clone(),
        config.search_timeout,
    ));
    if config.is_search_offline() {
        tracing::warn!("No VERITY_SEARCH_API_KEYS configured, serving synthetic sources");
    }
    let retriever = EvidenceRetriever::new(
        search,
        Arc::new(CredentialPool::new(config.search_api_keys.clone())),
        new_evidence_cache(),
        RetrieverConfig::default().with_query_delay(config.query_delay),
    );

    let nli_config = NliConfig::default().with_timeout(config.nli_timeout);
    let scorer = match &config.nli_url {
        Some(url) => {
            let client =
                HttpNliClient::new(url.clone(), config.nli_token.clone(), config.nli_timeout);
            NliScorer::new(
                vec![Arc::new(client) as Arc<dyn NliBackend>],
                new_nli_cache(),
                nli_config,
            )
        }
        None => {
            tracing::warn!("No VERITY_NLI_URL configured, scoring with the lexical heuristic");
            NliScorer::new(Vec::new(), new_nli_cache(), nli_config)
        }
    };

    let pipeline = Pipeline::new(retriever, scorer)
        .with_normalizer(TextNormalizer::new(config.max_input_chars))
        .with_extractor(ExtractorConfig::default().with_max_claims(config.max_claims));

    let app = create_router_with_state(HandlerState::new(pipeline));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Verity shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("VERITY_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
