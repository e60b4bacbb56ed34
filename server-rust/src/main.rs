use clap::Parser;
use dotenvy::dotenv;
use joke_machine::{
    cli::Cli,
    config::Config,
    console,
    history::{HistoryStore, InMemoryHistoryStore, MongoHistoryStore},
    routes, AppState, BoxedError,
};
use joke_sdk::cohere::{CohereModel, CohereModelOptions};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Emails are only logged at `debug`, so they stay out of the default output.
const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    let cli = Cli::parse();

    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env(cli.history_backend()) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let history: Arc<dyn HistoryStore> = match &config.mongo {
        Some(mongo) => Arc::new(MongoHistoryStore::connect(mongo).await?),
        None => Arc::new(InMemoryHistoryStore::new()),
    };

    let generator = CohereModel::new(CohereModelOptions {
        base_url: config.cohere_base_url.clone(),
        api_key: config.cohere_key.clone(),
        model_id: config.cohere_model.clone(),
        timeout: Some(config.generation_timeout),
        ..Default::default()
    })?;

    let state = AppState::new(Arc::new(generator), history)?;
    let app = routes::router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port))
        .await
        .map_err(|err| Box::new(err) as BoxedError)?;

    info!("Webserver started and running at http://localhost:{}", cli.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| Box::new(err) as BoxedError)?;

    info!("server stopped");
    // A pending stdin read cannot be cancelled and would hold the runtime open.
    std::process::exit(0)
}

async fn shutdown_signal() {
    console::wait_for_stop(
        console::run_console(BufReader::new(tokio::io::stdin()), tokio::io::stdout()),
        tokio::signal::ctrl_c(),
    )
    .await;
}
