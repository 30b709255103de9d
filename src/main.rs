use anyhow::Result;
use std::sync::Arc;
use todod::{config::Config, rest, storage::TodoStore, AppContext};
use tracing::{error, info};

fn setup_logging(filter: &str) {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter.to_string()))
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    setup_logging(&config.log_filter);

    // The listener is not bound until the store connection has succeeded; a
    // failed open is logged and ends the process, with no retry.
    let store = match TodoStore::new(&config.db_path).await {
        Ok(store) => store,
        Err(e) => {
            error!(
                "could not open task store at {}: {e:#}",
                config.db_path.display()
            );
            return Err(e);
        }
    };
    info!("task store ready at {}", config.db_path.display());

    let ctx = Arc::new(AppContext { config, store });
    rest::serve(ctx).await
}
