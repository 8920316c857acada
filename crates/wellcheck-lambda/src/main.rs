use tracing_subscriber::EnvFilter;

use wellcheck_lambda::config::{ApiConfig, LogFormat};
use wellcheck_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ApiConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init(),
    }

    tracing::info!(
        table_revision = ?config.table_revision,
        require_respondent = config.require_respondent,
        "starting wellcheck api"
    );

    let app = wellcheck_lambda::app(AppState::new(config));
    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
