use tubewatch_common::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tubewatch_monitor=info,tubewatch_youtube=info,tubewatch_notifier=info,tubewatch_common=info".into()
            }),
        )
        .init();

    tracing::info!("TubeWatch monitor starting...");

    // Load configuration; a missing required value aborts before any
    // network call is made.
    let config = AppConfig::from_env()?;

    if let Err(e) = tubewatch_monitor::run::run(&config).await {
        tracing::error!(error = %e, "Run failed");
        return Err(e);
    }

    tracing::info!("TubeWatch monitor run complete.");
    Ok(())
}
