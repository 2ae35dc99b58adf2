use posture_dashboard::{router, AppState, Config, HttpSource, Poller, PollerStats, SharedDisplay};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let display = SharedDisplay::new();
    let stats = PollerStats::new();

    let source = HttpSource::new(config.api_url.clone());
    info!("posture feed at {}", source.url());
    let poller = Poller::new(source, display.clone(), config.poll_interval, stats.clone()).spawn();

    let app = router(AppState::new(display, stats));
    let addr = config.listen_addr();

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.abort();
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
