use homework_bot::config::Config;
use homework_bot::shutdown::ShutdownSignal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(severity = "critical", "Startup aborted: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        endpoint = %config.practicum_endpoint,
        chat_id = %config.telegram_chat_id,
        "Homework bot configured"
    );

    let shutdown = match ShutdownSignal::install() {
        Ok(shutdown) => shutdown,
        Err(e) => {
            tracing::error!(severity = "critical", "Failed to install signal handlers: {}", e);
            std::process::exit(1);
        }
    };

    let poll_loop = homework_bot::create_poll_loop(&config);
    poll_loop.run(shutdown.recv()).await;

    tracing::info!("Homework bot stopped");
}
