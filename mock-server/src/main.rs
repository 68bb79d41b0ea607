use mock_server::{AppState, MockConfig, DEFAULT_TOKEN, DEFAULT_USER_ID};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let config = MockConfig {
        token: std::env::var("MOCK_TOKEN").unwrap_or_else(|_| DEFAULT_TOKEN.to_string()),
        user_id: std::env::var("MOCK_USER_ID")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_USER_ID),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, user_id = config.user_id, "mock webmaster api listening");
    mock_server::run(listener, AppState::new(config)).await
}
