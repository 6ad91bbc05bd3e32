mod config;

use anyhow::Result;
use config::{AppConfig, LineConfig};
use std::sync::Arc;
use stockbot_api::{create_routes, AppState, WebhookGateway};
use stockbot_models::{ScheduleRule, Watchlist};
use stockbot_services::{
    BroadcastScheduler, ChatClient, FixedQuotes, LineClient, MessageRouter, PriceSource,
    TwseQuoteApi,
};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockbot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting stockbot quote service");

    // Load configuration; missing chat credentials are fatal before serving
    let config = AppConfig::new()?;
    let line = LineConfig::from_env()?;
    info!("✅ Configuration loaded successfully");
    info!("🌐 Server will bind to: {}", config.server_addr());

    let price_source: Arc<dyn PriceSource> = match config.provider.kind.as_str() {
        "fixed" => {
            warn!("🎮 Using fixed placeholder quotes - no live market data");
            Arc::new(FixedQuotes::sample())
        }
        "twse" => Arc::new(TwseQuoteApi::new(
            config.twse.base_url.clone(),
            config.twse.timeout_secs,
        )?),
        other => anyhow::bail!("unknown quote provider: {other}"),
    };

    let chat: Arc<dyn ChatClient> = Arc::new(LineClient::new(line.channel_access_token.clone()));

    // Background broadcast scheduler
    let watchlist = Watchlist::default_report();
    let rule = ScheduleRule::daily_at(config.broadcast.hour, config.broadcast.minute);
    info!(
        "⏰ Daily report at {:02}:{:02} for {} instruments",
        rule.hour,
        rule.minute,
        watchlist.instrument_count()
    );

    let shutdown = CancellationToken::new();
    let scheduler = BroadcastScheduler::new(
        watchlist,
        rule,
        Arc::clone(&price_source),
        Arc::clone(&chat),
    );
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown.clone()));

    // HTTP surface: webhook callback + health probe
    let state = AppState {
        gateway: Arc::new(WebhookGateway::new(line.channel_secret)),
        router: Arc::new(MessageRouter::new(price_source)),
        chat,
    };
    let app = create_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
    info!("✅ All services started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("👋 Shutting down gracefully");
    shutdown.cancel();
    scheduler_handle.await?;

    Ok(())
}
