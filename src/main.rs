//! Wiring & DI. Entry point: bootstrap adapters, inject into the poll loop.
//! No business logic here; a store connection failure is fatal and the
//! process never starts serving updates.

use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tg_notes::adapters::persistence::{MemoryNoteStore, SqliteNoteStore};
use tg_notes::adapters::telegram::BotApiGateway;
use tg_notes::ports::{BotGateway, NoteStorePort};
use tg_notes::usecases::poll_loop::PollTimings;
use tg_notes::usecases::{CommandInterpreter, PollLoop};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    let cfg = tg_notes::shared::config::AppConfig::load().unwrap_or_default();

    let token = cfg.bot_token().unwrap_or_default();
    if token.is_empty() {
        anyhow::bail!("Set TG_NOTES_BOT_TOKEN (env or .env). Get one from @BotFather");
    }

    // --- Note store (connection failure is fatal; do not serve updates) ---
    let store: Arc<dyn NoteStorePort> = if cfg.is_ephemeral() {
        warn!("TG_NOTES_EPHEMERAL set; notes will not survive restart");
        Arc::new(MemoryNoteStore::new())
    } else {
        let db_path = cfg.db_path_or_default();
        match SqliteNoteStore::connect(&db_path).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!(db_path, error = %e, "note store connection could not be established");
                anyhow::bail!("note store unavailable: {}", e);
            }
        }
    };

    // --- Gateway + loop ---
    let poll_timeout_secs = cfg.poll_timeout_secs_or_default();
    let gateway: Arc<dyn BotGateway> = Arc::new(
        BotApiGateway::new(&cfg.api_url_or_default(), &token, poll_timeout_secs)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    let timings = PollTimings {
        poll_timeout_secs,
        idle_pause: Duration::from_millis(cfg.idle_pause_ms_or_default()),
        retry_delay: Duration::from_millis(cfg.retry_delay_ms_or_default()),
    };
    let interpreter = CommandInterpreter::new(Arc::clone(&store));
    let poll_loop = PollLoop::new(Arc::clone(&gateway), interpreter, timings);

    // --- Clean shutdown on ctrl-c ---
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received; shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    poll_loop.run(shutdown_rx).await;

    Ok(())
}
