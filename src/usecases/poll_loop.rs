//! The update-processing loop: long-poll cursor protocol and batch handling.
//!
//! One cursor, one in-flight fetch, strictly sequential processing within a
//! batch. The cursor advances to (max update id + 1) only after the whole
//! batch has been attempted; transport failures retry the same cursor, so
//! delivery is at-least-once (duplicate note creation on reprocessing is
//! tolerated).

use crate::domain::Update;
use crate::ports::BotGateway;
use crate::usecases::interpreter::CommandInterpreter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Loop timings. Injected so tests can run with zero delays.
#[derive(Debug, Clone, Copy)]
pub struct PollTimings {
    /// Long-poll window the gateway holds a fetch open for.
    pub poll_timeout_secs: u64,
    /// Pause between iterations (avoids busy-looping on fast empty returns).
    pub idle_pause: Duration,
    /// Delay before retrying the same cursor after a transport failure.
    pub retry_delay: Duration,
}

impl Default for PollTimings {
    fn default() -> Self {
        Self {
            poll_timeout_secs: 100,
            idle_pause: Duration::from_secs(2),
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// Owns the cursor and drives fetch -> interpret -> reply -> advance.
pub struct PollLoop {
    gateway: Arc<dyn BotGateway>,
    interpreter: CommandInterpreter,
    timings: PollTimings,
    /// Next expected update id. None until the first non-empty ok batch;
    /// not persisted, so a restart reprocesses pending updates.
    cursor: Option<i64>,
}

impl PollLoop {
    pub fn new(
        gateway: Arc<dyn BotGateway>,
        interpreter: CommandInterpreter,
        timings: PollTimings,
    ) -> Self {
        Self {
            gateway,
            interpreter,
            timings,
            cursor: None,
        }
    }

    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    /// Run until the shutdown flag flips. The flag exists for clean
    /// shutdown in tests and on ctrl-c; steady state only ends with
    /// process termination.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("poll loop started");
        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = self.poll_once() => {}
            }
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(self.timings.idle_pause) => {}
            }
        }
        info!("poll loop stopped");
    }

    /// One iteration: fetch a batch, process it, advance the cursor.
    /// All failures are contained here; the loop never crashes.
    pub async fn poll_once(&mut self) {
        debug!(cursor = ?self.cursor, "fetching updates");
        let page = match self
            .gateway
            .fetch_updates(self.cursor, self.timings.poll_timeout_secs)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "update fetch failed; will retry same cursor");
                tokio::time::sleep(self.timings.retry_delay).await;
                return;
            }
        };

        if !page.ok {
            warn!(description = ?page.description, "non-ok response from gateway");
            return;
        }
        if page.updates.is_empty() {
            return;
        }

        for update in &page.updates {
            self.process_update(update).await;
        }

        // Max over the whole batch, malformed updates included, so they are
        // acknowledged too and not refetched forever.
        if let Some(max_id) = page.updates.iter().map(|u| u.update_id).max() {
            self.cursor = Some(max_id + 1);
            info!(
                cursor = max_id + 1,
                count = page.updates.len(),
                "batch processed"
            );
        }
    }

    /// Handle one update. A failure here skips the update, never the batch.
    async fn process_update(&self, update: &Update) {
        let Some(msg) = update.message.as_ref() else {
            debug!(update_id = update.update_id, "update has no text message; skipping");
            return;
        };
        match self.interpreter.handle_message(msg.chat_id, &msg.text).await {
            Ok(Some(reply)) => {
                // Send is best-effort: a failed delivery must not stall the batch.
                if let Err(e) = self.gateway.send_message(&reply).await {
                    warn!(chat_id = msg.chat_id, error = %e, "failed to send reply");
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    update_id = update.update_id,
                    chat_id = msg.chat_id,
                    error = %e,
                    "failed to handle update; skipping"
                );
            }
        }
    }
}
