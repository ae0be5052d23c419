use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::db::operations::{insert_focus_event, NewFocusEvent};
use crate::db::Database;

const TOPIC_PREFIX: &str = "monitor/";
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Splits a channel name as a topic path and extracts the focus event it
/// carries, if any. Accepts `monitor/{subject}/{kind}`-shaped channels:
/// at least three segments, a non-empty subject in the second, and some
/// segment containing "focus". Everything else is dropped by the caller.
pub fn parse_focus_message(channel: &str, payload: &str) -> Option<NewFocusEvent> {
    let segments: Vec<&str> = channel.split('/').collect();
    if segments.len() < 3 {
        return None;
    }

    let subject_id = segments[1];
    if subject_id.is_empty() {
        return None;
    }

    if !segments.iter().any(|segment| segment.contains("focus")) {
        return None;
    }

    Some(NewFocusEvent {
        subject_id: subject_id.to_string(),
        status: payload.to_string(),
    })
}

/// Long-lived telemetry consumer. Owns a single pub/sub subscription to
/// the `monitor/` channel hierarchy, persisting accepted focus events and
/// dropping everything else. Runs until `stop()`; per-message failures are
/// logged and skipped, connection failures trigger a delayed resubscribe.
pub struct TelemetryIngestor {
    db: Arc<Database>,
    redis_url: String,
    connected: AtomicBool,
    running: RwLock<bool>,
}

impl TelemetryIngestor {
    pub fn new(db: Arc<Database>, redis_url: String) -> Self {
        Self {
            db,
            redis_url,
            connected: AtomicBool::new(false),
            running: RwLock::new(false),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub async fn start(self: Arc<Self>) {
        {
            let mut running = self.running.write().await;
            if *running {
                warn!("telemetry ingestor already running");
                return;
            }
            *running = true;
        }

        info!("starting telemetry ingestor");

        let ingestor = Arc::clone(&self);
        tokio::spawn(async move {
            ingestor.consume_loop().await;
        });
    }

    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
        self.connected.store(false, Ordering::Relaxed);
        info!("telemetry ingestor stopping");
    }

    async fn consume_loop(&self) {
        loop {
            {
                let running = self.running.read().await;
                if !*running {
                    info!("telemetry ingestor stopped");
                    break;
                }
            }

            match self.subscribe_and_listen().await {
                Ok(_) => {
                    info!("telemetry subscription ended");
                }
                Err(e) => {
                    error!(error = %e, "telemetry subscription error, reconnecting...");
                }
            }

            self.connected.store(false, Ordering::Relaxed);
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    async fn subscribe_and_listen(&self) -> Result<(), IngestError> {
        let client =
            redis::Client::open(self.redis_url.as_str()).map_err(IngestError::Connection)?;

        let mut pubsub = client
            .get_async_pubsub()
            .await
            .map_err(IngestError::Connection)?;

        let pattern = format!("{TOPIC_PREFIX}*");
        pubsub
            .psubscribe(&pattern)
            .await
            .map_err(IngestError::Subscribe)?;
        debug!(pattern = %pattern, "subscribed to telemetry pattern");

        self.connected.store(true, Ordering::Relaxed);
        info!("telemetry ingestor connected and listening");

        use futures_util::StreamExt;
        let mut stream = pubsub.on_message();

        loop {
            {
                let running = self.running.read().await;
                if !*running {
                    break;
                }
            }

            let msg = match tokio::time::timeout(Duration::from_secs(30), stream.next()).await {
                Ok(Some(msg)) => msg,
                Ok(None) => {
                    warn!("telemetry subscription stream ended");
                    break;
                }
                Err(_) => continue,
            };

            let channel = msg.get_channel_name().to_string();
            let payload: String = match msg.get_payload() {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, channel = %channel, "undecodable telemetry payload");
                    continue;
                }
            };

            self.handle_message(&channel, &payload).await;
        }

        Ok(())
    }

    /// Never fails the loop: unrecognized topics are dropped silently and
    /// persistence errors are logged, not retried.
    async fn handle_message(&self, channel: &str, payload: &str) {
        let Some(event) = parse_focus_message(channel, payload) else {
            debug!(channel = %channel, "dropping non-focus telemetry message");
            return;
        };

        match insert_focus_event(&self.db, &event).await {
            Ok(saved) => {
                debug!(subject_id = %saved.subject_id, status = %saved.status, "focus event persisted");
            }
            Err(e) => {
                error!(error = %e, subject_id = %event.subject_id, "failed to persist focus event, dropping");
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Redis connection error: {0}")]
    Connection(redis::RedisError),

    #[error("Subscribe error: {0}")]
    Subscribe(redis::RedisError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::operations::recent_focus_events;

    #[test]
    fn focus_topic_yields_an_event() {
        let event = parse_focus_message("monitor/42/focus", "true").unwrap();
        assert_eq!(event.subject_id, "42");
        assert_eq!(event.status, "true");
    }

    #[test]
    fn focus_substring_matches_anywhere_in_a_segment() {
        assert!(parse_focus_message("monitor/9/focus_state", "false").is_some());
        assert!(parse_focus_message("monitor/9/refocused", "false").is_some());
    }

    #[test]
    fn short_topics_are_dropped() {
        assert_eq!(parse_focus_message("monitor/bad", "true"), None);
        assert_eq!(parse_focus_message("monitor", "true"), None);
    }

    #[test]
    fn non_focus_topics_are_dropped() {
        assert_eq!(parse_focus_message("monitor/42/posture", "true"), None);
    }

    #[test]
    fn empty_subject_is_dropped() {
        assert_eq!(parse_focus_message("monitor//focus", "true"), None);
    }

    #[test]
    fn payload_is_stored_verbatim() {
        let event = parse_focus_message("monitor/42/focus", "{\"raw\": 1}").unwrap();
        assert_eq!(event.status, "{\"raw\": 1}");
    }

    #[tokio::test]
    async fn accepted_message_persists_exactly_one_event() {
        let db = Arc::new(Database::connect_ephemeral().await.unwrap());
        let ingestor = TelemetryIngestor::new(Arc::clone(&db), "redis://unused".to_string());

        ingestor.handle_message("monitor/42/focus", "true").await;
        ingestor.handle_message("monitor/bad", "true").await;

        let events = recent_focus_events(&db, "42").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, "true");
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn connects_to_a_local_broker() {
        let db = Arc::new(Database::connect_ephemeral().await.unwrap());
        let ingestor = Arc::new(TelemetryIngestor::new(
            db,
            "redis://localhost:6379".to_string(),
        ));
        Arc::clone(&ingestor).start().await;
        tokio::time::sleep(Duration::from_millis(500)).await;
        ingestor.stop().await;
    }
}
