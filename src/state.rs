use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::db::Database;
use crate::engine::GuidanceEngine;
use crate::ingest::TelemetryIngestor;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    db: Option<Arc<Database>>,
    engine: Arc<GuidanceEngine>,
    ingestor: Option<Arc<TelemetryIngestor>>,
}

impl AppState {
    pub fn new(
        db: Option<Arc<Database>>,
        engine: Arc<GuidanceEngine>,
        ingestor: Option<Arc<TelemetryIngestor>>,
    ) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            db,
            engine,
            ingestor,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn db(&self) -> Option<Arc<Database>> {
        self.db.clone()
    }

    pub fn engine(&self) -> Arc<GuidanceEngine> {
        Arc::clone(&self.engine)
    }

    pub fn ingest_connected(&self) -> bool {
        self.ingestor
            .as_ref()
            .map(|ingestor| ingestor.is_connected())
            .unwrap_or(false)
    }
}
