use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request counters, shared by all handlers.
#[derive(Clone)]
pub struct Metrics {
    pub category_listings: Arc<AtomicU64>,
    pub file_listings: Arc<AtomicU64>,
    pub searches: Arc<AtomicU64>,
    pub streams_started: Arc<AtomicU64>,
    pub downloads_started: Arc<AtomicU64>,
    pub bytes_served: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            category_listings: Arc::new(AtomicU64::new(0)),
            file_listings: Arc::new(AtomicU64::new(0)),
            searches: Arc::new(AtomicU64::new(0)),
            streams_started: Arc::new(AtomicU64::new(0)),
            downloads_started: Arc::new(AtomicU64::new(0)),
            bytes_served: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_category_listings(&self) {
        self.category_listings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_file_listings(&self) {
        self.file_listings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_searches(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_streams(&self) {
        self.streams_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_downloads(&self) {
        self.downloads_started.fetch_add(1, Ordering::Relaxed);
    }

    // Counted when a chunk is handed to the client, so aborted transfers
    // only contribute what was actually sent.
    pub fn add_bytes(&self, bytes: u64) {
        self.bytes_served.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            category_listings: self.category_listings.load(Ordering::Relaxed),
            file_listings: self.file_listings.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            streams_started: self.streams_started.load(Ordering::Relaxed),
            downloads_started: self.downloads_started.load(Ordering::Relaxed),
            bytes_served: self.bytes_served.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub category_listings: u64,
    pub file_listings: u64,
    pub searches: u64,
    pub streams_started: u64,
    pub downloads_started: u64,
    pub bytes_served: u64,
    pub uptime_seconds: u64,
}
