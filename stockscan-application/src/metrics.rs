use std::sync::atomic::{AtomicU64, Ordering};

use stockscan_domain::IngestOutcome;

#[derive(Debug, Default)]
pub struct Metrics {
    scans_received: AtomicU64,
    scans_inserted: AtomicU64,
    scans_updated: AtomicU64,
    scans_rejected: AtomicU64,
    store_failures: AtomicU64,
}

impl Metrics {
    pub fn record_received(&self) {
        self.scans_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.scans_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: &IngestOutcome) {
        let counter = match outcome {
            IngestOutcome::Inserted(_) => &self.scans_inserted,
            IngestOutcome::Updated(_) => &self.scans_updated,
            IngestOutcome::Failed { .. } => &self.store_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inserted(&self) -> u64 {
        self.scans_inserted.load(Ordering::Relaxed)
    }

    pub fn updated(&self) -> u64 {
        self.scans_updated.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let received = self.scans_received.load(Ordering::Relaxed);
        let inserted = self.scans_inserted.load(Ordering::Relaxed);
        let updated = self.scans_updated.load(Ordering::Relaxed);
        let rejected = self.scans_rejected.load(Ordering::Relaxed);
        let failures = self.store_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE stockscan_scans_received_total counter\n\
stockscan_scans_received_total {}\n\
# TYPE stockscan_scans_inserted_total counter\n\
stockscan_scans_inserted_total {}\n\
# TYPE stockscan_scans_updated_total counter\n\
stockscan_scans_updated_total {}\n\
# TYPE stockscan_scans_rejected_total counter\n\
stockscan_scans_rejected_total {}\n\
# TYPE stockscan_store_failures_total counter\n\
stockscan_store_failures_total {}\n",
            received, inserted, updated, rejected, failures
        )
    }
}
