use metrics::{Counter, Histogram};
use metrics_derive::Metrics;
use zkevm_primitives::EventOrder;

/// The metrics for the [`super::Etherman`].
#[derive(Metrics, Clone)]
#[metrics(scope = "etherman")]
pub struct EthermanMetrics {
    /// A counter on the global exit root updates processed.
    pub global_exit_roots: Counter,
    /// A counter on the forced batches processed.
    pub forced_batches: Counter,
    /// A counter on the sequence batches calls processed.
    pub sequenced_batches: Counter,
    /// A counter on the verified batches processed.
    pub verified_batches: Counter,
    /// A counter on the sequenced forced batches processed.
    pub sequenced_force_batches: Counter,
    /// A counter on the logs with an unknown signature.
    pub unknown_logs: Counter,
    /// A counter on the range reads that failed.
    pub failed_range_reads: Counter,
    /// A histogram of the range reads duration.
    pub range_read_duration: Histogram,
}

impl EthermanMetrics {
    /// Records an event of the provided kind by updating the appropriate metric.
    pub fn record_event(&self, kind: EventOrder) {
        match kind {
            EventOrder::GlobalExitRoots => self.global_exit_roots.increment(1),
            EventOrder::ForcedBatches => self.forced_batches.increment(1),
            EventOrder::SequenceBatches => self.sequenced_batches.increment(1),
            EventOrder::VerifyBatch => self.verified_batches.increment(1),
            EventOrder::SequenceForceBatches => self.sequenced_force_batches.increment(1),
        }
    }
}
