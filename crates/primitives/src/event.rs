use crate::{
    EventOrder, ForcedBatch, GlobalExitRoot, SequencedBatch, SequencedForceBatch, VerifiedBatch,
};

/// A decoded rollup event, ready to be appended to its owning [`crate::L1Block`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum RollupEvent {
    /// A global exit root update.
    GlobalExitRoot(GlobalExitRoot),
    /// A forced batch.
    ForcedBatch(ForcedBatch),
    /// The batches sequenced by a single `sequenceBatches` call.
    SequencedBatches(Vec<SequencedBatch>),
    /// A verified batch.
    VerifiedBatch(VerifiedBatch),
    /// A sequenced forced batch.
    SequencedForceBatch(SequencedForceBatch),
}

impl RollupEvent {
    /// Returns the [`EventOrder`] kind of the event.
    pub const fn kind(&self) -> EventOrder {
        match self {
            Self::GlobalExitRoot(_) => EventOrder::GlobalExitRoots,
            Self::ForcedBatch(_) => EventOrder::ForcedBatches,
            Self::SequencedBatches(_) => EventOrder::SequenceBatches,
            Self::VerifiedBatch(_) => EventOrder::VerifyBatch,
            Self::SequencedForceBatch(_) => EventOrder::SequenceForceBatches,
        }
    }
}

/// A borrowed view of an event stored in an [`crate::L1Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupEventRef<'a> {
    /// A global exit root update.
    GlobalExitRoot(&'a GlobalExitRoot),
    /// A forced batch.
    ForcedBatch(&'a ForcedBatch),
    /// The batches sequenced by a single `sequenceBatches` call.
    SequencedBatches(&'a [SequencedBatch]),
    /// A verified batch.
    VerifiedBatch(&'a VerifiedBatch),
    /// A sequenced forced batch.
    SequencedForceBatch(&'a SequencedForceBatch),
}

impl RollupEventRef<'_> {
    /// Returns the [`EventOrder`] kind of the event.
    pub const fn kind(&self) -> EventOrder {
        match self {
            Self::GlobalExitRoot(_) => EventOrder::GlobalExitRoots,
            Self::ForcedBatch(_) => EventOrder::ForcedBatches,
            Self::SequencedBatches(_) => EventOrder::SequenceBatches,
            Self::VerifiedBatch(_) => EventOrder::VerifyBatch,
            Self::SequencedForceBatch(_) => EventOrder::SequenceForceBatches,
        }
    }
}
