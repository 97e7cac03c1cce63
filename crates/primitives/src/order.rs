use alloy_primitives::B256;
use std::collections::HashMap;

/// The per-block order of the decoded events, keyed by L1 block hash.
pub type BlocksOrder = HashMap<B256, Vec<Order>>;

/// Identifies the per-kind sequence of an [`crate::L1Block`] an event was appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum EventOrder {
    /// A global exit root update.
    #[display("GlobalExitRoots")]
    GlobalExitRoots,
    /// A group of sequenced batches.
    #[display("SequenceBatches")]
    SequenceBatches,
    /// A forced batch.
    #[display("ForcedBatches")]
    ForcedBatches,
    /// A verified batch.
    #[display("VerifyBatch")]
    VerifyBatch,
    /// A sequenced forced batch.
    #[display("SequenceForceBatches")]
    SequenceForceBatches,
}

/// The position of an event within its owning block, used by the synchronizer to replay the
/// events of a block in their emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Order {
    /// The kind of the event.
    pub kind: EventOrder,
    /// The zero-based position of the event in the block's sequence for its kind.
    pub position: usize,
}

impl Order {
    /// Returns a new [`Order`].
    pub const fn new(kind: EventOrder, position: usize) -> Self {
        Self { kind, position }
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]", self.kind, self.position)
    }
}
