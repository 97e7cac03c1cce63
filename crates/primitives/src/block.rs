use crate::{
    EventOrder, ForcedBatch, GlobalExitRoot, Order, RollupEvent, RollupEventRef, SequencedBatch,
    SequencedForceBatch, VerifiedBatch,
};
use alloy_primitives::B256;

/// Information about a block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BlockInfo {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

impl BlockInfo {
    /// Returns a new instance of [`BlockInfo`].
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

impl core::fmt::Display for BlockInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BlockInfo {{ number: {}, hash: {} }}", self.number, self.hash)
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for BlockInfo {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let number = u.int_in_range(0..=u32::MAX)?;
        let hash = <B256 as arbitrary::Arbitrary<'_>>::arbitrary(u)?;
        Ok(Self { number: number as u64, hash })
    }
}

/// An L1 block along with the rollup events it contains, grouped per kind.
///
/// Events of each kind are stored in emission order. The interleaving across kinds is recorded
/// separately as a sequence of [`Order`], see [`L1Block::replay`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct L1Block {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The block timestamp.
    pub received_at: u64,
    /// The global exit root updates.
    pub global_exit_roots: Vec<GlobalExitRoot>,
    /// The forced batches.
    pub forced_batches: Vec<ForcedBatch>,
    /// The groups of sequenced batches, one per `sequenceBatches` call.
    pub sequenced_batches: Vec<Vec<SequencedBatch>>,
    /// The verified batches.
    pub verified_batches: Vec<VerifiedBatch>,
    /// The sequenced forced batches.
    pub sequenced_force_batches: Vec<SequencedForceBatch>,
}

impl L1Block {
    /// Returns a new [`L1Block`] without any event.
    pub fn new(info: BlockInfo, parent_hash: B256, received_at: u64) -> Self {
        Self { number: info.number, hash: info.hash, parent_hash, received_at, ..Default::default() }
    }

    /// Returns the [`BlockInfo`] identifying the block.
    pub const fn info(&self) -> BlockInfo {
        BlockInfo { number: self.number, hash: self.hash }
    }

    /// Appends the event to the sequence of its kind and returns its [`Order`].
    pub fn push(&mut self, event: RollupEvent) -> Order {
        let kind = event.kind();
        let position = match event {
            RollupEvent::GlobalExitRoot(root) => push(&mut self.global_exit_roots, root),
            RollupEvent::ForcedBatch(batch) => push(&mut self.forced_batches, batch),
            RollupEvent::SequencedBatches(batches) => push(&mut self.sequenced_batches, batches),
            RollupEvent::VerifiedBatch(batch) => push(&mut self.verified_batches, batch),
            RollupEvent::SequencedForceBatch(batch) => {
                push(&mut self.sequenced_force_batches, batch)
            }
        };
        Order { kind, position }
    }

    /// Returns the event referenced by the [`Order`], if any.
    pub fn event(&self, order: &Order) -> Option<RollupEventRef<'_>> {
        let position = order.position;
        Some(match order.kind {
            EventOrder::GlobalExitRoots => {
                RollupEventRef::GlobalExitRoot(self.global_exit_roots.get(position)?)
            }
            EventOrder::ForcedBatches => {
                RollupEventRef::ForcedBatch(self.forced_batches.get(position)?)
            }
            EventOrder::SequenceBatches => {
                RollupEventRef::SequencedBatches(self.sequenced_batches.get(position)?)
            }
            EventOrder::VerifyBatch => {
                RollupEventRef::VerifiedBatch(self.verified_batches.get(position)?)
            }
            EventOrder::SequenceForceBatches => {
                RollupEventRef::SequencedForceBatch(self.sequenced_force_batches.get(position)?)
            }
        })
    }

    /// Replays the events of the block in the order described by `orders`.
    ///
    /// Returns [`None`] if any of the orders points outside of the block's events.
    pub fn replay(&self, orders: &[Order]) -> Option<Vec<RollupEventRef<'_>>> {
        orders.iter().map(|order| self.event(order)).collect()
    }

    /// Returns the total count of events in the block.
    pub fn event_count(&self) -> usize {
        self.global_exit_roots.len() +
            self.forced_batches.len() +
            self.sequenced_batches.len() +
            self.verified_batches.len() +
            self.sequenced_force_batches.len()
    }
}

fn push<T>(items: &mut Vec<T>, item: T) -> usize {
    items.push(item);
    items.len() - 1
}
