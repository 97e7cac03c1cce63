use crate::{ConsistencyError, EthRequestError, EthermanResult, L1ChainReader};
use zkevm_primitives::{BlockInfo, BlocksOrder, L1Block, Order, RollupEvent};

/// Accumulates the decoded events of a range read into [`L1Block`]s, recording the order in
/// which they were emitted.
///
/// Blocks are opened lazily on the first event they contain and are never reordered. The
/// metadata of a block is fetched from the chain reader once, when the block is opened.
#[derive(Debug, Default)]
pub struct BlockAccumulator {
    blocks: Vec<L1Block>,
    order: BlocksOrder,
}

impl BlockAccumulator {
    /// Returns a new empty [`BlockAccumulator`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated blocks.
    pub fn blocks(&self) -> &[L1Block] {
        &self.blocks
    }

    /// Returns the order of the accumulated events, keyed by block hash.
    pub const fn order(&self) -> &BlocksOrder {
        &self.order
    }

    /// Returns the block currently accumulating events, if any.
    pub fn current(&self) -> Option<&L1Block> {
        self.blocks.last()
    }

    /// Makes the block the current block and returns it, fetching its metadata if the block
    /// wasn't opened yet.
    ///
    /// The block must either be the current block, or a new block with a higher number and a
    /// different hash. Anything else is a [`ConsistencyError`], in which case the accumulated
    /// blocks are left untouched.
    pub async fn open<R: L1ChainReader>(
        &mut self,
        block: BlockInfo,
        reader: &R,
    ) -> EthermanResult<&L1Block> {
        let index = self.open_index(block, reader).await?;
        Ok(&self.blocks[index])
    }

    /// Appends the event to the block, opening the block if needed, and records its [`Order`].
    pub async fn absorb<R: L1ChainReader>(
        &mut self,
        block: BlockInfo,
        reader: &R,
        event: RollupEvent,
    ) -> EthermanResult<Order> {
        let index = self.open_index(block, reader).await?;
        let order = self.blocks[index].push(event);
        self.order.entry(block.hash).or_default().push(order);
        Ok(order)
    }

    /// Consumes the accumulator, returning the blocks and the order of their events.
    pub fn into_parts(self) -> (Vec<L1Block>, BlocksOrder) {
        (self.blocks, self.order)
    }

    async fn open_index<R: L1ChainReader>(
        &mut self,
        block: BlockInfo,
        reader: &R,
    ) -> EthermanResult<usize> {
        if let Some(current) = self.current().map(L1Block::info) {
            if current == block {
                return Ok(self.blocks.len() - 1);
            }
            if current.hash == block.hash || current.number == block.number {
                return Err(ConsistencyError::BlockMismatch { current, log: block }.into());
            }
            if block.number < current.number {
                return Err(ConsistencyError::OutOfOrder { current, log: block }.into());
            }
        }

        tracing::trace!(target: "zkevm::etherman", %block, "fetching block");
        let header = reader
            .block_by_hash(block.hash)
            .await?
            .ok_or(EthRequestError::MissingBlock(block.hash.into()))?
            .header;
        if header.number != block.number {
            return Err(
                ConsistencyError::FetchedBlockMismatch { log: block, fetched: header.number }.into()
            );
        }

        self.blocks.push(L1Block::new(block, header.parent_hash, header.timestamp));
        Ok(self.blocks.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{fixtures, MockChainReader},
        EthermanError,
    };
    use alloy_primitives::{Address, B256};
    use zkevm_primitives::{EventOrder, VerifiedBatch};

    fn verified(block: BlockInfo, batch_number: u64) -> RollupEvent {
        VerifiedBatch {
            block_number: block.number,
            batch_number,
            tx_hash: B256::with_last_byte(batch_number as u8),
            aggregator: Address::with_last_byte(1),
        }
        .into()
    }

    #[tokio::test]
    async fn test_should_fetch_block_once() -> eyre::Result<()> {
        // Given
        let block = BlockInfo::new(10, B256::with_last_byte(10));
        let reader = MockChainReader::default().with_block(fixtures::block(
            block,
            B256::with_last_byte(9),
            1_000,
        ));
        let mut accumulator = BlockAccumulator::new();

        // When
        let first = accumulator.absorb(block, &reader, verified(block, 1)).await?;
        let second = accumulator.absorb(block, &reader, verified(block, 2)).await?;

        // Then
        assert_eq!(first, Order::new(EventOrder::VerifyBatch, 0));
        assert_eq!(second, Order::new(EventOrder::VerifyBatch, 1));
        assert_eq!(reader.block_fetches(), 1);

        let (blocks, order) = accumulator.into_parts();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].parent_hash, B256::with_last_byte(9));
        assert_eq!(blocks[0].received_at, 1_000);
        assert_eq!(order[&block.hash], vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_reject_mismatching_block() -> eyre::Result<()> {
        // Given
        let block = BlockInfo::new(10, B256::with_last_byte(10));
        let reader = MockChainReader::default().with_block(fixtures::block(block, B256::ZERO, 0));
        let mut accumulator = BlockAccumulator::new();
        accumulator.absorb(block, &reader, verified(block, 1)).await?;

        // When
        let same_number = BlockInfo::new(10, B256::with_last_byte(11));
        let same_hash = BlockInfo::new(11, block.hash);
        let lower = BlockInfo::new(9, B256::with_last_byte(9));

        // Then
        for conflicting in [same_number, same_hash] {
            let err = accumulator.absorb(conflicting, &reader, verified(block, 2)).await;
            assert!(matches!(
                err,
                Err(EthermanError::Consistency(ConsistencyError::BlockMismatch { .. }))
            ));
        }
        let err = accumulator.open(lower, &reader).await;
        assert!(matches!(err, Err(EthermanError::Consistency(ConsistencyError::OutOfOrder { .. }))));

        assert_eq!(accumulator.blocks().len(), 1);
        assert_eq!(accumulator.blocks()[0].event_count(), 1);
        assert_eq!(accumulator.order()[&block.hash].len(), 1);
        assert_eq!(reader.block_fetches(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_fail_on_missing_block() -> eyre::Result<()> {
        // Given
        let block = BlockInfo::new(10, B256::with_last_byte(10));
        let reader = MockChainReader::default();
        let mut accumulator = BlockAccumulator::new();

        // When
        let err = accumulator.absorb(block, &reader, verified(block, 1)).await.unwrap_err();

        // Then
        assert!(err.is_not_found());
        assert!(accumulator.current().is_none());
        assert!(accumulator.order().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_reject_fetched_block_with_other_number() -> eyre::Result<()> {
        // Given
        let block = BlockInfo::new(10, B256::with_last_byte(10));
        let reader = MockChainReader::default().with_block(fixtures::block(
            BlockInfo::new(12, block.hash),
            B256::ZERO,
            0,
        ));
        let mut accumulator = BlockAccumulator::new();

        // When
        let err = accumulator.open(block, &reader).await;

        // Then
        assert!(matches!(
            err,
            Err(EthermanError::Consistency(ConsistencyError::FetchedBlockMismatch {
                fetched: 12,
                ..
            }))
        ));

        Ok(())
    }
}
