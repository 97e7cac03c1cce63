//! L1 event ingestion for the zkEVM node.
//!
//! The [`Etherman`] reads the logs of the proof-of-efficiency and global exit root manager
//! contracts for a range of L1 blocks, decodes them into rollup events and groups them per block,
//! recording the order in which they were emitted so the synchronizer can replay them.

mod accumulator;
pub use accumulator::BlockAccumulator;

mod config;
pub use config::{EthermanArgs, EthermanConfig, ZkEvmAddressBook};

mod error;
pub use error::{
    ConsistencyError, EthRequestError, EthermanError, EthermanResult, FilterLogError,
};

mod metrics;
pub use metrics::EthermanMetrics;

mod provider;
pub use provider::{AlloyChainReader, L1ChainReader, L1TransactionSender};

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;

use alloy_eips::BlockNumberOrTag;
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash, U256};
use alloy_rpc_types_eth::{
    Block, Filter, Header, Log, Transaction, TransactionReceipt, TransactionRequest,
    TransactionTrait,
};
use alloy_sol_types::{SolCall, SolEvent};
use std::sync::Arc;
use tokio::time::Instant;
use zkevm_l1::{
    abi::{
        calls::{
            decode_returns, lastBatchSequencedCall, sequence_batches_calldata,
            trustedSequencerCall, TRUSTED_SEQUENCER_FEECall,
        },
        logs::{
            ForceBatch, OwnershipTransferred, SequenceBatches, SequenceForceBatches,
            UpdateGlobalExitRoot, VerifyBatch,
        },
    },
    decode_forced_batch_number, decode_sequenced_batches, L1EventSignature,
};
use zkevm_primitives::{
    BlockInfo, BlocksOrder, ForcedBatch, GlobalExitRoot, L1Block, RollupEvent, Sequence,
    SequencedBatch, SequencedForceBatch, VerifiedBatch,
};

/// The etherman reads the rollup activity from the L1 and submits sequenced batches to it.
#[derive(Debug)]
pub struct Etherman<R> {
    /// The L1 chain reader.
    reader: R,
    /// The configuration of the etherman.
    config: Arc<EthermanConfig>,
    /// The metrics for the etherman.
    metrics: EthermanMetrics,
}

impl<R> Etherman<R> {
    /// Returns a new [`Etherman`] reading the L1 through `reader`.
    pub fn new(reader: R, config: Arc<EthermanConfig>) -> Self {
        Self { reader, config, metrics: EthermanMetrics::default() }
    }

    /// Returns a reference to the chain reader.
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Returns the configuration of the etherman.
    pub fn config(&self) -> &EthermanConfig {
        &self.config
    }
}

impl<R> Etherman<R>
where
    R: L1ChainReader,
{
    /// Returns the rollup events emitted between `from_block` and `to_block` (inclusive), or up
    /// to the latest block if `to_block` is [`None`].
    ///
    /// The events are grouped per block, in chain order, along with the order of emission of the
    /// events within each block keyed by block hash. Any failure aborts the whole read: no
    /// partial result is returned and the read can be issued again from the same block.
    #[tracing::instrument(target = "zkevm::etherman", skip(self))]
    pub async fn rollup_info_by_block_range(
        &self,
        from_block: u64,
        to_block: Option<u64>,
    ) -> EthermanResult<(Vec<L1Block>, BlocksOrder)> {
        let mut filter = Filter::new()
            .address(self.config.address_book.tracked_addresses())
            .from_block(from_block);
        if let Some(to_block) = to_block {
            filter = filter.to_block(to_block);
        }

        let start = Instant::now();
        let result = self.read_events(&filter).await;
        self.metrics.range_read_duration.record(start.elapsed().as_secs_f64());

        result.inspect_err(|err| {
            self.metrics.failed_range_reads.increment(1);
            tracing::warn!(target: "zkevm::etherman", ?err, from_block, ?to_block, "failed to read rollup events, aborting range read");
        })
    }

    async fn read_events(&self, filter: &Filter) -> EthermanResult<(Vec<L1Block>, BlocksOrder)> {
        tracing::trace!(target: "zkevm::etherman", ?filter, "querying logs");
        let logs = self.reader.logs(filter).await?;
        tracing::trace!(target: "zkevm::etherman", count = logs.len(), "received logs");

        let mut accumulator = BlockAccumulator::new();
        for log in &logs {
            self.process_log(log, &mut accumulator).await.inspect_err(|err| {
                tracing::debug!(target: "zkevm::etherman", ?err, ?log, "failed to process log");
            })?;
        }

        Ok(accumulator.into_parts())
    }

    /// Decodes the log and absorbs the resulting event in the accumulator. Logs with an unknown
    /// signature are skipped.
    async fn process_log(
        &self,
        log: &Log,
        accumulator: &mut BlockAccumulator,
    ) -> EthermanResult<()> {
        let Some(signature) = L1EventSignature::classify(log.topics()) else {
            self.metrics.unknown_logs.increment(1);
            tracing::warn!(
                target: "zkevm::etherman",
                address = ?log.address(),
                topic = ?log.topics().first(),
                block_number = ?log.block_number,
                "event not registered"
            );
            return Ok(());
        };

        let event: RollupEvent = match signature {
            L1EventSignature::OwnershipTransferred => {
                return self.handle_ownership_transferred(log)
            }
            L1EventSignature::UpdateGlobalExitRoot => self.handle_global_exit_root(log)?.into(),
            L1EventSignature::ForceBatch => self.handle_forced_batch(log, accumulator).await?.into(),
            L1EventSignature::SequenceBatches => self.handle_sequenced_batches(log).await?.into(),
            L1EventSignature::VerifyBatch => self.handle_verified_batch(log)?.into(),
            L1EventSignature::SequenceForceBatches => {
                self.handle_sequenced_force_batch(log).await?.into()
            }
        };

        let block = log_block_info(log)?;
        let kind = event.kind();
        let order = accumulator.absorb(block, &self.reader, event).await?;
        self.metrics.record_event(kind);
        tracing::trace!(target: "zkevm::etherman", %block, %order, "absorbed event");

        Ok(())
    }

    /// Handles the ownership transfer of the contracts, which only gets logged.
    #[tracing::instrument(skip_all)]
    fn handle_ownership_transferred(&self, log: &Log) -> EthermanResult<()> {
        let ownership: OwnershipTransferred = decode_log(log)?;
        if ownership.previousOwner.is_zero() {
            tracing::debug!(
                target: "zkevm::etherman",
                deployer = ?ownership.newOwner,
                "new rollup contract deployment detected"
            );
        } else {
            tracing::debug!(
                target: "zkevm::etherman",
                from = ?ownership.previousOwner,
                to = ?ownership.newOwner,
                "rollup contract ownership transferred"
            );
        }
        Ok(())
    }

    /// Handles the global exit root update events.
    #[tracing::instrument(skip_all)]
    fn handle_global_exit_root(&self, log: &Log) -> EthermanResult<GlobalExitRoot> {
        let update: UpdateGlobalExitRoot = decode_log(log)?;
        let block_number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;
        tracing::debug!(target: "zkevm::etherman", num = ?update.globalExitRootNum, "global exit root update detected");

        Ok(GlobalExitRoot::new(
            block_number,
            update.globalExitRootNum,
            update.mainnetExitRoot,
            update.rollupExitRoot,
        ))
    }

    /// Handles the forced batch events.
    ///
    /// The raw transactions are taken from the calldata of the transaction if it was sent by the
    /// sequencer declared in the event, otherwise from the event itself. The batch is forced at
    /// the timestamp of its block.
    #[tracing::instrument(skip_all)]
    async fn handle_forced_batch(
        &self,
        log: &Log,
        accumulator: &mut BlockAccumulator,
    ) -> EthermanResult<ForcedBatch> {
        let forced: ForceBatch = decode_log(log)?;
        let block = log_block_info(log)?;
        tracing::debug!(target: "zkevm::etherman", number = forced.forceBatchNum, "forced batch detected");

        let tx_hash = log.transaction_hash.ok_or(FilterLogError::MissingTransactionHash)?;
        let tx = self.mined_transaction(tx_hash).await?;
        let raw_txs_data = if tx.inner.signer() == forced.sequencer {
            tx.input().clone()
        } else {
            forced.transactions
        };
        let forced_at = accumulator.open(block, &self.reader).await?.received_at;

        Ok(ForcedBatch {
            block_number: block.number,
            forced_batch_number: forced.forceBatchNum,
            global_exit_root: forced.lastGlobalExitRoot,
            sequencer: forced.sequencer,
            forced_at,
            raw_txs_data,
        })
    }

    /// Handles the sequence batches events, numbering each of the batches sequenced by the
    /// transaction.
    #[tracing::instrument(skip_all)]
    async fn handle_sequenced_batches(&self, log: &Log) -> EthermanResult<Vec<SequencedBatch>> {
        let sequenced: SequenceBatches = decode_log(log)?;
        tracing::debug!(target: "zkevm::etherman", last_batch = sequenced.numBatch, "sequence batches detected");

        let tx_hash = log.transaction_hash.ok_or(FilterLogError::MissingTransactionHash)?;
        let tx = self.mined_transaction(tx_hash).await?;

        Ok(decode_sequenced_batches(tx.input(), sequenced.numBatch, tx.inner.signer(), tx_hash)?)
    }

    /// Handles the verify batch events.
    #[tracing::instrument(skip_all)]
    fn handle_verified_batch(&self, log: &Log) -> EthermanResult<VerifiedBatch> {
        let verified: VerifyBatch = decode_log(log)?;
        tracing::debug!(target: "zkevm::etherman", batch = verified.numBatch, "verify batch detected");

        Ok(VerifiedBatch {
            block_number: log.block_number.ok_or(FilterLogError::MissingBlockNumber)?,
            batch_number: verified.numBatch,
            tx_hash: log.transaction_hash.ok_or(FilterLogError::MissingTransactionHash)?,
            aggregator: verified.aggregator,
        })
    }

    /// Handles the sequence force batches events.
    #[tracing::instrument(skip_all)]
    async fn handle_sequenced_force_batch(&self, log: &Log) -> EthermanResult<SequencedForceBatch> {
        let sequenced: SequenceForceBatches = decode_log(log)?;
        tracing::debug!(target: "zkevm::etherman", last_batch = sequenced.numBatch, "sequence force batches detected");

        let tx_hash = log.transaction_hash.ok_or(FilterLogError::MissingTransactionHash)?;
        let tx = self.mined_transaction(tx_hash).await?;

        Ok(SequencedForceBatch {
            last_batch_sequenced: sequenced.numBatch,
            sequencer: tx.inner.signer(),
            forced_batch_number: decode_forced_batch_number(tx.input())?,
            tx_hash,
        })
    }

    /// Returns the transaction, failing if it is unknown or still pending.
    async fn mined_transaction(&self, hash: TxHash) -> EthermanResult<Transaction> {
        let (tx, is_pending) = self.transaction(hash).await?;
        if is_pending {
            return Err(EthRequestError::PendingTransaction(hash).into());
        }
        Ok(tx)
    }

    /// Returns the header of the block with the provided number, or of the latest block if
    /// [`None`].
    pub async fn header_by_number(&self, number: Option<u64>) -> EthermanResult<Header> {
        let number = number.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number);
        Ok(self.fetch_block(number).await?.header)
    }

    /// Returns the block with the provided number.
    pub async fn block_by_number(&self, number: u64) -> EthermanResult<Block> {
        self.fetch_block(BlockNumberOrTag::Number(number)).await
    }

    async fn fetch_block(&self, number: BlockNumberOrTag) -> EthermanResult<Block> {
        Ok(self
            .reader
            .block_by_number(number)
            .await?
            .ok_or(EthRequestError::MissingBlock(number.into()))?)
    }

    /// Returns the transaction with the provided hash, along with a flag indicating if it is
    /// still pending.
    pub async fn transaction(&self, hash: TxHash) -> EthermanResult<(Transaction, bool)> {
        let tx = self
            .reader
            .transaction_by_hash(hash)
            .await?
            .ok_or(EthRequestError::MissingTransaction(hash))?;
        let is_pending = tx.block_number.is_none();
        Ok((tx, is_pending))
    }

    /// Returns the receipt of the transaction with the provided hash.
    pub async fn transaction_receipt(&self, hash: TxHash) -> EthermanResult<TransactionReceipt> {
        Ok(self
            .reader
            .transaction_receipt(hash)
            .await?
            .ok_or(EthRequestError::MissingReceipt(hash))?)
    }

    /// Returns the number of the last batch sequenced on the proof-of-efficiency contract.
    pub async fn latest_batch_number(&self) -> EthermanResult<u64> {
        self.call_poe(lastBatchSequencedCall {}).await
    }

    /// Returns the address of the trusted sequencer.
    pub async fn trusted_sequencer(&self) -> EthermanResult<Address> {
        self.call_poe(trustedSequencerCall {}).await
    }

    /// Returns the fee paid by the trusted sequencer to sequence a batch.
    pub async fn trusted_sequencer_fee(&self) -> EthermanResult<U256> {
        self.call_poe(TRUSTED_SEQUENCER_FEECall {}).await
    }

    async fn call_poe<C: SolCall>(&self, call: C) -> EthermanResult<C::Return> {
        let request = TransactionRequest::default()
            .with_to(self.config.address_book.poe_address)
            .with_input(call.abi_encode());
        let output = self.reader.call(request).await?;
        Ok(decode_returns::<C>(&output)?)
    }
}

impl<R> Etherman<R>
where
    R: L1ChainReader + L1TransactionSender,
{
    /// Estimates the gas needed to sequence the batches.
    pub async fn estimate_gas_sequence_batches(&self, sequences: &[Sequence]) -> EthermanResult<u64> {
        let mut request = self.sequence_batches_request(sequences);
        if let Some(sender) = self.config.sender {
            request = request.with_from(sender);
        }
        Ok(self.reader.estimate_gas(request).await?)
    }

    /// Sends a transaction sequencing the batches, bounded by `gas_limit`. Returns the hash of the
    /// transaction without waiting for its inclusion.
    pub async fn sequence_batches(
        &self,
        sequences: &[Sequence],
        gas_limit: u64,
    ) -> EthermanResult<TxHash> {
        let request = self.sequence_batches_request(sequences).with_gas_limit(gas_limit);
        let hash = self.reader.send_transaction(request).await?;
        tracing::info!(target: "zkevm::etherman", %hash, count = sequences.len(), gas_limit, "sent sequence batches transaction");
        Ok(hash)
    }

    fn sequence_batches_request(&self, sequences: &[Sequence]) -> TransactionRequest {
        TransactionRequest::default()
            .with_to(self.config.address_book.poe_address)
            .with_input(sequence_batches_calldata(sequences))
    }
}

/// Returns the [`BlockInfo`] of the block the log was emitted in.
fn log_block_info(log: &Log) -> Result<BlockInfo, FilterLogError> {
    let number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;
    let hash = log.block_hash.ok_or(FilterLogError::MissingBlockHash)?;
    Ok(BlockInfo::new(number, hash))
}

fn decode_log<E: SolEvent>(log: &Log) -> Result<E, FilterLogError> {
    E::decode_log(&log.inner)
        .map(|log| log.data)
        .map_err(|error| FilterLogError::DecodeLogFailed { log_type: E::SIGNATURE, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixtures, MockChainReader};
    use alloy_primitives::{Bytes, B256};

    fn etherman(reader: MockChainReader) -> Etherman<MockChainReader> {
        let config = EthermanConfig {
            address_book: ZkEvmAddressBook {
                poe_address: Address::with_last_byte(1),
                global_exit_root_manager_address: Address::with_last_byte(2),
                matic_address: Address::with_last_byte(3),
            },
            sender: None,
        };
        Etherman::new(reader, Arc::new(config))
    }

    #[test]
    fn test_log_block_info_requires_number_and_hash() {
        let block = BlockInfo::new(5, B256::with_last_byte(5));
        let event = VerifyBatch { numBatch: 1, aggregator: Address::ZERO };
        let mut log = fixtures::log(Address::ZERO, &event, block, B256::ZERO);
        assert_eq!(log_block_info(&log).unwrap(), block);

        log.block_number = None;
        assert!(matches!(log_block_info(&log), Err(FilterLogError::MissingBlockNumber)));
    }

    #[test]
    fn test_decode_log_reports_event_signature() {
        let block = BlockInfo::new(5, B256::with_last_byte(5));
        let event = VerifyBatch { numBatch: 1, aggregator: Address::ZERO };
        let log = fixtures::log(Address::ZERO, &event, block, B256::ZERO);

        assert_eq!(decode_log::<VerifyBatch>(&log).unwrap().numBatch, 1);
        assert!(matches!(
            decode_log::<SequenceBatches>(&log),
            Err(FilterLogError::DecodeLogFailed { log_type: "SequenceBatches(uint64)", .. })
        ));
    }

    #[tokio::test]
    async fn test_should_skip_log_without_topics() -> eyre::Result<()> {
        // Given
        let block = BlockInfo::new(5, B256::with_last_byte(5));
        let log = fixtures::raw_log(
            Address::with_last_byte(1),
            alloy_primitives::LogData::new_unchecked(vec![], Bytes::from_static(&[1])),
            block,
            B256::ZERO,
        );
        let etherman = etherman(MockChainReader::default().with_logs([log]));

        // When
        let (blocks, order) = etherman.rollup_info_by_block_range(0, None).await?;

        // Then
        assert!(blocks.is_empty());
        assert!(order.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_not_send_estimate_from_unset_sender() -> eyre::Result<()> {
        // Given
        let etherman = etherman(MockChainReader::default().with_gas_estimate(21_000));

        // When
        let gas = etherman.estimate_gas_sequence_batches(&[]).await?;

        // Then
        assert_eq!(gas, 21_000);
        assert!(etherman.reader().sent_transactions().await.is_empty());

        Ok(())
    }
}
