use crate::{L1ChainReader, L1TransactionSender};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{keccak256, Bytes, Selector, TxHash, B256};
use alloy_rpc_types_eth::{Block, Filter, Log, Transaction, TransactionReceipt, TransactionRequest};
use alloy_transport::{TransportErrorKind, TransportResult};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};
use tokio::sync::Mutex;

/// An in-memory implementation of [`L1ChainReader`] and [`L1TransactionSender`].
#[derive(Debug, Default)]
pub struct MockChainReader {
    blocks: HashMap<B256, Block>,
    logs: Vec<Log>,
    transactions: HashMap<TxHash, Transaction>,
    receipts: HashMap<TxHash, TransactionReceipt>,
    call_outputs: HashMap<Selector, Bytes>,
    gas_estimate: u64,
    block_fetches: AtomicUsize,
    sent_transactions: Mutex<Vec<TransactionRequest>>,
}

impl MockChainReader {
    /// Adds the block to the chain.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.insert(block.header.hash, block);
        self
    }

    /// Adds the blocks to the chain.
    pub fn with_blocks(self, blocks: impl IntoIterator<Item = Block>) -> Self {
        blocks.into_iter().fold(self, Self::with_block)
    }

    /// Adds the logs to the chain, in order.
    pub fn with_logs(mut self, logs: impl IntoIterator<Item = Log>) -> Self {
        self.logs.extend(logs);
        self
    }

    /// Adds the transaction to the chain.
    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.insert(*transaction.inner.tx_hash(), transaction);
        self
    }

    /// Adds the receipt to the chain.
    pub fn with_receipt(mut self, receipt: TransactionReceipt) -> Self {
        self.receipts.insert(receipt.transaction_hash, receipt);
        self
    }

    /// Returns `output` for calls to the method with the provided selector.
    pub fn with_call_output(mut self, selector: Selector, output: impl Into<Bytes>) -> Self {
        self.call_outputs.insert(selector, output.into());
        self
    }

    /// Returns `gas` for every gas estimation.
    pub const fn with_gas_estimate(mut self, gas: u64) -> Self {
        self.gas_estimate = gas;
        self
    }

    /// Returns the count of blocks fetched by hash.
    pub fn block_fetches(&self) -> usize {
        self.block_fetches.load(Ordering::Relaxed)
    }

    /// Returns the transactions sent so far.
    pub async fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.sent_transactions.lock().await.clone()
    }

    fn latest_block(&self) -> Option<&Block> {
        self.blocks.values().max_by_key(|block| block.header.number)
    }
}

#[async_trait::async_trait]
impl L1ChainReader for MockChainReader {
    async fn logs(&self, filter: &Filter) -> TransportResult<Vec<Log>> {
        let from = filter.get_from_block().unwrap_or_default();
        let to = filter.get_to_block().unwrap_or(u64::MAX);

        Ok(self
            .logs
            .iter()
            .filter(|log| filter.address.matches(&log.address()))
            .filter(|log| log.block_number.is_none_or(|number| (from..=to).contains(&number)))
            .cloned()
            .collect())
    }

    async fn block_by_hash(&self, hash: B256) -> TransportResult<Option<Block>> {
        self.block_fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.blocks.get(&hash).cloned())
    }

    async fn block_by_number(&self, number: BlockNumberOrTag) -> TransportResult<Option<Block>> {
        Ok(match number {
            BlockNumberOrTag::Latest => self.latest_block().cloned(),
            BlockNumberOrTag::Number(number) => {
                self.blocks.values().find(|block| block.header.number == number).cloned()
            }
            _ => unimplemented!("can only query by number or latest"),
        })
    }

    async fn transaction_by_hash(&self, hash: TxHash) -> TransportResult<Option<Transaction>> {
        Ok(self.transactions.get(&hash).cloned())
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> TransportResult<Option<TransactionReceipt>> {
        Ok(self.receipts.get(&hash).cloned())
    }

    async fn call(&self, request: TransactionRequest) -> TransportResult<Bytes> {
        let selector = request
            .input
            .input()
            .and_then(|input| input.get(..4))
            .map(Selector::from_slice)
            .ok_or_else(|| TransportErrorKind::custom_str("missing call selector"))?;
        self.call_outputs
            .get(&selector)
            .cloned()
            .ok_or_else(|| TransportErrorKind::custom_str("execution reverted"))
    }
}

#[async_trait::async_trait]
impl L1TransactionSender for MockChainReader {
    async fn estimate_gas(&self, _request: TransactionRequest) -> TransportResult<u64> {
        Ok(self.gas_estimate)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> TransportResult<TxHash> {
        let hash = keccak256(request.input.input().cloned().unwrap_or_default());
        self.sent_transactions.lock().await.push(request);
        Ok(hash)
    }
}
