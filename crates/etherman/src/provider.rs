//! The chain reader and transaction sender capabilities required from the L1 execution client.

use alloy_eips::BlockNumberOrTag;
use alloy_network::Ethereum;
use alloy_primitives::{Bytes, TxHash, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Block, Filter, Log, Transaction, TransactionReceipt, TransactionRequest};
use alloy_transport::TransportResult;

/// An instance of the trait can read the L1 chain state and history.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait L1ChainReader: Send + Sync {
    /// Returns the logs matching the filter, in chain order.
    async fn logs(&self, filter: &Filter) -> TransportResult<Vec<Log>>;

    /// Returns the block with the provided hash, without its transactions.
    async fn block_by_hash(&self, hash: B256) -> TransportResult<Option<Block>>;

    /// Returns the block with the provided number or tag, without its transactions.
    async fn block_by_number(&self, number: BlockNumberOrTag) -> TransportResult<Option<Block>>;

    /// Returns the transaction with the provided hash. A transaction without a block number is
    /// still pending.
    async fn transaction_by_hash(&self, hash: TxHash) -> TransportResult<Option<Transaction>>;

    /// Returns the receipt of a mined transaction.
    async fn transaction_receipt(&self, hash: TxHash)
        -> TransportResult<Option<TransactionReceipt>>;

    /// Executes a call against the latest state, returning the raw output.
    async fn call(&self, request: TransactionRequest) -> TransportResult<Bytes>;
}

/// An instance of the trait can submit transactions to the L1, signing them along the way.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait L1TransactionSender: Send + Sync {
    /// Estimates the gas required by the transaction.
    async fn estimate_gas(&self, request: TransactionRequest) -> TransportResult<u64>;

    /// Signs and sends the transaction, returning its hash without waiting for inclusion.
    async fn send_transaction(&self, request: TransactionRequest) -> TransportResult<TxHash>;
}

/// An implementation of [`L1ChainReader`] and [`L1TransactionSender`] over an alloy
/// [`Provider`].
///
/// The provider should implement some backoff strategy using
/// [`alloy_transport::layers::RetryBackoffLayer`] in order to absorb transient RPC failures,
/// none of the reads are retried from here.
#[derive(Debug, Clone)]
pub struct AlloyChainReader<P> {
    provider: P,
}

impl<P> AlloyChainReader<P> {
    /// Returns a new [`AlloyChainReader`] wrapping the provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the inner provider.
    pub const fn inner(&self) -> &P {
        &self.provider
    }
}

#[async_trait::async_trait]
impl<P> L1ChainReader for AlloyChainReader<P>
where
    P: Provider<Ethereum>,
{
    async fn logs(&self, filter: &Filter) -> TransportResult<Vec<Log>> {
        self.provider.get_logs(filter).await
    }

    async fn block_by_hash(&self, hash: B256) -> TransportResult<Option<Block>> {
        self.provider.get_block_by_hash(hash).await
    }

    async fn block_by_number(&self, number: BlockNumberOrTag) -> TransportResult<Option<Block>> {
        self.provider.get_block_by_number(number).await
    }

    async fn transaction_by_hash(&self, hash: TxHash) -> TransportResult<Option<Transaction>> {
        self.provider.get_transaction_by_hash(hash).await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> TransportResult<Option<TransactionReceipt>> {
        self.provider.get_transaction_receipt(hash).await
    }

    async fn call(&self, request: TransactionRequest) -> TransportResult<Bytes> {
        self.provider.call(request).await
    }
}

#[async_trait::async_trait]
impl<P> L1TransactionSender for AlloyChainReader<P>
where
    P: Provider<Ethereum>,
{
    async fn estimate_gas(&self, request: TransactionRequest) -> TransportResult<u64> {
        self.provider.estimate_gas(request).await
    }

    async fn send_transaction(&self, request: TransactionRequest) -> TransportResult<TxHash> {
        let pending = self.provider.send_transaction(request).await?;
        Ok(*pending.tx_hash())
    }
}
