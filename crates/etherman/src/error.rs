use alloy_eips::BlockId;
use alloy_json_rpc::RpcError;
use alloy_primitives::TxHash;
use alloy_transport::TransportErrorKind;
use zkevm_l1::CallDecodeError;
use zkevm_primitives::BlockInfo;

/// A [`Result`] that uses [`EthermanError`] as the error type.
pub type EthermanResult<T> = Result<T, EthermanError>;

/// An error that occurred while reading or writing the zkEVM contracts on the L1.
#[derive(Debug, thiserror::Error)]
pub enum EthermanError {
    /// A Provider error at the RPC level.
    #[error("execution provider rpc error: {0:?}")]
    ProviderRpc(#[from] RpcError<TransportErrorKind>),
    /// An Ethereum request error.
    #[error("failed Ethereum JSON RPC request: {0}")]
    EthRequest(#[from] EthRequestError),
    /// An error related to the logs returned by the provider.
    #[error(transparent)]
    Logs(#[from] FilterLogError),
    /// The calldata of a transaction failed to decode.
    #[error("failed to decode transaction calldata: {0}")]
    Decode(#[from] CallDecodeError),
    /// A log is inconsistent with the block being accumulated.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

impl EthermanError {
    /// Returns true if the error reports an object missing from the L1.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EthRequest(
                EthRequestError::MissingBlock(_) |
                    EthRequestError::MissingTransaction(_) |
                    EthRequestError::MissingReceipt(_)
            )
        )
    }
}

/// An error occurred during a request to the Ethereum JSON RPC provider.
#[derive(Debug, thiserror::Error)]
pub enum EthRequestError {
    /// The requested block does not exist.
    #[error("unknown block {0}")]
    MissingBlock(BlockId),
    /// The requested transaction does not exist.
    #[error("unknown transaction {0}")]
    MissingTransaction(TxHash),
    /// The requested transaction receipt does not exist.
    #[error("unknown receipt for transaction {0}")]
    MissingReceipt(TxHash),
    /// The transaction is not included in a block yet.
    #[error("transaction {0} is still pending")]
    PendingTransaction(TxHash),
}

/// An error that occurred when processing logs.
#[derive(Debug, thiserror::Error)]
pub enum FilterLogError {
    /// The log is missing a block number.
    #[error("missing block number for log")]
    MissingBlockNumber,
    /// The log is missing a block hash.
    #[error("missing block hash for log")]
    MissingBlockHash,
    /// The log is missing a transaction hash.
    #[error("unknown transaction hash for log")]
    MissingTransactionHash,
    /// The log failed to decode.
    #[error("failed to decode log of type {log_type}: {error}")]
    DecodeLogFailed {
        /// The type of the log.
        log_type: &'static str,
        /// The decoding error.
        error: alloy_sol_types::Error,
    },
}

/// An error raised when a log does not extend the block being accumulated consistently.
#[derive(Debug, thiserror::Error)]
pub enum ConsistencyError {
    /// The log shares one of the hash or the number of the current block, but not both.
    #[error("log at {log} conflicts with current block {current}")]
    BlockMismatch {
        /// The block currently accumulating events.
        current: BlockInfo,
        /// The block reported by the log.
        log: BlockInfo,
    },
    /// The log opens a block below the current block.
    #[error("log at {log} precedes current block {current}")]
    OutOfOrder {
        /// The block currently accumulating events.
        current: BlockInfo,
        /// The block reported by the log.
        log: BlockInfo,
    },
    /// The block fetched for the log does not match the log's block number.
    #[error("fetched block {fetched} for log at {log}")]
    FetchedBlockMismatch {
        /// The block reported by the log.
        log: BlockInfo,
        /// The block number of the fetched block.
        fetched: u64,
    },
}
