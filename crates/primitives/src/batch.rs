use alloy_primitives::{Address, Bytes, TxHash, B256};

/// A batch forced through the permissionless path of the proof-of-efficiency contract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ForcedBatch {
    /// The L1 block number at which the batch was forced.
    pub block_number: u64,
    /// The forced batch number.
    pub forced_batch_number: u64,
    /// The last global exit root known to the contract when the batch was forced.
    pub global_exit_root: B256,
    /// The account that forced the batch.
    pub sequencer: Address,
    /// The timestamp of the L1 block at which the batch was forced.
    pub forced_at: u64,
    /// The raw transactions data of the batch.
    ///
    /// Holds the calldata of the triggering transaction when it was sent by the sequencer declared
    /// in the event, the `transactions` field of the event otherwise.
    pub raw_txs_data: Bytes,
}

/// A batch sequenced by a `sequenceBatches` call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct SequencedBatch {
    /// The batch number, reconstructed from the final number reported by the event.
    pub batch_number: u64,
    /// The sender of the sequencing transaction.
    pub sequencer: Address,
    /// The hash of the sequencing transaction.
    pub tx_hash: TxHash,
    /// The encoded L2 transactions of the batch.
    pub transactions: Bytes,
    /// The global exit root of the batch.
    pub global_exit_root: B256,
    /// The timestamp of the batch.
    pub timestamp: u64,
    /// The timestamps of the forced batches finalized together with this batch.
    pub forced_batches_timestamps: Vec<u64>,
}

/// A batch verified by an aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct VerifiedBatch {
    /// The L1 block number at which the batch was verified.
    pub block_number: u64,
    /// The verified batch number.
    pub batch_number: u64,
    /// The hash of the verifying transaction.
    pub tx_hash: TxHash,
    /// The aggregator that submitted the proof.
    pub aggregator: Address,
}

/// A forced batch sequenced by a `sequenceForceBatches` call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct SequencedForceBatch {
    /// The last sequenced batch number, as reported by the event.
    pub last_batch_sequenced: u64,
    /// The sender of the sequencing transaction.
    pub sequencer: Address,
    /// The forced batch number, decoded from the calldata of the sequencing transaction.
    pub forced_batch_number: u64,
    /// The hash of the sequencing transaction.
    pub tx_hash: TxHash,
}

/// A sequence of L2 transactions to submit to the L1 as a single batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Sequence {
    /// The encoded L2 transactions, in execution order.
    pub transactions: Vec<Bytes>,
    /// The global exit root of the batch.
    pub global_exit_root: B256,
    /// The timestamp of the batch.
    pub timestamp: u64,
}

impl Sequence {
    /// Returns a new [`Sequence`].
    pub const fn new(transactions: Vec<Bytes>, global_exit_root: B256, timestamp: u64) -> Self {
        Self { transactions, global_exit_root, timestamp }
    }

    /// Returns the batch payload, the concatenation of the encoded L2 transactions.
    pub fn batch_l2_data(&self) -> Bytes {
        self.transactions.iter().flat_map(|tx| tx.iter().copied()).collect::<Vec<u8>>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_l2_data_concatenates_transactions() {
        let sequence = Sequence::new(
            vec![Bytes::from_static(&[0x01, 0x02]), Bytes::new(), Bytes::from_static(&[0x03])],
            B256::ZERO,
            0,
        );
        assert_eq!(sequence.batch_l2_data(), Bytes::from_static(&[0x01, 0x02, 0x03]));
    }

    #[test]
    fn test_batch_l2_data_empty_sequence() {
        assert!(Sequence::default().batch_l2_data().is_empty());
    }
}
