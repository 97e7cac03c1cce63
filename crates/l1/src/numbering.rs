use crate::{abi::calls::ProofOfEfficiencyCall, CallDecodeError};
use alloy_primitives::{Address, TxHash};
use zkevm_primitives::SequencedBatch;

/// Assigns a batch number to each of the batches of a `sequenceBatches` call.
///
/// The event only reports the final batch number of the call. Walking the batches from last to
/// first, the forced batches timestamps of a batch consume one number each before the batch takes
/// the next one. Returns the numbers in the order of `forced_batches_counts`.
pub fn assign_batch_numbers(
    last_batch_number: u64,
    forced_batches_counts: &[usize],
) -> Result<Vec<u64>, CallDecodeError> {
    let underflow = || CallDecodeError::BatchNumberUnderflow {
        last_batch_number,
        batch_count: forced_batches_counts.len(),
        forced_count: forced_batches_counts.iter().map(|count| *count as u64).sum(),
    };

    let mut numbers = vec![0; forced_batches_counts.len()];
    let mut current = last_batch_number;
    for (i, count) in forced_batches_counts.iter().enumerate().rev() {
        current = current.checked_sub(*count as u64).ok_or_else(underflow)?;
        numbers[i] = current;
        if i > 0 {
            current = current.checked_sub(1).ok_or_else(underflow)?;
        }
    }

    Ok(numbers)
}

/// Decodes the calldata of a `sequenceBatches` transaction into the [`SequencedBatch`]s it
/// sequences, numbered from the final batch number reported by the event.
pub fn decode_sequenced_batches(
    calldata: &[u8],
    last_batch_number: u64,
    sequencer: Address,
    tx_hash: TxHash,
) -> Result<Vec<SequencedBatch>, CallDecodeError> {
    let batches = ProofOfEfficiencyCall::try_decode(calldata)?.into_batches()?;
    let counts: Vec<_> = batches.iter().map(|b| b.forceBatchesTimestamp.len()).collect();
    let numbers = assign_batch_numbers(last_batch_number, &counts)?;

    Ok(batches
        .into_iter()
        .zip(numbers)
        .map(|(batch, batch_number)| SequencedBatch {
            batch_number,
            sequencer,
            tx_hash,
            transactions: batch.transactions,
            global_exit_root: batch.globalExitRoot,
            timestamp: batch.timestamp,
            forced_batches_timestamps: batch.forceBatchesTimestamp,
        })
        .collect())
}

/// Decodes the forced batch number from the calldata of a `sequenceForceBatches` transaction.
pub fn decode_forced_batch_number(calldata: &[u8]) -> Result<u64, CallDecodeError> {
    ProofOfEfficiencyCall::try_decode(calldata)?.forced_batch_number()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::calls::{sequenceBatchesCall, sequenceForceBatchesCall, BatchData};
    use alloy_primitives::{Bytes, B256};
    use alloy_sol_types::SolCall;

    fn batch(forced: usize) -> BatchData {
        BatchData {
            transactions: Bytes::from(vec![forced as u8]),
            globalExitRoot: B256::with_last_byte(forced as u8),
            timestamp: 1_000 + forced as u64,
            forceBatchesTimestamp: vec![1; forced],
        }
    }

    #[test]
    fn test_mixed_forced_counts() {
        assert_eq!(assign_batch_numbers(10, &[0, 2, 0]).unwrap(), vec![6, 7, 10]);
    }

    #[test]
    fn test_no_forced_batches_yields_consecutive_numbers() {
        assert_eq!(assign_batch_numbers(10, &[0, 0, 0, 0]).unwrap(), vec![7, 8, 9, 10]);
    }

    #[test]
    fn test_all_batches_forced() {
        assert_eq!(assign_batch_numbers(20, &[1, 1, 1]).unwrap(), vec![15, 17, 19]);
        assert_eq!(assign_batch_numbers(20, &[3, 2]).unwrap(), vec![14, 18]);
    }

    #[test]
    fn test_single_batch() {
        assert_eq!(assign_batch_numbers(5, &[0]).unwrap(), vec![5]);
        assert_eq!(assign_batch_numbers(5, &[2]).unwrap(), vec![3]);
        assert_eq!(assign_batch_numbers(0, &[0]).unwrap(), vec![0]);
    }

    #[test]
    fn test_empty_call() {
        assert!(assign_batch_numbers(5, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_lowest_number_is_exactly_representable() {
        // lowest = 4 - 2 - (3 - 1) = 0.
        assert_eq!(assign_batch_numbers(4, &[1, 0, 1]).unwrap(), vec![0, 2, 3]);
    }

    #[test]
    fn test_underflow_is_an_error() {
        assert!(matches!(
            assign_batch_numbers(1, &[0, 0, 0]),
            Err(CallDecodeError::BatchNumberUnderflow {
                last_batch_number: 1,
                batch_count: 3,
                forced_count: 0
            })
        ));
        assert!(matches!(
            assign_batch_numbers(2, &[3]),
            Err(CallDecodeError::BatchNumberUnderflow { forced_count: 3, .. })
        ));
    }

    #[test]
    fn test_numbering_matches_closed_form() {
        let grids: [&[usize]; 6] =
            [&[0], &[4], &[0, 0], &[2, 0, 1], &[0, 0, 0, 5], &[1, 2, 3, 4, 0, 0, 1]];
        for counts in grids {
            let last = 100;
            let numbers = assign_batch_numbers(last, counts).unwrap();

            let forced: u64 = counts.iter().map(|c| *c as u64).sum();
            assert_eq!(numbers[0], last - forced - (counts.len() as u64 - 1));
            assert_eq!(*numbers.last().unwrap(), last - *counts.last().unwrap() as u64);
            for (pair, count) in numbers.windows(2).zip(counts) {
                assert_eq!(pair[1] - pair[0], 1 + *count as u64);
            }
        }
    }

    #[test]
    fn test_decode_sequenced_batches() {
        let calldata =
            sequenceBatchesCall { batches: vec![batch(0), batch(2), batch(0)] }.abi_encode();
        let sequencer = Address::with_last_byte(7);
        let tx_hash = B256::with_last_byte(9);

        let batches = decode_sequenced_batches(&calldata, 10, sequencer, tx_hash).unwrap();

        let numbers: Vec<_> = batches.iter().map(|b| b.batch_number).collect();
        assert_eq!(numbers, vec![6, 7, 10]);
        assert_eq!(batches[1].forced_batches_timestamps, vec![1, 1]);
        assert_eq!(batches[1].transactions, Bytes::from(vec![2]));
        assert!(batches.iter().all(|b| b.sequencer == sequencer && b.tx_hash == tx_hash));
    }

    #[test]
    fn test_decode_sequenced_batches_rejects_other_methods() {
        let calldata = sequenceForceBatchesCall { numForcedBatches: 3 }.abi_encode();
        let err = decode_sequenced_batches(&calldata, 10, Address::ZERO, B256::ZERO).unwrap_err();
        assert!(matches!(err, CallDecodeError::UnexpectedMethod { .. }));
    }

    #[test]
    fn test_decode_forced_batch_number() {
        let calldata = sequenceForceBatchesCall { numForcedBatches: 3 }.abi_encode();
        assert_eq!(decode_forced_batch_number(&calldata).unwrap(), 3);

        let calldata = sequenceBatchesCall { batches: vec![] }.abi_encode();
        assert!(decode_forced_batch_number(&calldata).is_err());
    }
}
