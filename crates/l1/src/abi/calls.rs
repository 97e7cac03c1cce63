use crate::CallDecodeError;
use alloy_primitives::Bytes;
use alloy_sol_types::{sol, SolCall};
use zkevm_primitives::Sequence;

sol! {
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    struct BatchData {
        bytes transactions;
        bytes32 globalExitRoot;
        uint64 timestamp;
        uint64[] forceBatchesTimestamp;
    }

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    function sequenceBatches(BatchData[] batches) external;

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    function sequenceForceBatches(uint64 numForcedBatches) external;

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug, PartialEq, Eq)]
    function forceBatch(bytes transactions, uint256 maticAmount) external;

    #[derive(Debug)]
    function lastBatchSequenced() external view returns (uint64);

    #[derive(Debug)]
    function trustedSequencer() external view returns (address);

    #[derive(Debug)]
    function TRUSTED_SEQUENCER_FEE() external view returns (uint256);
}

/// A call to the proof-of-efficiency contract carrying rollup data.
#[derive(Debug, PartialEq, Eq, derive_more::From)]
pub enum ProofOfEfficiencyCall {
    /// A call sequencing batches.
    SequenceBatches(sequenceBatchesCall),
    /// A call sequencing a forced batch.
    SequenceForceBatches(sequenceForceBatchesCall),
    /// A call forcing a batch.
    ForceBatch(forceBatchCall),
}

impl ProofOfEfficiencyCall {
    /// Tries to decode the calldata into a [`ProofOfEfficiencyCall`], resolving the method from the
    /// selector.
    pub fn try_decode(calldata: &[u8]) -> Result<Self, CallDecodeError> {
        let selector: [u8; 4] = calldata
            .get(0..4)
            .and_then(|sel| sel.try_into().ok())
            .ok_or(CallDecodeError::MissingSelector(calldata.len()))?;

        match selector {
            sequenceBatchesCall::SELECTOR => decode_call::<sequenceBatchesCall>(calldata),
            sequenceForceBatchesCall::SELECTOR => {
                decode_call::<sequenceForceBatchesCall>(calldata)
            }
            forceBatchCall::SELECTOR => decode_call::<forceBatchCall>(calldata),
            _ => Err(CallDecodeError::UnknownSelector(selector.into())),
        }
    }

    /// Returns the signature of the called method.
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::SequenceBatches(_) => sequenceBatchesCall::SIGNATURE,
            Self::SequenceForceBatches(_) => sequenceForceBatchesCall::SIGNATURE,
            Self::ForceBatch(_) => forceBatchCall::SIGNATURE,
        }
    }

    /// Returns the batches of a `sequenceBatches` call.
    pub fn into_batches(self) -> Result<Vec<BatchData>, CallDecodeError> {
        match self {
            Self::SequenceBatches(call) => Ok(call.batches),
            other => Err(CallDecodeError::UnexpectedMethod {
                expected: sequenceBatchesCall::SIGNATURE,
                found: other.signature(),
            }),
        }
    }

    /// Returns the forced batch number of a `sequenceForceBatches` call.
    pub fn forced_batch_number(&self) -> Result<u64, CallDecodeError> {
        match self {
            Self::SequenceForceBatches(call) => Ok(call.numForcedBatches),
            other => Err(CallDecodeError::UnexpectedMethod {
                expected: sequenceForceBatchesCall::SIGNATURE,
                found: other.signature(),
            }),
        }
    }
}

fn decode_call<C>(calldata: &[u8]) -> Result<ProofOfEfficiencyCall, CallDecodeError>
where
    C: SolCall + Into<ProofOfEfficiencyCall>,
{
    C::abi_decode(calldata)
        .map(Into::into)
        .map_err(|error| CallDecodeError::Abi { method: C::SIGNATURE, error })
}

/// Decodes the return data of a view call.
pub fn decode_returns<C: SolCall>(data: &[u8]) -> Result<C::Return, CallDecodeError> {
    C::abi_decode_returns(data).map_err(|error| CallDecodeError::Abi { method: C::SIGNATURE, error })
}

impl From<&Sequence> for BatchData {
    fn from(sequence: &Sequence) -> Self {
        Self {
            transactions: sequence.batch_l2_data(),
            globalExitRoot: sequence.global_exit_root,
            timestamp: sequence.timestamp,
            forceBatchesTimestamp: Vec::new(),
        }
    }
}

/// Returns the calldata of a `sequenceBatches` call submitting the sequences.
pub fn sequence_batches_calldata(sequences: &[Sequence]) -> Bytes {
    sequenceBatchesCall { batches: sequences.iter().map(Into::into).collect() }.abi_encode().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{B256, U256};

    #[test]
    fn test_sequences_survive_encoding() {
        let sequences = vec![
            Sequence::new(
                vec![Bytes::from_static(&[0xde, 0xad]), Bytes::from_static(&[0xbe, 0xef])],
                B256::with_last_byte(1),
                1_650_000_000,
            ),
            Sequence::new(vec![], B256::with_last_byte(2), 1_650_000_012),
        ];

        let calldata = sequence_batches_calldata(&sequences);
        let batches = ProofOfEfficiencyCall::try_decode(&calldata).unwrap().into_batches().unwrap();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].transactions, Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(batches[0].globalExitRoot, B256::with_last_byte(1));
        assert_eq!(batches[0].timestamp, 1_650_000_000);
        assert!(batches[0].forceBatchesTimestamp.is_empty());
        assert!(batches[1].transactions.is_empty());
        assert_eq!(batches[1].timestamp, 1_650_000_012);
    }

    #[test]
    fn test_should_resolve_method_by_selector() {
        let calldata = sequenceForceBatchesCall { numForcedBatches: 42 }.abi_encode();
        let call = ProofOfEfficiencyCall::try_decode(&calldata).unwrap();

        assert_eq!(call.signature(), "sequenceForceBatches(uint64)");
        assert_eq!(call.forced_batch_number().unwrap(), 42);
    }

    #[test]
    fn test_should_reject_unknown_selector() {
        let calldata = [0xff, 0xff, 0xff, 0xff, 0x00];
        let err = ProofOfEfficiencyCall::try_decode(&calldata).unwrap_err();
        assert!(matches!(err, CallDecodeError::UnknownSelector(sel) if sel.0 == [0xff; 4]));
    }

    #[test]
    fn test_should_reject_short_calldata() {
        let err = ProofOfEfficiencyCall::try_decode(&[0x01, 0x02]).unwrap_err();
        assert!(matches!(err, CallDecodeError::MissingSelector(2)));
    }

    #[test]
    fn test_should_reject_truncated_arguments() {
        let mut calldata = sequenceBatchesCall {
            batches: vec![BatchData {
                transactions: Bytes::from_static(&[1, 2, 3]),
                globalExitRoot: B256::ZERO,
                timestamp: 1,
                forceBatchesTimestamp: vec![1, 2],
            }],
        }
        .abi_encode();
        calldata.truncate(calldata.len() - 40);

        let err = ProofOfEfficiencyCall::try_decode(&calldata).unwrap_err();
        assert!(matches!(err, CallDecodeError::Abi { method: "sequenceBatches((bytes,bytes32,uint64,uint64[])[])", .. }));
    }

    #[test]
    fn test_should_reject_shape_mismatch() {
        let calldata =
            forceBatchCall { transactions: Bytes::from_static(&[1]), maticAmount: U256::from(1) }
                .abi_encode();
        let call = ProofOfEfficiencyCall::try_decode(&calldata).unwrap();

        assert!(matches!(
            call.forced_batch_number(),
            Err(CallDecodeError::UnexpectedMethod { found: "forceBatch(bytes,uint256)", .. })
        ));
        assert!(matches!(call.into_batches(), Err(CallDecodeError::UnexpectedMethod { .. })));
    }

    #[test]
    fn test_should_decode_view_returns() {
        let data = U256::from(17u64).to_be_bytes::<32>();
        assert_eq!(decode_returns::<lastBatchSequencedCall>(&data).unwrap(), 17);
        assert!(decode_returns::<lastBatchSequencedCall>(&data[..16]).is_err());
    }
}
