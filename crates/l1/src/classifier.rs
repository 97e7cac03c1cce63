use crate::abi::logs::{
    ForceBatch, OwnershipTransferred, SequenceBatches, SequenceForceBatches, UpdateGlobalExitRoot,
    VerifyBatch,
};
use alloy_primitives::B256;
use alloy_sol_types::SolEvent;

/// The signatures of the events relevant to the rollup, matched against the first topic of a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum L1EventSignature {
    /// `OwnershipTransferred(address,address)`.
    OwnershipTransferred,
    /// `UpdateGlobalExitRoot(uint256,bytes32,bytes32)`.
    UpdateGlobalExitRoot,
    /// `ForceBatch(uint64,bytes32,address,bytes)`.
    ForceBatch,
    /// `SequenceBatches(uint64)`.
    SequenceBatches,
    /// `SequenceForceBatches(uint64)`.
    SequenceForceBatches,
    /// `VerifyBatch(uint64,address)`.
    VerifyBatch,
}

impl L1EventSignature {
    /// All the known event signatures.
    pub const ALL: [Self; 6] = [
        Self::OwnershipTransferred,
        Self::UpdateGlobalExitRoot,
        Self::ForceBatch,
        Self::SequenceBatches,
        Self::SequenceForceBatches,
        Self::VerifyBatch,
    ];

    /// Classifies a log from its topics. Returns [`None`] for an unknown event or a log without
    /// topics.
    pub fn classify(topics: &[B256]) -> Option<Self> {
        match *topics.first()? {
            OwnershipTransferred::SIGNATURE_HASH => Some(Self::OwnershipTransferred),
            UpdateGlobalExitRoot::SIGNATURE_HASH => Some(Self::UpdateGlobalExitRoot),
            ForceBatch::SIGNATURE_HASH => Some(Self::ForceBatch),
            SequenceBatches::SIGNATURE_HASH => Some(Self::SequenceBatches),
            SequenceForceBatches::SIGNATURE_HASH => Some(Self::SequenceForceBatches),
            VerifyBatch::SIGNATURE_HASH => Some(Self::VerifyBatch),
            _ => None,
        }
    }

    /// Returns the textual signature of the event.
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::OwnershipTransferred => OwnershipTransferred::SIGNATURE,
            Self::UpdateGlobalExitRoot => UpdateGlobalExitRoot::SIGNATURE,
            Self::ForceBatch => ForceBatch::SIGNATURE,
            Self::SequenceBatches => SequenceBatches::SIGNATURE,
            Self::SequenceForceBatches => SequenceForceBatches::SIGNATURE,
            Self::VerifyBatch => VerifyBatch::SIGNATURE,
        }
    }

    /// Returns the Keccak-256 hash of the event signature.
    pub const fn signature_hash(&self) -> B256 {
        match self {
            Self::OwnershipTransferred => OwnershipTransferred::SIGNATURE_HASH,
            Self::UpdateGlobalExitRoot => UpdateGlobalExitRoot::SIGNATURE_HASH,
            Self::ForceBatch => ForceBatch::SIGNATURE_HASH,
            Self::SequenceBatches => SequenceBatches::SIGNATURE_HASH,
            Self::SequenceForceBatches => SequenceForceBatches::SIGNATURE_HASH,
            Self::VerifyBatch => VerifyBatch::SIGNATURE_HASH,
        }
    }
}

impl core::fmt::Display for L1EventSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.signature())
    }
}
