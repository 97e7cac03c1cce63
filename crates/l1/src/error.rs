use alloy_primitives::Selector;

/// An error occurring while decoding the calldata of a proof-of-efficiency call.
#[derive(Debug, thiserror::Error)]
pub enum CallDecodeError {
    /// The calldata is too short to contain a method selector.
    #[error("calldata of {0} bytes is too short to hold a method selector")]
    MissingSelector(usize),
    /// The selector does not match any known method of the contract.
    #[error("unknown method selector {0}")]
    UnknownSelector(Selector),
    /// The arguments or return data failed to decode.
    #[error("failed to decode {method}: {error}")]
    Abi {
        /// The signature of the method.
        method: &'static str,
        /// The underlying error.
        #[source]
        error: alloy_sol_types::Error,
    },
    /// The calldata decoded to a different method than expected.
    #[error("expected a {expected} call, found {found}")]
    UnexpectedMethod {
        /// The signature of the expected method.
        expected: &'static str,
        /// The signature of the decoded method.
        found: &'static str,
    },
    /// The final batch number reported by the event is too low for the sequenced batches.
    #[error(
        "final batch number {last_batch_number} cannot number {batch_count} batches finalizing {forced_count} forced batches"
    )]
    BatchNumberUnderflow {
        /// The final batch number reported by the event.
        last_batch_number: u64,
        /// The count of batches in the call.
        batch_count: usize,
        /// The total count of forced batches timestamps in the call.
        forced_count: u64,
    },
}
