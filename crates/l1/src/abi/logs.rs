use alloy_sol_types::sol;

sol! {
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event UpdateGlobalExitRoot(
        uint256 indexed globalExitRootNum,
        bytes32 indexed mainnetExitRoot,
        bytes32 indexed rollupExitRoot
    );

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event ForceBatch(
        uint64 indexed forceBatchNum,
        bytes32 lastGlobalExitRoot,
        address sequencer,
        bytes transactions
    );

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event SequenceBatches(uint64 indexed numBatch);

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event SequenceForceBatches(uint64 indexed numBatch);

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event VerifyBatch(uint64 indexed numBatch, address indexed aggregator);
}

