use alloy_primitives::{Keccak256, B256, U256};

/// An update of the global exit root, emitted by the global exit root manager contract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct GlobalExitRoot {
    /// The L1 block number at which the update was emitted.
    pub block_number: u64,
    /// The exit root of the mainnet bridge.
    pub mainnet_exit_root: B256,
    /// The exit root of the rollup bridge.
    pub rollup_exit_root: B256,
    /// The sequence number of the global exit root.
    pub global_exit_root_num: U256,
    /// The combined root, `keccak256(mainnet_exit_root || rollup_exit_root)`.
    pub global_exit_root: B256,
}

impl GlobalExitRoot {
    /// Returns a new [`GlobalExitRoot`], computing the combined root from the mainnet and rollup
    /// exit roots.
    pub fn new(
        block_number: u64,
        global_exit_root_num: U256,
        mainnet_exit_root: B256,
        rollup_exit_root: B256,
    ) -> Self {
        Self {
            block_number,
            mainnet_exit_root,
            rollup_exit_root,
            global_exit_root_num,
            global_exit_root: global_exit_root_hash(mainnet_exit_root, rollup_exit_root),
        }
    }
}

/// Computes the global exit root from the mainnet and rollup exit roots.
pub fn global_exit_root_hash(mainnet_exit_root: B256, rollup_exit_root: B256) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(mainnet_exit_root);
    hasher.update(rollup_exit_root);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{b256, keccak256};

    #[test]
    fn test_global_exit_root_hash_matches_concatenation() {
        let mainnet = b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
        let rollup = b256!("0x2222222222222222222222222222222222222222222222222222222222222222");

        let expected = keccak256([mainnet.as_slice(), rollup.as_slice()].concat());
        assert_eq!(global_exit_root_hash(mainnet, rollup), expected);
    }

    #[test]
    fn test_global_exit_root_hash_is_order_sensitive() {
        let a = B256::with_last_byte(1);
        let b = B256::with_last_byte(2);
        assert_ne!(global_exit_root_hash(a, b), global_exit_root_hash(b, a));
    }

    #[test]
    fn test_new_computes_combined_root() {
        let root = GlobalExitRoot::new(7, U256::from(3), B256::ZERO, B256::ZERO);
        assert_eq!(root.global_exit_root, keccak256([0u8; 64]));
        assert_eq!(root.block_number, 7);
    }
}
