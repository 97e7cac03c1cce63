//! Configuration of the [`crate::Etherman`].

use crate::AlloyChainReader;
use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::layers::RetryBackoffLayer;
use eyre::OptionExt;

/// The default max amount of retries for the L1 provider.
pub const DEFAULT_L1_PROVIDER_MAX_RETRIES: u32 = 10;

/// The default initial backoff in milliseconds for the L1 provider.
pub const DEFAULT_L1_PROVIDER_INITIAL_BACKOFF: u64 = 100;

/// The default compute units per second for the L1 provider.
pub const DEFAULT_L1_PROVIDER_COMPUTE_UNITS_PER_SECOND: u64 = 10_000;

/// An address book of the zkEVM contracts on the L1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZkEvmAddressBook {
    /// The address of the proof-of-efficiency contract.
    pub poe_address: Address,
    /// The address of the global exit root manager contract.
    pub global_exit_root_manager_address: Address,
    /// The address of the matic token contract.
    pub matic_address: Address,
}

impl ZkEvmAddressBook {
    /// Returns the addresses of the contracts emitting the rollup events.
    pub fn tracked_addresses(&self) -> Vec<Address> {
        vec![self.poe_address, self.global_exit_root_manager_address]
    }
}

/// The configuration of the [`crate::Etherman`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EthermanConfig {
    /// The address book of the zkEVM contracts.
    pub address_book: ZkEvmAddressBook,
    /// The account sending the sequencing transactions, used as sender for gas estimations.
    pub sender: Option<Address>,
}

/// The arguments to connect to the L1 and to the zkEVM contracts.
#[derive(Debug, Clone, clap::Args)]
pub struct EthermanArgs {
    /// The URL for the L1 RPC.
    #[arg(long = "l1.url", id = "l1_url", value_name = "L1_URL", env = "ZKEVM_L1_URL")]
    pub url: Option<reqwest::Url>,
    /// The address of the proof-of-efficiency contract.
    #[arg(
        long = "l1.poe-address",
        id = "l1_poe_address",
        value_name = "L1_POE_ADDRESS",
        env = "ZKEVM_L1_POE_ADDRESS"
    )]
    pub poe_address: Address,
    /// The address of the global exit root manager contract.
    #[arg(
        long = "l1.global-exit-root-manager-address",
        id = "l1_global_exit_root_manager_address",
        value_name = "L1_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS",
        env = "ZKEVM_L1_GLOBAL_EXIT_ROOT_MANAGER_ADDRESS"
    )]
    pub global_exit_root_manager_address: Address,
    /// The address of the matic token contract.
    #[arg(
        long = "l1.matic-address",
        id = "l1_matic_address",
        value_name = "L1_MATIC_ADDRESS",
        env = "ZKEVM_L1_MATIC_ADDRESS"
    )]
    pub matic_address: Address,
    /// The hex-encoded private key of the sequencer, required to send transactions.
    #[arg(
        long = "l1.sequencer-private-key",
        id = "l1_sequencer_private_key",
        value_name = "L1_SEQUENCER_PRIVATE_KEY",
        env = "ZKEVM_L1_SEQUENCER_PRIVATE_KEY",
        hide_env_values = true
    )]
    pub sequencer_private_key: Option<PrivateKeySigner>,
    /// The compute units per second for the provider.
    #[arg(long = "l1.cups", id = "l1_compute_units_per_second", value_name = "L1_COMPUTE_UNITS_PER_SECOND", default_value_t = DEFAULT_L1_PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l1.max-retries", id = "l1_max_retries", value_name = "L1_MAX_RETRIES", default_value_t = DEFAULT_L1_PROVIDER_MAX_RETRIES)]
    pub max_retries: u32,
    /// The initial backoff for the provider.
    #[arg(long = "l1.initial-backoff", id = "l1_initial_backoff", value_name = "L1_INITIAL_BACKOFF", default_value_t = DEFAULT_L1_PROVIDER_INITIAL_BACKOFF)]
    pub initial_backoff: u64,
}

impl EthermanArgs {
    /// Returns the [`EthermanConfig`] described by the arguments.
    pub fn config(&self) -> EthermanConfig {
        EthermanConfig {
            address_book: ZkEvmAddressBook {
                poe_address: self.poe_address,
                global_exit_root_manager_address: self.global_exit_root_manager_address,
                matic_address: self.matic_address,
            },
            sender: self.sequencer_private_key.as_ref().map(|signer| signer.address()),
        }
    }

    /// Returns a chain reader over an HTTP provider to the L1, signing transactions with the
    /// sequencer key if one is configured.
    pub fn chain_reader(&self) -> eyre::Result<AlloyChainReader<DynProvider>> {
        let url = self.url.clone().ok_or_eyre("missing url for the L1 provider")?;
        let client = RpcClient::builder()
            .layer(RetryBackoffLayer::new(
                self.max_retries,
                self.initial_backoff,
                self.compute_units_per_second,
            ))
            .http(url);

        let provider = match &self.sequencer_private_key {
            Some(signer) => {
                tracing::info!(target: "zkevm::etherman", address = ?signer.address(), "configured sequencer signer");
                ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer.clone()))
                    .connect_client(client)
                    .erased()
            }
            None => ProviderBuilder::new().connect_client(client).erased(),
        };

        Ok(AlloyChainReader::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        etherman: EthermanArgs,
    }

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_should_parse_addresses_and_key() {
        let cli = Cli::parse_from([
            "zkevm",
            "--l1.url",
            "http://localhost:8545",
            "--l1.poe-address",
            "0x0000000000000000000000000000000000000001",
            "--l1.global-exit-root-manager-address",
            "0x0000000000000000000000000000000000000002",
            "--l1.matic-address",
            "0x0000000000000000000000000000000000000003",
            "--l1.sequencer-private-key",
            KEY,
        ]);

        let config = cli.etherman.config();
        assert_eq!(config.address_book.poe_address, Address::with_last_byte(1));
        assert_eq!(
            config.address_book.tracked_addresses(),
            vec![Address::with_last_byte(1), Address::with_last_byte(2)]
        );
        assert_eq!(config.address_book.matic_address, Address::with_last_byte(3));
        assert_eq!(
            config.sender,
            Some(alloy_primitives::address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))
        );
        assert_eq!(cli.etherman.max_retries, DEFAULT_L1_PROVIDER_MAX_RETRIES);
    }

    #[test]
    fn test_should_require_url_for_provider() {
        let cli = Cli::parse_from([
            "zkevm",
            "--l1.poe-address",
            "0x0000000000000000000000000000000000000001",
            "--l1.global-exit-root-manager-address",
            "0x0000000000000000000000000000000000000002",
            "--l1.matic-address",
            "0x0000000000000000000000000000000000000003",
        ]);

        assert!(cli.etherman.config().sender.is_none());
        assert!(cli.etherman.chain_reader().is_err());
    }
}
