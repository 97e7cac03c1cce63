//! A library containing the logic required to decode the zkEVM contracts activity on the L1.

pub mod abi;

pub use classifier::L1EventSignature;
mod classifier;

pub use error::CallDecodeError;
mod error;

pub use numbering::{assign_batch_numbers, decode_forced_batch_number, decode_sequenced_batches};
mod numbering;
