//! Primitive types for the zkEVM node L1 ingestion layer.

pub use batch::{ForcedBatch, Sequence, SequencedBatch, SequencedForceBatch, VerifiedBatch};
mod batch;

pub use block::{BlockInfo, L1Block};
mod block;

pub use event::{RollupEvent, RollupEventRef};
mod event;

pub use exit_root::{global_exit_root_hash, GlobalExitRoot};
mod exit_root;

pub use order::{BlocksOrder, EventOrder, Order};
mod order;
