//! Bindings for the proof-of-efficiency and global exit root manager contracts.

/// The calls to the proof-of-efficiency contract.
pub mod calls;

/// The logs emitted by the proof-of-efficiency and global exit root manager contracts.
pub mod logs;
