//! Adapters implementing the domain ports.

pub mod in_memory;
pub mod json_limits;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
