//! Database module - user storage
//!
//! Users are kept in process memory; there is no persistent store.

pub mod memory;

pub use memory::MemoryUserRepository;
