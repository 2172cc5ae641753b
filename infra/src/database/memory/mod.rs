//! In-memory repository implementations

mod user_repository_impl;

pub use user_repository_impl::MemoryUserRepository;
