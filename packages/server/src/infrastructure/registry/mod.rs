//! Connection Registry の実装

mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
