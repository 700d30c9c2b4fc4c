//! Reactive background configuration store.
//!
//! One [`BackgroundStore`] is shared by every consumer. It publishes each
//! new snapshot on a [`tokio::sync::watch`] channel and persists through a
//! [`KeyValueStore`](crate::storage::KeyValueStore).

mod background;
mod motion;

#[cfg(test)]
mod tests;

pub use background::BackgroundStore;
