//! Watches the persisted config for writes by other processes.
//!
//! Uses `notify` with a 300ms debounce so an atomic write (tmp file plus
//! rename) produces a single signal.

mod storage_watcher;

#[cfg(test)]
mod tests;

pub use storage_watcher::StorageWatcher;
