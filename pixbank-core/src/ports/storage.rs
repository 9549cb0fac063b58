//! Key/value storage port
//!
//! The session store persists its two entries through this trait. Adapters
//! decide where the values live (a JSON file on disk, process memory).

use crate::domain::result::Result;

/// Persistent string key/value storage
///
/// Single writer, synchronous. Implementations must return the last value
/// written for a key until it is removed.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
