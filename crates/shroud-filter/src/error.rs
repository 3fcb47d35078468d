//! Error types for the filter core.
//!
//! Nothing here is fatal. Callers recover by abandoning the operation that
//! produced the error.

/// Failure to map a menu entry identifier back to an entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The identifier does not address any slot in the host's entity cache.
    #[error("target identifier {identifier} outside entity cache of {len} slots")]
    OutOfRange {
        /// The identifier carried by the menu entry.
        identifier: i32,
        /// Size of the entity cache.
        len: usize,
    },

    /// The slot now holds a different entity than the one the entry targets.
    #[error("target identifier {identifier} is stale (slot holds index {found})")]
    Stale {
        /// The identifier carried by the menu entry.
        identifier: i32,
        /// Index of the entity currently in the slot.
        found: i32,
    },
}
