//! TTL-guarded cell for remotely fetched values.
//!
//! [`CachedRemoteValue`] is the shared shape behind every sub-resource a
//! shop object fetches lazily: a possibly-absent value paired with the
//! instant it expires. A value is *stale* when it is absent or its expiry
//! instant has passed; stale values are transparently re-fetched by the
//! owning object on the next read.
//!
//! Value and expiry are always written together through [`store`], so a
//! reader never observes a fresh value with an old deadline or vice versa.
//!
//! [`store`]: CachedRemoteValue::store

use std::time::Duration;
use tokio::time::Instant;

/// A cached remote value with an expiry instant.
///
/// The expiry window is measured from the moment of the last successful
/// fetch, not from creation. A cell created with [`CachedRemoteValue::new`]
/// is stale until the first [`store`](CachedRemoteValue::store).
#[derive(Clone, Debug, Default)]
pub struct CachedRemoteValue<T> {
    value: Option<T>,
    expires_at: Option<Instant>,
}

impl<T> CachedRemoteValue<T> {
    /// Creates an empty cell. The cell is stale until a value is stored.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            expires_at: None,
        }
    }

    /// Returns `true` if the value is absent or its expiry has passed.
    #[must_use]
    pub fn is_stale(&self, now: Instant) -> bool {
        match (&self.value, self.expires_at) {
            (Some(_), Some(expires_at)) => now >= expires_at,
            _ => true,
        }
    }

    /// Stores a value and arms the expiry window in one step.
    pub fn store(&mut self, value: T, now: Instant, window: Duration) {
        self.value = Some(value);
        self.expires_at = Some(now + window);
    }

    /// Returns the cached value, stale or not.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Clears the value and expiry, forcing a fetch on the next read.
    pub fn invalidate(&mut self) {
        self.value = None;
        self.expires_at = None;
    }
}
