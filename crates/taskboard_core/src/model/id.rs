//! Identifier newtypes and the monotonic allocator behind them.
//!
//! Ids stay timestamp-shaped (epoch milliseconds) so documents written by
//! older widgets keep loading, but the allocator never hands out the same
//! value twice even when several entities land in one clock tick.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a board project.
    ProjectId
);
define_id!(
    /// Identifier of a board task, unique across all projects.
    TaskId
);
define_id!(
    /// Identifier of a flat-list item.
    TodoId
);

/// Strictly increasing id source.
///
/// `next_id` returns `max(now_ms, last + 1)`.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that will never return `max_existing` or lower.
    pub fn seeded(max_existing: i64) -> Self {
        Self { last: max_existing }
    }

    /// Records an id that already exists so it is never handed out again.
    pub fn observe(&mut self, existing: i64) {
        self.last = self.last.max(existing);
    }

    pub fn next_id(&mut self) -> i64 {
        let candidate = now_epoch_ms().max(self.last.saturating_add(1));
        self.last = candidate;
        candidate
    }
}

/// Current wall-clock time in epoch milliseconds, `0` if the clock is
/// before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{IdAllocator, TaskId};
    use std::collections::HashSet;

    #[test]
    fn allocator_is_strictly_increasing_within_one_tick() {
        let mut ids = IdAllocator::new();
        let issued = (0..1_000).map(|_| ids.next_id()).collect::<Vec<_>>();
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(issued.iter().collect::<HashSet<_>>().len(), issued.len());
    }

    #[test]
    fn seeded_allocator_skips_existing_ids() {
        let far_future = i64::MAX / 2;
        let mut ids = IdAllocator::seeded(far_future);
        assert_eq!(ids.next_id(), far_future + 1);

        ids.observe(far_future + 10);
        assert_eq!(ids.next_id(), far_future + 11);
    }

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&TaskId(1_700_000_000_000)).unwrap();
        assert_eq!(json, "1700000000000");
    }
}
