use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

///
/// RestoreMatch
///
/// How a child's deletion timestamp is correlated with its parent's.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreMatch {
    /// Floor both timestamps to the window width and compare the buckets.
    /// With a 60 second window this is minute-level equality: two deletions
    /// in the same wall-clock minute match, two straddling a minute boundary
    /// never do.
    #[default]
    Truncate,

    /// Match when the timestamps are strictly less than the window apart.
    Distance,
}

///
/// RestoreWindow
///
/// Tolerance used by cascade restore. Children deleted as part of the
/// parent's cascade carry the host clock at their own delete, which is at or
/// just before the parent's, so exact equality is too strict.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RestoreWindow {
    pub secs: u64,
    pub mode: RestoreMatch,
}

impl RestoreWindow {
    pub const DEFAULT_SECS: u64 = 60;

    /// Minute-level truncation.
    pub const MINUTE: Self = Self::truncate(Self::DEFAULT_SECS);

    /// Only identical (second precision) timestamps match.
    pub const EXACT: Self = Self::truncate(0);

    #[must_use]
    pub const fn truncate(secs: u64) -> Self {
        Self {
            secs,
            mode: RestoreMatch::Truncate,
        }
    }

    #[must_use]
    pub const fn distance(secs: u64) -> Self {
        Self {
            secs,
            mode: RestoreMatch::Distance,
        }
    }

    /// True when a child deleted at `child` belongs to the parent's deletion at `parent`.
    #[must_use]
    pub const fn matches(self, parent: Timestamp, child: Timestamp) -> bool {
        if self.secs == 0 {
            return parent.get() == child.get();
        }

        match self.mode {
            RestoreMatch::Truncate => {
                parent.floor_to(self.secs).get() == child.floor_to(self.secs).get()
            }
            RestoreMatch::Distance => parent.abs_diff(child) < self.secs,
        }
    }
}

impl Default for RestoreWindow {
    fn default() -> Self {
        Self::MINUTE
    }
}

///
/// TESTS
///
