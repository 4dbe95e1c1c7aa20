use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a widget registered with a host-side widget set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetHandle(pub usize);

impl fmt::Display for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The `[start, end]` window displayed by a graph image, in Unix seconds.
///
/// A `Timespan` can only be built with `start < end` and a range that fits
/// in an `i64`; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimespan")]
pub struct Timespan {
    start: i64,
    end: i64,
}

impl Timespan {
    /// Returns `None` unless `start < end` and `end - start` fits in an
    /// `i64`.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        let range = end.checked_sub(start)?;
        (range > 0).then_some(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Length of the window in seconds (always positive).
    #[inline]
    pub fn range(&self) -> i64 {
        self.end - self.start
    }

    /// Whether `t` falls inside the window, bounds included.
    pub fn contains(&self, t: i64) -> bool {
        (self.start..=self.end).contains(&t)
    }

    /// The same window moved by `offset` seconds, or `None` if either edge
    /// leaves the `i64` range.
    pub fn shifted(&self, offset: i64) -> Option<Self> {
        Some(Self {
            start: self.start.checked_add(offset)?,
            end: self.end.checked_add(offset)?,
        })
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Deserialize)]
struct RawTimespan {
    start: i64,
    end: i64,
}

impl TryFrom<RawTimespan> for Timespan {
    type Error = String;

    fn try_from(raw: RawTimespan) -> Result<Self, Self::Error> {
        Timespan::new(raw.start, raw.end)
            .ok_or_else(|| format!("timespan {}..{} is empty or too wide", raw.start, raw.end))
    }
}
