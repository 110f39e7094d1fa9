//! Per-hour tally of completed focus blocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of wall-clock hours in a day.
pub const HOURS_PER_DAY: u8 = 24;

/// Completed focus blocks keyed by local wall-clock hour (0-23).
///
/// Counts only ever grow; there is no day-rollover reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusHistogram {
    by_hour: BTreeMap<u8, u32>,
}

impl FocusHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from `(hour, count)` pairs. Hours outside 0-23 and
    /// zero counts are dropped.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let by_hour = counts
            .into_iter()
            .filter(|&(hour, count)| hour < HOURS_PER_DAY && count > 0)
            .fold(BTreeMap::new(), |mut acc, (hour, count)| {
                let slot: &mut u32 = acc.entry(hour).or_default();
                *slot = slot.saturating_add(count);
                acc
            });
        Self { by_hour }
    }

    /// Record one completed block at `hour`. Out-of-range hours are clamped
    /// to 23.
    pub(crate) fn record(&mut self, hour: u8) {
        let hour = hour.min(HOURS_PER_DAY - 1);
        let slot = self.by_hour.entry(hour).or_default();
        *slot = slot.saturating_add(1);
    }

    pub fn count(&self, hour: u8) -> u32 {
        self.by_hour.get(&hour).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.by_hour.values().map(|&c| u64::from(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hour.is_empty()
    }

    /// Iterate `(hour, count)` in ascending hour order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.by_hour.iter().map(|(&h, &c)| (h, c))
    }

    /// Hour with the most completed blocks, `None` when empty.
    ///
    /// Ties go to the earliest hour.
    pub fn best_hour(&self) -> Option<u8> {
        let mut best: Option<(u8, u32)> = None;
        for (hour, count) in self.iter() {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((hour, count)),
            }
        }
        best.map(|(hour, _)| hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_hour_picks_maximum() {
        let h = FocusHistogram::from_counts([(9, 3), (14, 1)]);
        assert_eq!(h.best_hour(), Some(9));
    }

    #[test]
    fn best_hour_tie_goes_to_earliest_hour() {
        let h = FocusHistogram::from_counts([(15, 2), (8, 2), (11, 1)]);
        assert_eq!(h.best_hour(), Some(8));
    }

    #[test]
    fn empty_histogram_has_no_best_hour() {
        assert_eq!(FocusHistogram::new().best_hour(), None);
    }

    #[test]
    fn record_accumulates() {
        let mut h = FocusHistogram::new();
        h.record(10);
        h.record(10);
        h.record(30);
        assert_eq!(h.count(10), 2);
        assert_eq!(h.count(23), 1);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn from_counts_drops_invalid_entries() {
        let h = FocusHistogram::from_counts([(24, 5), (7, 0), (7, 2), (7, 1)]);
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![(7, 3)]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let h = FocusHistogram::from_counts([(9, 3)]);
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"9":3}"#);
    }
}
