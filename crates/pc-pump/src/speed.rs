//! Speed sets and per-speed results.

use std::slice;

/// Reference speed, percent.
pub const REFERENCE_SPEED: f64 = 100.0;

/// Speeds projected when the caller asks for none in particular.
pub const DEFAULT_SPEEDS: [f64; 5] = [90.0, 80.0, 70.0, 60.0, 50.0];

/// Normalized list of requested speeds (percent of reference).
///
/// A single speed and a collection of speeds both convert into this type, so
/// every batch operation takes `impl Into<SpeedSet>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedSet(Vec<f64>);

impl SpeedSet {
    pub fn new(speeds: Vec<f64>) -> Self {
        Self(speeds)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Lowest requested speed, ignoring NaN.
    pub fn min(&self) -> Option<f64> {
        self.0
            .iter()
            .copied()
            .filter(|s| !s.is_nan())
            .fold(None, |acc, s| Some(acc.map_or(s, |m: f64| m.min(s))))
    }
}

impl Default for SpeedSet {
    fn default() -> Self {
        Self(DEFAULT_SPEEDS.to_vec())
    }
}

impl From<f64> for SpeedSet {
    fn from(speed: f64) -> Self {
        Self(vec![speed])
    }
}

impl From<Vec<f64>> for SpeedSet {
    fn from(speeds: Vec<f64>) -> Self {
        Self(speeds)
    }
}

impl From<&[f64]> for SpeedSet {
    fn from(speeds: &[f64]) -> Self {
        Self(speeds.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for SpeedSet {
    fn from(speeds: [f64; N]) -> Self {
        Self(speeds.to_vec())
    }
}

impl From<&SpeedSet> for SpeedSet {
    fn from(speeds: &SpeedSet) -> Self {
        speeds.clone()
    }
}

impl<'a> IntoIterator for &'a SpeedSet {
    type Item = &'a f64;
    type IntoIter = slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Results keyed by speed, in the order the speeds were requested.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedMap<T> {
    entries: Vec<(f64, T)>,
}

impl<T> SpeedMap<T> {
    pub(crate) fn from_entries(entries: Vec<(f64, T)>) -> Self {
        Self { entries }
    }

    /// Value for an exact speed key.
    pub fn get(&self, speed: f64) -> Option<&T> {
        self.entries
            .iter()
            .find(|(s, _)| *s == speed)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn speeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(s, _)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> {
        self.entries.iter().map(|(s, v)| (*s, v))
    }
}

impl<T> IntoIterator for SpeedMap<T> {
    type Item = (f64, T);
    type IntoIter = std::vec::IntoIter<(f64, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
