//! Frequency distributions of per-vertex and per-pair measurements.

use std::{collections::BTreeMap, fmt};

use serde::{Serialize, Serializer};

use crate::paths::PathLengths;

/// A probability mass function over distinct measurement values.
///
/// Probabilities are the count of each value divided by the number of values observed, so they sum
/// to 1 up to floating-point rounding. An empty input gives an empty distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution<K> {
    probabilities: BTreeMap<K, f64>,
    sample_size: usize,
}

impl<K> Distribution<K>
where
    K: Copy + Ord,
{
    /// Builds a distribution by counting the occurrences of each value.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::distribution::Distribution;
    ///
    /// let distribution = Distribution::from_values([1, 1, 2, 3, 3, 3]);
    ///
    /// assert_eq!(distribution.get(&1), Some(1.0 / 3.0));
    /// assert_eq!(distribution.get(&2), Some(1.0 / 6.0));
    /// assert_eq!(distribution.get(&3), Some(0.5));
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = K>) -> Self {
        let mut counts = BTreeMap::new();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }

        Self::from_counts(counts)
    }

    /// Builds a distribution from already tallied counts.
    pub fn from_counts(counts: BTreeMap<K, usize>) -> Self {
        let sample_size: usize = counts.values().sum();
        let probabilities = counts
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(value, count)| (value, count as f64 / sample_size as f64))
            .collect();

        Self {
            probabilities,
            sample_size,
        }
    }

    /// Returns the probability of `value`, `None` if it was never observed.
    pub fn get(&self, value: &K) -> Option<f64> {
        self.probabilities.get(value).copied()
    }

    /// Iterates over `(value, probability)` in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.probabilities.iter().map(|(&value, &p)| (value, p))
    }

    /// Returns the number of distinct values.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Returns whether no values were observed.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Returns how many values the distribution was built from.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Returns the total probability mass, 1 for any non-empty distribution.
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }
}

impl<K> Serialize for Distribution<K>
where
    K: Copy + Ord + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Counts the occurrences of each value and normalises by the number of values.
pub fn to_distribution<K>(values: impl IntoIterator<Item = K>) -> Distribution<K>
where
    K: Copy + Ord,
{
    Distribution::from_values(values)
}

/// Returns the degree distribution, `P(k)`.
pub fn degree_distribution(degrees: &[usize]) -> Distribution<usize> {
    Distribution::from_values(degrees.iter().copied())
}

/// Returns the distribution of clustering coefficients, binned to hundredths.
///
/// This is the one place coefficients are rounded, summaries keep full precision.
pub fn clustering_distribution<T>(coefficients: &BTreeMap<T, f64>) -> Distribution<ClusteringBin> {
    Distribution::from_values(
        coefficients
            .values()
            .map(|&coefficient| ClusteringBin::from_coefficient(coefficient)),
    )
}

/// Returns the distribution of shortest path lengths over all unordered vertex pairs.
pub fn path_length_distribution<T>(lengths: &PathLengths<T>) -> Distribution<u32>
where
    T: Copy + Ord,
{
    Distribution::from_counts(lengths.counts())
}

/// A clustering coefficient rounded to two decimal places, stored as whole hundredths.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClusteringBin(u8);

impl ClusteringBin {
    /// Rounds a coefficient in `[0, 1]` to the nearest hundredth, ties to even. Values outside the
    /// range are clamped, NaN maps to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::distribution::ClusteringBin;
    ///
    /// assert_eq!(ClusteringBin::from_coefficient(0.4444).hundredths(), 44);
    /// assert_eq!(ClusteringBin::from_coefficient(0.125).hundredths(), 12);
    /// assert_eq!(ClusteringBin::from_coefficient(2.0 / 3.0).value(), 0.67);
    /// ```
    pub fn from_coefficient(coefficient: f64) -> Self {
        // `as` saturates and maps NaN to 0.
        Self((coefficient.clamp(0.0, 1.0) * 100.0).round_ties_even() as u8)
    }

    /// Returns the bin as a number of hundredths, `0..=100`.
    pub fn hundredths(self) -> u8 {
        self.0
    }

    /// Returns the bin as a coefficient.
    pub fn value(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for ClusteringBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

impl Serialize for ClusteringBin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}
