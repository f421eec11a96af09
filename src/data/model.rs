use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Sample – one retained row from a benchmark CSV
// ---------------------------------------------------------------------------

/// A single retained measurement: parallelism on x (ranks or GPUs), the
/// canonical `value` column on y (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// AggregatedSeries – the reduced (x, median value) table
// ---------------------------------------------------------------------------

/// The aggregate of all contributing files: one `(x, median value)` point per
/// distinct x observed, sorted by x ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub points: Vec<(f64, f64)>,
    /// Number of files that contributed at least one row.
    pub files: usize,
    /// Total rows retained before reduction.
    pub rows: usize,
}

impl AggregatedSeries {
    /// Group samples by x and reduce each group to its median.
    ///
    /// Returns `None` when no samples survive — the caller treats that as
    /// "no data", not an error. The result is independent of sample order:
    /// grouping is keyed by the x bit pattern and the median only sees the
    /// multiset of values per group.
    pub fn from_samples(samples: &[Sample], files: usize) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut groups: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
        for sample in samples {
            groups
                .entry(sample.x.to_bits())
                .or_default()
                .push(sample.value);
        }

        let mut points: Vec<(f64, f64)> = groups
            .into_iter()
            .map(|(bits, mut values)| (f64::from_bits(bits), median(&mut values)))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        Some(AggregatedSeries {
            points,
            files,
            rows: samples.len(),
        })
    }

    /// Number of distinct x values.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Derive a speedup series: `baseline_time / time(x)` with the baseline
    /// taken at the smallest observed x.
    ///
    /// Returns `None` when the baseline is not a positive finite time
    /// (ratios against zero or negative timings are meaningless).
    pub fn speedup(&self) -> Option<AggregatedSeries> {
        let &(_, baseline) = self.points.first()?;
        if !(baseline.is_finite() && baseline > 0.0) {
            return None;
        }
        let points = self
            .points
            .iter()
            .map(|&(x, value)| (x, baseline / value))
            .collect();
        Some(AggregatedSeries {
            points,
            files: self.files,
            rows: self.rows,
        })
    }
}

/// Median of a slice; even counts average the two middle elements.
pub fn median(values: &mut [f64]) -> f64 {
    debug_assert!(!values.is_empty());
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, value: f64) -> Sample {
        Sample { x, value }
    }

    #[test]
    fn median_odd_count() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn median_even_count_averages_middle_pair() {
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn median_single_value() {
        assert_eq!(median(&mut [7.5]), 7.5);
    }

    #[test]
    fn aggregation_groups_and_sorts() {
        let samples = [sample(8.0, 5.0), sample(4.0, 10.0), sample(4.0, 12.0)];
        let series = AggregatedSeries::from_samples(&samples, 2).unwrap();
        assert_eq!(series.points, vec![(4.0, 11.0), (8.0, 5.0)]);
        assert_eq!(series.rows, 3);
        assert_eq!(series.files, 2);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let forward = [sample(1.0, 9.0), sample(2.0, 4.0), sample(2.0, 6.0)];
        let mut reversed = forward;
        reversed.reverse();

        let a = AggregatedSeries::from_samples(&forward, 1).unwrap();
        let b = AggregatedSeries::from_samples(&reversed, 1).unwrap();
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn empty_input_is_no_data() {
        assert!(AggregatedSeries::from_samples(&[], 0).is_none());
    }

    #[test]
    fn speedup_uses_smallest_x_as_baseline() {
        let samples = [sample(4.0, 2.5), sample(1.0, 10.0), sample(2.0, 5.0)];
        let series = AggregatedSeries::from_samples(&samples, 1).unwrap();
        let speedup = series.speedup().unwrap();
        assert_eq!(speedup.points, vec![(1.0, 1.0), (2.0, 2.0), (4.0, 4.0)]);
    }

    #[test]
    fn speedup_rejects_zero_baseline() {
        let samples = [sample(1.0, 0.0), sample(2.0, 5.0)];
        let series = AggregatedSeries::from_samples(&samples, 1).unwrap();
        assert!(series.speedup().is_none());
    }
}
