use std::path::Path;

use anyhow::{Context, Result};
use glob::glob;
use log::{debug, warn};
use thiserror::Error;

use super::model::{AggregatedSeries, Sample};

// ---------------------------------------------------------------------------
// Per-file skip taxonomy
// ---------------------------------------------------------------------------

/// Why a discovered file contributed no rows. Only `Unreadable` is worth a
/// console warning; the missing-column cases are expected whenever a results
/// tree mixes log layouts and are skipped quietly.
#[derive(Debug, Error)]
enum FileSkip {
    #[error("unreadable CSV: {0}")]
    Unreadable(csv::Error),
    #[error("missing x column '{0}'")]
    MissingX(String),
    #[error("no y candidate column present")]
    MissingY,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Expand `patterns` under `results_dir`, pull `(x, value)` rows out of every
/// matching CSV file, and reduce the union to a median-per-x series.
///
/// Per file: the x column must be present, the first y candidate found in the
/// header is used and renamed to the canonical `value`, and rows with empty or
/// non-numeric cells in either column are dropped. Files that cannot be
/// parsed are skipped with a warning; files missing the required columns are
/// skipped silently. `Ok(None)` means no rows survived anywhere.
pub fn load_series(
    results_dir: &Path,
    patterns: &[&str],
    xcol: &str,
    y_candidates: &[&str],
) -> Result<Option<AggregatedSeries>> {
    let mut samples: Vec<Sample> = Vec::new();
    let mut files = 0usize;

    for pattern in patterns {
        let full = results_dir.join(pattern);
        let full = full
            .to_str()
            .with_context(|| format!("non-UTF-8 glob path {full:?}"))?
            .to_owned();

        for entry in glob(&full).with_context(|| format!("invalid glob pattern '{pattern}'"))? {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    warn!("Skipping unreadable match for '{pattern}': {err}");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }

            match extract_samples(&path, xcol, y_candidates) {
                Ok(rows) => {
                    if !rows.is_empty() {
                        files += 1;
                        samples.extend(rows);
                    }
                }
                Err(skip @ FileSkip::Unreadable(_)) => {
                    warn!("Skipping {}: {skip}", path.display());
                }
                Err(skip) => {
                    debug!("Skipping {}: {skip}", path.display());
                }
            }
        }
    }

    Ok(AggregatedSeries::from_samples(&samples, files))
}

// ---------------------------------------------------------------------------
// Per-file extraction
// ---------------------------------------------------------------------------

/// Read one CSV file and return its usable `(x, value)` rows.
///
/// A parse error anywhere in the file rejects the whole file, matching the
/// all-or-nothing behavior of a tabular reader on ragged input.
fn extract_samples(
    path: &Path,
    xcol: &str,
    y_candidates: &[&str],
) -> std::result::Result<Vec<Sample>, FileSkip> {
    let mut reader = csv::Reader::from_path(path).map_err(FileSkip::Unreadable)?;
    let headers = reader.headers().map_err(FileSkip::Unreadable)?.clone();

    let x_idx = headers
        .iter()
        .position(|h| h == xcol)
        .ok_or_else(|| FileSkip::MissingX(xcol.to_string()))?;

    // First candidate present wins, in priority order.
    let y_idx = y_candidates
        .iter()
        .find_map(|cand| headers.iter().position(|h| h == *cand))
        .ok_or(FileSkip::MissingY)?;

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record.map_err(FileSkip::Unreadable)?;
        let x = record.get(x_idx).and_then(parse_cell);
        let value = record.get(y_idx).and_then(parse_cell);
        if let (Some(x), Some(value)) = (x, value) {
            samples.push(Sample { x, value });
        }
    }
    Ok(samples)
}

/// Parse a CSV cell as a finite float; empty and malformed cells count as
/// missing values and drop the row.
fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn merges_rows_across_files_by_median() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "logs/a.csv", "ranks,time\n4,10.0\n8,5.0\n");
        write(dir.path(), "logs/b.csv", "ranks,time\n4,12.0\n");

        let series = load_series(dir.path(), &["logs/*.csv"], "ranks", &["time"])
            .unwrap()
            .unwrap();
        assert_eq!(series.points, vec![(4.0, 11.0), (8.0, 5.0)]);
        assert_eq!(series.files, 2);
        assert_eq!(series.rows, 3);
    }

    #[test]
    fn y_candidate_fallback_in_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", "ranks,time_seconds\n2,6.0\n");

        let series = load_series(dir.path(), &["*.csv"], "ranks", &["time", "time_seconds"])
            .unwrap()
            .unwrap();
        assert_eq!(series.points, vec![(2.0, 6.0)]);
    }

    #[test]
    fn first_present_candidate_wins_over_later_ones() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.csv",
            "ranks,time,time_seconds\n2,6.0,999.0\n",
        );

        let series = load_series(dir.path(), &["*.csv"], "ranks", &["time", "time_seconds"])
            .unwrap()
            .unwrap();
        assert_eq!(series.points, vec![(2.0, 6.0)]);
    }

    #[test]
    fn files_missing_required_columns_contribute_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "no_x.csv", "gpus,time\n2,6.0\n");
        write(dir.path(), "no_y.csv", "ranks,watts\n2,300.0\n");
        write(dir.path(), "good.csv", "ranks,time\n2,6.0\n");

        let series = load_series(dir.path(), &["*.csv"], "ranks", &["time"])
            .unwrap()
            .unwrap();
        assert_eq!(series.points, vec![(2.0, 6.0)]);
        assert_eq!(series.files, 1);
    }

    #[test]
    fn corrupt_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.csv", "ranks,time\n4,10.0,extra_field\n");
        write(dir.path(), "good.csv", "ranks,time\n4,12.0\n");

        let series = load_series(dir.path(), &["*.csv"], "ranks", &["time"])
            .unwrap()
            .unwrap();
        assert_eq!(series.points, vec![(4.0, 12.0)]);
        assert_eq!(series.files, 1);
    }

    #[test]
    fn rows_with_missing_cells_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.csv",
            "ranks,time\n4,10.0\n,3.0\n8,\n16,not_a_number\n",
        );

        let series = load_series(dir.path(), &["*.csv"], "ranks", &["time"])
            .unwrap()
            .unwrap();
        assert_eq!(series.points, vec![(4.0, 10.0)]);
    }

    #[test]
    fn no_matching_files_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let series = load_series(dir.path(), &["missing/*.csv"], "ranks", &["time"]).unwrap();
        assert!(series.is_none());
    }

    #[test]
    fn multiple_patterns_are_unioned() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "one/a.csv", "ranks,time\n1,10.0\n");
        write(dir.path(), "two/b.csv", "ranks,time\n2,5.0\n");

        let series = load_series(
            dir.path(),
            &["one/*.csv", "two/*.csv"],
            "ranks",
            &["time"],
        )
        .unwrap()
        .unwrap();
        assert_eq!(series.points, vec![(1.0, 10.0), (2.0, 5.0)]);
    }
}
