//! Write a synthetic benchmark results tree so the plotting pipeline can be
//! exercised without running the benchmarks themselves.
//!
//! Usage: `cargo run --bin generate_results [results_dir]` (default `results`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct RankRow {
    ranks: u32,
    time: f64,
}

#[derive(Serialize)]
struct GpuRow {
    gpus: u32,
    time_seconds: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const RANK_COUNTS: [u32; 4] = [1, 2, 4, 8];
const GPU_COUNTS: [u32; 3] = [1, 2, 4];
const TRIALS: u32 = 3;
const BASE_TIME: f64 = 96.0;

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    fs::create_dir_all(path.parent().context("csv path has no parent")?)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Imperfect strong scaling: time drops with worker count but a fixed serial
/// fraction keeps it from being ideal (Amdahl with ~5% serial work).
fn strong_time(base: f64, workers: u32, rng: &mut SimpleRng) -> f64 {
    let workers = workers as f64;
    let ideal = base * (0.05 + 0.95 / workers);
    (ideal + rng.gauss(0.0, ideal * 0.03)).max(0.01)
}

/// Weak scaling: roughly flat, with communication overhead creeping in.
fn weak_time(base: f64, workers: u32, rng: &mut SimpleRng) -> f64 {
    let ideal = base * (1.0 + 0.04 * (workers as f64).log2());
    (ideal + rng.gauss(0.0, ideal * 0.03)).max(0.01)
}

fn main() -> Result<()> {
    let results_dir = PathBuf::from(
        std::env::args().nth(1).unwrap_or_else(|| "results".into()),
    );
    let mut rng = SimpleRng::new(42);
    let mut written = 0usize;

    // CPU MPI runs: one CSV per (rank count, trial), one measurement row each.
    for &ranks in &RANK_COUNTS {
        for trial in 0..TRIALS {
            let path = results_dir
                .join("strong_scaling")
                .join(format!("ranks_{ranks}"))
                .join(format!("strong_{ranks}_{trial}.csv"));
            let row = RankRow {
                ranks,
                time: strong_time(BASE_TIME, ranks, &mut rng),
            };
            write_csv(&path, &[row])?;
            written += 1;

            let path = results_dir
                .join("weak_scaling")
                .join(format!("ranks_{ranks}"))
                .join(format!("weak_{ranks}_{trial}.csv"));
            let row = RankRow {
                ranks,
                time: weak_time(BASE_TIME / 8.0, ranks, &mut rng),
            };
            write_csv(&path, &[row])?;
            written += 1;
        }
    }

    // Hybrid MPI+OpenMP runs: 8 threads per rank in the file names.
    for &ranks in &RANK_COUNTS {
        for trial in 0..TRIALS {
            let path = results_dir
                .join("hybrid/strong_scaling")
                .join(format!("run_{trial}"))
                .join(format!("hybrid_{ranks}_8.csv"));
            let row = RankRow {
                ranks,
                time: strong_time(BASE_TIME / 6.0, ranks, &mut rng),
            };
            write_csv(&path, &[row])?;
            written += 1;

            let path = results_dir
                .join("hybrid/weak_scaling")
                .join(format!("run_{trial}"))
                .join(format!("weak_hybrid_{ranks}_8.csv"));
            let row = RankRow {
                ranks,
                time: weak_time(BASE_TIME / 48.0, ranks, &mut rng),
            };
            write_csv(&path, &[row])?;
            written += 1;
        }
    }

    // GPU runs: all trials for one GPU count share a CSV, one row per trial.
    for &gpus in &GPU_COUNTS {
        let strong_rows: Vec<GpuRow> = (0..TRIALS)
            .map(|_| GpuRow {
                gpus,
                time_seconds: strong_time(BASE_TIME / 12.0, gpus, &mut rng),
            })
            .collect();
        write_csv(
            &results_dir
                .join("gpu/strong_scaling")
                .join(format!("mini_gpu_{gpus}.csv")),
            &strong_rows,
        )?;
        written += 1;

        let weak_rows: Vec<GpuRow> = (0..TRIALS)
            .map(|_| GpuRow {
                gpus,
                time_seconds: weak_time(BASE_TIME / 96.0, gpus, &mut rng),
            })
            .collect();
        write_csv(
            &results_dir
                .join("gpu/weak_scaling")
                .join(format!("mini_gpu_{gpus}.csv")),
            &weak_rows,
        )?;
        written += 1;
    }

    println!("Wrote {written} CSV files under {}", results_dir.display());
    Ok(())
}
