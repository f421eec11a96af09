// ---------------------------------------------------------------------------
// ChartSpec – one chart configuration
// ---------------------------------------------------------------------------

/// Static description of one chart: where its CSV logs live, which columns to
/// read, and how to label the output.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    /// Selection key on the command line.
    pub name: &'static str,
    /// Glob patterns relative to the results directory.
    pub patterns: &'static [&'static str],
    /// Required x column.
    pub xcol: &'static str,
    /// Acceptable y columns, in priority order.
    pub y_candidates: &'static [&'static str],
    pub xlabel: &'static str,
    pub ylabel: &'static str,
    pub title: &'static str,
    /// Output file name under the plots directory.
    pub filename: &'static str,
    /// When set, a second chart of derived speedups is written here.
    /// Strong-scaling runs only; speedup is not meaningful for weak scaling.
    pub speedup_filename: Option<&'static str>,
}

/// All configured charts. The driver builds every entry unless a subset of
/// names is requested.
pub const CHARTS: &[ChartSpec] = &[
    ChartSpec {
        name: "cpu_strong",
        patterns: &["strong_scaling/*/strong_*_*.csv"],
        xcol: "ranks",
        y_candidates: &["time", "time_seconds"],
        xlabel: "MPI ranks",
        ylabel: "Time (s)",
        title: "CPU MPI Strong Scaling",
        filename: "cpu_strong_scaling.png",
        speedup_filename: Some("cpu_strong_speedup.png"),
    },
    ChartSpec {
        name: "cpu_weak",
        patterns: &["weak_scaling/*/weak_*_*.csv"],
        xcol: "ranks",
        y_candidates: &["time", "time_seconds"],
        xlabel: "MPI ranks",
        ylabel: "Time (s)",
        title: "CPU MPI Weak Scaling",
        filename: "cpu_weak_scaling.png",
        speedup_filename: None,
    },
    ChartSpec {
        name: "hybrid_strong",
        patterns: &["hybrid/strong_scaling/*/hybrid_*_*.csv"],
        xcol: "ranks",
        y_candidates: &["time"],
        xlabel: "MPI ranks",
        ylabel: "Time (s)",
        title: "Hybrid MPI+OpenMP Strong Scaling",
        filename: "hybrid_strong_scaling.png",
        speedup_filename: Some("hybrid_strong_speedup.png"),
    },
    ChartSpec {
        name: "hybrid_weak",
        patterns: &["hybrid/weak_scaling/*/weak_hybrid_*_*.csv"],
        xcol: "ranks",
        y_candidates: &["time"],
        xlabel: "MPI ranks",
        ylabel: "Time (s)",
        title: "Hybrid MPI+OpenMP Weak Scaling",
        filename: "hybrid_weak_scaling.png",
        speedup_filename: None,
    },
    ChartSpec {
        name: "gpu_strong",
        patterns: &["gpu/strong_scaling/*_gpu_*.csv"],
        xcol: "gpus",
        y_candidates: &["time", "time_seconds"],
        xlabel: "GPUs",
        ylabel: "Time (s)",
        title: "GPU Strong Scaling",
        filename: "gpu_strong_scaling.png",
        speedup_filename: Some("gpu_strong_speedup.png"),
    },
    ChartSpec {
        name: "gpu_weak",
        patterns: &["gpu/weak_scaling/*_gpu_*.csv"],
        xcol: "gpus",
        y_candidates: &["time", "time_seconds"],
        xlabel: "GPUs",
        ylabel: "Time (s)",
        title: "GPU Weak Scaling",
        filename: "gpu_weak_scaling.png",
        speedup_filename: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_names_are_unique() {
        for (i, a) in CHARTS.iter().enumerate() {
            for b in &CHARTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn output_filenames_do_not_collide() {
        let mut names: Vec<&str> = CHARTS
            .iter()
            .flat_map(|c| std::iter::once(c.filename).chain(c.speedup_filename))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
