// composition.rs - Per-sequence and aggregate composition statistics

use serde::Serialize;

/// Exact base counts for one sequence
///
/// A, T, C and G are counted case-insensitively; every other character is
/// bucketed into N.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BaseCounts {
    pub a: u64,
    pub t: u64,
    pub c: u64,
    pub g: u64,
    pub n: u64,
}

impl BaseCounts {
    /// Total number of counted characters
    pub fn total(&self) -> u64 {
        self.a + self.t + self.c + self.g + self.n
    }

    /// Number of unambiguous bases (A, T, C, G)
    pub fn unambiguous(&self) -> u64 {
        self.a + self.t + self.c + self.g
    }
}

/// Composition statistics for a single sequence
#[derive(Debug, Clone, Serialize)]
pub struct SequenceStats {
    pub length: u64,
    pub gc_percent: f64,
    pub bases: BaseCounts,
}

impl SequenceStats {
    /// AT content over unambiguous bases, in percent
    pub fn at_percent(&self) -> f64 {
        let unambiguous = self.bases.unambiguous();
        if unambiguous == 0 {
            0.0
        } else {
            100.0 * (self.bases.a + self.bases.t) as f64 / unambiguous as f64
        }
    }
}

/// Global base percentages over all sequences
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BasePercentages {
    pub a: f64,
    pub t: f64,
    pub c: f64,
    pub g: f64,
    pub n: f64,
}

/// Aggregate statistics over a sequence set
#[derive(Debug, Clone, Serialize)]
pub struct GlobalStats {
    pub total_sequences: usize,
    pub total_bases: u64,
    pub avg_gc: f64,
    pub avg_length: f64,
    pub base_percentages: BasePercentages,
}

/// One bar of the sequence length histogram
#[derive(Debug, Clone, Copy)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Compute composition statistics for one raw sequence
///
/// GC content is computed over unambiguous bases only, so Ns and other
/// ambiguity codes never dilute the percentage. An all-ambiguous or empty
/// sequence reports 0.
pub fn sequence_stats(raw: &str) -> SequenceStats {
    let mut bases = BaseCounts::default();

    for c in raw.chars() {
        match c.to_ascii_uppercase() {
            'A' => bases.a += 1,
            'T' => bases.t += 1,
            'C' => bases.c += 1,
            'G' => bases.g += 1,
            _ => bases.n += 1,
        }
    }

    let unambiguous = bases.unambiguous();
    let gc_percent = if unambiguous == 0 {
        0.0
    } else {
        100.0 * (bases.g + bases.c) as f64 / unambiguous as f64
    };

    SequenceStats {
        length: raw.chars().count() as u64,
        gc_percent,
        bases,
    }
}

/// Aggregate per-sequence statistics into global statistics
///
/// avg_gc is the arithmetic mean of the per-sequence GC percentages, not a
/// base-weighted value. All ratios collapse to 0 for empty input.
pub fn global_stats(per_seq: &[SequenceStats]) -> GlobalStats {
    let total_sequences = per_seq.len();
    let total_bases: u64 = per_seq.iter().map(|s| s.length).sum();

    let avg_gc = if total_sequences == 0 {
        0.0
    } else {
        per_seq.iter().map(|s| s.gc_percent).sum::<f64>() / total_sequences as f64
    };

    let avg_length = if total_sequences == 0 {
        0.0
    } else {
        total_bases as f64 / total_sequences as f64
    };

    let base_percentages = if total_bases == 0 {
        BasePercentages::default()
    } else {
        let sum = |f: fn(&BaseCounts) -> u64| -> f64 {
            let count: u64 = per_seq.iter().map(|s| f(&s.bases)).sum();
            100.0 * count as f64 / total_bases as f64
        };
        BasePercentages {
            a: sum(|b| b.a),
            t: sum(|b| b.t),
            c: sum(|b| b.c),
            g: sum(|b| b.g),
            n: sum(|b| b.n),
        }
    };

    GlobalStats {
        total_sequences,
        total_bases,
        avg_gc,
        avg_length,
        base_percentages,
    }
}

/// Bin sequence lengths into an equal-width histogram
///
/// A single distinct length collapses into one bin. The final bin is closed
/// on both ends so the maximum length is never lost to rounding.
pub fn length_histogram(per_seq: &[SequenceStats], bins: usize) -> Vec<HistogramBin> {
    if per_seq.is_empty() || bins == 0 {
        return Vec::new();
    }

    let lengths: Vec<f64> = per_seq.iter().map(|s| s.length as f64).collect();
    let min = lengths.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = lengths.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: lengths.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &len in &lengths {
        let mut idx = ((len - min) / width) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        result[idx].count += 1;
    }

    result
}
