// distance.rs - Pairwise distance computation with aligner fallback

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::core::aligner::{run_alignment, AlignerConfig};
use crate::data::Sequence;

/// Which strategy produced a distance matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceSource {
    /// External aligner succeeded; identity distance over aligned rows
    Aligned,
    /// Aligner unavailable or failed; positional comparison on padded raws
    Fallback,
}

impl DistanceSource {
    pub fn description(&self) -> &'static str {
        match self {
            DistanceSource::Aligned => "aligned identity distance",
            DistanceSource::Fallback => "simple padded distance",
        }
    }
}

/// One row of the alignment backing a distance matrix
#[derive(Debug, Clone)]
pub struct AlignedSeq {
    pub title: String,
    pub row: String,
}

/// Distance matrix plus the alignment it was derived from
#[derive(Debug, Clone)]
pub struct DistanceOutcome {
    pub source: DistanceSource,
    pub alignment: Vec<AlignedSeq>,
    pub matrix: DistanceMatrix,
}

impl DistanceOutcome {
    /// Number of columns in the backing alignment
    pub fn alignment_columns(&self) -> usize {
        self.alignment.first().map_or(0, |s| s.row.len())
    }
}

/// Symmetric distance matrix stored as a flat upper triangle
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    titles: Vec<String>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(titles: Vec<String>) -> Self {
        let n = titles.len();
        Self {
            titles,
            values: vec![0.0; n.saturating_sub(1) * n / 2],
        }
    }

    fn tri_index(&self, i: usize, j: usize) -> usize {
        let n = self.titles.len();
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        self.values[self.tri_index(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        if i == j {
            return;
        }
        let idx = self.tri_index(i, j);
        self.values[idx] = value;
    }

    /// Look up a distance by sequence titles
    pub fn get_by_title(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.titles.iter().position(|t| t == a)?;
        let j = self.titles.iter().position(|t| t == b)?;
        Some(self.get(i, j))
    }

    /// All upper-triangle entries as ("a|b", distance) pairs, in index order
    pub fn pair_entries(&self) -> Vec<(String, f64)> {
        let n = self.titles.len();
        let mut entries = Vec::with_capacity(self.values.len());
        for i in 0..n {
            for j in (i + 1)..n {
                entries.push((
                    format!("{}|{}", self.titles[i], self.titles[j]),
                    self.get(i, j),
                ));
            }
        }
        entries
    }
}

/// Fraction of differing columns between two aligned rows
///
/// Case-insensitive; a gap opposite a residue is a difference, a gap
/// opposite a gap is not. Rows of unequal length (which a well-formed
/// alignment never produces) count the unmatched tail as differences.
pub fn identity_distance(a: &str, b: &str) -> f64 {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 0.0;
    }

    let min_len = a.len().min(b.len());
    let mut mismatches = max_len - min_len;
    for i in 0..min_len {
        if !a[i].eq_ignore_ascii_case(&b[i]) {
            mismatches += 1;
        }
    }
    mismatches as f64 / max_len as f64
}

/// Positional distance on unaligned sequences, length difference penalized
///
/// Two empty sequences are maximally divergent (1.0) by convention;
/// otherwise this equals the identity distance on right-padded inputs.
pub fn padded_distance(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    identity_distance(a, b)
}

/// Right-pad sequences with gap characters to a common length
pub fn pad_sequences(raws: &[&str]) -> Vec<String> {
    let max_len = raws.iter().map(|r| r.len()).max().unwrap_or(0);
    raws.iter()
        .map(|r| {
            let mut padded = String::with_capacity(max_len);
            padded.push_str(r);
            padded.extend(std::iter::repeat('-').take(max_len - r.len()));
            padded
        })
        .collect()
}

/// Compute all pairwise distances in parallel with a progress bar
pub fn calculate_distance_matrix<S: AsRef<str> + Sync>(
    titles: Vec<String>,
    rows: &[S],
    metric: fn(&str, &str) -> f64,
) -> DistanceMatrix {
    let n = rows.len();
    let mut matrix = DistanceMatrix::new(titles);

    let start = Instant::now();
    let total_comparisons = n.saturating_sub(1) * n / 2;
    println!(
        "🔄 Computing distance matrix ({} × {} = {} comparisons)...",
        n, n, total_comparisons
    );

    let pb = ProgressBar::new(total_comparisons as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
            .unwrap()
            .progress_chars("#>-")
    );

    // Progress tracking with reduced contention
    let update_interval = std::cmp::max(1, total_comparisons / 100);
    let progress_counter = Arc::new(AtomicUsize::new(0));

    let upper_triangle: Vec<(usize, usize, f64)> = (0..n)
        .into_par_iter()
        .flat_map(|i| {
            let progress_clone = progress_counter.clone();
            let pb_clone = pb.clone();
            (i + 1..n).into_par_iter().map(move |j| {
                let distance = metric(rows[i].as_ref(), rows[j].as_ref());

                let count = progress_clone.fetch_add(1, Ordering::Relaxed) + 1;
                if count % update_interval == 0 {
                    pb_clone.set_position(count as u64);
                }

                (i, j, distance)
            })
        })
        .collect();

    pb.finish_and_clear();

    for (i, j, distance) in upper_triangle {
        matrix.set(i, j, distance);
    }

    println!(
        "✅ Distance matrix computed in {:.2}s",
        start.elapsed().as_secs_f64()
    );

    matrix
}

/// Runs the configured aligner when possible, falls back otherwise
pub struct DistanceEngine {
    aligner: Option<AlignerConfig>,
}

impl DistanceEngine {
    pub fn new(aligner: Option<AlignerConfig>) -> Self {
        Self { aligner }
    }

    /// Compute the distance outcome for a set of sequences
    ///
    /// Returns None for fewer than 2 sequences. Aligner trouble of any
    /// kind degrades to the padded fallback instead of failing the run.
    pub fn compute(&self, sequences: &[Sequence]) -> Option<DistanceOutcome> {
        if sequences.len() < 2 {
            return None;
        }

        let titles: Vec<String> = sequences.iter().map(|s| s.title.clone()).collect();

        if let Some(config) = &self.aligner {
            match run_alignment(config, sequences) {
                Ok(rows) => {
                    println!(
                        "✅ Alignment completed: {} rows × {} columns",
                        rows.len(),
                        rows[0].len()
                    );
                    let matrix =
                        calculate_distance_matrix(titles.clone(), &rows, identity_distance);
                    let alignment = titles
                        .into_iter()
                        .zip(rows)
                        .map(|(title, row)| AlignedSeq { title, row })
                        .collect();
                    return Some(DistanceOutcome {
                        source: DistanceSource::Aligned,
                        alignment,
                        matrix,
                    });
                }
                Err(e) => {
                    eprintln!("⚠️  Alignment failed: {} - falling back to simple padded distance", e);
                }
            }
        }

        let raws: Vec<&str> = sequences.iter().map(|s| s.raw.as_str()).collect();
        let matrix = calculate_distance_matrix(titles.clone(), &raws, padded_distance);
        let alignment = titles
            .into_iter()
            .zip(pad_sequences(&raws))
            .map(|(title, row)| AlignedSeq { title, row })
            .collect();
        Some(DistanceOutcome {
            source: DistanceSource::Fallback,
            alignment,
            matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aligner::AlignerConfig;

    fn seqs(pairs: &[(&str, &str)]) -> Vec<Sequence> {
        pairs.iter().map(|(t, s)| Sequence::new(t, s)).collect()
    }

    #[test]
    fn test_identity_distance_basic() {
        assert_eq!(identity_distance("ATGC", "ATGC"), 0.0);
        assert_eq!(identity_distance("ATGC", "ATGG"), 0.25);
        assert_eq!(identity_distance("AAAA", "TTTT"), 1.0);
        assert_eq!(identity_distance("", ""), 0.0);
    }

    #[test]
    fn test_identity_distance_case_insensitive() {
        assert_eq!(identity_distance("atgc", "ATGC"), 0.0);
        assert_eq!(identity_distance("aTgC", "AtGg"), 0.25);
    }

    #[test]
    fn test_identity_distance_gap_handling() {
        // Gap against gap is shared context, not a difference
        assert_eq!(identity_distance("AC-T", "AC-A"), 0.25);
        // Gap against residue is a difference
        assert_eq!(identity_distance("A-CT", "AACT"), 0.25);
    }

    #[test]
    fn test_padded_distance_conventions() {
        assert_eq!(padded_distance("ACGT", "ACGT"), 0.0);
        assert_eq!(padded_distance("AAAA", "TTTT"), 1.0);
        // Both empty: maximal divergence by convention
        assert_eq!(padded_distance("", ""), 1.0);
        // One empty: every position of the other is unmatched
        assert_eq!(padded_distance("", "ACGT"), 1.0);
    }

    #[test]
    fn test_padded_distance_length_penalty() {
        // 1 mismatch over min(4,6) + 2 unmatched, over max = 6
        assert_eq!(padded_distance("ACGT", "ACGAGG"), 3.0 / 6.0);
    }

    #[test]
    fn test_padded_equals_identity_on_padded_rows() {
        let cases = [("ACGT", "AC"), ("A", "TTTTT"), ("ACGTACGT", "ACGTACGA")];
        for (a, b) in cases {
            let padded = pad_sequences(&[a, b]);
            assert_eq!(padded_distance(a, b), identity_distance(&padded[0], &padded[1]));
        }
    }

    #[test]
    fn test_pad_sequences_lengths() {
        let padded = pad_sequences(&["ACGT", "AC", ""]);
        assert_eq!(padded, vec!["ACGT", "AC--", "----"]);
    }

    #[test]
    fn test_matrix_symmetry_and_diagonal() {
        let titles = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut m = DistanceMatrix::new(titles);
        m.set(0, 1, 0.25);
        m.set(2, 1, 0.5);

        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 1), 0.25);
        assert_eq!(m.get(1, 0), 0.25);
        assert_eq!(m.get(1, 2), 0.5);
        assert_eq!(m.get(2, 1), 0.5);
        assert_eq!(m.get(0, 2), 0.0);
    }

    #[test]
    fn test_matrix_title_lookup() {
        let titles = vec!["alpha".to_string(), "beta".to_string()];
        let mut m = DistanceMatrix::new(titles);
        m.set(0, 1, 0.75);

        assert_eq!(m.get_by_title("alpha", "beta"), Some(0.75));
        assert_eq!(m.get_by_title("beta", "alpha"), Some(0.75));
        assert_eq!(m.get_by_title("alpha", "alpha"), Some(0.0));
        assert_eq!(m.get_by_title("alpha", "gamma"), None);
    }

    #[test]
    fn test_matrix_pair_entries() {
        let titles = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut m = DistanceMatrix::new(titles);
        m.set(0, 1, 0.1);
        m.set(0, 2, 0.2);
        m.set(1, 2, 0.3);

        let entries = m.pair_entries();
        assert_eq!(
            entries,
            vec![
                ("a|b".to_string(), 0.1),
                ("a|c".to_string(), 0.2),
                ("b|c".to_string(), 0.3),
            ]
        );
    }

    #[test]
    fn test_calculate_matrix_values() {
        let titles = vec!["s1".to_string(), "s2".to_string(), "s3".to_string()];
        let rows = vec!["AAAA".to_string(), "AATT".to_string(), "TTTT".to_string()];
        let m = calculate_distance_matrix(titles, &rows, identity_distance);

        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.get(0, 2), 1.0);
        assert_eq!(m.get(1, 2), 0.5);
    }

    #[test]
    fn test_engine_needs_two_sequences() {
        let engine = DistanceEngine::new(None);
        assert!(engine.compute(&seqs(&[("only", "ACGT")])).is_none());
        assert!(engine.compute(&[]).is_none());
    }

    #[test]
    fn test_engine_without_aligner_uses_fallback() {
        let engine = DistanceEngine::new(None);
        let outcome = engine
            .compute(&seqs(&[("S1", "AAAA"), ("S2", "TTTT")]))
            .unwrap();

        assert_eq!(outcome.source, DistanceSource::Fallback);
        assert_eq!(outcome.matrix.get(0, 1), 1.0);
        assert_eq!(outcome.alignment.len(), 2);
        assert_eq!(outcome.alignment_columns(), 4);
    }

    #[test]
    fn test_engine_fallback_pads_alignment_rows() {
        let engine = DistanceEngine::new(None);
        let outcome = engine
            .compute(&seqs(&[("S1", "ACGTAC"), ("S2", "ACG")]))
            .unwrap();

        assert_eq!(outcome.alignment[0].row, "ACGTAC");
        assert_eq!(outcome.alignment[1].row, "ACG---");
    }

    #[test]
    fn test_engine_broken_aligner_falls_back() {
        let config = AlignerConfig::custom(
            "seqreport-test-no-such-aligner".to_string(),
            "{input} {output}".to_string(),
            5,
        );
        let engine = DistanceEngine::new(Some(config));
        let outcome = engine
            .compute(&seqs(&[("S1", "AAAA"), ("S2", "TTTT")]))
            .unwrap();

        assert_eq!(outcome.source, DistanceSource::Fallback);
        assert_eq!(outcome.matrix.get(0, 1), 1.0);
    }

    #[test]
    fn test_engine_with_copy_aligner_is_aligned() {
        // cp returns the input untouched, a valid alignment for equal lengths
        let config =
            AlignerConfig::custom("cp".to_string(), "{input} {output}".to_string(), 10);
        let engine = DistanceEngine::new(Some(config));
        let outcome = engine
            .compute(&seqs(&[("S1", "ATGC"), ("S2", "ATGG")]))
            .unwrap();

        assert_eq!(outcome.source, DistanceSource::Aligned);
        assert_eq!(outcome.matrix.get(0, 1), 0.25);
        assert_eq!(outcome.alignment[0].title, "S1");
    }
}
