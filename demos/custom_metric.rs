//! # Custom Metric Example
//!
//! This example demonstrates how to plug custom pairwise metrics into
//! seqreport's distance matrix computation.
//!
//! Usage:
//! ```bash
//! cargo run --example custom_metric
//! ```

use std::collections::HashSet;

use seqreport::core::{build_nj_tree, calculate_distance_matrix, identity_distance};

/// Example 1: GC-content distance
/// Absolute difference between the GC fractions of the two sequences.
/// Ignores positional information entirely.
fn gc_distance(a: &str, b: &str) -> f64 {
    (gc_fraction(a) - gc_fraction(b)).abs()
}

fn gc_fraction(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .bytes()
        .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
        .count();
    gc as f64 / seq.len() as f64
}

/// Example 2: K-mer Jaccard distance
/// One minus the Jaccard similarity of the 3-mer sets of the two
/// sequences. Robust to rearrangements that positional metrics punish.
fn kmer_jaccard_distance(a: &str, b: &str) -> f64 {
    let ka = kmer_set(a, 3);
    let kb = kmer_set(b, 3);
    if ka.is_empty() && kb.is_empty() {
        return 0.0;
    }
    let intersection = ka.intersection(&kb).count() as f64;
    let union = ka.union(&kb).count() as f64;
    1.0 - intersection / union
}

fn kmer_set(seq: &str, k: usize) -> HashSet<String> {
    let upper = seq.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let mut kmers = HashSet::new();
    if bytes.len() >= k {
        for window in bytes.windows(k) {
            kmers.insert(String::from_utf8_lossy(window).into_owned());
        }
    }
    kmers
}

fn main() {
    println!("🔌 seqreport Custom Metric Examples");
    println!("===================================\n");

    let titles: Vec<String> = ["Sample_A", "Sample_B", "Sample_C", "Sample_D"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows = vec![
        "ATCGATCGATCGATCG".to_string(),
        "ATCGATCGATCGATGG".to_string(),
        "GGGCCCGGGCCCGGGC".to_string(),
        "ATATATATATATATAT".to_string(),
    ];

    // Any fn(&str, &str) -> f64 slots into the matrix computation,
    // including the built-in identity metric.
    let metrics: [(&str, &str, fn(&str, &str) -> f64); 3] = [
        (
            "identity",
            "Positional mismatch fraction (built-in)",
            identity_distance,
        ),
        ("gc", "Absolute GC-fraction difference", gc_distance),
        ("kmer3", "3-mer Jaccard distance", kmer_jaccard_distance),
    ];

    println!("📊 Available Metrics:");
    for (name, description, _) in &metrics {
        println!("  • {}: {}", name, description);
    }
    println!();

    for (name, description, metric) in &metrics {
        println!("🧬 Metric: {}", name);
        println!("   Description: {}", description);

        let matrix = calculate_distance_matrix(titles.clone(), &rows, *metric);
        for (pair, distance) in matrix.pair_entries() {
            println!("   {} = {:.4}", pair, distance);
        }

        match build_nj_tree(&matrix) {
            Ok(tree) => println!("   Tree: {}", tree.newick()),
            Err(e) => println!("   Tree error: {}", e),
        }
        println!();
    }

    // Demonstrate metric symmetry
    println!("🔄 Testing Metric Symmetry:");
    let forward = kmer_jaccard_distance(&rows[0], &rows[2]);
    let reverse = kmer_jaccard_distance(&rows[2], &rows[0]);
    println!("   {} vs {}", rows[0], rows[2]);
    println!("   Forward: {:.4}", forward);
    println!("   Reverse: {:.4}", reverse);
    println!("   Symmetric: {}", forward == reverse);

    println!("\n✅ Custom metric examples completed!");
    println!("💡 Tip: use these patterns to score sequences with your own biology");
}
