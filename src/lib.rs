// lib.rs - seqreport library root

//! # seqreport - Sequence composition, distance and phylogeny reporter
//!
//! This library ingests nucleotide sequences from manual TITLE=BASES entries or
//! FASTA files and turns them into an HTML analysis report. It computes
//! per-sequence and aggregate composition statistics, pairwise distances via an
//! external multiple aligner (with a padded fallback when no aligner is
//! available), and a neighbor-joining tree over the distance matrix.
//!
//! ## Features
//!
//! - **Composition statistics**: Per-sequence length, GC/AT content and base counts
//! - **Pairwise distances**: Alignment-based identity distance with a padded fallback
//! - **External aligners**: muscle, muscle5, clustalo, mafft or a custom command
//! - **Phylogeny**: Neighbor-joining tree with Newick export and an SVG rendering
//! - **Motif scanning**: Overlapping, case-insensitive motif hits per sequence
//! - **Reports**: Self-contained HTML with charts, plus TSV/CSV/JSON matrices
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use seqreport::prelude::*;
//!
//! // Ingest sequences from a FASTA file
//! let sequences = collect_sequences(&[], Some("genomes.fasta"), None, None)?;
//!
//! // Per-sequence and aggregate composition statistics
//! let stats: Vec<SequenceStats> = sequences
//!     .iter()
//!     .map(|s| sequence_stats(&s.raw))
//!     .collect();
//! let global = global_stats(&stats);
//! println!("{} sequences, {:.2}% GC", global.total_sequences, global.avg_gc);
//!
//! // Distances (padded fallback, no external aligner) and a tree
//! let engine = DistanceEngine::new(None);
//! if let Some(outcome) = engine.compute(&sequences) {
//!     let tree = build_nj_tree(&outcome.matrix)?;
//!     println!("{}", tree.newick());
//! }
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config, ValidationResult};
    pub use crate::core::{build_nj_tree, calculate_distance_matrix, global_stats, sequence_stats};
    pub use crate::core::{
        AlignerConfig, AlignerPreset, DistanceEngine, DistanceMatrix, DistanceOutcome,
        DistanceSource, GlobalStats, MotifScanner, SequenceStats, Tree,
    };
    pub use crate::data::{collect_sequences, export_fasta, read_fasta, Sequence};
    pub use crate::output::{write_matrix, write_report, DistancePayload, ReportContext, ReportStyle};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{DistanceEngine, DistanceMatrix, DistanceOutcome, DistanceSource, Tree};
pub use data::Sequence;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "seqreport v{} - Sequence composition, distance and phylogeny reporter",
        VERSION
    )
}
