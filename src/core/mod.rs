// mod.rs - Core analysis module

pub mod aligner;
pub mod composition;
pub mod distance;
pub mod motif;
pub mod tree;

// Re-export main types for convenience
pub use aligner::{run_alignment, AlignerConfig, AlignerPreset, DEFAULT_ALIGNER_TIMEOUT_SECS};
pub use composition::{
    global_stats, length_histogram, sequence_stats, BaseCounts, GlobalStats, HistogramBin,
    SequenceStats,
};
pub use distance::{
    calculate_distance_matrix, identity_distance, padded_distance, AlignedSeq, DistanceEngine,
    DistanceMatrix, DistanceOutcome, DistanceSource,
};
pub use motif::{MotifHit, MotifScanner};
pub use tree::{build_nj_tree, Tree, TreeNode};
