// mod.rs - Data structures module

pub mod fasta;
pub mod sequence;

// Re-export main types for convenience
pub use fasta::{export_fasta, read_fasta};
pub use sequence::{collect_sequences, dedup_titles, parse_manual_entry, Sequence};
