// fasta.rs - FASTA ingestion and export

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use bio::io::fasta;

use crate::data::Sequence;

/// Read a FASTA file into (id, sequence) pairs
///
/// Record ids are the first whitespace-delimited header token. Any parse
/// error is returned so the caller can decide whether it is fatal.
pub fn read_fasta(path: &str) -> Result<Vec<(String, String)>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open FASTA file '{}': {}", path, e))?;

    let reader = fasta::Reader::new(BufReader::new(file));
    let mut records = Vec::new();

    for record_result in reader.records() {
        let record = record_result
            .map_err(|e| format!("Invalid FASTA record in '{}': {}", path, e))?;
        let seq = String::from_utf8_lossy(record.seq()).to_string();
        records.push((record.id().to_string(), seq));
    }

    println!("🧬 Loaded {} sequences from: {}", records.len(), path);
    Ok(records)
}

/// Export sequences as a timestamped FASTA file in the given directory
///
/// The filename is sequences_YYYYMMDD_HHMMSS.fasta. Records are written as
/// plain >title / sequence pairs without line wrapping. An empty sequence
/// list is an error surfaced to the caller.
pub fn export_fasta(sequences: &[Sequence], export_dir: &str) -> Result<PathBuf, String> {
    if sequences.is_empty() {
        return Err("No sequences to export".to_string());
    }

    let dir = Path::new(export_dir);
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create export directory '{}': {}", export_dir, e))?;

    let filename = format!(
        "sequences_{}.fasta",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = dir.join(filename);

    let file = File::create(&path)
        .map_err(|e| format!("Failed to create FASTA file '{}': {}", path.display(), e))?;
    let mut writer = fasta::Writer::new(file);

    for seq in sequences {
        writer
            .write(&seq.title, None, seq.raw.as_bytes())
            .map_err(|e| format!("Failed to write record '{}': {}", seq.title, e))?;
    }

    Ok(path)
}
