// mod.rs - Output writers module

pub mod payload;
pub mod report;

pub use payload::DistancePayload;
pub use report::{write_report, ReportContext, ReportStyle};

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::{DistanceMatrix, Tree};

/// Ensure parent directory exists before creating file
pub(crate) fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent).map_err(|e| {
            format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                e
            )
        })?;
    }
    Ok(())
}

/// Write the distance matrix with the given column separator
fn write_delimited(
    file_path: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
    sep: char,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    // Write command header
    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(
        writer,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# seqreport v{}", env!("CARGO_PKG_VERSION"))
        .map_err(|e| format!("Write error: {}", e))?;

    // Write header
    write!(writer, "Sequence").map_err(|e| format!("Write error: {}", e))?;
    for title in matrix.titles() {
        write!(writer, "{}{}", sep, title).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    // Write full symmetric matrix
    for i in 0..matrix.len() {
        write!(writer, "{}", matrix.titles()[i]).map_err(|e| format!("Write error: {}", e))?;
        for j in 0..matrix.len() {
            write!(writer, "{}{:.6}", sep, matrix.get(i, j))
                .map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Distance matrix written to: {}", file_path);
    Ok(())
}

/// Write distance matrix in TSV format
pub fn write_tsv(
    file_path: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    write_delimited(file_path, matrix, command_line, '\t')
}

/// Write distance matrix in CSV format
pub fn write_csv(
    file_path: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    write_delimited(file_path, matrix, command_line, ',')
}

/// Write distance matrix as a JSON pair map keyed "titleA|titleB"
pub fn write_payload_json(file_path: &str, matrix: &DistanceMatrix) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let json = DistancePayload::from_matrix(matrix).to_json()?;
    std::fs::write(file_path, json)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    println!("✅ Distance matrix written to: {} (JSON pair map)", file_path);
    Ok(())
}

/// Write the tree in Newick format
pub fn write_newick(file_path: &str, tree: &Tree) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    std::fs::write(file_path, format!("{}\n", tree.newick()))
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    println!("✅ Newick tree written to: {}", file_path);
    Ok(())
}

/// Write distance matrix in the specified format
pub fn write_matrix(
    file_path: &str,
    format: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    match format.to_lowercase().as_str() {
        "tsv" => write_tsv(file_path, matrix, command_line),
        "csv" => write_csv(file_path, matrix, command_line),
        "json" => write_payload_json(file_path, matrix),
        _ => Err(format!(
            "Unsupported matrix format: {}. Use: tsv, csv, json",
            format
        )),
    }
}
