// sequence.rs - Titled nucleotide sequences and ingestion helpers

use regex::Regex;

use crate::data::fasta::read_fasta;

/// A single titled nucleotide sequence
#[derive(Debug, Clone)]
pub struct Sequence {
    pub title: String,
    pub raw: String,
}

impl Sequence {
    pub fn new(title: &str, raw: &str) -> Self {
        Self {
            title: title.to_string(),
            raw: raw.to_string(),
        }
    }

    /// Sequence length in bases
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Parse a manual entry of the form TITLE=BASES
///
/// The title part may be empty (it gets auto-filled later). An entry without
/// '=' is treated as an untitled sequence. Whitespace inside the bases part
/// is stripped, matching pasted multi-line input.
pub fn parse_manual_entry(entry: &str) -> (String, String) {
    let (title, bases) = match entry.split_once('=') {
        Some((t, b)) => (t.trim().to_string(), b),
        None => (String::new(), entry),
    };
    let bases: String = bases.chars().filter(|c| !c.is_whitespace()).collect();
    (title, bases)
}

/// Collect sequences from manual entries and an optional FASTA file
///
/// Manual entries come first, in the order given, followed by FASTA records.
/// Entries that are empty after whitespace stripping are dropped. Blank
/// titles are auto-filled as "Sequence N" over the accepted entries, title
/// filters are applied afterwards, and duplicate titles are disambiguated
/// with numeric suffixes.
pub fn collect_sequences(
    manual_entries: &[String],
    fasta_path: Option<&str>,
    include: Option<&Regex>,
    exclude: Option<&Regex>,
) -> Result<Vec<Sequence>, String> {
    let mut raw_pairs: Vec<(String, String)> = Vec::new();

    for entry in manual_entries {
        let (title, bases) = parse_manual_entry(entry);
        if bases.is_empty() {
            continue;
        }
        raw_pairs.push((title, bases));
    }

    if let Some(path) = fasta_path {
        if !std::path::Path::new(path).exists() {
            return Err(format!("FASTA file not found: {}", path));
        }
        match read_fasta(path) {
            Ok(records) => {
                for (id, seq) in records {
                    if seq.is_empty() {
                        continue;
                    }
                    raw_pairs.push((id, seq));
                }
            }
            Err(e) => {
                eprintln!("⚠️  Skipping malformed FASTA file '{}': {}", path, e);
            }
        }
    }

    // Auto-fill blank titles before filtering so positions stay stable
    let mut sequences: Vec<Sequence> = Vec::with_capacity(raw_pairs.len());
    for (i, (title, bases)) in raw_pairs.into_iter().enumerate() {
        let title = if title.is_empty() {
            format!("Sequence {}", i + 1)
        } else {
            title
        };
        sequences.push(Sequence { title, raw: bases });
    }

    let before = sequences.len();
    sequences.retain(|s| title_passes(&s.title, include, exclude));
    let filtered = before - sequences.len();
    if filtered > 0 {
        println!("📋 Title filters removed {} of {} sequences", filtered, before);
    }

    dedup_titles(&mut sequences);
    Ok(sequences)
}

fn title_passes(title: &str, include: Option<&Regex>, exclude: Option<&Regex>) -> bool {
    if let Some(re) = include {
        if !re.is_match(title) {
            return false;
        }
    }
    if let Some(re) = exclude {
        if re.is_match(title) {
            return false;
        }
    }
    true
}

/// Disambiguate duplicate titles by appending _2, _3, ...
///
/// The first occurrence keeps its original title. Suffixed names are checked
/// against the full set so a collision with an existing "x_2" skips ahead.
pub fn dedup_titles(sequences: &mut [Sequence]) {
    use std::collections::HashSet;

    let mut seen: HashSet<String> = HashSet::new();
    for seq in sequences.iter_mut() {
        if seen.insert(seq.title.clone()) {
            continue;
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{}_{}", seq.title, counter);
            if seen.insert(candidate.clone()) {
                seq.title = candidate;
                break;
            }
            counter += 1;
        }
    }
}
