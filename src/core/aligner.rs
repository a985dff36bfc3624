// aligner.rs - External multiple-aligner invocation

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::str::FromStr;
use std::time::{Duration, Instant};

use bio::io::fasta;

use crate::data::Sequence;

/// Default hard limit on a single aligner run
pub const DEFAULT_ALIGNER_TIMEOUT_SECS: u64 = 120;

/// Supported aligner invocation styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignerPreset {
    Muscle,
    Muscle5,
    ClustalOmega,
    Mafft,
    Custom,
}

impl FromStr for AlignerPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "muscle" => Ok(AlignerPreset::Muscle),
            "muscle5" => Ok(AlignerPreset::Muscle5),
            "clustalo" | "clustal-omega" => Ok(AlignerPreset::ClustalOmega),
            "mafft" => Ok(AlignerPreset::Mafft),
            "custom" => Ok(AlignerPreset::Custom),
            _ => Err(format!(
                "Invalid aligner preset: {}. Use: muscle, muscle5, clustalo, mafft, custom",
                s
            )),
        }
    }
}

impl AlignerPreset {
    /// Binary name used when no explicit program path is given
    pub fn default_program(&self) -> &'static str {
        match self {
            AlignerPreset::Muscle | AlignerPreset::Muscle5 => "muscle",
            AlignerPreset::ClustalOmega => "clustalo",
            AlignerPreset::Mafft => "mafft",
            AlignerPreset::Custom => "",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AlignerPreset::Muscle => "MUSCLE v3 (-in/-out)",
            AlignerPreset::Muscle5 => "MUSCLE v5 (-align/-output)",
            AlignerPreset::ClustalOmega => "Clustal Omega (-i/-o --force)",
            AlignerPreset::Mafft => "MAFFT (alignment on stdout)",
            AlignerPreset::Custom => "Custom argument template",
        }
    }
}

/// Configuration for one external aligner invocation
#[derive(Debug, Clone)]
pub struct AlignerConfig {
    pub program: String,
    pub preset: AlignerPreset,
    pub custom_args: Option<String>,
    pub timeout_secs: u64,
}

impl AlignerConfig {
    /// Create configuration for a preset invocation style
    pub fn from_preset(preset: AlignerPreset, program: Option<String>, timeout_secs: u64) -> Self {
        let program = program.unwrap_or_else(|| preset.default_program().to_string());
        Self {
            program,
            preset,
            custom_args: None,
            timeout_secs,
        }
    }

    /// Create configuration from a custom argument template
    ///
    /// The template is whitespace-split; {input} and {output} placeholders
    /// are substituted per run. A template without {output} means the
    /// alignment arrives on stdout, which is redirected into the output file.
    pub fn custom(program: String, args_template: String, timeout_secs: u64) -> Self {
        Self {
            program,
            preset: AlignerPreset::Custom,
            custom_args: Some(args_template),
            timeout_secs,
        }
    }

    /// Build the argument vector for a run
    ///
    /// Returns the arguments plus whether stdout carries the alignment.
    pub fn command_args(&self, input: &Path, output: &Path) -> (Vec<String>, bool) {
        let input_s = input.display().to_string();
        let output_s = output.display().to_string();

        match self.preset {
            AlignerPreset::Muscle => (
                vec!["-in".to_string(), input_s, "-out".to_string(), output_s],
                false,
            ),
            AlignerPreset::Muscle5 => (
                vec!["-align".to_string(), input_s, "-output".to_string(), output_s],
                false,
            ),
            AlignerPreset::ClustalOmega => (
                vec![
                    "-i".to_string(),
                    input_s,
                    "-o".to_string(),
                    output_s,
                    "--force".to_string(),
                ],
                false,
            ),
            AlignerPreset::Mafft => (vec![input_s], true),
            AlignerPreset::Custom => {
                let template = self.custom_args.as_deref().unwrap_or("{input}");
                let stdout_is_output = !template.contains("{output}");
                let args = template
                    .split_whitespace()
                    .map(|tok| tok.replace("{input}", &input_s).replace("{output}", &output_s))
                    .collect();
                (args, stdout_is_output)
            }
        }
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self::from_preset(AlignerPreset::Muscle, None, DEFAULT_ALIGNER_TIMEOUT_SECS)
    }
}

/// Align sequences with the external aligner, returning one row per input
///
/// Sequences are written with synthetic record ids (s0, s1, ...) so titles
/// containing whitespace survive the round trip, and output rows are mapped
/// back to input order by id. All scratch files live in a unique temporary
/// directory that is removed when this function returns, success or not.
pub fn run_alignment(config: &AlignerConfig, sequences: &[Sequence]) -> Result<Vec<String>, String> {
    if sequences.len() < 2 {
        return Err("Alignment requires at least 2 sequences".to_string());
    }

    let scratch = tempfile::Builder::new()
        .prefix("seqreport-aln-")
        .tempdir()
        .map_err(|e| format!("Failed to create scratch directory: {}", e))?;

    let input_path = scratch.path().join("input.fasta");
    let output_path = scratch.path().join("aligned.fasta");
    let stderr_path = scratch.path().join("stderr.log");

    write_query_fasta(&input_path, sequences)?;

    let (args, stdout_is_output) = config.command_args(&input_path, &output_path);
    println!(
        "🔗 Running aligner: {} {} ({} sequences, timeout {}s)",
        config.program,
        args.join(" "),
        sequences.len(),
        config.timeout_secs
    );

    // Both streams go to files so a chatty aligner can never fill a pipe
    let stdout_target = if stdout_is_output {
        output_path.clone()
    } else {
        scratch.path().join("stdout.log")
    };
    let stdout_file = File::create(&stdout_target)
        .map_err(|e| format!("Failed to create aligner output file: {}", e))?;
    let stderr_file = File::create(&stderr_path)
        .map_err(|e| format!("Failed to create aligner log file: {}", e))?;

    let mut child = Command::new(&config.program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file))
        .stderr(Stdio::from(stderr_file))
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!(
                    "Aligner '{}' not found on PATH (install it or use --aligner-path)",
                    config.program
                )
            } else {
                format!("Failed to start aligner '{}': {}", config.program, e)
            }
        })?;

    let status = wait_with_timeout(&mut child, &config.program, config.timeout_secs)?;
    if !status.success() {
        return Err(format!(
            "Aligner '{}' failed ({}){}",
            config.program,
            status,
            stderr_tail(&stderr_path)
        ));
    }

    read_aligned_rows(&output_path, sequences.len())
}

/// Write sequences with synthetic ids for the aligner round trip
fn write_query_fasta(path: &Path, sequences: &[Sequence]) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create aligner input '{}': {}", path.display(), e))?;
    let mut writer = fasta::Writer::new(file);

    for (i, seq) in sequences.iter().enumerate() {
        writer
            .write(&format!("s{}", i), None, seq.raw.as_bytes())
            .map_err(|e| format!("Failed to write aligner input record: {}", e))?;
    }
    Ok(())
}

/// Poll the child until exit or deadline; kill and reap on timeout
fn wait_with_timeout(child: &mut Child, program: &str, timeout_secs: u64) -> Result<ExitStatus, String> {
    let deadline = Instant::now() + Duration::from_secs(timeout_secs);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!(
                        "Aligner '{}' timed out after {}s",
                        program, timeout_secs
                    ));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Err(format!("Failed to wait for aligner '{}': {}", program, e)),
        }
    }
}

/// Last portion of the aligner's stderr, for error messages
fn stderr_tail(path: &Path) -> String {
    let mut content = String::new();
    if File::open(path)
        .and_then(|mut f| f.read_to_string(&mut content))
        .is_err()
    {
        return String::new();
    }
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut start = trimmed.len().saturating_sub(500);
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    format!(": {}", &trimmed[start..])
}

/// Parse the aligned FASTA back into rows ordered by synthetic id
fn read_aligned_rows(path: &Path, expected: usize) -> Result<Vec<String>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open aligner output '{}': {}", path.display(), e))?;
    let reader = fasta::Reader::new(BufReader::new(file));

    let mut rows: Vec<Option<String>> = vec![None; expected];
    let mut any_seen = false;

    for record_result in reader.records() {
        let record = record_result
            .map_err(|e| format!("Invalid record in aligner output: {}", e))?;
        any_seen = true;

        let idx = record
            .id()
            .strip_prefix('s')
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|&i| i < expected)
            .ok_or_else(|| format!("Unexpected record id '{}' in aligner output", record.id()))?;

        if rows[idx].is_some() {
            return Err(format!("Duplicate record id 's{}' in aligner output", idx));
        }
        rows[idx] = Some(String::from_utf8_lossy(record.seq()).to_string());
    }

    if !any_seen {
        return Err("Aligner produced no aligned records".to_string());
    }

    let rows: Vec<String> = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.ok_or_else(|| format!("Aligner output is missing record s{}", i)))
        .collect::<Result<_, _>>()?;

    let alignment_len = rows[0].len();
    if alignment_len == 0 {
        return Err("Aligner produced empty aligned records".to_string());
    }
    if rows.iter().any(|r| r.len() != alignment_len) {
        return Err("Aligner returned rows of unequal length".to_string());
    }

    Ok(rows)
}
