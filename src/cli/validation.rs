// validation.rs - Input validation utilities

use std::str::FromStr;
use regex::Regex;
use crate::cli::args::Args;
use crate::core::{AlignerConfig, AlignerPreset};

#[derive(Debug)]
pub struct ValidationResult {
    pub aligner: Option<AlignerConfig>,
    pub title_include_regex: Option<Regex>,
    pub title_exclude_regex: Option<Regex>,
    pub motifs: Vec<String>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    // Validate matrix format
    if !matches!(args.format.to_lowercase().as_str(), "tsv" | "csv" | "json") {
        return Err(format!(
            "Invalid matrix format '{}'. Use: tsv, csv, json",
            args.format
        ));
    }

    if args.aligner_timeout == 0 {
        return Err("Aligner timeout must be at least 1 second".to_string());
    }

    // Resolve the aligner configuration (skipped entirely in stats-only mode)
    let aligner = if args.no_align || args.stats_only {
        None
    } else {
        let preset = AlignerPreset::from_str(&args.aligner)?;
        let config = if preset == AlignerPreset::Custom {
            let program = args
                .aligner_path
                .clone()
                .ok_or_else(|| "--aligner custom requires --aligner-path".to_string())?;
            let template = args.aligner_args.clone().ok_or_else(|| {
                "--aligner custom requires --aligner-args with {input}/{output} placeholders"
                    .to_string()
            })?;
            AlignerConfig::custom(program, template, args.aligner_timeout)
        } else {
            if args.aligner_args.is_some() {
                return Err("--aligner-args is only valid with --aligner custom".to_string());
            }
            AlignerConfig::from_preset(preset, args.aligner_path.clone(), args.aligner_timeout)
        };
        Some(config)
    };

    // Motif patterns must be non-empty
    for motif in &args.motif {
        if motif.trim().is_empty() {
            return Err("Motif patterns must not be empty".to_string());
        }
    }
    let motifs: Vec<String> = args.motif.iter().map(|m| m.trim().to_string()).collect();

    // Compile regex patterns for title filtering
    let title_include_regex = if let Some(pattern) = &args.include_titles {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_titles regex: {}", e))?)
    } else {
        None
    };

    let title_exclude_regex = if let Some(pattern) = &args.exclude_titles {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_titles regex: {}", e))?)
    } else {
        None
    };

    Ok(ValidationResult {
        aligner,
        title_include_regex,
        title_exclude_regex,
        motifs,
    })
}
