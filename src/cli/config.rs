// config.rs - TOML configuration file support

use serde::{Deserialize, Serialize};
use std::fs;

use crate::output::ReportStyle;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub fasta: Option<String>,
    pub output: Option<String>,
    pub matrix: Option<String>,
    pub format: Option<String>,
    pub newick: Option<String>,

    // Aligner
    pub aligner: Option<String>,
    pub aligner_path: Option<String>,
    pub aligner_args: Option<String>,
    pub aligner_timeout: Option<u64>,
    pub no_align: Option<bool>,

    // Analysis
    pub motif: Option<Vec<String>>,
    pub include_titles: Option<String>,
    pub exclude_titles: Option<String>,
    pub stats_only: Option<bool>,

    // Performance
    pub threads: Option<usize>,

    // Report styling
    pub report: Option<ReportConfig>,
}

/// Optional `[report]` section controlling HTML report appearance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    pub base_a_color: Option<String>,
    pub base_t_color: Option<String>,
    pub base_c_color: Option<String>,
    pub base_g_color: Option<String>,
    pub base_n_color: Option<String>,
    pub hist_bar_color: Option<String>,
    pub mean_line_color: Option<String>,
    pub preview_bases: Option<usize>,
    pub histogram_bins: Option<usize>,
}

impl ReportConfig {
    /// Build a report style from this section, filling gaps with defaults
    pub fn to_style(&self) -> ReportStyle {
        let mut style = ReportStyle::default();
        if let Some(v) = &self.base_a_color {
            style.base_a_color = v.clone();
        }
        if let Some(v) = &self.base_t_color {
            style.base_t_color = v.clone();
        }
        if let Some(v) = &self.base_c_color {
            style.base_c_color = v.clone();
        }
        if let Some(v) = &self.base_g_color {
            style.base_g_color = v.clone();
        }
        if let Some(v) = &self.base_n_color {
            style.base_n_color = v.clone();
        }
        if let Some(v) = &self.hist_bar_color {
            style.hist_bar_color = v.clone();
        }
        if let Some(v) = &self.mean_line_color {
            style.mean_line_color = v.clone();
        }
        if let Some(v) = self.preview_bases {
            style.preview_bases = v;
        }
        if let Some(v) = self.histogram_bins {
            style.histogram_bins = v;
        }
        style
    }
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Config {
            fasta: None,
            output: None,
            matrix: None,
            format: None,
            newick: None,
            aligner: None,
            aligner_path: None,
            aligner_args: None,
            aligner_timeout: None,
            no_align: None,
            motif: None,
            include_titles: None,
            exclude_titles: None,
            stats_only: None,
            threads: None,
            report: None,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?;

        println!("📄 Loaded configuration from: {}", path);
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &str) -> Result<(), String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content).map_err(|e| format!("Failed to write config file '{}': {}", path, e))?;

        println!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Report style from the `[report]` section, defaults when absent
    pub fn report_style(&self) -> ReportStyle {
        self.report
            .as_ref()
            .map(|r| r.to_style())
            .unwrap_or_default()
    }

    /// Generate a sample configuration file content
    pub fn generate_sample() -> String {
        r##"# seqreport.toml - Configuration file for seqreport
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Path to FASTA file with input sequences
fasta = "/path/to/sequences.fasta"

# Output HTML report file
output = "report.html"

# Write the distance matrix to this file
# matrix = "distances.tsv"

# Matrix format: tsv, csv, json
format = "tsv"

# Write the tree in Newick format to this file
# newick = "tree.nwk"

# =============================================================================
# ALIGNER
# =============================================================================

# Aligner preset: muscle, muscle5, clustalo, mafft, custom
aligner = "muscle"

# Path to the aligner binary (omit to use the preset binary name on PATH)
# aligner_path = "/usr/local/bin/muscle"

# Custom aligner argument template with {input} and {output} placeholders
# aligner_args = "--fast {input} -o {output}"

# Aligner timeout in seconds
aligner_timeout = 120

# Skip the external aligner and use the padded fallback distance
no_align = false

# =============================================================================
# ANALYSIS
# =============================================================================

# Motif patterns to scan for
motif = ["GAATTC", "GGATCC"]

# Include only sequences whose title matches regex pattern
# include_titles = "sample.*"

# Exclude sequences whose title matches regex pattern
# exclude_titles = "control.*"

# Compute composition statistics only, skip distances and tree
stats_only = false

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
threads = 8

# =============================================================================
# REPORT STYLING
# =============================================================================

[report]
# Base colors used in previews and the composition chart
base_a_color = "#48cdd6"
base_t_color = "#f2856d"
base_c_color = "#84e291"
base_g_color = "#b384f2"
base_n_color = "#999999"

# Length histogram bar and mean marker colors
hist_bar_color = "#e63946"
mean_line_color = "#2a9d8f"

# Leading bases shown per sequence preview
preview_bases = 120

# Number of equal-width bins in the length histogram
histogram_bins = 15
"##
        .to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let sample = Config::generate_sample();
        let config: Config = toml::from_str(&sample).unwrap();

        assert_eq!(config.aligner.as_deref(), Some("muscle"));
        assert_eq!(config.aligner_timeout, Some(120));
        assert_eq!(config.format.as_deref(), Some("tsv"));
        assert_eq!(
            config.motif,
            Some(vec!["GAATTC".to_string(), "GGATCC".to_string()])
        );
        assert_eq!(config.threads, Some(8));
        assert!(config.report.is_some());
    }

    #[test]
    fn test_report_section_overrides_style() {
        let toml_str = r##"
            [report]
            base_a_color = "#112233"
            preview_bases = 60
        "##;
        let config: Config = toml::from_str(toml_str).unwrap();
        let style = config.report_style();

        assert_eq!(style.base_a_color, "#112233");
        assert_eq!(style.preview_bases, 60);
        // Untouched fields keep their defaults
        assert_eq!(style.base_t_color, ReportStyle::default().base_t_color);
        assert_eq!(style.histogram_bins, ReportStyle::default().histogram_bins);
    }

    #[test]
    fn test_missing_report_section_uses_defaults() {
        let config: Config = toml::from_str("aligner = \"mafft\"").unwrap();
        let style = config.report_style();
        let defaults = ReportStyle::default();

        assert_eq!(style.base_a_color, defaults.base_a_color);
        assert_eq!(style.preview_bases, defaults.preview_bases);
    }
}
