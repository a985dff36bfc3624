// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// seqreport - Sequence composition, distance and phylogeny reporter
pub struct Args {
    /// manual sequence entry TITLE=BASES (repeatable; title may be omitted)
    #[argh(option)]
    pub seq: Vec<String>,

    /// path to FASTA file with input sequences
    #[argh(option)]
    pub fasta: Option<String>,

    /// output HTML report file (default: report.html)
    #[argh(option, default = "String::from(\"report.html\")")]
    pub output: String,

    /// write the distance matrix to this file
    #[argh(option)]
    pub matrix: Option<String>,

    /// matrix format: tsv, csv, json (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// write the tree in Newick format to this file
    #[argh(option)]
    pub newick: Option<String>,

    /// aligner preset: muscle, muscle5, clustalo, mafft, custom (default: muscle)
    #[argh(option, default = "String::from(\"muscle\")")]
    pub aligner: String,

    /// path to the aligner binary (default: preset binary name on PATH)
    #[argh(option)]
    pub aligner_path: Option<String>,

    /// custom aligner argument template with {input} and {output} placeholders
    #[argh(option)]
    pub aligner_args: Option<String>,

    /// aligner timeout in seconds (default: 120)
    #[argh(option, default = "120")]
    pub aligner_timeout: u64,

    /// skip the external aligner and use the padded fallback distance
    #[argh(switch)]
    pub no_align: bool,

    /// compute composition statistics only, skip distances and tree
    #[argh(switch)]
    pub stats_only: bool,

    /// motif pattern to scan for (repeatable)
    #[argh(option)]
    pub motif: Vec<String>,

    /// include only sequences whose title matches regex pattern
    #[argh(option)]
    pub include_titles: Option<String>,

    /// exclude sequences whose title matches regex pattern
    #[argh(option)]
    pub exclude_titles: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// export ingested sequences as a timestamped FASTA file and exit
    #[argh(switch)]
    pub export: bool,

    /// directory for the exported FASTA file (default: current directory)
    #[argh(option, default = "String::from(\".\")")]
    pub export_dir: String,

    /// first title for a distance lookup (requires --distances)
    #[argh(option)]
    pub seq1: Option<String>,

    /// second title for a distance lookup (requires --distances)
    #[argh(option)]
    pub seq2: Option<String>,

    /// JSON distance pair map file for lookup mode
    #[argh(option)]
    pub distances: Option<String>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
