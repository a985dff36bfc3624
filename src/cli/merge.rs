// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.fasta.is_none() {
            self.fasta = config.fasta;
        }
        if self.output == "report.html" && config.output.is_some() {
            self.output = config.output.unwrap();
        }
        if self.matrix.is_none() {
            self.matrix = config.matrix;
        }
        if self.format == "tsv" && config.format.is_some() {
            self.format = config.format.unwrap();
        }
        if self.newick.is_none() {
            self.newick = config.newick;
        }

        // Aligner settings (only override defaults, not explicit CLI values)
        if self.aligner == "muscle" && config.aligner.is_some() {
            self.aligner = config.aligner.unwrap();
        }
        if self.aligner_path.is_none() {
            self.aligner_path = config.aligner_path;
        }
        if self.aligner_args.is_none() {
            self.aligner_args = config.aligner_args;
        }
        if self.aligner_timeout == 120 && config.aligner_timeout.is_some() {
            self.aligner_timeout = config.aligner_timeout.unwrap();
        }

        // Analysis
        if self.motif.is_empty() && config.motif.is_some() {
            self.motif = config.motif.unwrap();
        }
        if self.include_titles.is_none() {
            self.include_titles = config.include_titles;
        }
        if self.exclude_titles.is_none() {
            self.exclude_titles = config.exclude_titles;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.no_align && config.no_align.unwrap_or(false) {
            self.no_align = true;
        }
        if !self.stats_only && config.stats_only.unwrap_or(false) {
            self.stats_only = true;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            seq: Vec::new(),
            fasta: None,
            output: "report.html".to_string(),
            matrix: None,
            format: "tsv".to_string(),
            newick: None,
            aligner: "muscle".to_string(),
            aligner_path: None,
            aligner_args: None,
            aligner_timeout: 120,
            no_align: false,
            stats_only: false,
            motif: Vec::new(),
            include_titles: None,
            exclude_titles: None,
            threads: None,
            export: false,
            export_dir: ".".to_string(),
            seq1: None,
            seq2: None,
            distances: None,
            config: None,
            generate_config: false,
        }
    }

    #[test]
    fn test_config_fills_unset_options() {
        let mut config = Config::new();
        config.fasta = Some("genomes.fasta".to_string());
        config.matrix = Some("dist.tsv".to_string());
        config.threads = Some(4);
        config.motif = Some(vec!["GAATTC".to_string()]);

        let args = base_args().merge_with_config(config);

        assert_eq!(args.fasta.as_deref(), Some("genomes.fasta"));
        assert_eq!(args.matrix.as_deref(), Some("dist.tsv"));
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.motif, vec!["GAATTC".to_string()]);
    }

    #[test]
    fn test_config_overrides_default_values_only() {
        let mut config = Config::new();
        config.output = Some("out/custom.html".to_string());
        config.format = Some("json".to_string());
        config.aligner = Some("mafft".to_string());
        config.aligner_timeout = Some(30);

        let args = base_args().merge_with_config(config.clone());
        assert_eq!(args.output, "out/custom.html");
        assert_eq!(args.format, "json");
        assert_eq!(args.aligner, "mafft");
        assert_eq!(args.aligner_timeout, 30);

        // Explicit CLI values win over the config file
        let mut explicit = base_args();
        explicit.output = "cli.html".to_string();
        explicit.format = "csv".to_string();
        explicit.aligner = "clustalo".to_string();
        explicit.aligner_timeout = 600;

        let args = explicit.merge_with_config(config);
        assert_eq!(args.output, "cli.html");
        assert_eq!(args.format, "csv");
        assert_eq!(args.aligner, "clustalo");
        assert_eq!(args.aligner_timeout, 600);
    }

    #[test]
    fn test_config_flags_enable_but_never_disable() {
        let mut config = Config::new();
        config.no_align = Some(true);
        config.stats_only = Some(false);

        let args = base_args().merge_with_config(config);
        assert!(args.no_align);
        assert!(!args.stats_only);

        let mut config = Config::new();
        config.no_align = Some(false);

        let mut explicit = base_args();
        explicit.no_align = true;
        let args = explicit.merge_with_config(config);
        assert!(args.no_align);
    }

    #[test]
    fn test_cli_motifs_win_over_config() {
        let mut config = Config::new();
        config.motif = Some(vec!["TTTT".to_string()]);

        let mut explicit = base_args();
        explicit.motif = vec!["ATG".to_string()];

        let args = explicit.merge_with_config(config);
        assert_eq!(args.motif, vec!["ATG".to_string()]);
    }
}
