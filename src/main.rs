// main.rs - CLI entry point

use std::time::Instant;

use seqreport::output::write_newick;
use seqreport::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified; keep the [report] section around
    // because it has no command line counterpart
    let mut report_style = ReportStyle::default();
    if let Some(config_path) = args.config.clone() {
        let config = Config::from_file(&config_path)?;
        report_style = config.report_style();
        args = args.merge_with_config(config);
    }

    // Handle distance lookup mode
    if args.seq1.is_some() || args.seq2.is_some() || args.distances.is_some() {
        return run_lookup(&args);
    }

    println!("🚀 seqreport v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to configure thread pool");
        println!("🧵 Threads: {}", n);
    } else {
        let num_threads = rayon::current_num_threads();
        println!("🧵 Threads: {} (auto-detected)", num_threads);
    }

    // Validate all arguments
    let validation_result = validate_args(&args)?;

    let total_start = Instant::now();

    // Ingest sequences from manual entries and/or FASTA
    let sequences = collect_sequences(
        &args.seq,
        args.fasta.as_deref(),
        validation_result.title_include_regex.as_ref(),
        validation_result.title_exclude_regex.as_ref(),
    )?;

    if sequences.is_empty() {
        if args.export {
            return Err("No sequences to export".to_string());
        }
        println!("ℹ️  No sequences provided. Use --seq TITLE=BASES or --fasta <file>.");
        return Ok(());
    }
    println!("🧬 Ingested {} sequences", sequences.len());

    // Handle export mode
    if args.export {
        let path = export_fasta(&sequences, &args.export_dir)?;
        println!(
            "💾 Exported {} sequences to: {}",
            sequences.len(),
            path.display()
        );
        return Ok(());
    }

    // Per-sequence and aggregate composition statistics
    let stats: Vec<SequenceStats> = sequences.iter().map(|s| sequence_stats(&s.raw)).collect();
    let global = global_stats(&stats);

    println!("\n📈 === COMPOSITION SUMMARY ===");
    println!("  • Sequences: {}", global.total_sequences);
    println!("  • Total bases: {}", global.total_bases);
    println!("  • Average GC content: {:.2}%", global.avg_gc);
    println!("  • Average length: {:.1} bp", global.avg_length);

    // Motif scanning; an empty outer vec means no scan was requested
    let motif_hits: Vec<Vec<(String, Vec<usize>)>> = if validation_result.motifs.is_empty() {
        Vec::new()
    } else {
        let scanner = MotifScanner::new(&validation_result.motifs)?;
        let hits: Vec<Vec<(String, Vec<usize>)>> = sequences
            .iter()
            .map(|s| scanner.hits_by_pattern(&s.raw))
            .collect();
        let total: usize = hits
            .iter()
            .flat_map(|per_seq| per_seq.iter().map(|(_, positions)| positions.len()))
            .sum();
        println!(
            "🔍 Motif scan: {} hits across {} patterns",
            total,
            validation_result.motifs.len()
        );
        hits
    };

    // Handle stats-only mode
    if args.stats_only {
        println!("\n✅ Statistics analysis completed");
        return Ok(());
    }

    // Distances and tree need at least two sequences
    let engine = DistanceEngine::new(validation_result.aligner.clone());
    let outcome = engine.compute(&sequences);

    let mut tree = None;
    if let Some(ref outcome) = outcome {
        println!("🎯 Distance strategy: {}", outcome.source.description());

        if let Some(ref matrix_path) = args.matrix {
            write_matrix(matrix_path, &args.format, &outcome.matrix, &command_line)?;
        }

        let t = build_nj_tree(&outcome.matrix)?;
        if let Some(ref newick_path) = args.newick {
            write_newick(newick_path, &t)?;
        }
        tree = Some(t);
    } else {
        println!("ℹ️  Fewer than 2 sequences - distance matrix and tree skipped");
    }

    // Write the HTML report
    let ctx = ReportContext {
        command_line: &command_line,
        sequences: &sequences,
        stats: &stats,
        global: &global,
        motif_hits: &motif_hits,
        distance: outcome.as_ref(),
        tree: tree.as_ref(),
    };
    write_report(&args.output, &ctx, &report_style)?;

    // Print summary
    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === SEQREPORT COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!(
        "📊 Analyzed {} sequences ({} bases)",
        global.total_sequences, global.total_bases
    );
    println!("📁 Report written to: {}", args.output);
    println!("🔧 Command: {}", command_line);

    Ok(())
}

/// Look up one pairwise distance in a previously exported JSON pair map
fn run_lookup(args: &Args) -> Result<(), String> {
    let seq1 = args
        .seq1
        .as_ref()
        .ok_or("--seq1 is required for distance lookup")?;
    let seq2 = args
        .seq2
        .as_ref()
        .ok_or("--seq2 is required for distance lookup")?;
    let distances = args
        .distances
        .as_ref()
        .ok_or("--distances is required for distance lookup")?;

    let payload = DistancePayload::from_file(distances)?;
    let value = match payload.get(seq1, seq2) {
        Some(d) => d,
        None => {
            println!("ℹ️  Pair not found in distance file - defaulting to 0.0");
            0.0
        }
    };
    println!("📏 {} ↔ {}: {}", seq1, seq2, value);
    Ok(())
}
