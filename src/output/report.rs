// report.rs - Self-contained HTML report rendering

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::core::composition::{length_histogram, GlobalStats, SequenceStats};
use crate::core::distance::DistanceOutcome;
use crate::core::tree::{Tree, TreeNode};
use crate::data::Sequence;

/// Visual styling for one report
///
/// Passed per call so callers can restyle a single report without
/// touching shared state.
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub base_a_color: String,
    pub base_t_color: String,
    pub base_c_color: String,
    pub base_g_color: String,
    pub base_n_color: String,
    pub hist_bar_color: String,
    pub mean_line_color: String,
    pub preview_bases: usize,
    pub histogram_bins: usize,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            base_a_color: "#48cdd6".to_string(),
            base_t_color: "#f2856d".to_string(),
            base_c_color: "#84e291".to_string(),
            base_g_color: "#b384f2".to_string(),
            base_n_color: "#999999".to_string(),
            hist_bar_color: "#e63946".to_string(),
            mean_line_color: "#2a9d8f".to_string(),
            preview_bases: 120,
            histogram_bins: 15,
        }
    }
}

impl ReportStyle {
    fn base_color(&self, base: char) -> &str {
        match base.to_ascii_uppercase() {
            'A' => &self.base_a_color,
            'T' => &self.base_t_color,
            'C' => &self.base_c_color,
            'G' => &self.base_g_color,
            _ => &self.base_n_color,
        }
    }
}

/// Everything a report needs, borrowed from the pipeline
pub struct ReportContext<'a> {
    pub command_line: &'a str,
    pub sequences: &'a [Sequence],
    pub stats: &'a [SequenceStats],
    pub global: &'a GlobalStats,
    /// Per sequence, per pattern occurrence positions; empty = no motif scan
    pub motif_hits: &'a [Vec<(String, Vec<usize>)>],
    pub distance: Option<&'a DistanceOutcome>,
    pub tree: Option<&'a Tree>,
}

/// Render the full HTML report to a file
pub fn write_report(path: &str, ctx: &ReportContext, style: &ReportStyle) -> Result<(), String> {
    super::ensure_parent_dir(path)?;
    let html = render(ctx, style).map_err(|_| "Failed to render report HTML".to_string())?;

    let file = File::create(path)
        .map_err(|e| format!("Failed to create report file '{}': {}", path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(html.as_bytes())
        .map_err(|e| format!("Failed to write report file '{}': {}", path, e))?;

    println!("✅ HTML report written to: {}", path);
    Ok(())
}

fn render(ctx: &ReportContext, style: &ReportStyle) -> Result<String, std::fmt::Error> {
    let mut html = String::with_capacity(256 * 1024);

    head(&mut html, ctx)?;
    section_summary(&mut html, ctx)?;
    section_base_chart(&mut html, ctx, style)?;
    section_length_histogram(&mut html, ctx, style)?;
    section_sequence_table(&mut html, ctx)?;
    section_previews(&mut html, ctx, style)?;
    if !ctx.motif_hits.is_empty() {
        section_motifs(&mut html, ctx)?;
    }
    if let Some(outcome) = ctx.distance {
        section_distance(&mut html, outcome)?;
    }
    if let Some(tree) = ctx.tree {
        section_tree(&mut html, tree)?;
    }

    writeln!(
        html,
        "<div class=\"meta\">Produced by seqreport v{}</div>",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(html, "</main></body></html>")?;
    Ok(html)
}

fn head(out: &mut String, ctx: &ReportContext) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\"/>")?;
    writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>"
    )?;
    writeln!(out, "<title>seqreport: sequence analysis</title>")?;
    writeln!(out, "<style>")?;
    writeln!(
        out,
        "body{{font-family:Arial,Helvetica,sans-serif;margin:0;background:#eee;color:#222;}}"
    )?;
    writeln!(
        out,
        ".main{{max-width:1100px;margin:16px auto;background:#fff;border:1px solid #ddd;border-radius:4px;box-shadow:0 1px 3px rgba(0,0,0,0.08);padding:16px 20px;}}"
    )?;
    writeln!(out, "h1{{margin:0 0 6px 0;font-size:22px;}}")?;
    writeln!(out, "h2{{margin:20px 0 6px 0;font-size:18px;}}")?;
    writeln!(out, ".meta{{color:#555;font-size:12px;margin-bottom:12px;}}")?;
    writeln!(
        out,
        ".module{{padding:8px 0 14px 0;border-bottom:1px solid #eee;}}"
    )?;
    writeln!(out, ".module:last-child{{border-bottom:none;}}")?;
    writeln!(out, ".plot{{margin:8px 0 6px 0;}}")?;
    writeln!(
        out,
        ".desc{{color:#444;font-size:13px;max-width:1000px;margin:4px 0 10px 0;}}"
    )?;
    writeln!(
        out,
        ".table{{border-collapse:collapse;width:100%;max-width:1000px;font-size:12px;}}"
    )?;
    writeln!(
        out,
        ".table th,.table td{{border:1px solid #ddd;padding:4px 6px;text-align:right;}}"
    )?;
    writeln!(
        out,
        ".table th:first-child,.table td:first-child{{text-align:left;}}"
    )?;
    writeln!(
        out,
        ".bs-table{{border-collapse:collapse;font-size:12px;width:420px;}}"
    )?;
    writeln!(
        out,
        ".bs-table th{{background:#3b6ea5;color:#fff;text-align:left;padding:4px 6px;border:1px solid #2f5a86;}}"
    )?;
    writeln!(
        out,
        ".bs-table td{{border:1px solid #ddd;padding:4px 6px;text-align:left;}}"
    )?;
    writeln!(
        out,
        ".preview{{font-family:monospace;font-size:13px;word-break:break-all;margin:4px 0 10px 0;}}"
    )?;
    writeln!(out, ".ptitle{{font-weight:bold;font-family:Arial;}}")?;
    writeln!(out, ".more{{color:#888;}}")?;
    writeln!(out, "details{{margin:6px 0 0 0;}}")?;
    writeln!(out, "pre{{background:#f6f6f6;padding:8px;overflow-x:auto;}}")?;
    writeln!(out, "svg{{background:#fafafa;border:1px solid #e5e5e5;}}")?;
    writeln!(out, "</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<main class=\"main\">")?;
    writeln!(out, "<h1>Sequence Analysis Report</h1>")?;
    writeln!(
        out,
        "<div class=\"meta\">Command: {}<br/>Generated: {}</div>",
        escape_html(ctx.command_line),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(())
}

fn module_header(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "<div class=\"module\">")?;
    writeln!(out, "<h2>{}</h2>", title)?;
    Ok(())
}

fn module_desc(out: &mut String, text: &str) -> std::fmt::Result {
    writeln!(out, "<p class=\"desc\">{}</p>", text)
}

fn module_footer(out: &mut String) -> std::fmt::Result {
    writeln!(out, "</div>")
}

fn section_summary(out: &mut String, ctx: &ReportContext) -> std::fmt::Result {
    module_header(out, "Summary")?;
    writeln!(out, "<table class=\"bs-table\">")?;
    writeln!(out, "<tr><th>Measure</th><th>Value</th></tr>")?;
    writeln!(
        out,
        "<tr><td>Total sequences</td><td>{}</td></tr>",
        ctx.global.total_sequences
    )?;
    writeln!(
        out,
        "<tr><td>Total bases</td><td>{}</td></tr>",
        ctx.global.total_bases
    )?;
    writeln!(
        out,
        "<tr><td>Average GC%</td><td>{:.2}%</td></tr>",
        ctx.global.avg_gc
    )?;
    writeln!(
        out,
        "<tr><td>Average length</td><td>{:.1} bp</td></tr>",
        ctx.global.avg_length
    )?;
    writeln!(out, "</table>")?;
    module_footer(out)
}

fn section_base_chart(out: &mut String, ctx: &ReportContext, style: &ReportStyle) -> std::fmt::Result {
    module_header(out, "Base Composition")?;
    module_desc(out, "Share of each base across all sequences combined.")?;

    let bp = &ctx.global.base_percentages;
    let bars: [(&str, f64, &str); 5] = [
        ("A", bp.a, style.base_a_color.as_str()),
        ("T", bp.t, style.base_t_color.as_str()),
        ("C", bp.c, style.base_c_color.as_str()),
        ("G", bp.g, style.base_g_color.as_str()),
        ("N", bp.n, style.base_n_color.as_str()),
    ];

    let (w, h) = (460.0, 230.0);
    let (left, right, top, bottom) = (45.0, 15.0, 16.0, 30.0);
    let plot_w = w - left - right;
    let plot_h = h - top - bottom;
    let max_y = bars.iter().map(|(_, v, _)| *v).fold(0.0, f64::max).max(1.0);

    writeln!(out, "<div class=\"plot\">")?;
    writeln!(
        out,
        "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        w, h, w, h
    )?;
    writeln!(
        out,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#fff\" stroke=\"#ddd\"/>",
        left, top, plot_w, plot_h
    )?;

    let slot = plot_w / bars.len() as f64;
    let bar_w = slot * 0.6;
    for (i, (label, value, color)) in bars.iter().enumerate() {
        let x = left + i as f64 * slot + (slot - bar_w) / 2.0;
        let bar_h = value / max_y * plot_h;
        let y = top + plot_h - bar_h;
        writeln!(
            out,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>",
            x, y, bar_w, bar_h, color
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"middle\" fill=\"#333\">{:.1}%</text>",
            x + bar_w / 2.0,
            (y - 4.0).max(top + 10.0),
            value
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\" fill=\"#333\">{}</text>",
            x + bar_w / 2.0,
            top + plot_h + 16.0,
            label
        )?;
    }
    writeln!(out, "</svg></div>")?;
    module_footer(out)
}

fn section_length_histogram(
    out: &mut String,
    ctx: &ReportContext,
    style: &ReportStyle,
) -> std::fmt::Result {
    module_header(out, "Length Distribution")?;
    module_desc(
        out,
        "Sequence lengths grouped into equal-width bins; the dashed line marks the mean length.",
    )?;

    let bins = length_histogram(ctx.stats, style.histogram_bins);
    if bins.is_empty() {
        writeln!(out, "<p class=\"desc\">No sequences.</p>")?;
        return module_footer(out);
    }

    let (w, h) = (800.0, 260.0);
    let (left, right, top, bottom) = (50.0, 20.0, 12.0, 34.0);
    let plot_w = w - left - right;
    let plot_h = h - top - bottom;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(1).max(1) as f64;

    writeln!(out, "<div class=\"plot\">")?;
    writeln!(
        out,
        "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        w, h, w, h
    )?;
    writeln!(
        out,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#fff\" stroke=\"#ddd\"/>",
        left, top, plot_w, plot_h
    )?;

    let slot = plot_w / bins.len() as f64;
    let bar_w = slot * 0.9;
    for (i, bin) in bins.iter().enumerate() {
        if bin.count == 0 {
            continue;
        }
        let x = left + i as f64 * slot + (slot - bar_w) / 2.0;
        let bar_h = bin.count as f64 / max_count * plot_h;
        let y = top + plot_h - bar_h;
        writeln!(
            out,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"><title>{:.0}-{:.0} bp: {}</title></rect>",
            x, y, bar_w, bar_h, style.hist_bar_color, bin.start, bin.end, bin.count
        )?;
        writeln!(
            out,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"middle\" fill=\"#333\">{}</text>",
            x + bar_w / 2.0,
            (y - 3.0).max(top + 9.0),
            bin.count
        )?;
    }

    // Axis extremes
    let range_start = bins[0].start;
    let range_end = bins[bins.len() - 1].end;
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#555\">{:.0}</text>",
        left,
        top + plot_h + 14.0,
        range_start
    )?;
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"end\" fill=\"#555\">{:.0}</text>",
        left + plot_w,
        top + plot_h + 14.0,
        range_end
    )?;
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"middle\" fill=\"#555\">Length (bp)</text>",
        left + plot_w / 2.0,
        top + plot_h + 28.0
    )?;

    // Dashed mean marker
    let range = range_end - range_start;
    let mean_x = if range > 0.0 {
        left + ((ctx.global.avg_length - range_start) / range).clamp(0.0, 1.0) * plot_w
    } else {
        left + plot_w / 2.0
    };
    writeln!(
        out,
        "<line x1=\"{:.1}\" y1=\"{}\" x2=\"{:.1}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"1.5\" stroke-dasharray=\"6 4\"/>",
        mean_x,
        top,
        mean_x,
        top + plot_h,
        style.mean_line_color
    )?;
    let label_anchor = if mean_x > left + plot_w - 110.0 { "end" } else { "start" };
    let label_x = if mean_x > left + plot_w - 110.0 { mean_x - 6.0 } else { mean_x + 6.0 };
    writeln!(
        out,
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"{}\" fill=\"{}\">Mean: {:.0} bp</text>",
        label_x,
        top + 14.0,
        label_anchor,
        style.mean_line_color,
        ctx.global.avg_length
    )?;

    writeln!(out, "</svg></div>")?;
    module_footer(out)
}

fn section_sequence_table(out: &mut String, ctx: &ReportContext) -> std::fmt::Result {
    module_header(out, "Per-Sequence Statistics")?;
    writeln!(out, "<table class=\"table\">")?;
    writeln!(
        out,
        "<tr><th>#</th><th>Title</th><th>Length</th><th>GC%</th><th>AT%</th><th>A</th><th>T</th><th>C</th><th>G</th><th>N</th></tr>"
    )?;
    for (i, (seq, stats)) in ctx.sequences.iter().zip(ctx.stats.iter()).enumerate() {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            i + 1,
            escape_html(&seq.title),
            stats.length,
            stats.gc_percent,
            stats.at_percent(),
            stats.bases.a,
            stats.bases.t,
            stats.bases.c,
            stats.bases.g,
            stats.bases.n
        )?;
    }
    writeln!(out, "</table>")?;
    module_footer(out)
}

fn section_previews(out: &mut String, ctx: &ReportContext, style: &ReportStyle) -> std::fmt::Result {
    module_header(out, "Sequence Preview")?;
    for seq in ctx.sequences {
        let total = seq.raw.chars().count();
        writeln!(
            out,
            "<div class=\"preview\"><span class=\"ptitle\">{}</span> ({} bp)<br/>",
            escape_html(&seq.title),
            total
        )?;
        preview_spans(out, &seq.raw, style)?;
        if total > style.preview_bases {
            writeln!(
                out,
                " <span class=\"more\">({} more)</span>",
                total - style.preview_bases
            )?;
        }
        writeln!(out, "</div>")?;
    }
    module_footer(out)
}

/// Color the leading bases, grouping runs that share a color
fn preview_spans(out: &mut String, raw: &str, style: &ReportStyle) -> std::fmt::Result {
    let shown: Vec<char> = raw.chars().take(style.preview_bases).collect();
    let mut i = 0;
    while i < shown.len() {
        let color = style.base_color(shown[i]);
        let mut j = i + 1;
        while j < shown.len() && style.base_color(shown[j]) == color {
            j += 1;
        }
        let run: String = shown[i..j].iter().collect();
        write!(
            out,
            "<span style=\"color:{}\">{}</span>",
            color,
            escape_html(&run)
        )?;
        i = j;
    }
    Ok(())
}

fn section_motifs(out: &mut String, ctx: &ReportContext) -> std::fmt::Result {
    module_header(out, "Motif Occurrences")?;
    module_desc(out, "Positions are 1-based; overlapping matches are counted.")?;
    writeln!(out, "<table class=\"table\">")?;
    writeln!(
        out,
        "<tr><th>Sequence</th><th>Motif</th><th>Count</th><th>Positions</th></tr>"
    )?;
    for (seq, per_pattern) in ctx.sequences.iter().zip(ctx.motif_hits.iter()) {
        for (pattern, positions) in per_pattern {
            let shown: Vec<String> = positions.iter().take(20).map(|p| p.to_string()).collect();
            let mut listed = shown.join(", ");
            if positions.len() > 20 {
                write!(listed, " (+{} more)", positions.len() - 20)?;
            }
            if positions.is_empty() {
                listed = "not found".to_string();
            }
            writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&seq.title),
                escape_html(pattern),
                positions.len(),
                listed
            )?;
        }
    }
    writeln!(out, "</table>")?;
    module_footer(out)
}

fn section_distance(out: &mut String, outcome: &DistanceOutcome) -> std::fmt::Result {
    module_header(out, "Distance Matrix")?;
    module_desc(
        out,
        &format!(
            "Strategy: {}. Alignment length: {} columns.",
            outcome.source.description(),
            outcome.alignment_columns()
        ),
    )?;

    let matrix = &outcome.matrix;
    writeln!(out, "<table class=\"table\">")?;
    write!(out, "<tr><th>Sequence</th>")?;
    for title in matrix.titles() {
        write!(out, "<th>{}</th>", escape_html(title))?;
    }
    writeln!(out, "</tr>")?;
    for i in 0..matrix.len() {
        write!(out, "<tr><td>{}</td>", escape_html(&matrix.titles()[i]))?;
        for j in 0..matrix.len() {
            write!(out, "<td>{:.4}</td>", matrix.get(i, j))?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</table>")?;
    module_footer(out)
}

fn section_tree(out: &mut String, tree: &Tree) -> std::fmt::Result {
    module_header(out, "Phylogenetic Tree")?;
    module_desc(
        out,
        "Neighbor-joining tree; horizontal distance is proportional to branch length.",
    )?;
    svg_tree(out, tree)?;
    writeln!(
        out,
        "<details><summary>Newick</summary><pre>{}</pre></details>",
        escape_html(&tree.newick())
    )?;
    module_footer(out)
}

fn svg_tree(out: &mut String, tree: &Tree) -> std::fmt::Result {
    let n_leaves = tree.leaf_count();
    let row_h = 26.0;
    let (left, right, top, bottom) = (20.0, 180.0, 12.0, 12.0);
    let plot_w = 600.0;
    let w = left + plot_w + right;
    let h = top + n_leaves as f64 * row_h + bottom;

    // Positions by node index: x is cumulative branch length, y a row slot
    let mut pos = vec![(0.0_f64, 0.0_f64); tree.root() + 1];
    let mut next_leaf = 0usize;
    assign_positions(tree, tree.root(), 0.0, row_h, &mut next_leaf, &mut pos);

    let max_depth = pos.iter().map(|(x, _)| *x).fold(0.0, f64::max);
    let x_scale = if max_depth > 0.0 { plot_w / max_depth } else { 1.0 };

    writeln!(out, "<div class=\"plot\">")?;
    writeln!(
        out,
        "<svg width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\">",
        w, h, w, h
    )?;
    draw_tree_node(out, tree, tree.root(), &pos, left, top, x_scale)?;
    writeln!(out, "</svg></div>")?;
    Ok(())
}

fn assign_positions(
    tree: &Tree,
    idx: usize,
    depth: f64,
    row_h: f64,
    next_leaf: &mut usize,
    pos: &mut [(f64, f64)],
) -> f64 {
    match tree.node(idx) {
        TreeNode::Leaf { .. } => {
            let y = (*next_leaf as f64 + 0.5) * row_h;
            *next_leaf += 1;
            pos[idx] = (depth, y);
            y
        }
        TreeNode::Internal {
            left,
            right,
            left_len,
            right_len,
        } => {
            let y_left = assign_positions(tree, *left, depth + left_len, row_h, next_leaf, pos);
            let y_right = assign_positions(tree, *right, depth + right_len, row_h, next_leaf, pos);
            let y = (y_left + y_right) / 2.0;
            pos[idx] = (depth, y);
            y
        }
    }
}

fn draw_tree_node(
    out: &mut String,
    tree: &Tree,
    idx: usize,
    pos: &[(f64, f64)],
    left_margin: f64,
    top_margin: f64,
    x_scale: f64,
) -> std::fmt::Result {
    let (depth, y) = pos[idx];
    let x = left_margin + depth * x_scale;
    let y = top_margin + y;

    match tree.node(idx) {
        TreeNode::Leaf { title } => {
            writeln!(
                out,
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#333\">{}</text>",
                x + 5.0,
                y + 4.0,
                escape_html(title)
            )?;
        }
        TreeNode::Internal { left, right, .. } => {
            for child in [*left, *right] {
                let (child_depth, child_y) = pos[child];
                let cx = left_margin + child_depth * x_scale;
                let cy = top_margin + child_y;
                // Elbow: vertical at the parent x, then horizontal to the child
                writeln!(
                    out,
                    "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#555\" stroke-width=\"1.5\"/>",
                    x, y, x, cy
                )?;
                writeln!(
                    out,
                    "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#555\" stroke-width=\"1.5\"/>",
                    x, cy, cx, cy
                )?;
                draw_tree_node(out, tree, child, pos, left_margin, top_margin, x_scale)?;
            }
        }
    }
    Ok(())
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::composition::{global_stats, sequence_stats};
    use crate::core::distance::DistanceEngine;
    use crate::core::tree::build_nj_tree;

    fn pieces(titles_and_seqs: &[(&str, &str)]) -> (Vec<Sequence>, Vec<SequenceStats>, GlobalStats) {
        let sequences: Vec<Sequence> = titles_and_seqs
            .iter()
            .map(|(t, s)| Sequence::new(t, s))
            .collect();
        let stats: Vec<SequenceStats> = sequences.iter().map(|s| sequence_stats(&s.raw)).collect();
        let global = global_stats(&stats);
        (sequences, stats, global)
    }

    #[test]
    fn test_full_report_contents() {
        let (sequences, stats, global) = pieces(&[
            ("Alpha", "ATGCATGCAT"),
            ("Beta", "ATGGATCCAT"),
            ("Gamma", "TTGCATGCAA"),
        ]);
        let outcome = DistanceEngine::new(None).compute(&sequences).unwrap();
        let tree = build_nj_tree(&outcome.matrix).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let ctx = ReportContext {
            command_line: "seqreport --seq Alpha=ATGCATGCAT",
            sequences: &sequences,
            stats: &stats,
            global: &global,
            motif_hits: &[],
            distance: Some(&outcome),
            tree: Some(&tree),
        };
        write_report(path.to_str().unwrap(), &ctx, &ReportStyle::default()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        for title in ["Alpha", "Beta", "Gamma"] {
            assert!(html.contains(title), "missing {}", title);
        }
        assert!(html.contains("Mean:"));
        assert!(html.contains("simple padded distance"));
        assert!(html.contains("Newick"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn test_stats_only_report_omits_distance_sections() {
        let (sequences, stats, global) = pieces(&[("Solo", "ATGCATGC")]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let ctx = ReportContext {
            command_line: "seqreport",
            sequences: &sequences,
            stats: &stats,
            global: &global,
            motif_hits: &[],
            distance: None,
            tree: None,
        };
        write_report(path.to_str().unwrap(), &ctx, &ReportStyle::default()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Base Composition"));
        assert!(!html.contains("Distance Matrix"));
        assert!(!html.contains("Phylogenetic Tree"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let (sequences, stats, global) = pieces(&[("<b>evil</b>", "ACGT")]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let ctx = ReportContext {
            command_line: "seqreport",
            sequences: &sequences,
            stats: &stats,
            global: &global,
            motif_hits: &[],
            distance: None,
            tree: None,
        };
        write_report(path.to_str().unwrap(), &ctx, &ReportStyle::default()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("&lt;b&gt;evil&lt;/b&gt;"));
        assert!(!html.contains("<b>evil</b>"));
    }

    #[test]
    fn test_motif_section_lists_hits() {
        let (sequences, stats, global) = pieces(&[("S1", "ATGATG")]);
        let motif_hits = vec![vec![("ATG".to_string(), vec![1, 4])]];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let ctx = ReportContext {
            command_line: "seqreport --motif ATG",
            sequences: &sequences,
            stats: &stats,
            global: &global,
            motif_hits: &motif_hits,
            distance: None,
            tree: None,
        };
        write_report(path.to_str().unwrap(), &ctx, &ReportStyle::default()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Motif Occurrences"));
        assert!(html.contains("1, 4"));
    }

    #[test]
    fn test_truncated_preview_notes_remainder() {
        let long: String = "ACGT".repeat(40);
        let (sequences, stats, global) = pieces(&[("Long", &long)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let ctx = ReportContext {
            command_line: "seqreport",
            sequences: &sequences,
            stats: &stats,
            global: &global,
            motif_hits: &[],
            distance: None,
            tree: None,
        };
        write_report(path.to_str().unwrap(), &ctx, &ReportStyle::default()).unwrap();

        // 160 bases with a 120-base preview leaves 40 unshown
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("(40 more)"));
    }
}
