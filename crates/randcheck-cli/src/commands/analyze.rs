use randcheck_tests::{ReportConfig, SequenceReport};

pub struct AnalyzeCommandConfig<'a> {
    pub input: Option<&'a str>,
    pub min: i64,
    pub max: i64,
    pub bins: usize,
    pub alpha: f64,
    pub lag: usize,
    pub output_path: Option<&'a str>,
    pub markdown_path: Option<&'a str>,
}

pub fn run(cfg: AnalyzeCommandConfig<'_>) {
    let tester = super::load_tester(cfg.input, cfg.min, cfg.max);
    let report = tester.report(&ReportConfig {
        alpha: cfg.alpha,
        chi_square_bins: cfg.bins,
        autocorrelation_lag: cfg.lag,
    });

    print!("{}", render_summary(&report));

    if let Some(path) = cfg.markdown_path {
        if let Err(e) = std::fs::write(path, generate_markdown(&report)) {
            eprintln!("Failed to write report to {path}: {e}");
            std::process::exit(1);
        }
        println!("\nReport saved to: {path}");
    }

    if let Some(path) = cfg.output_path {
        super::write_json(path, &report);
    }
}

fn verdict(passed: bool) -> &'static str {
    if passed { "Passed" } else { "Failed" }
}

fn format_p(p: Option<f64>) -> String {
    p.map(|p| format!("{p:.4}"))
        .unwrap_or_else(|| "—".to_string())
}

/// Console summary: sequence facts, then one row per hypothesis test.
pub fn render_summary(report: &SequenceReport) -> String {
    let mut out = String::new();
    out.push_str("=== Sequence analysis ===\n");
    out.push_str(&format!(
        "  Count:            {}  (range [{}, {}]",
        report.count, report.min, report.max
    ));
    if report.out_of_range > 0 {
        out.push_str(&format!(", {} outside", report.out_of_range));
    }
    out.push_str(")\n");
    out.push_str(&format!(
        "  Autocorr (lag {}): {}\n",
        report.autocorrelation_lag,
        report
            .autocorrelation
            .map(|r| format!("{r:.4}"))
            .unwrap_or_else(|| "n/a".to_string())
    ));
    out.push_str(&format!(
        "  Longest repeat:   {}\n",
        report.longest_repeat_run
    ));
    out.push_str(&format!(
        "  Repeated values:  {}\n",
        report.duplicate_values
    ));
    out.push_str(&format!("  CRC-32:           0x{:08X}\n\n", report.crc32));

    out.push_str(&format!(
        "{:<22} {:>12} {:>10} {:>6} {:>8}\n",
        "Test", "Statistic", "p-value", "Grade", "Verdict"
    ));
    out.push_str(&format!("{}\n", "-".repeat(62)));
    for t in report.tests() {
        out.push_str(&format!(
            "{:<22} {:>12.4} {:>10} {:>6} {:>8}\n",
            t.name,
            t.statistic,
            format_p(t.p_value),
            t.grade,
            verdict(t.passed)
        ));
    }
    out.push_str(&format!(
        "\n{}/{} passed at alpha={}, score {:.0}/100\n",
        report.tests_passed,
        report.tests().len(),
        report.alpha,
        report.quality_score
    ));
    out
}

/// Markdown report with the same content as the console summary.
pub fn generate_markdown(report: &SequenceReport) -> String {
    let mut md = String::new();
    md.push_str("# randcheck — Sequence Randomness Report\n\n");
    md.push_str(&format!(
        "- Samples: {}\n- Range: [{}, {}]\n- Outside range: {}\n- CRC-32: `0x{:08X}`\n",
        report.count, report.min, report.max, report.out_of_range, report.crc32
    ));
    md.push_str(&format!(
        "- Longest repeat run: {}\n- Repeated values: {}\n",
        report.longest_repeat_run, report.duplicate_values
    ));
    match report.autocorrelation {
        Some(r) => md.push_str(&format!(
            "- Autocorrelation (lag {}): {r:.6}\n",
            report.autocorrelation_lag
        )),
        None => md.push_str(&format!(
            "- Autocorrelation (lag {}): n/a\n",
            report.autocorrelation_lag
        )),
    }
    md.push_str(&format!(
        "- Score: {:.1}/100\n- Passed: {}/{} (alpha={})\n\n",
        report.quality_score,
        report.tests_passed,
        report.tests().len(),
        report.alpha
    ));

    md.push_str("| Test | P | Grade | p-value | Statistic | Details |\n");
    md.push_str("|------|---|-------|---------|-----------|--------|\n");
    for t in report.tests() {
        let ok = if t.passed { "✓" } else { "✗" };
        let pval = t
            .p_value
            .map(|p| format!("{p:.6}"))
            .unwrap_or_else(|| "—".to_string());
        md.push_str(&format!(
            "| {} | {} | {} | {} | {:.4} | {} |\n",
            t.name, ok, t.grade, pval, t.statistic, t.details
        ));
    }
    md
}
