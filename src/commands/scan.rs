use crate::config::Config;
use crate::error::AppError;
use crate::model::{ScanReport, Verdict};
use crate::scanner::Scanner;
use crate::utils::format_bytes;

pub struct ScanOptions {
    pub verbose: bool,
    pub json: bool,
    pub limit: Option<usize>,
    pub min_score: Option<f64>,
}

pub fn execute_scan(options: ScanOptions) -> Result<ScanReport, AppError> {
    let config = Config::load()?;
    let scanner = Scanner::new(config)?;
    let mut report = scanner.scan(options.verbose)?;

    if let Some(min_score) = options.min_score {
        report.records.retain(|record| record.score >= min_score);
    }
    if let Some(limit) = options.limit {
        report.records.truncate(limit);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
        return Ok(report);
    }

    if report.is_empty() {
        println!("No installed applications were found on this host.");
        println!("No usable enumeration source may be available, or everything was filtered out.");
        return Ok(report);
    }

    print_table(&report, options.verbose);
    Ok(report)
}

fn print_table(report: &ScanReport, verbose: bool) {
    println!("{:<40} {:>10} {:>10} {:>7}  {}", "Name", "Size", "Idle", "Score", "Verdict");
    println!("{}", "-".repeat(85));

    for record in &report.records {
        let name = clip_name(&record.name, 39);
        println!(
            "{:<40} {:>10} {:>8} d {:>7.2}  {}",
            name,
            format_bytes(record.size_bytes),
            record.days_idle,
            record.score,
            record.verdict.map(|v| v.display_name()).unwrap_or("unknown"),
        );
        if verbose {
            println!("    from: {}", record.provenance);
        }
    }

    println!("{}", "-".repeat(85));
    println!(
        "{} application(s), {} total; {} safe to remove, {} to consider, {} likely needed.",
        report.records.len(),
        format_bytes(report.total_size()),
        report.verdict_count(Verdict::SafeToRemove),
        report.verdict_count(Verdict::Consider),
        report.verdict_count(Verdict::LikelyNeeded),
    );
}

/// Clip a display name to at most `max` characters, never splitting inside
/// a multi-byte character.
fn clip_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut clipped: String = name.chars().take(max.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}
