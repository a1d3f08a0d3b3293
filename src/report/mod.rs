use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::domain::RankedEntry;
use crate::errors::with_io_context;

pub const HEADER: [&str; 3] = ["rank", "competitor", "score"];

pub fn write_leaderboard_csv<P: AsRef<Path>>(path: P, entries: &[RankedEntry]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = with_io_context(csv::Writer::from_path(path), "create", path)?;

    writer.write_record(HEADER)?;
    for entry in entries {
        writer.write_record([
            entry.rank.to_string(),
            entry.competitor.clone(),
            format_score(entry.score),
        ])?;
    }
    with_io_context(writer.flush(), "write", path)?;

    info!("Wrote {} ranked competitors to {}", entries.len(), path.display());
    Ok(())
}

pub fn print_leaderboard(entries: &[RankedEntry]) {
    if entries.is_empty() {
        println!("{}", "No ranked competitors".yellow());
        return;
    }

    let width = entries
        .iter()
        .map(|e| e.competitor.chars().count())
        .max()
        .unwrap_or(0)
        .max("Competitor".len());

    println!(
        "{}",
        format!("{:>4}  {:<width$}  {:>6}", "Rank", "Competitor", "Score").bold()
    );
    for entry in entries {
        let line = format!(
            "{:>4}  {:<width$}  {:>6}",
            entry.rank,
            entry.competitor,
            format_score(entry.score)
        );
        if entry.rank <= 3 {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}
