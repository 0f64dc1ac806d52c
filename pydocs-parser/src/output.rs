///! Report rendering: plain console, bordered console or CSV file

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

use crate::config::ParserConfig;
use crate::module::{ParserMode, Row};

/// Timestamp embedded in report file names
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extra output targets; without one the rows are printed as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// Bordered table on stdout
    Pretty,
    /// CSV file under the results directory
    File,
}

/// Render `results` as selected. Returns the report path for file output.
pub fn control_output(
    results: &[Row],
    output: Option<OutputType>,
    mode: ParserMode,
    config: &ParserConfig,
) -> Result<Option<PathBuf>> {
    match output {
        None => {
            print!("{}", render_plain(results));
            Ok(None)
        }
        Some(OutputType::Pretty) => {
            print!("{}", render_pretty(results));
            Ok(None)
        }
        Some(OutputType::File) => {
            let path = file_output(results, mode, &config.results_dir, Local::now())?;
            Ok(Some(path))
        }
    }
}

/// One line per row, cells separated by a single space.
pub fn render_plain(results: &[Row]) -> String {
    results
        .iter()
        .map(|row| format!("{}\n", row.join(" ")))
        .collect()
}

/// Left-aligned table with `+---+` borders and a rule under the header.
pub fn render_pretty(results: &[Row]) -> String {
    let columns = results.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut widths = vec![0usize; columns];
    for row in results {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule: String = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let render_row = |row: &Row| {
        let mut line = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = w - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut table = rule.clone();
    let mut rows = results.iter();
    if let Some(head) = rows.next() {
        table.push_str(&render_row(head));
        table.push_str(&rule);
    }
    let mut has_body = false;
    for row in rows {
        table.push_str(&render_row(row));
        has_body = true;
    }
    if has_body {
        table.push_str(&rule);
    }
    table
}

/// Write `results` to `<results_dir>/<mode>_<timestamp>.csv`.
pub fn file_output(
    results: &[Row],
    mode: ParserMode,
    results_dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(results_dir)
        .with_context(|| format!("Failed to create results directory {:?}", results_dir))?;

    let file_name = format!("{}_{}.csv", mode, now.format(DATETIME_FORMAT));
    let file_path = results_dir.join(file_name);

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_path(&file_path)
        .with_context(|| format!("Failed to create report file {:?}", file_path))?;

    for row in results {
        writer.write_record(row)?;
    }
    writer.flush()?;

    tracing::info!("Results saved to file: {:?}", file_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample() -> Vec<Row> {
        vec![
            vec!["Статус".into(), "Количество".into()],
            vec!["Active".into(), "31".into()],
            vec!["Итого".into(), "31".into()],
        ]
    }

    #[test]
    fn test_render_plain() {
        assert_eq!(render_plain(&sample()), "Статус Количество\nActive 31\nИтого 31\n");
    }

    #[test]
    fn test_render_pretty() {
        let expected = "\
+--------+------------+
| Статус | Количество |
+--------+------------+
| Active | 31         |
| Итого  | 31         |
+--------+------------+
";
        assert_eq!(render_pretty(&sample()), expected);
    }

    #[test]
    fn test_render_pretty_header_only() {
        let rows = vec![vec!["a".to_string()]];
        assert_eq!(render_pretty(&rows), "+---+\n| a |\n+---+\n");
        assert_eq!(render_pretty(&[]), "");
    }

    #[test]
    fn test_file_output() {
        let temp_dir = TempDir::new().unwrap();
        let results_dir = temp_dir.path().join("results");
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        let path = file_output(&sample(), ParserMode::Pep, &results_dir, now).unwrap();
        assert_eq!(path, results_dir.join("pep_2024-03-09_14-05-07.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "\"Статус\",\"Количество\"\n\"Active\",\"31\"\n\"Итого\",\"31\"\n"
        );
    }
}
