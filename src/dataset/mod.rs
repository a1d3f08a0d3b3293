//! Reading and writing contest records at the edge of the pipeline.
//!
//! CSV and JSON inputs are supported, picked by file extension. Dates are
//! parsed leniently: anything unreadable becomes a missing date instead of an
//! error, so such rows still take part in dedup but never reach the graph.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::Deserialize;

use crate::config::DatasetSettings;
use crate::domain::ContestRecord;
use crate::errors::{with_io_context, with_parse_context};

pub const HEADER: [&str; 4] = ["competitor_a", "competitor_b", "a_won", "date"];

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "boxer_a")]
    competitor_a: String,
    #[serde(alias = "boxer_b")]
    competitor_b: String,
    #[serde(alias = "is_a_win", default)]
    a_won: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonFlag {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(alias = "boxer_a")]
    competitor_a: String,
    #[serde(alias = "boxer_b")]
    competitor_b: String,
    #[serde(alias = "is_a_win", default)]
    a_won: Option<JsonFlag>,
    #[serde(default)]
    date: Option<String>,
}

pub fn load_records<P: AsRef<Path>>(path: P, settings: &DatasetSettings) -> Result<Vec<ContestRecord>> {
    let path = path.as_ref();
    let raw = if is_json(path) {
        read_json(path)?
    } else {
        read_csv(path)?
    };
    info!("Read {} records from {}", raw.len(), path.display());

    let records = filter_records(raw, settings)?;
    info!("Kept {} records after filtering", records.len());
    Ok(records)
}

/// Applies the `min_date` bound and the malformed-record policy
pub fn filter_records(records: Vec<ContestRecord>, settings: &DatasetSettings) -> Result<Vec<ContestRecord>> {
    let mut kept = Vec::with_capacity(records.len());

    for (idx, record) in records.into_iter().enumerate() {
        if let Err(e) = record.validate(idx) {
            if settings.strict {
                return Err(e.into());
            }
            warn!("Skipping {}", e);
            continue;
        }

        if let Some(min_date) = settings.min_date {
            if !record.date.is_some_and(|d| d >= min_date) {
                continue;
            }
        }

        kept.push(record);
    }

    Ok(kept)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_csv(path: &Path) -> Result<Vec<ContestRecord>> {
    let mut reader = with_io_context(csv::Reader::from_path(path), "open", path)?;
    let mut records = Vec::new();

    for (idx, row) in reader.deserialize::<CsvRecord>().enumerate() {
        let row = with_parse_context(row, &format!("CSV row {}", idx + 1))?;
        let a_won = parse_outcome(row.a_won.as_deref().unwrap_or(""))
            .map_err(|e| e.context(format!("CSV row {}", idx + 1)))?;
        records.push(ContestRecord {
            competitor_a: row.competitor_a,
            competitor_b: row.competitor_b,
            a_won,
            date: row.date.as_deref().and_then(parse_date),
        });
    }

    Ok(records)
}

fn read_json(path: &Path) -> Result<Vec<ContestRecord>> {
    let json = with_io_context(fs::read_to_string(path), "read", path)?;
    let rows: Vec<JsonRecord> = with_parse_context(serde_json::from_str(&json), "JSON records")?;

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| -> Result<ContestRecord> {
            let a_won = match row.a_won {
                None => None,
                Some(JsonFlag::Bool(flag)) => Some(flag),
                Some(JsonFlag::Text(text)) => parse_outcome(&text)
                    .map_err(|e| e.context(format!("JSON record {}", idx + 1)))?,
            };
            Ok(ContestRecord {
                competitor_a: row.competitor_a,
                competitor_b: row.competitor_b,
                a_won,
                date: row.date.as_deref().and_then(parse_date),
            })
        })
        .collect()
}

/// `Some(true)` when A won, `Some(false)` when B won, `None` for a draw
pub fn parse_outcome(value: &str) -> Result<Option<bool>> {
    match value.trim().to_lowercase().as_str() {
        "true" | "t" | "1" | "1.0" | "yes" | "y" | "win" => Ok(Some(true)),
        "false" | "f" | "0" | "0.0" | "no" | "n" | "loss" => Ok(Some(false)),
        "" | "nan" | "na" | "none" | "null" | "draw" => Ok(None),
        other => bail!("Unrecognised result flag: {:?}", other),
    }
}

/// Lenient date parsing; `None` for anything unreadable
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc().date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    None
}

/// Writes records as CSV; the header is written even when there are no rows
pub fn write_records<P: AsRef<Path>>(path: P, records: &[ContestRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = with_io_context(csv::Writer::from_path(path), "create", path)?;

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.competitor_a.clone(),
            record.competitor_b.clone(),
            format_outcome(record.a_won),
            format_date(record.date),
        ])?;
    }
    with_io_context(writer.flush(), "write", path)?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn format_outcome(a_won: Option<bool>) -> String {
    a_won.map(|flag| flag.to_string()).unwrap_or_default()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_outcome() {
        assert_eq!(parse_outcome("True").unwrap(), Some(true));
        assert_eq!(parse_outcome("0").unwrap(), Some(false));
        assert_eq!(parse_outcome("").unwrap(), None);
        assert_eq!(parse_outcome("NaN").unwrap(), None);
        assert!(parse_outcome("maybe").is_err());
    }

    #[test]
    fn test_float_flags_from_numeric_columns() {
        assert_eq!(parse_outcome("1.0").unwrap(), Some(true));
        assert_eq!(parse_outcome("0.0").unwrap(), Some(false));
        assert!(parse_outcome("0.5").is_err());

        let file = write_temp(
            ".csv",
            "competitor_a,competitor_b,a_won,date\n\
             Ali,Frazier,0.0,1971-03-08\n\
             Ali,Frazier,1.0,1974-01-28\n",
        );
        let records = load_records(file.path(), &DatasetSettings::default()).unwrap();
        assert_eq!(records[0].a_won, Some(false));
        assert_eq!(records[1].a_won, Some(true));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-01"), Some(day("2024-01-01")));
        assert_eq!(parse_date("2024-01-01T20:00:00Z"), Some(day("2024-01-01")));
        assert_eq!(parse_date("2024-01-01T20:00:00"), Some(day("2024-01-01")));
        assert_eq!(parse_date("2024-01-01T20:00:00.250"), Some(day("2024-01-01")));
        assert_eq!(parse_date("2024-01-01 20:00:00"), Some(day("2024-01-01")));
        assert_eq!(parse_date("NaT"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_load_csv_with_legacy_headers() {
        let file = write_temp(
            ".csv",
            "boxer_a,boxer_b,is_a_win,date\n\
             Ali,Frazier,True,1971-03-08\n\
             Frazier,Ali,False,1971-03-08\n\
             Ali,Norton,,1976-09-28\n\
             Ali,Spinks,True,not a date\n",
        );
        let records = load_records(file.path(), &DatasetSettings::default()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], ContestRecord::win("Ali", "Frazier", day("1971-03-08")));
        assert_eq!(records[1].a_won, Some(false));
        assert!(records[2].is_draw());
        assert_eq!(records[3].date, None);
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(
            ".json",
            r#"[
                {"competitor_a": "Ali", "competitor_b": "Frazier", "a_won": true, "date": "1971-03-08"},
                {"competitor_a": "Ali", "competitor_b": "Norton", "a_won": null, "date": "1976-09-28"},
                {"competitor_a": "Ali", "competitor_b": "Spinks", "a_won": "false"}
            ]"#,
        );
        let records = load_records(file.path(), &DatasetSettings::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].a_won, Some(true));
        assert!(records[1].is_draw());
        assert_eq!(records[2].a_won, Some(false));
        assert_eq!(records[2].date, None);
    }

    #[test]
    fn test_min_date_drops_old_and_undated() {
        let settings = DatasetSettings {
            min_date: Some(day("1975-01-01")),
            strict: false,
        };
        let records = vec![
            ContestRecord::win("Ali", "Frazier", day("1971-03-08")),
            ContestRecord::win("Ali", "Frazier", day("1975-10-01")),
            ContestRecord::new("Ali", "Spinks", Some(true), None),
        ];
        let kept = filter_records(records, &settings).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].date, Some(day("1975-10-01")));
    }

    #[test]
    fn test_malformed_skipped_or_rejected() {
        let records = vec![
            ContestRecord::win("", "Frazier", day("1971-03-08")),
            ContestRecord::win("Ali", "Frazier", day("1971-03-08")),
        ];

        let lenient = filter_records(records.clone(), &DatasetSettings::default()).unwrap();
        assert_eq!(lenient.len(), 1);

        let strict = DatasetSettings {
            min_date: None,
            strict: true,
        };
        assert!(filter_records(records, &strict).is_err());
    }

    #[test]
    fn test_write_then_load_keeps_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let records = vec![
            ContestRecord::win("Ali", "Frazier", day("1971-03-08")),
            ContestRecord::new("Ali", "Norton", None, None),
        ];
        write_records(&path, &records).unwrap();
        let loaded = load_records(&path, &DatasetSettings::default()).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_empty_output_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_records(&path, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), "competitor_a,competitor_b,a_won,date");
        assert!(load_records(&path, &DatasetSettings::default()).unwrap().is_empty());
    }
}
