//! # Headline Loader
//!
//! Reads a headline CSV, cleans the text and parses dates.
//!
//! Structural failures never escape [`load_news`]: it logs the cause and
//! returns an empty vector. Rows whose date cannot be parsed are dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

use super::news::HeadlineRecord;

/// Errors raised while reading a headline source
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Offset-aware timestamp layouts (the written local date is kept)
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"];

/// Naive timestamp layouts
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date or timestamp string into a calendar date
///
/// Returns `None` for anything that does not match a known layout.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.date_naive());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Load and clean headlines from a CSV file
///
/// Never fails: on any structural error the cause is logged and an empty
/// vector is returned.
pub fn load_news<P: AsRef<Path>>(path: P) -> Vec<HeadlineRecord> {
    let path = path.as_ref();
    match try_load_news(path) {
        Ok(news) => {
            info!("Loaded {} headlines from {}", news.len(), path.display());
            news
        }
        Err(e) => {
            error!("Error loading data from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Load and clean headlines from a CSV file, reporting failures
pub fn try_load_news<P: AsRef<Path>>(path: P) -> Result<Vec<HeadlineRecord>, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_news(file)
}

/// Read headlines from any CSV source
///
/// Requires `date` and `headline` columns. `url`, `publisher` and `stock`
/// are carried over when present; every other column (including an unnamed
/// index column) is ignored.
pub fn read_news<R: Read>(source: R) -> Result<Vec<HeadlineRecord>, LoaderError> {
    let mut reader = ReaderBuilder::new().from_reader(source);
    let headers = reader.headers()?.clone();

    let date_idx = column_index(&headers, "date").ok_or(LoaderError::MissingColumn("date"))?;
    let headline_idx =
        column_index(&headers, "headline").ok_or(LoaderError::MissingColumn("headline"))?;
    let url_idx = column_index(&headers, "url");
    let publisher_idx = column_index(&headers, "publisher");
    let stock_idx = column_index(&headers, "stock");

    let mut news = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result?;

        let Some(date) = record.get(date_idx).and_then(parse_date) else {
            dropped += 1;
            continue;
        };
        let headline = record.get(headline_idx).unwrap_or_default();

        let mut item = HeadlineRecord::new(date, headline);
        item.url = optional_field(&record, url_idx);
        item.publisher = optional_field(&record, publisher_idx);
        item.stock = optional_field(&record, stock_idx);
        news.push(item);
    }

    if dropped > 0 {
        debug!("Dropped {} rows with invalid or missing dates", dropped);
    }

    Ok(news)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn optional_field(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .filter(|value| !value.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
,headline,url,publisher,date,stock
0,Stocks That Hit 52-Week Highs On Friday,https://example.com/a,Benzinga Insights,2020-06-05 10:30:54-04:00,A
1,\"Agilent Technologies (A) Shares Up 3.4%!\",https://example.com/b,Lisa Levin,not a date,A
2,JPMorgan Maintains Neutral on Agilent,https://example.com/c,Vick Meyer,2020-05-22 00:00:00,A
3,Missing Date Headline,https://example.com/d,Vick Meyer,,A
";

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 6, 5).unwrap();
        assert_eq!(parse_date("2020-06-05"), Some(expected));
        assert_eq!(parse_date("2020-06-05 10:30:54"), Some(expected));
        assert_eq!(parse_date("2020-06-05T10:30:54Z"), Some(expected));
        assert_eq!(parse_date("2020/06/05"), Some(expected));
        assert_eq!(parse_date("06/05/2020"), Some(expected));
    }

    #[test]
    fn test_parse_date_keeps_local_date() {
        // 23:30 at -04:00 is already the next day in UTC
        let parsed = parse_date("2020-06-05 23:30:00-04:00");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2020, 6, 5));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2020-13-45"), None);
    }

    #[test]
    fn test_read_news_drops_bad_dates() {
        let news = read_news(SAMPLE.as_bytes()).unwrap();
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].date, NaiveDate::from_ymd_opt(2020, 6, 5).unwrap());
        assert_eq!(news[0].cleaned_headline, "stocks that hit 52week highs on friday");
        assert_eq!(news[0].publisher.as_deref(), Some("Benzinga Insights"));
        assert_eq!(news[1].date, NaiveDate::from_ymd_opt(2020, 5, 22).unwrap());
    }

    #[test]
    fn test_read_news_missing_column() {
        let csv = "date,title\n2020-06-05,hello\n";
        let err = read_news(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn("headline")));
    }

    #[test]
    fn test_load_news_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let news = load_news(file.path());
        assert_eq!(news.len(), 2);
    }

    #[test]
    fn test_load_news_missing_file_is_empty() {
        let news = load_news("/nonexistent/raw_analyst_ratings.csv");
        assert!(news.is_empty());
    }

    #[test]
    fn test_load_news_structural_error_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"date,text\n2020-06-05,hello\n").unwrap();
        assert!(load_news(file.path()).is_empty());
    }
}
