//! File loading for OHLCV bars.
//!
//! CSV files need the header `timestamp,open,high,low,close,volume` with
//! RFC 3339 timestamps. JSON files hold an array of objects with the same
//! keys. Bars are returned in file order; out-of-order input is logged but
//! kept, since calculators window by index.

use std::path::Path;

use crate::domain::{is_ordered, Bar};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no bars in input")]
    Empty,
}

/// Parse CSV text into bars.
pub fn parse_csv(text: &str) -> Result<Vec<Bar>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let bars = reader
        .deserialize::<Bar>()
        .collect::<Result<Vec<_>, _>>()?;
    finish(bars)
}

/// Parse a JSON array into bars.
pub fn parse_json(text: &str) -> Result<Vec<Bar>, DataError> {
    let bars: Vec<Bar> = serde_json::from_str(text)?;
    finish(bars)
}

/// Load bars from `path`; `.json` files parse as JSON, anything else as CSV.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let bars = if is_json {
        parse_json(&text)?
    } else {
        parse_csv(&text)?
    };
    tracing::info!(path = %path.display(), bars = bars.len(), "loaded bars");
    Ok(bars)
}

fn finish(bars: Vec<Bar>) -> Result<Vec<Bar>, DataError> {
    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    if !is_ordered(&bars) {
        tracing::warn!("bar timestamps are not ascending");
    }
    let insane = bars.iter().filter(|b| !b.is_sane()).count();
    if insane > 0 {
        tracing::warn!(count = insane, "bars fail OHLC sanity checks");
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
timestamp,open,high,low,close,volume
2024-01-02T14:30:00Z,100.0,101.5,99.5,101.0,1200
2024-01-02T14:31:00Z,101.0,102.0,100.5,101.8,900
";

    #[test]
    fn parses_csv() {
        let bars = parse_csv(CSV).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 101.0);
        assert_eq!(bars[1].volume, 900.0);
        assert!(bars[0].timestamp < bars[1].timestamp);
    }

    #[test]
    fn parses_json() {
        let json = r#"[{"timestamp":"2024-01-02T14:30:00Z","open":1,"high":2,"low":0.5,"close":1.5,"volume":10}]"#;
        let bars = parse_json(json).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].high, 2.0);
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(
            parse_csv("timestamp,open,high,low,close,volume\n"),
            Err(DataError::Empty)
        ));
        assert!(matches!(parse_json("[]"), Err(DataError::Empty)));
    }

    #[test]
    fn bad_number_is_csv_error() {
        let text = "timestamp,open,high,low,close,volume\n2024-01-02T14:30:00Z,x,1,1,1,1\n";
        assert!(matches!(parse_csv(text), Err(DataError::Csv(_))));
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("bars.csv");
        std::fs::write(&csv_path, CSV).unwrap();
        assert_eq!(load_bars(&csv_path).unwrap().len(), 2);

        let json_path = dir.path().join("bars.JSON");
        let json = serde_json::to_string(&parse_csv(CSV).unwrap()).unwrap();
        std::fs::write(&json_path, json).unwrap();
        assert_eq!(load_bars(&json_path).unwrap(), parse_csv(CSV).unwrap());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_bars(Path::new("/nonexistent/bars.csv")),
            Err(DataError::Io(_))
        ));
    }
}
