//! Bar sources: CSV and JSON files, plus deterministic synthetic series.

pub mod load;
pub mod synthetic;

pub use load::{load_bars, parse_csv, parse_json, DataError};
pub use synthetic::{synthetic_bars, SyntheticSeries};
