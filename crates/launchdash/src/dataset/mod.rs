//! Dataset store for launchdash.
//!
//! This module loads the launch CSV once at startup and holds the records
//! immutably for the lifetime of the process. Everything downstream reads
//! from the store through shared references.

pub mod schema;

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::filter::PayloadRange;
use crate::record::{LaunchRecord, Outcome};
use schema::ColumnIndex;

/// Immutable, in-memory set of launch records.
///
/// Provides:
/// - One-shot loading from a CSV file or any reader
/// - Payload bounds computed once at construction
/// - Read-only access to the records in file order
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the records came from, if loaded from disk.
    source: Option<PathBuf>,
    /// Records in file order.
    records: Vec<LaunchRecord>,
    /// Observed payload range over all records.
    bounds: PayloadRange,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, a required column is
    /// missing, any row is malformed, or the file contains no records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        debug!("Loading dataset from {}", path.display());
        let file = std::fs::File::open(&path).map_err(|source| Error::DatasetOpen {
            path: path.clone(),
            source,
        })?;

        let mut dataset = Self::from_reader(file)?;
        dataset.source = Some(path);

        info!(
            records = dataset.len(),
            min_kg = dataset.bounds.min_kg,
            max_kg = dataset.bounds.max_kg,
            "Dataset loaded from {}",
            dataset.source_label()
        );
        Ok(dataset)
    }

    /// Parse the dataset from any CSV reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing, any row is
    /// malformed, or the input contains no records.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv
            .headers()
            .map_err(|e| Error::dataset_parse(1, e.to_string()))?
            .clone();
        let columns =
            ColumnIndex::resolve(&headers).map_err(|column| Error::DatasetMissingColumn { column })?;

        let mut records = Vec::new();
        for row in csv.records() {
            let row = row.map_err(|e| {
                let line = e.position().map_or(0, csv::Position::line);
                Error::dataset_parse(line, e.to_string())
            })?;
            records.push(parse_row(&row, &columns)?);
        }

        Self::from_records(records)
    }

    /// Build a dataset from records already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if `records` is empty or any record is invalid.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        for record in &records {
            record.validate()?;
        }
        let bounds = compute_bounds(&records).ok_or(Error::DatasetEmpty)?;

        Ok(Self {
            source: None,
            records,
            bounds,
        })
    }

    /// Get all records in file order.
    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Get the observed payload range over all records.
    #[must_use]
    pub fn payload_bounds(&self) -> PayloadRange {
        self.bounds
    }

    /// Number of records in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records. Always false for a loaded dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path the dataset was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn source_label(&self) -> String {
        self.source
            .as_ref()
            .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string())
    }
}

fn compute_bounds(records: &[LaunchRecord]) -> Option<PayloadRange> {
    let mut masses = records.iter().map(|r| r.payload_mass_kg);
    let first = masses.next()?;
    let (min_kg, max_kg) = masses.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
    Some(PayloadRange { min_kg, max_kg })
}

/// Convert a CSV row to a `LaunchRecord`.
fn parse_row(row: &StringRecord, columns: &ColumnIndex) -> Result<LaunchRecord> {
    let line = row.position().map_or(0, csv::Position::line);
    let field = |index: usize, name: &str| {
        row.get(index)
            .map(str::trim)
            .ok_or_else(|| Error::dataset_parse(line, format!("missing value for '{name}'")))
    };

    let launch_site = field(columns.launch_site, schema::LAUNCH_SITE_COLUMN)?;
    let payload_raw = field(columns.payload_mass, schema::PAYLOAD_MASS_COLUMN)?;
    let class_raw = field(columns.class, schema::CLASS_COLUMN)?;
    let booster = field(columns.booster, "booster version")?;

    let payload_mass_kg: f64 = payload_raw.parse().map_err(|_| {
        Error::dataset_parse(
            line,
            format!("'{}' is not a number: {payload_raw:?}", schema::PAYLOAD_MASS_COLUMN),
        )
    })?;

    let outcome = parse_class(class_raw).ok_or_else(|| {
        Error::dataset_parse(
            line,
            format!("'{}' must be 0 or 1, got {class_raw:?}", schema::CLASS_COLUMN),
        )
    })?;

    LaunchRecord::new(launch_site, payload_mass_kg, outcome, booster)
        .map_err(|e| Error::dataset_parse(line, e.to_string()))
}

/// Accept `0`/`1` as well as the `0.0`/`1.0` spellings some exporters write.
fn parse_class(raw: &str) -> Option<Outcome> {
    let value: f64 = raw.parse().ok()?;
    if value == 0.0 {
        Some(Outcome::Failure)
    } else if (value - 1.0).abs() < f64::EPSILON {
        Some(Outcome::Success)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525,F9 v1.0  B0005,v1.0
3,VAFB SLC-4E,1,9600,F9 FT B1029.1,FT
4,KSC LC-39A,1,2490,F9 FT B1031.1,FT
";

    fn sample_dataset() -> Dataset {
        Dataset::from_reader(SAMPLE_CSV.as_bytes()).expect("failed to parse sample dataset")
    }

    #[test]
    fn test_from_reader() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 4);
        assert!(!dataset.is_empty());
        assert!(dataset.source().is_none());

        let first = &dataset.records()[0];
        assert_eq!(first.launch_site, "CCAFS LC-40");
        assert_eq!(first.booster_version, "v1.0");
        assert_eq!(first.outcome, Outcome::Failure);
    }

    #[test]
    fn test_preserves_file_order() {
        let dataset = sample_dataset();
        let masses: Vec<f64> = dataset.records().iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, vec![0.0, 525.0, 9600.0, 2490.0]);
    }

    #[test]
    fn test_payload_bounds() {
        let bounds = sample_dataset().payload_bounds();
        assert_eq!(bounds.min_kg, 0.0);
        assert_eq!(bounds.max_kg, 9600.0);
    }

    #[test]
    fn test_booster_alias_column() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion\nKSC LC-39A,3000,1,B5\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].booster_version, "B5");
    }

    #[test]
    fn test_booster_category_preferred_over_booster_version() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion,Booster Version Category\n\
                   KSC LC-39A,3000,1,F9 FT B1031.1,FT\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].booster_version, "FT");
    }

    #[test]
    fn test_float_class_accepted() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion\nKSC LC-39A,3000.5,1.0,B5\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].outcome, Outcome::Success);
        assert_eq!(dataset.records()[0].payload_mass_kg, 3000.5);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Launch Site,class,BoosterVersion\nKSC LC-39A,1,B5\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::DatasetMissingColumn {
                column: "Payload Mass (kg)"
            }
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DatasetEmpty));
    }

    #[test]
    fn test_bad_payload() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion\nKSC LC-39A,heavy,1,B5\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DatasetParse { line: 2, .. }));
        assert!(err.to_string().contains("heavy"));
    }

    #[test]
    fn test_negative_payload() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion\nKSC LC-39A,-5,1,B5\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.is_dataset_error());
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_bad_class() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion\nKSC LC-39A,100,2,B5\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("must be 0 or 1"));
    }

    #[test]
    fn test_ragged_row() {
        let csv = "Launch Site,Payload Mass (kg),class,BoosterVersion\nKSC LC-39A,100\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DatasetParse { .. }));
    }

    #[test]
    fn test_from_records_rejects_empty() {
        assert!(matches!(
            Dataset::from_records(Vec::new()),
            Err(Error::DatasetEmpty)
        ));
    }

    #[test]
    fn test_from_records_rejects_invalid() {
        let record = LaunchRecord {
            launch_site: String::new(),
            payload_mass_kg: 10.0,
            outcome: Outcome::Success,
            booster_version: "FT".to_string(),
        };
        assert!(Dataset::from_records(vec![record]).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load("/nonexistent/path/launches.csv").unwrap_err();
        assert!(matches!(err, Error::DatasetOpen { .. }));
        assert!(err.to_string().contains("/nonexistent/path/launches.csv"));
    }

    #[test]
    fn test_load_file_based() {
        let temp_dir = std::env::temp_dir();
        let path = temp_dir.join(format!("launchdash_test_{}.csv", std::process::id()));
        std::fs::write(&path, SAMPLE_CSV).unwrap();

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.source(), Some(path.as_path()));

        // Clean up
        let _ = std::fs::remove_file(&path);
    }
}
