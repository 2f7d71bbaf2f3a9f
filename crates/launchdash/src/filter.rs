//! Record filtering for launchdash.
//!
//! Maps the current dashboard selection onto the subset of records that both
//! charts are built from. Filtering is stable: surviving records keep their
//! dataset order.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::SiteSelection;
use crate::error::{Error, Result};
use crate::record::LaunchRecord;

/// Inclusive payload mass range in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    /// Lower bound (inclusive).
    pub min_kg: f64,
    /// Upper bound (inclusive).
    pub max_kg: f64,
}

impl PayloadRange {
    /// Create a range, rejecting inverted or non-finite bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if either bound is not finite or
    /// `min_kg > max_kg`.
    pub fn new(min_kg: f64, max_kg: f64) -> Result<Self> {
        if !min_kg.is_finite() || !max_kg.is_finite() || min_kg > max_kg {
            return Err(Error::InvalidRange { min_kg, max_kg });
        }
        Ok(Self { min_kg, max_kg })
    }

    /// Check if `mass_kg` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.min_kg <= mass_kg && mass_kg <= self.max_kg
    }
}

/// The dashboard's input state for one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Selected site, or all sites.
    pub site: SiteSelection,
    /// Selected payload range.
    pub payload_range: PayloadRange,
}

impl FilterSelection {
    /// Create a new selection.
    #[must_use]
    pub fn new(site: SiteSelection, payload_range: PayloadRange) -> Self {
        Self {
            site,
            payload_range,
        }
    }

    /// Check if a record satisfies both the site and payload predicates.
    #[must_use]
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        self.payload_range.contains(record.payload_mass_kg)
            && self.site.matches(&record.launch_site)
    }
}

/// Select the records matching `selection`, preserving input order.
///
/// An empty result is valid and yields empty charts downstream.
#[must_use]
pub fn filter<'a>(records: &'a [LaunchRecord], selection: &FilterSelection) -> Vec<&'a LaunchRecord> {
    let filtered: Vec<_> = records.iter().filter(|r| selection.matches(r)).collect();
    trace!(
        total = records.len(),
        matched = filtered.len(),
        site = %selection.site,
        "Filtered launch records"
    );
    filtered
}
