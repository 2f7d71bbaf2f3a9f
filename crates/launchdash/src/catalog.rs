//! Launch site catalog.
//!
//! Derives the distinct launch sites from the dataset and turns them into
//! the options shown in the site selector. The selector always starts with
//! an "All Sites" entry whose value is reserved.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::LaunchRecord;

/// Reserved selector value meaning "no site filter".
pub const ALL_SENTINEL: &str = "ALL";

/// Label of the reserved selector option.
pub const ALL_SITES_LABEL: &str = "All Sites";

/// Which sites the dashboard is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SiteSelection {
    /// Every site.
    #[default]
    All,
    /// A single site from the catalog.
    Site(String),
}

impl SiteSelection {
    /// Select a single site.
    #[must_use]
    pub fn site(id: impl Into<String>) -> Self {
        Self::Site(id.into())
    }

    /// Check if a record from `launch_site` belongs to this selection.
    #[must_use]
    pub fn matches(&self, launch_site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(id) => id == launch_site,
        }
    }

    /// The raw selector value for this selection.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::All => ALL_SENTINEL,
            Self::Site(id) => id,
        }
    }

    /// Check if this is the all-sites selection.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SENTINEL {
            Self::All
        } else {
            Self::Site(value)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> Self {
        match selection {
            SiteSelection::All => ALL_SENTINEL.to_string(),
            SiteSelection::Site(id) => id,
        }
    }
}

/// One entry in the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOption {
    /// Text shown to the user.
    pub label: String,
    /// Value sent back when the option is chosen.
    pub value: String,
}

/// Distinct launch sites in first-seen order.
#[must_use]
pub fn distinct_sites(records: &[LaunchRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.launch_site.as_str()))
        .map(|r| r.launch_site.clone())
        .collect()
}

/// The set of selectable launch sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCatalog {
    sites: Vec<String>,
}

impl SiteCatalog {
    /// Build the catalog from the dataset's records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SentinelCollision`] if a real site uses the reserved
    /// all-sites value.
    pub fn new(records: &[LaunchRecord]) -> Result<Self> {
        let sites = distinct_sites(records);
        if let Some(site) = sites.iter().find(|s| s.as_str() == ALL_SENTINEL) {
            return Err(Error::SentinelCollision { site: site.clone() });
        }
        debug!(sites = sites.len(), "Built site catalog");
        Ok(Self { sites })
    }

    /// Site identifiers in first-seen order.
    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Number of real sites (excluding the all-sites entry).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Check if the catalog has no sites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Check if `id` is a known site.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.sites.iter().any(|s| s == id)
    }

    /// Selector options: "All Sites" followed by each site.
    #[must_use]
    pub fn options(&self) -> Vec<SiteOption> {
        std::iter::once(SiteOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SENTINEL.to_string(),
        })
        .chain(self.sites.iter().map(|site| SiteOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect()
    }

    /// Map a raw selector value onto a selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSite`] if `value` is neither the sentinel nor
    /// a catalog site.
    pub fn resolve(&self, value: &str) -> Result<SiteSelection> {
        if value == ALL_SENTINEL {
            Ok(SiteSelection::All)
        } else if self.contains(value) {
            Ok(SiteSelection::site(value))
        } else {
            Err(Error::unknown_site(value))
        }
    }
}
