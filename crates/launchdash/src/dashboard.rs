//! Dashboard composition.
//!
//! Ties the dataset, site catalog, filter, and chart builders together
//! behind a single entry point, [`Dashboard::on_input_change`], which the
//! HTTP layer calls whenever the site selector or payload range changes.
//! Every call recomputes both charts from scratch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{SiteCatalog, SiteOption, SiteSelection, ALL_SENTINEL};
use crate::chart::{build_pie, build_scatter, PieSpec, ScatterSpec};
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::{filter, FilterSelection, PayloadRange};

/// Placeholder text of the site selector.
const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

/// Upper bound on slider marks, so a tiny step cannot flood the page.
const MAX_SLIDER_MARKS: usize = 51;

/// Site selector description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownSpec {
    /// Options, starting with "All Sites".
    pub options: Vec<SiteOption>,
    /// Initially selected value.
    pub value: String,
    /// Placeholder text.
    pub placeholder: String,
    /// Whether the user can type to filter options.
    pub searchable: bool,
}

/// A labelled position on the payload slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMark {
    /// Payload mass in kilograms.
    pub value: f64,
    /// Label drawn under the mark.
    pub label: String,
}

/// Payload range control description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    /// Lowest selectable mass.
    pub min: f64,
    /// Highest selectable mass.
    pub max: f64,
    /// Step granularity.
    pub step: f64,
    /// Initially selected range.
    pub value: PayloadRange,
    /// Labelled marks.
    pub marks: Vec<SliderMark>,
}

/// Everything the page needs to build its controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayout {
    /// Page heading.
    pub title: String,
    /// Site selector.
    pub dropdown: DropdownSpec,
    /// Payload range control.
    pub slider: SliderSpec,
}

/// Result of one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// The selection the charts were built for.
    pub selection: FilterSelection,
    /// Number of records that passed the filter.
    pub matched: usize,
    /// Success pie chart.
    pub pie: PieSpec,
    /// Payload/outcome scatter chart.
    pub scatter: ScatterSpec,
}

/// The dashboard: an immutable dataset plus the logic that charts it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    catalog: SiteCatalog,
    title: String,
    slider_step_kg: f64,
}

impl Dashboard {
    /// Build a dashboard over `dataset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the site catalog cannot be built (a site collides
    /// with the reserved all-sites value).
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Result<Self> {
        let catalog = SiteCatalog::new(dataset.records())?;
        Ok(Self {
            dataset: Arc::new(dataset),
            catalog,
            title: config.title.clone(),
            slider_step_kg: config.slider_step_kg,
        })
    }

    /// Get the underlying dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Get the site catalog.
    #[must_use]
    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    /// Describe the page controls.
    #[must_use]
    pub fn layout(&self) -> DashboardLayout {
        let bounds = self.dataset.payload_bounds();
        DashboardLayout {
            title: self.title.clone(),
            dropdown: DropdownSpec {
                options: self.catalog.options(),
                value: ALL_SENTINEL.to_string(),
                placeholder: SITE_PLACEHOLDER.to_string(),
                searchable: true,
            },
            slider: SliderSpec {
                min: bounds.min_kg,
                max: bounds.max_kg,
                step: self.slider_step_kg,
                value: bounds,
                marks: slider_marks(bounds, self.slider_step_kg),
            },
        }
    }

    /// The selection shown before the user touches anything.
    #[must_use]
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::new(SiteSelection::All, self.dataset.payload_bounds())
    }

    /// Resolve raw control values into a selection.
    ///
    /// A missing site means all sites; a missing bound falls back to the
    /// dataset's observed bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the site is unknown or the range is invalid.
    pub fn selection(
        &self,
        site: Option<&str>,
        min_kg: Option<f64>,
        max_kg: Option<f64>,
    ) -> Result<FilterSelection> {
        let bounds = self.dataset.payload_bounds();
        let site = self.catalog.resolve(site.unwrap_or(ALL_SENTINEL))?;
        let range = PayloadRange::new(
            min_kg.unwrap_or(bounds.min_kg),
            max_kg.unwrap_or(bounds.max_kg),
        )?;
        Ok(FilterSelection::new(site, range))
    }

    /// Recompute both charts for `selection`.
    #[must_use]
    pub fn on_input_change(&self, selection: &FilterSelection) -> DashboardView {
        let filtered = filter(self.dataset.records(), selection);
        let pie = build_pie(&filtered, &selection.site);
        let scatter = build_scatter(&filtered, &selection.site);

        debug!(
            site = %selection.site,
            min_kg = selection.payload_range.min_kg,
            max_kg = selection.payload_range.max_kg,
            matched = filtered.len(),
            "Recomputed dashboard charts"
        );

        DashboardView {
            selection: selection.clone(),
            matched: filtered.len(),
            pie,
            scatter,
        }
    }
}

/// Marks at every multiple of `step` inside `bounds`, labelled `"{n} Kg"`.
///
/// Each mark is computed from its index rather than by accumulating `step`,
/// then rounded to six decimal places so fractional steps label cleanly.
#[allow(clippy::cast_precision_loss)]
fn slider_marks(bounds: PayloadRange, step: f64) -> Vec<SliderMark> {
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let first = (bounds.min_kg / step).ceil();
    (0..MAX_SLIDER_MARKS)
        .map(|i| round_mark((first + i as f64) * step))
        .take_while(|&value| value <= bounds.max_kg)
        .map(|value| SliderMark {
            value,
            label: format!("{value} Kg"),
        })
        .collect()
}

fn round_mark(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
