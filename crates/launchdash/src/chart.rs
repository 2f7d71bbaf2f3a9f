//! Chart specification builders.
//!
//! Turns a filtered set of launch records into renderer-agnostic chart
//! specifications. Both builders are pure and rebuild their output from
//! scratch on every call.
//!
//! The pie chart deliberately changes its grouping key with the selection:
//! with all sites selected it shows each site's share of launches, and with
//! a single site it shows that site's successes against its failures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::SiteSelection;
use crate::record::{LaunchRecord, Outcome};

/// Axis title for payload mass.
pub const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";

/// Axis title for launch outcome.
pub const OUTCOME_AXIS_TITLE: &str = "Launch Outcome";

/// Text shown on each pie slice.
pub const PIE_TEXT_INFO: &str = "percent+label";

/// One slice of the pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieGroup {
    /// Slice label (a site id or an outcome label).
    pub label: String,
    /// Number of records in the slice.
    pub count: usize,
}

/// Pie chart specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSpec {
    /// Chart title.
    pub title: String,
    /// Slice text mode understood by the renderer.
    pub text_info: String,
    /// Slices in display order. Empty when nothing matched.
    pub groups: Vec<PieGroup>,
}

impl PieSpec {
    /// Sum of all slice counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Check if the chart has no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One marker on the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Payload mass in kilograms.
    pub x: f64,
    /// Outcome class, 0 or 1.
    pub y: u8,
    /// Booster version, used to color markers.
    pub color_group: String,
    /// Launch site, shown on hover.
    pub tooltip: String,
}

/// A labelled tick on a categorical axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Position on the axis.
    pub value: u8,
    /// Label drawn at that position.
    pub text: String,
}

/// Axis configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title.
    pub title: String,
    /// Explicit ticks; empty means the renderer picks them.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ticks: Vec<AxisTick>,
}

/// Marker styling shared by every point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Marker size in pixels.
    pub size: u32,
    /// Marker opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 10,
            opacity: 0.7,
        }
    }
}

/// Scatter chart specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    /// Chart title.
    pub title: String,
    /// Payload axis.
    pub x_axis: Axis,
    /// Outcome axis.
    pub y_axis: Axis,
    /// Marker styling.
    pub marker: MarkerStyle,
    /// Points in record order. Empty when nothing matched.
    pub points: Vec<ScatterPoint>,
}

impl ScatterSpec {
    /// Check if the chart has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build the pie chart for the filtered records.
///
/// With [`SiteSelection::All`] slices are launch sites in first-seen order,
/// counting every launch regardless of outcome. With a single site, slices
/// are `Success` then `Failure`, omitting an outcome with no launches.
#[must_use]
pub fn build_pie(records: &[&LaunchRecord], site: &SiteSelection) -> PieSpec {
    let groups = match site {
        SiteSelection::All => count_by_site(records),
        SiteSelection::Site(_) => count_by_outcome(records),
    };

    let title = match site {
        SiteSelection::All => "Total Success Launches By Site".to_string(),
        SiteSelection::Site(id) => format!("Total Success Launches for {id}"),
    };

    PieSpec {
        title,
        text_info: PIE_TEXT_INFO.to_string(),
        groups,
    }
}

fn count_by_site(records: &[&LaunchRecord]) -> Vec<PieGroup> {
    let mut groups: Vec<PieGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.launch_site.as_str()).or_insert_with(|| {
            groups.push(PieGroup {
                label: record.launch_site.clone(),
                count: 0,
            });
            groups.len() - 1
        });
        groups[slot].count += 1;
    }
    groups
}

fn count_by_outcome(records: &[&LaunchRecord]) -> Vec<PieGroup> {
    let successes = records.iter().filter(|r| r.is_success()).count();
    let failures = records.len() - successes;

    [(Outcome::Success, successes), (Outcome::Failure, failures)]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(outcome, count)| PieGroup {
            label: outcome.label().to_string(),
            count,
        })
        .collect()
}

/// Build the payload/outcome scatter chart for the filtered records.
#[must_use]
pub fn build_scatter(records: &[&LaunchRecord], site: &SiteSelection) -> ScatterSpec {
    let title = match site {
        SiteSelection::All => "Payload vs. Outcome for All Sites".to_string(),
        SiteSelection::Site(id) => format!("Payload vs. Outcome for {id}"),
    };

    let points = records
        .iter()
        .map(|r| ScatterPoint {
            x: r.payload_mass_kg,
            y: r.outcome.class(),
            color_group: r.booster_version.clone(),
            tooltip: r.launch_site.clone(),
        })
        .collect();

    ScatterSpec {
        title,
        x_axis: Axis {
            title: PAYLOAD_AXIS_TITLE.to_string(),
            ticks: Vec::new(),
        },
        y_axis: Axis {
            title: OUTCOME_AXIS_TITLE.to_string(),
            ticks: outcome_ticks(),
        },
        marker: MarkerStyle::default(),
        points,
    }
}

/// Tick labels for the outcome axis: `0 -> Failure`, `1 -> Success`.
#[must_use]
pub fn outcome_ticks() -> Vec<AxisTick> {
    [Outcome::Failure, Outcome::Success]
        .into_iter()
        .map(|o| AxisTick {
            value: o.class(),
            text: o.label().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, mass: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord::new(site, mass, outcome, booster).unwrap()
    }

    /// Site A: 3 launches (2 successes), site B: 2 launches.
    fn scenario_records() -> Vec<LaunchRecord> {
        vec![
            record("A", 1000.0, Outcome::Success, "v1.0"),
            record("B", 6000.0, Outcome::Success, "FT"),
            record("A", 2000.0, Outcome::Failure, "v1.1"),
            record("A", 3000.0, Outcome::Success, "FT"),
            record("B", 7000.0, Outcome::Failure, "B4"),
        ]
    }

    fn refs(records: &[LaunchRecord]) -> Vec<&LaunchRecord> {
        records.iter().collect()
    }

    fn group(label: &str, count: usize) -> PieGroup {
        PieGroup {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_pie_all_sites_groups_by_site() {
        let records = scenario_records();
        let pie = build_pie(&refs(&records), &SiteSelection::All);
        assert_eq!(pie.groups, vec![group("A", 3), group("B", 2)]);
        assert_eq!(pie.title, "Total Success Launches By Site");
        assert_eq!(pie.text_info, "percent+label");
    }

    #[test]
    fn test_pie_single_site_groups_by_outcome() {
        let records = scenario_records();
        let site_a: Vec<_> = records.iter().filter(|r| r.launch_site == "A").collect();
        let pie = build_pie(&site_a, &SiteSelection::site("A"));
        assert_eq!(pie.groups, vec![group("Success", 2), group("Failure", 1)]);
        assert_eq!(pie.title, "Total Success Launches for A");
    }

    #[test]
    fn test_pie_single_site_omits_empty_outcome() {
        let records = vec![
            record("C", 100.0, Outcome::Success, "FT"),
            record("C", 200.0, Outcome::Success, "FT"),
        ];
        let pie = build_pie(&refs(&records), &SiteSelection::site("C"));
        assert_eq!(pie.groups, vec![group("Success", 2)]);
    }

    #[test]
    fn test_pie_counts_sum_to_input_len() {
        let records = scenario_records();
        let input = refs(&records);
        assert_eq!(build_pie(&input, &SiteSelection::All).total(), input.len());

        let site_b: Vec<_> = records.iter().filter(|r| r.launch_site == "B").collect();
        assert_eq!(
            build_pie(&site_b, &SiteSelection::site("B")).total(),
            site_b.len()
        );
    }

    #[test]
    fn test_pie_empty_input() {
        let pie = build_pie(&[], &SiteSelection::site("B"));
        assert!(pie.is_empty());
        assert_eq!(pie.total(), 0);

        assert!(build_pie(&[], &SiteSelection::All).is_empty());
    }

    #[test]
    fn test_scatter_projects_every_record() {
        let records = scenario_records();
        let scatter = build_scatter(&refs(&records), &SiteSelection::All);
        assert_eq!(scatter.points.len(), 5);
        assert_eq!(
            scatter.points[2],
            ScatterPoint {
                x: 2000.0,
                y: 0,
                color_group: "v1.1".to_string(),
                tooltip: "A".to_string(),
            }
        );
        assert_eq!(scatter.title, "Payload vs. Outcome for All Sites");
    }

    #[test]
    fn test_scatter_axes() {
        let scatter = build_scatter(&[], &SiteSelection::site("KSC LC-39A"));
        assert_eq!(scatter.title, "Payload vs. Outcome for KSC LC-39A");
        assert_eq!(scatter.x_axis.title, "Payload Mass (kg)");
        assert!(scatter.x_axis.ticks.is_empty());
        assert_eq!(scatter.y_axis.title, "Launch Outcome");
        assert_eq!(scatter.y_axis.ticks, outcome_ticks());
        assert_eq!(scatter.marker, MarkerStyle::default());
    }

    #[test]
    fn test_scatter_empty_input() {
        assert!(build_scatter(&[], &SiteSelection::All).is_empty());
    }

    #[test]
    fn test_outcome_ticks() {
        let ticks = outcome_ticks();
        assert_eq!(ticks.len(), 2);
        assert_eq!((ticks[0].value, ticks[0].text.as_str()), (0, "Failure"));
        assert_eq!((ticks[1].value, ticks[1].text.as_str()), (1, "Success"));
    }

    #[test]
    fn test_builders_are_deterministic() {
        let records = scenario_records();
        let input = refs(&records);
        assert_eq!(
            build_pie(&input, &SiteSelection::All),
            build_pie(&input, &SiteSelection::All)
        );
        assert_eq!(
            build_scatter(&input, &SiteSelection::All),
            build_scatter(&input, &SiteSelection::All)
        );
    }

    #[test]
    fn test_scatter_spec_serialization() {
        let records = scenario_records();
        let json = serde_json::to_value(build_scatter(&refs(&records[..1]), &SiteSelection::All))
            .unwrap();
        assert_eq!(json["points"][0]["color_group"], "v1.0");
        assert_eq!(json["y_axis"]["ticks"][1]["text"], "Success");
        assert!(json["x_axis"].get("ticks").is_none());
    }
}
