//! Core record types for launchdash.
//!
//! This module defines the fundamental data structures for representing
//! a single historical launch and its outcome.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Binary outcome of a launch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The launch failed (class 0).
    Failure,
    /// The launch succeeded (class 1).
    Success,
}

impl Outcome {
    /// Interpret a numeric outcome class.
    ///
    /// # Errors
    ///
    /// Returns an error if `class` is neither 0 nor 1.
    pub fn from_class(class: u8) -> Result<Self> {
        match class {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(Error::invalid_record(format!(
                "outcome class must be 0 or 1, got {other}"
            ))),
        }
    }

    /// The numeric class used on the scatter chart's y axis.
    #[must_use]
    pub fn class(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    /// Human-readable label, used for pie groups and axis ticks.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Failure => "Failure",
            Self::Success => "Success",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the launch dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Identifier of the launch site.
    pub launch_site: String,

    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,

    /// Whether the launch succeeded.
    pub outcome: Outcome,

    /// First-stage booster variant.
    pub booster_version: String,
}

impl LaunchRecord {
    /// Create a new record, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the site is empty or the payload mass is negative
    /// or not finite.
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version: impl Into<String>,
    ) -> Result<Self> {
        let record = Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version: booster_version.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the record's invariants.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.launch_site.trim().is_empty() {
            return Err(Error::invalid_record("launch site must not be empty"));
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(Error::invalid_record(format!(
                "payload mass must be a non-negative number, got {}",
                self.payload_mass_kg
            )));
        }
        Ok(())
    }

    /// Check if this launch succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}
