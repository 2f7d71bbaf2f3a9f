//! Column layout of the launch CSV.
//!
//! Columns are matched by header name, so their order in the file does not
//! matter and extra columns are ignored.

/// Column holding the launch site identifier.
pub const LAUNCH_SITE_COLUMN: &str = "Launch Site";

/// Column holding the payload mass in kilograms.
pub const PAYLOAD_MASS_COLUMN: &str = "Payload Mass (kg)";

/// Column holding the binary outcome class.
pub const CLASS_COLUMN: &str = "class";

/// Accepted names for the booster column, in order of preference.
///
/// The category column groups serial-level variants (`F9 FT B1029.1`) into a
/// handful of families (`FT`), which keeps the scatter legend readable. The
/// per-vehicle columns are fallbacks for files that lack it.
pub const BOOSTER_COLUMNS: &[&str] = &[
    "Booster Version Category",
    "BoosterVersion",
    "Booster Version",
];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    /// Index of the launch site column.
    pub launch_site: usize,
    /// Index of the payload mass column.
    pub payload_mass: usize,
    /// Index of the outcome class column.
    pub class: usize,
    /// Index of the booster column.
    pub booster: usize,
}

impl ColumnIndex {
    /// Locate the required columns in `headers`.
    ///
    /// Returns the name of the first required column that is missing.
    pub fn resolve<'h>(
        headers: impl IntoIterator<Item = &'h str> + Clone,
    ) -> std::result::Result<Self, &'static str> {
        let find = |name: &str| {
            headers
                .clone()
                .into_iter()
                .position(|h| h.trim() == name)
        };

        let launch_site = find(LAUNCH_SITE_COLUMN).ok_or(LAUNCH_SITE_COLUMN)?;
        let payload_mass = find(PAYLOAD_MASS_COLUMN).ok_or(PAYLOAD_MASS_COLUMN)?;
        let class = find(CLASS_COLUMN).ok_or(CLASS_COLUMN)?;
        let booster = BOOSTER_COLUMNS
            .iter()
            .find_map(|&name| find(name))
            .ok_or(BOOSTER_COLUMNS[0])?;

        Ok(Self {
            launch_site,
            payload_mass,
            class,
            booster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reordered_headers() {
        let headers = [
            "Flight Number",
            "class",
            "Launch Site",
            "Booster Version Category",
            "Payload Mass (kg)",
        ];
        let index = ColumnIndex::resolve(headers).unwrap();
        assert_eq!(index.launch_site, 2);
        assert_eq!(index.payload_mass, 4);
        assert_eq!(index.class, 1);
        assert_eq!(index.booster, 3);
    }

    #[test]
    fn test_resolve_prefers_booster_category() {
        let headers = [
            "Launch Site",
            "Payload Mass (kg)",
            "class",
            "Booster Version",
            "Booster Version Category",
        ];
        let index = ColumnIndex::resolve(headers).unwrap();
        assert_eq!(index.booster, 4);
    }

    #[test]
    fn test_resolve_accepts_booster_alias() {
        let headers = ["Launch Site", "Payload Mass (kg)", "class", "BoosterVersion"];
        let index = ColumnIndex::resolve(headers).unwrap();
        assert_eq!(index.booster, 3);
    }

    #[test]
    fn test_resolve_trims_header_whitespace() {
        let headers = [" Launch Site ", "Payload Mass (kg)", "class", "BoosterVersion"];
        assert!(ColumnIndex::resolve(headers).is_ok());
    }

    #[test]
    fn test_resolve_missing_column() {
        let headers = ["Launch Site", "class", "BoosterVersion"];
        assert_eq!(ColumnIndex::resolve(headers), Err(PAYLOAD_MASS_COLUMN));
    }

    #[test]
    fn test_resolve_missing_booster() {
        let headers = ["Launch Site", "Payload Mass (kg)", "class"];
        assert_eq!(ColumnIndex::resolve(headers), Err("Booster Version Category"));
    }
}
