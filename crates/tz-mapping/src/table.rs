//! Legacy timezone name mapping table
//!
//! The table is loaded once at startup from a CSV reference file with three
//! columns per row:
//!
//! ```text
//! # windows name, territory, IANA candidates
//! W. Europe Standard Time,001,Europe/Berlin
//! W. Europe Standard Time,AT,Europe/Vienna
//! ```
//!
//! When the file cannot be read or parsed, [`build_table`] falls back to the
//! built-in [`DEFAULT_MAPPINGS`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use crate::{MappingError, Result};

/// Built-in mappings used when the reference file is unavailable
pub const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    ("Central Europe Standard Time", "Europe/Berlin"),
    ("W. Europe Standard Time", "Europe/Berlin"),
    ("Romance Standard Time", "Europe/Paris"),
    ("GMT Standard Time", "Europe/London"),
    ("E. Europe Standard Time", "Europe/Bucharest"),
    ("Eastern Standard Time", "America/New_York"),
    ("Pacific Standard Time", "America/Los_Angeles"),
    ("Central Standard Time", "America/Chicago"),
    ("Mountain Standard Time", "America/Denver"),
    ("AUS Eastern Standard Time", "Australia/Sydney"),
    ("Tokyo Standard Time", "Asia/Tokyo"),
    ("China Standard Time", "Asia/Shanghai"),
];

/// City tokens that make a candidate preferred alongside any `Europe/*` zone
const PREFERRED_CITIES: [&str; 5] = ["Berlin", "Paris", "London", "Rome", "Madrid"];

/// Immutable mapping from legacy timezone names to IANA names
///
/// Iterates in sorted order of legacy names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<String, String>,
}

impl MappingTable {
    /// Table containing only the built-in mappings
    #[must_use]
    pub fn builtin() -> Self {
        DEFAULT_MAPPINGS.iter().copied().collect()
    }

    /// Load a table from a CSV mapping file
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is not valid CSV, or
    /// yields no usable rows.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse a table from CSV records
    ///
    /// Rows with fewer than three fields or with undecodable text are skipped.
    /// Candidates for the same legacy name are merged across rows before one
    /// is selected with [`select_candidate`].
    ///
    /// # Errors
    /// Returns an error when the input cannot be read as CSV or no row is
    /// usable.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);

        let mut candidates: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                    warn!("Skipping undecodable mapping row: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if record.len() < 3 {
                debug!("Skipping mapping row with {} fields", record.len());
                continue;
            }

            let legacy = &record[0];
            if legacy.is_empty() {
                continue;
            }

            let seen = candidates.entry(legacy.to_string()).or_default();
            for candidate in record[2].split_whitespace() {
                if !seen.iter().any(|c| c == candidate) {
                    seen.push(candidate.to_string());
                }
            }
        }

        let table: Self = candidates
            .iter()
            .filter_map(|(legacy, names)| {
                select_candidate(names.as_slice()).map(|standard| (legacy.as_str(), standard))
            })
            .collect();

        if table.is_empty() {
            return Err(MappingError::Empty);
        }
        Ok(table)
    }

    /// Look up the IANA name for a legacy name
    #[must_use]
    pub fn get(&self, legacy: &str) -> Option<&str> {
        self.entries.get(legacy).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(legacy, standard)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(legacy, standard)| (legacy.as_str(), standard.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .filter_map(|(legacy, standard)| {
                let (legacy, standard): (String, String) = (legacy.into(), standard.into());
                (!legacy.is_empty() && !standard.is_empty()).then_some((legacy, standard))
            })
            .collect();
        Self { entries }
    }
}

/// Pick one IANA name out of the candidates collected for a legacy name
///
/// European zones and zones naming a major European city win; otherwise the
/// first candidate is used.
#[must_use]
pub fn select_candidate<S: AsRef<str>>(candidates: &[S]) -> Option<&str> {
    candidates
        .iter()
        .map(|c| c.as_ref())
        .find(|name: &&str| is_preferred(name))
        .or_else(|| candidates.first().map(|c| c.as_ref()))
}

fn is_preferred(name: &str) -> bool {
    name.contains("Europe") || PREFERRED_CITIES.iter().any(|city| name.contains(city))
}

/// Build the mapping table used for the lifetime of the process
///
/// Never fails: any problem with the mapping file is logged and the built-in
/// table is returned instead.
pub fn build_table(path: impl AsRef<Path>) -> MappingTable {
    let path = path.as_ref();
    match MappingTable::from_path(path) {
        Ok(table) => {
            info!(
                "Loaded {} timezone mappings from {}",
                table.len(),
                path.display()
            );
            table
        }
        Err(e) => {
            warn!(
                "Could not load timezone mappings from {}: {}; using built-in table",
                path.display(),
                e
            );
            MappingTable::builtin()
        }
    }
}
