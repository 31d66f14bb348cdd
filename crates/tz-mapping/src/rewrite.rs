//! TZID rewriting for iCalendar text
//!
//! Legacy names are replaced in three syntactic positions:
//! - `TZID:<name>` property values
//! - `TZID=<name>` / `TZID="<name>"` parameters (quotes dropped)
//! - `;TZID=<name>` parameters inside a parameter list (quotes kept as found)
//!
//! The document is otherwise treated as an opaque text buffer.

use regex::{Captures, NoExpand, Regex};
use tracing::warn;

use crate::MappingTable;

/// Patterns for one `(legacy, standard)` entry
#[derive(Debug, Clone)]
struct CompiledEntry {
    legacy: String,
    standard: String,
    property: Regex,
    parameter: Regex,
    listed: Regex,
}

impl CompiledEntry {
    fn new(legacy: &str, standard: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(legacy);
        Ok(Self {
            legacy: legacy.to_string(),
            standard: standard.to_string(),
            property: Regex::new(&format!("TZID:{escaped}"))?,
            parameter: Regex::new(&format!("TZID=\"?{escaped}\"?"))?,
            listed: Regex::new(&format!(";TZID=(\"?){escaped}(\"?)"))?,
        })
    }

    fn apply(&self, text: &str) -> String {
        let replacement = format!("TZID:{}", self.standard);
        let text = self.property.replace_all(text, NoExpand(&replacement));

        let replacement = format!("TZID={}", self.standard);
        let text = replace_unlisted(&self.parameter, &text, &replacement);

        let text = self.listed.replace_all(&text, |caps: &Captures| {
            format!(";TZID={}{}{}", &caps[1], self.standard, &caps[2])
        });
        text.into_owned()
    }
}

/// Replace every match of `pattern` that is not directly preceded by `;`
///
/// Matches preceded by `;` are parameter-list occurrences and keep their
/// quoting, so they are left for the list pass.
fn replace_unlisted(pattern: &Regex, text: &str, replacement: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if text[..m.start()].ends_with(';') {
            continue;
        }
        output.push_str(&text[last..m.start()]);
        output.push_str(replacement);
        last = m.end();
    }
    output.push_str(&text[last..]);
    output
}

/// Compiled TZID rewriter for a mapping table
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    entries: Vec<CompiledEntry>,
}

impl Rewriter {
    /// Compile substitution patterns for every entry of `table`
    ///
    /// Entries whose pattern cannot be compiled are skipped with a warning.
    #[must_use]
    pub fn new(table: &MappingTable) -> Self {
        let entries = table
            .iter()
            .filter_map(|(legacy, standard)| match CompiledEntry::new(legacy, standard) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping timezone mapping for {:?}: {}", legacy, e);
                    None
                }
            })
            .collect();
        Self { entries }
    }

    /// Number of mappings applied by this rewriter
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite legacy timezone names in `text`
    ///
    /// Entries are applied in table order, each against the output of the
    /// previous one. Text without a known legacy name is returned unchanged.
    #[must_use]
    pub fn rewrite(&self, text: &str) -> String {
        let mut output = text.to_string();
        for entry in &self.entries {
            if output.contains(entry.legacy.as_str()) {
                output = entry.apply(&output);
            }
        }
        output
    }
}

/// Rewrite legacy timezone names in `text` using `table`
///
/// Compiles the table on every call; long-lived callers should keep a
/// [`Rewriter`] instead.
#[must_use]
pub fn rewrite(text: &str, table: &MappingTable) -> String {
    Rewriter::new(table).rewrite(text)
}
