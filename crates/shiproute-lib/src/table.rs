//! Header resolution shared by the CSV loaders.
//!
//! Input files come from spreadsheets with inconsistent header spelling
//! (`Port Name`, `port_name`, `PortName`), so every canonical column is matched
//! against a list of synonyms after normalization.

use std::collections::BTreeMap;

use csv::StringRecord;

/// Resolved column positions for one CSV file.
#[derive(Debug, Clone)]
pub(crate) struct HeaderMap {
    columns: BTreeMap<&'static str, usize>,
}

impl HeaderMap {
    /// Match `headers` against `synonyms` (canonical column name paired with the
    /// header spellings accepted for it); every canonical column is required.
    ///
    /// On failure returns a message naming the missing columns and the headers
    /// that were available.
    pub(crate) fn resolve(
        headers: &StringRecord,
        synonyms: &[(&'static str, &[&str])],
    ) -> std::result::Result<Self, String> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let mut columns = BTreeMap::new();
        for (canon, alternatives) in synonyms {
            let position = alternatives.iter().find_map(|alt| {
                let alt = normalize_header(alt);
                normalized.iter().position(|header| *header == alt)
            });
            if let Some(position) = position {
                columns.insert(*canon, position);
            }
        }

        let missing: Vec<&str> = synonyms
            .iter()
            .map(|(canon, _)| *canon)
            .filter(|canon| !columns.contains_key(canon))
            .collect();

        if !missing.is_empty() {
            return Err(format!(
                "missing required columns: {}. Available: {}",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            ));
        }

        Ok(Self { columns })
    }

    /// Trimmed value of a canonical column, if present and non-empty.
    pub(crate) fn get<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.columns
            .get(column)
            .and_then(|&index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Lowercase and keep only ASCII alphanumerics so `Port Name` == `port_name`.
fn normalize_header(header: &str) -> String {
    header
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
