//! Syllabifies ancient Greek names, the first step towards predicting a
//! bearer's societal status from the name.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::NamesError;

const SYLLABLE_CATALOG: &[(&str, &[&str])] = &[("labile", &["la", "bile"]), ("facile", &["fa", "cile"])];

#[derive(Debug, Clone)]
pub struct NameClassifier {
    filter: Vec<String>,
    syllables: BTreeMap<String, Vec<String>>,
}

impl NameClassifier {
    /// `filter` lists statuses to leave out of the output.
    pub fn new(name_file: impl AsRef<Path>, filter: Vec<String>) -> Result<Self, NamesError> {
        let name_file = name_file.as_ref();
        if !name_file.exists() {
            return Err(NamesError::NotFound(name_file.to_path_buf()));
        }

        Ok(Self {
            filter,
            syllables: syllabify(name_file)?,
        })
    }

    pub fn syllables(&self) -> &BTreeMap<String, Vec<String>> {
        &self.syllables
    }

    pub fn ignores(&self, status: &str) -> bool {
        self.filter.iter().any(|s| s.eq_ignore_ascii_case(status))
    }

    pub fn filter(&self) -> &[String] {
        &self.filter
    }
}

/// Maps each name in `name_file`, one per line, to its syllables.
pub fn syllabify(name_file: &Path) -> Result<BTreeMap<String, Vec<String>>, NamesError> {
    let content = fs::read_to_string(name_file).map_err(|source| NamesError::Io {
        path: name_file.to_path_buf(),
        source,
    })?;

    content
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| extract_syllables(name).map(|syllables| (name.to_string(), syllables)))
        .collect()
}

pub fn extract_syllables(name: &str) -> Result<Vec<String>, NamesError> {
    SYLLABLE_CATALOG
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, syllables)| syllables.iter().map(|s| s.to_string()).collect())
        .ok_or_else(|| NamesError::UnknownName(name.to_string()))
}
