//! # Tag Maps
//!
//! A tag map tells the transcript extractor which role spoke in which
//! colour, e.g. `RGB(255,0,0) -> Fred`, `#0B5DA2 -> Susie`. An empty map is
//! valid; turns are then labelled with their colour.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::color::{ColorError, Rgb};

pub const EXPERT_COLOR: Rgb = Rgb::new(74, 21, 148);
pub const AI_COLOR: Rgb = Rgb::new(11, 93, 162);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagMapError {
    #[error("bad colour '{given}': {source}")]
    Color {
        given: String,
        #[source]
        source: ColorError,
    },
    #[error("role name for {0} must not be empty")]
    EmptyRole(Rgb),
    #[error("{color} is mapped to both '{existing}' and '{new}'")]
    DuplicateColor {
        color: Rgb,
        existing: String,
        new: String,
    },
    #[error("the number of colour-name arguments must be even to form complete pairs; received {0}")]
    OddPairs(usize),
    #[error("no arguments provided; a filename is required")]
    MissingFile,
    #[error("tag '{0}' must be of the form COLOUR=ROLE")]
    BadAssignment(String),
}

/// Ordered colour-to-role mapping. Insertion order is kept so listings
/// show roles the way the caller gave them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(Rgb, String)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map used for therapist/AI discussion transcripts.
    pub fn default_discussion() -> Self {
        Self {
            entries: vec![
                (EXPERT_COLOR, "Expert".to_string()),
                (AI_COLOR, "AI".to_string()),
            ],
        }
    }

    pub fn insert(&mut self, color: Rgb, role: &str) -> Result<(), TagMapError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(TagMapError::EmptyRole(color));
        }
        if let Some(existing) = self.role_for(&color) {
            return Err(TagMapError::DuplicateColor {
                color,
                existing: existing.to_string(),
                new: role.to_string(),
            });
        }
        self.entries.push((color, role.to_string()));
        Ok(())
    }

    /// Builds a map from `(colour, role)` string pairs, validating every
    /// colour and role along the way.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, TagMapError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = Self::new();
        for (color, role) in pairs {
            let rgb = Rgb::from_str(color).map_err(|source| TagMapError::Color {
                given: color.to_string(),
                source,
            })?;
            map.insert(rgb, role)?;
        }
        Ok(map)
    }

    /// Builds a map from `COLOUR=ROLE` assignments, as given to `--tag`.
    pub fn from_assignments<S: AsRef<str>>(tags: &[S]) -> Result<Self, TagMapError> {
        let pairs = tags
            .iter()
            .map(|tag| {
                let tag = tag.as_ref();
                tag.rsplit_once('=')
                    .ok_or_else(|| TagMapError::BadAssignment(tag.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(pairs)
    }

    pub fn role_for(&self, color: &Rgb) -> Option<&str> {
        self.entries
            .iter()
            .find(|(rgb, _)| rgb == color)
            .map(|(_, role)| role.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rgb, &str)> {
        self.entries.iter().map(|(rgb, role)| (rgb, role.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits `colour name colour name ... file` into the tag map and the file.
///
/// The last argument is always the file; everything before it must form
/// complete colour/name pairs.
pub fn split_pairs_and_file<S: AsRef<str>>(args: &[S]) -> Result<(TagMap, PathBuf), TagMapError> {
    let Some((file, pair_components)) = args.split_last() else {
        return Err(TagMapError::MissingFile);
    };

    if pair_components.len() % 2 != 0 {
        return Err(TagMapError::OddPairs(pair_components.len()));
    }

    let pairs = pair_components
        .chunks_exact(2)
        .map(|pair| (pair[0].as_ref(), pair[1].as_ref()));
    let tagmap = TagMap::from_pairs(pairs)?;

    Ok((tagmap, PathBuf::from(file.as_ref())))
}
