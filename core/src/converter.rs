//! # Discussion Converter
//!
//! Runs through the `.rtf` files of a directory and converts each into a
//! `.jsonl` file of `{<role>: <utterance>}` turns, then combines the
//! `.jsonl` files into one JSON document:
//!
//! ```text
//! [
//!   {"clientName": "Megan",
//!    "defense": "denial",
//!    "conversation": [{"Expert": "..."}, {"AI": "..."}, ...]},
//!   ...
//! ]
//! ```
//!
//! Each file name is a camel-cased concatenation of client name and
//! defense, e.g. `meganDenial.rtf`.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scriptor_common::tagmap::TagMap;

use crate::errors::ConvertError;
use crate::rtf::read_rtf;
use crate::script::{Turn, extract_script};

pub const COMBINED_FILE_NAME: &str = "discussions.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub client_name: String,
    pub defense: String,
    pub conversation: Vec<Turn>,
}

/// Outcome of converting a directory. Failed files do not stop the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, ConvertError)>,
}

pub struct DiscussionConverter {
    rtf_dir: PathBuf,
    jsonl_dir: PathBuf,
    tagmap: TagMap,
    strict: bool,
}

impl DiscussionConverter {
    pub fn new(
        rtf_dir: impl Into<PathBuf>,
        jsonl_dir: impl Into<PathBuf>,
        tagmap: TagMap,
        strict: bool,
    ) -> Self {
        Self {
            rtf_dir: rtf_dir.into(),
            jsonl_dir: jsonl_dir.into(),
            tagmap,
            strict,
        }
    }

    pub fn jsonl_dir(&self) -> &Path {
        &self.jsonl_dir
    }

    pub fn rtf_files(&self) -> Result<Vec<PathBuf>, ConvertError> {
        files_with_extension(&self.rtf_dir, "rtf")
    }

    /// `<jsonl_dir>/<rtf file stem>.jsonl`
    pub fn jsonl_path(&self, rtf_path: &Path) -> PathBuf {
        let stem = rtf_path.file_stem().unwrap_or(rtf_path.as_os_str());
        self.jsonl_dir.join(stem).with_extension("jsonl")
    }

    /// Converts one RTF file. Files whose name does not split into client
    /// and defense are rejected before anything is written.
    pub fn rtf_to_jsonl(&self, rtf_path: &Path) -> Result<PathBuf, ConvertError> {
        parse_fname(rtf_path)?;

        let rtf = read_rtf(rtf_path).map_err(ConvertError::io(rtf_path))?;
        let script = extract_script(&rtf, &self.tagmap, self.strict).map_err(|source| {
            ConvertError::Rtf {
                path: rtf_path.to_path_buf(),
                source,
            }
        })?;

        let jsonl_path = self.jsonl_path(rtf_path);
        let jsonl = script.to_jsonl().map_err(|source| ConvertError::Json {
            path: jsonl_path.clone(),
            source,
        })?;
        fs::write(&jsonl_path, jsonl).map_err(ConvertError::io(&jsonl_path))?;

        debug!(
            "{} -> {} ({} turns)",
            rtf_path.display(),
            jsonl_path.display(),
            script.len()
        );
        Ok(jsonl_path)
    }

    /// Converts every `.rtf` file in parallel. `on_done` is called once per
    /// file with whether it succeeded, from whichever thread converted it.
    pub fn convert_all<F>(&self, on_done: F) -> Result<BatchReport, ConvertError>
    where
        F: Fn(&Path, bool) + Sync,
    {
        if !self.jsonl_dir.is_dir() {
            fs::create_dir_all(&self.jsonl_dir).map_err(ConvertError::io(&self.jsonl_dir))?;
        }

        let results: Vec<(PathBuf, Result<PathBuf, ConvertError>)> = self
            .rtf_files()?
            .into_par_iter()
            .map(|rtf_path| {
                let result = self.rtf_to_jsonl(&rtf_path);
                on_done(&rtf_path, result.is_ok());
                (rtf_path, result)
            })
            .collect();

        let mut report = BatchReport::default();
        for (rtf_path, result) in results {
            match result {
                Ok(jsonl_path) => report.converted.push(jsonl_path),
                Err(e) => report.failed.push((rtf_path, e)),
            }
        }
        Ok(report)
    }

    /// Loads every `.jsonl` file of the output directory, in file name order.
    pub fn combine(&self) -> Result<Vec<Discussion>, ConvertError> {
        files_with_extension(&self.jsonl_dir, "jsonl")?
            .iter()
            .map(|jsonl_path| -> Result<Discussion, ConvertError> {
                let (client_name, defense) = parse_fname(jsonl_path)?;
                Ok(Discussion {
                    client_name,
                    defense,
                    conversation: load_turns(jsonl_path)?,
                })
            })
            .collect()
    }
}

/// Splits a file name such as `/foo/bar/adamDenial.jsonl` into
/// `("Adam", "denial")`.
pub fn parse_fname(path: impl AsRef<Path>) -> Result<(String, String), ConvertError> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    match camel_words(stem)[..] {
        [client, defense] => Ok((capitalize(client), defense.to_lowercase())),
        _ => Err(ConvertError::BadFileName(path.display().to_string())),
    }
}

/// Lower-case runs and capitalised words; everything else separates.
fn camel_words(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut words = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        if bytes[i].is_ascii_uppercase() {
            i += 1;
        } else if !bytes[i].is_ascii_lowercase() {
            i += 1;
            continue;
        }
        while i < bytes.len() && bytes[i].is_ascii_lowercase() {
            i += 1;
        }
        words.push(&s[start..i]);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized: String = first.to_uppercase().collect();
            capitalized.push_str(&chars.as_str().to_lowercase());
            capitalized
        }
        None => String::new(),
    }
}

pub fn load_turns(path: &Path) -> Result<Vec<Turn>, ConvertError> {
    let file = fs::File::open(path).map_err(ConvertError::io(path))?;
    let mut turns = Vec::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(ConvertError::io(path))?;
        if line.trim().is_empty() {
            continue;
        }
        let turn = serde_json::from_str(&line).map_err(|source| ConvertError::BadTurn {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        turns.push(turn);
    }
    Ok(turns)
}

pub fn write_combined(discussions: &[Discussion], outfile: &Path) -> Result<(), ConvertError> {
    let file = fs::File::create(outfile).map_err(ConvertError::io(outfile))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, discussions).map_err(|source| ConvertError::Json {
        path: outfile.to_path_buf(),
        source,
    })?;
    writeln!(writer).map_err(ConvertError::io(outfile))?;
    writer.flush().map_err(ConvertError::io(outfile))
}

/// Regular files in `dir` with the given extension, sorted by name.
fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ConvertError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(ConvertError::io(dir))? {
        let path = entry.map_err(ConvertError::io(dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_RTF: &str = r"{\rtf1{\colortbl;\red74\green21\blue148;\red11\green93\blue162;}
\cf1 Shall we take a look?\
\cf2 That could feel like pressure.}";

    #[test]
    fn test_parse_fname() {
        assert_eq!(
            parse_fname("/foo/bar/adamDenial.jsonl").unwrap(),
            ("Adam".to_string(), "denial".to_string())
        );
        assert_eq!(
            parse_fname("MeganDenial.rtf").unwrap(),
            ("Megan".to_string(), "denial".to_string())
        );
        assert_eq!(
            parse_fname("tamara_projection.rtf").unwrap(),
            ("Tamara".to_string(), "projection".to_string())
        );

        assert!(matches!(parse_fname("megan.rtf"), Err(ConvertError::BadFileName(_))));
        assert!(matches!(
            parse_fname("meganDenialAgain.rtf"),
            Err(ConvertError::BadFileName(_))
        ));
        assert!(matches!(parse_fname("ABC.rtf"), Err(ConvertError::BadFileName(_))));
    }

    #[test]
    fn test_jsonl_path() {
        let converter = DiscussionConverter::new("/in", "/out", TagMap::new(), false);
        assert_eq!(
            converter.jsonl_path(Path::new("/in/meganDenial.rtf")),
            PathBuf::from("/out/meganDenial.jsonl")
        );
    }

    #[test]
    fn test_rtf_to_jsonl_and_combine() {
        let dir = tempfile::tempdir().unwrap();
        let rtf_dir = dir.path().join("RtfDir");
        let jsonl_dir = dir.path().join("JsonlDir");
        fs::create_dir(&rtf_dir).unwrap();
        fs::write(rtf_dir.join("meganDenial.rtf"), MINIMAL_RTF).unwrap();
        fs::write(rtf_dir.join("notes.txt"), "ignored").unwrap();

        let converter =
            DiscussionConverter::new(&rtf_dir, &jsonl_dir, TagMap::default_discussion(), true);
        let report = converter.convert_all(|_, _| {}).unwrap();

        assert!(report.failed.is_empty());
        assert_eq!(report.converted, vec![jsonl_dir.join("meganDenial.jsonl")]);
        assert_eq!(
            fs::read_to_string(jsonl_dir.join("meganDenial.jsonl")).unwrap(),
            "{\"Expert\":\"Shall we take a look?\"}\n{\"AI\":\"That could feel like pressure.\"}\n"
        );

        let discussions = converter.combine().unwrap();
        assert_eq!(
            discussions,
            vec![Discussion {
                client_name: "Megan".to_string(),
                defense: "denial".to_string(),
                conversation: vec![
                    Turn::new("Expert", "Shall we take a look?"),
                    Turn::new("AI", "That could feel like pressure."),
                ],
            }]
        );
    }

    #[test]
    fn test_failed_files_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let rtf_dir = dir.path().join("rtf");
        fs::create_dir(&rtf_dir).unwrap();
        fs::write(rtf_dir.join("meganDenial.rtf"), MINIMAL_RTF).unwrap();
        fs::write(rtf_dir.join("badname.rtf"), MINIMAL_RTF).unwrap();
        fs::write(rtf_dir.join("tamaraDenial.rtf"), r"{\rtf1 no colours here}").unwrap();

        let converter =
            DiscussionConverter::new(&rtf_dir, dir.path().join("jsonl"), TagMap::default_discussion(), false);
        let report = converter.convert_all(|_, _| {}).unwrap();

        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failed.len(), 2);
        assert!(matches!(report.failed[0].1, ConvertError::BadFileName(_)));
        assert!(matches!(report.failed[1].1, ConvertError::Rtf { .. }));
    }

    #[test]
    fn test_combine_rejects_malformed_turns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("meganDenial.jsonl"), "{\"AI\":\"ok\"}\n[1,2]\n").unwrap();

        let converter = DiscussionConverter::new(dir.path(), dir.path(), TagMap::new(), false);
        assert!(matches!(
            converter.combine(),
            Err(ConvertError::BadTurn { line: 2, .. })
        ));
    }

    #[test]
    fn test_write_combined_shape() {
        let dir = tempfile::tempdir().unwrap();
        let outfile = dir.path().join(COMBINED_FILE_NAME);
        let discussions = vec![Discussion {
            client_name: "Tamara".to_string(),
            defense: "denial".to_string(),
            conversation: vec![Turn::new("Expert", "Hello")],
        }];

        write_combined(&discussions, &outfile).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&outfile).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "clientName": "Tamara",
                "defense": "denial",
                "conversation": [{"Expert": "Hello"}]
            }])
        );
    }
}
