use std::path::PathBuf;

use scriptor_common::color::Rgb;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RtfError {
    #[error("file does not contain an RTF color table")]
    MissingColorTable,
    #[error("color table entry {index} has {component} value {value}, outside 0 to 255")]
    BadColor {
        index: usize,
        component: &'static str,
        value: i32,
    },
    #[error("found '\\cf{0}' in RTF, but the color table has no such entry")]
    UnknownColorIndex(i32),
    #[error("text in color {index} ({color}) has no role in the tag map")]
    UnmappedColor { index: usize, color: Rgb },
    #[error("malformed hex escape at byte {offset}; expected \\'hh")]
    BadHexEscape { offset: usize },
    #[error("control word at byte {offset} has a parameter that does not fit an integer")]
    BadParameter { offset: usize },
    #[error("unmatched '}}' at byte {offset}")]
    UnbalancedGroup { offset: usize },
    #[error("input ends in the middle of a control sequence")]
    UnexpectedEof,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse RTF in {path}: {source}")]
    Rtf {
        path: PathBuf,
        #[source]
        source: RtfError,
    },
    #[error("file name {0} is not partitionable into two parts")]
    BadFileName(String),
    #[error("cannot write JSON to {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line} of {path} is not a {{role: utterance}} object: {source}")]
    BadTurn {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ConvertError::Io { path, source }
    }
}

#[derive(Debug, Error)]
pub enum NamesError {
    #[error("name file {0} not found")]
    NotFound(PathBuf),
    #[error("cannot read name file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown name '{0}'")]
    UnknownName(String),
}
