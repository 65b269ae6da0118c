//! # Transcript Extraction
//!
//! Runs through RTF of coloured text and produces a script, one turn per
//! contiguous run of text spoken in the same role. With red mapped to Fred
//! and blue to Susie,
//!
//! ```text
//! {\colortbl;\red255\green0\blue0;\red0\green0\blue255;}
//! \cf1 I'm looking for my glasses.\
//! \cf2 They are on your head
//! ```
//!
//! becomes
//!
//! ```text
//! Fred: I'm looking for my glasses.
//! Susie: They are on your head
//! ```
//!
//! Without a tag map the turns are labelled with their colour, which still
//! separates differently coloured text into its own paragraph.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use scriptor_common::tagmap::TagMap;

use crate::errors::RtfError;
use crate::rtf::charset::{self, CP1252};
use crate::rtf::color_table::ColorTable;
use crate::rtf::lexer::{Lexer, Token};

/// Label for text written in the reader's default colour.
pub const DEFAULT_ROLE: &str = "default";

/// Groups whose content is never document text.
const DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "expandedcolortbl",
    "stylesheet",
    "listtable",
    "listoverridetable",
    "info",
    "pict",
    "object",
    "header",
    "headerl",
    "headerr",
    "headerf",
    "footer",
    "footerl",
    "footerr",
    "footerf",
    "footnote",
    "fldinst",
    "revtbl",
    "rsidtbl",
    "generator",
    "themedata",
    "colorschememapping",
    "latentstyles",
    "datastore",
    "xmlnstbl",
];

/// One utterance. Serialises as `{"<role>": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: String,
    pub text: String,
}

impl Turn {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }
}

impl Serialize for Turn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.role, &self.text)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Turn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((role, text)), None) => Ok(Turn { role, text }),
            _ => Err(D::Error::custom("a turn must be a single {role: utterance} object")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub turns: Vec<Turn>,
}

impl Script {
    /// One `{"<role>": "<text>"}` object per line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for turn in &self.turns {
            out.push_str(&serde_json::to_string(turn)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Movie-script rendering, `Role: text` per turn.
    pub fn to_text(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}\n", turn.role, turn.text))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Extracts the turns of `rtf`, labelling each by the role `tagmap` gives
/// its colour. With `strict`, text in a colour missing from the tag map is
/// an error; otherwise the turn is labelled with the colour itself.
pub fn extract_script(rtf: &str, tagmap: &TagMap, strict: bool) -> Result<Script, RtfError> {
    let table = ColorTable::parse(rtf)?;
    let mut extractor = Extractor::new(&table, tagmap, strict);

    for spanned in Lexer::new(rtf).spanned() {
        let (token, span) = spanned?;
        extractor.feed(token, span.start)?;
    }

    extractor.finish()
}

/// Formatting state scoped by `{ }`.
#[derive(Debug, Clone, Copy)]
struct GroupState {
    color: usize,
    unicode_fallback: usize,
    skip: bool,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            color: 0,
            unicode_fallback: 1,
            skip: false,
        }
    }
}

struct Extractor<'a> {
    table: &'a ColorTable,
    tagmap: &'a TagMap,
    strict: bool,
    codepage: i32,
    state: GroupState,
    stack: Vec<GroupState>,
    group_opened: bool,
    fallback_left: usize,
    /// First half of a UTF-16 pair written as two `\u` words.
    high_surrogate: Option<u16>,
    open: Option<Turn>,
    turns: Vec<Turn>,
}

impl<'a> Extractor<'a> {
    fn new(table: &'a ColorTable, tagmap: &'a TagMap, strict: bool) -> Self {
        Self {
            table,
            tagmap,
            strict,
            codepage: CP1252,
            state: GroupState::default(),
            stack: Vec::new(),
            group_opened: false,
            fallback_left: 0,
            high_surrogate: None,
            open: None,
            turns: Vec::new(),
        }
    }

    fn feed(&mut self, token: Token, offset: usize) -> Result<(), RtfError> {
        if std::mem::take(&mut self.group_opened) {
            match &token {
                Token::ControlSymbol('*') => self.state.skip = true,
                Token::ControlWord { name, .. } if DESTINATIONS.contains(&name.as_str()) => {
                    self.state.skip = true
                }
                _ => {}
            }
        }

        match token {
            Token::GroupStart => {
                self.stack.push(self.state);
                self.group_opened = true;
                self.fallback_left = 0;
            }
            Token::GroupEnd => {
                self.flush_surrogate()?;
                self.state = self
                    .stack
                    .pop()
                    .ok_or(RtfError::UnbalancedGroup { offset })?;
                self.fallback_left = 0;
            }
            _ if self.state.skip => {}
            Token::ControlWord { name, param } => {
                self.fallback_left = 0;
                self.control_word(&name, param)?;
            }
            Token::ControlSymbol(symbol) => self.control_symbol(symbol)?,
            Token::Hex(byte) => {
                if self.fallback_left > 0 {
                    self.fallback_left -= 1;
                } else {
                    let c = charset::decode_byte(byte, self.codepage);
                    self.push_text(c.encode_utf8(&mut [0; 4]))?;
                }
            }
            Token::Text(text) => {
                let skipped = text
                    .char_indices()
                    .nth(self.fallback_left)
                    .map_or(text.len(), |(idx, _)| idx);
                self.fallback_left = self.fallback_left.saturating_sub(text[..skipped].chars().count());
                self.push_text(&text[skipped..])?;
            }
        }
        Ok(())
    }

    fn control_word(&mut self, name: &str, param: Option<i32>) -> Result<(), RtfError> {
        match name {
            "cf" => {
                let index = param.unwrap_or(0);
                let known = usize::try_from(index)
                    .ok()
                    .filter(|&idx| idx == 0 || self.table.contains(idx));
                self.state.color = known.ok_or(RtfError::UnknownColorIndex(index))?;
            }
            "plain" => self.state.color = 0,
            "uc" => {
                self.state.unicode_fallback = usize::try_from(param.unwrap_or(1)).unwrap_or(0)
            }
            "u" => {
                if let Some(code) = param {
                    // Code points above 32767 are written as negative numbers.
                    let code = if code < 0 { code + 65536 } else { code };
                    let unit = u16::try_from(code).unwrap_or(0xFFFD);
                    if (0xD800..=0xDBFF).contains(&unit) {
                        self.flush_surrogate()?;
                        self.high_surrogate = Some(unit);
                    } else {
                        let units: Vec<u16> = self.high_surrogate.take().into_iter().chain([unit]).collect();
                        let decoded: String = char::decode_utf16(units)
                            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                            .collect();
                        self.push_text(&decoded)?;
                    }
                    self.fallback_left = self.state.unicode_fallback;
                }
            }
            "ansicpg" => self.codepage = param.unwrap_or(CP1252),
            "par" | "line" | "sect" | "page" => self.push_text("\n")?,
            "tab" => self.push_text("\t")?,
            "emdash" => self.push_text("—")?,
            "endash" => self.push_text("–")?,
            "bullet" => self.push_text("•")?,
            "lquote" => self.push_text("‘")?,
            "rquote" => self.push_text("’")?,
            "ldblquote" => self.push_text("“")?,
            "rdblquote" => self.push_text("”")?,
            "emspace" | "enspace" | "qmspace" => self.push_text(" ")?,
            _ => {}
        }
        Ok(())
    }

    fn control_symbol(&mut self, symbol: char) -> Result<(), RtfError> {
        match symbol {
            '\n' => self.push_text("\n"),
            '~' => self.push_text("\u{a0}"),
            '_' => self.push_text("-"),
            '\\' | '{' | '}' => self.push_text(symbol.encode_utf8(&mut [0; 4])),
            _ => Ok(()),
        }
    }

    fn role(&self, index: usize) -> Result<String, RtfError> {
        let Some(color) = self.table.get(index) else {
            return Ok(DEFAULT_ROLE.to_string());
        };
        match self.tagmap.role_for(&color) {
            Some(role) => Ok(role.to_string()),
            None if self.strict => Err(RtfError::UnmappedColor { index, color }),
            None => Ok(color.to_string()),
        }
    }

    /// Whitespace never changes the speaker: it joins the open turn, and is
    /// dropped when no turn is open yet.
    fn push_text(&mut self, text: &str) -> Result<(), RtfError> {
        if text.is_empty() {
            return Ok(());
        }
        self.flush_surrogate()?;

        if text.trim().is_empty() {
            if let Some(open) = self.open.as_mut() {
                open.text.push_str(text);
            }
            return Ok(());
        }

        let role = self.role(self.state.color)?;
        match self.open.as_mut() {
            Some(open) if open.role == role => open.text.push_str(text),
            _ => {
                self.close_turn();
                self.open = Some(Turn::new(role, text));
            }
        }
        Ok(())
    }

    /// A high surrogate not followed by its low half is replaced by U+FFFD.
    fn flush_surrogate(&mut self) -> Result<(), RtfError> {
        if self.high_surrogate.take().is_some() {
            self.push_text("\u{fffd}")?;
        }
        Ok(())
    }

    fn close_turn(&mut self) {
        if let Some(mut turn) = self.open.take() {
            let trimmed = turn.text.trim();
            if !trimmed.is_empty() {
                turn.text = trimmed.to_string();
                self.turns.push(turn);
            }
        }
    }

    fn finish(mut self) -> Result<Script, RtfError> {
        self.flush_surrogate()?;
        self.close_turn();
        Ok(Script { turns: self.turns })
    }
}
