//! # Colour Table
//!
//! Example of a colour table in an RTF file (line breaks for clarity only):
//!
//! ```text
//! {\colortbl;\red255\green255\blue255;
//!  \red74\green21\blue148;
//!  \red255\green255\blue255;
//!  \red11\green93\blue162;}
//! ```
//!
//! Each entry ends with `;`. The first entry is empty and stands for the
//! reader's default colour, so `\cf1` is white and `\cf2` is the purple
//! `RGB(74,21,148)` in the table above.

use scriptor_common::color::Rgb;

use crate::errors::RtfError;
use crate::rtf::lexer::{Lexer, Token};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<Option<Rgb>>,
}

impl ColorTable {
    pub fn parse(rtf: &str) -> Result<Self, RtfError> {
        let mut tokens = Lexer::new(rtf);

        loop {
            match tokens.next().transpose()? {
                None => return Err(RtfError::MissingColorTable),
                Some(Token::ControlWord { name, .. }) if name == "colortbl" => break,
                Some(_) => {}
            }
        }

        let mut entries = Vec::new();
        let mut components: [Option<i32>; 3] = [None; 3];
        let mut depth = 0usize;

        for token in tokens {
            match token? {
                Token::GroupStart => depth += 1,
                Token::GroupEnd if depth == 0 => break,
                Token::GroupEnd => depth -= 1,
                Token::ControlWord { name, param } if depth == 0 => {
                    let slot = match name.as_str() {
                        "red" => 0,
                        "green" => 1,
                        "blue" => 2,
                        _ => continue,
                    };
                    components[slot] = Some(param.unwrap_or(0));
                }
                Token::Text(text) if depth == 0 => {
                    for _ in text.matches(';') {
                        entries.push(to_entry(entries.len(), components)?);
                        components = [None; 3];
                    }
                }
                _ => {}
            }
        }

        Ok(Self { entries })
    }

    /// The colour selected by `\cf<index>`. `None` for the default colour
    /// and for indexes past the end of the table.
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.entries.get(index).copied().flatten()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<Rgb>)> + '_ {
        self.entries.iter().copied().enumerate()
    }
}

fn to_entry(index: usize, components: [Option<i32>; 3]) -> Result<Option<Rgb>, RtfError> {
    if components.iter().all(Option::is_none) {
        return Ok(None);
    }

    let [r, g, b] = components.map(|c| c.unwrap_or(0));
    let channel = |component: &'static str, value: i32| {
        u8::try_from(value).map_err(|_| RtfError::BadColor {
            index,
            component,
            value,
        })
    };

    Ok(Some(Rgb::new(
        channel("red", r)?,
        channel("green", g)?,
        channel("blue", b)?,
    )))
}
