//! # RTF Tokens
//!
//! Splits raw RTF into groups, control words, control symbols, hex escapes
//! and plain text. Example of material coming out of a rich-text editor:
//!
//! ```text
//! {\colortbl;\red255\green0\blue0;\red11\green93\blue162;}
//! \cf1 I'm looking for my glasses.\
//! \cf2 They are on your head
//! ```
//!
//! Raw line breaks carry no meaning in RTF and are dropped; the `\` at the
//! end of a line is the control symbol for a line break.

use std::ops::Range;

use crate::errors::RtfError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    GroupStart,
    GroupEnd,
    /// `\name` or `\name<N>`, e.g. `\cf2`, `\par`, `\u-3913`.
    ControlWord { name: String, param: Option<i32> },
    /// `\` followed by a non-letter, e.g. `\*`, `\~`, `\{`. A backslash at
    /// the end of a line yields `'\n'`.
    ControlSymbol(char),
    /// `\'hh`
    Hex(u8),
    Text(String),
}

impl Token {
    /// The control sequence as it is written in the source, or `None` for
    /// groups and text.
    pub fn control_text(&self) -> Option<String> {
        match self {
            Token::ControlWord { name, param: Some(n) } => Some(format!("\\{name}{n}")),
            Token::ControlWord { name, param: None } => Some(format!("\\{name}")),
            Token::ControlSymbol('\n') => Some("\\\n".to_string()),
            Token::ControlSymbol(c) => Some(format!("\\{c}")),
            Token::Hex(byte) => Some(format!("\\'{byte:02x}")),
            Token::GroupStart | Token::GroupEnd | Token::Text(_) => None,
        }
    }
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Iterates tokens together with the byte range they occupy. A space
    /// delimiting a control word is consumed but not part of its range.
    pub fn spanned(mut self) -> impl Iterator<Item = Result<(Token, Range<usize>), RtfError>> + 'a {
        std::iter::from_fn(move || self.next_spanned())
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn next_spanned(&mut self) -> Option<Result<(Token, Range<usize>), RtfError>> {
        loop {
            let start = self.pos;
            let byte = self.peek()?;
            match byte {
                b'{' => {
                    self.pos += 1;
                    return Some(Ok((Token::GroupStart, start..self.pos)));
                }
                b'}' => {
                    self.pos += 1;
                    return Some(Ok((Token::GroupEnd, start..self.pos)));
                }
                b'\\' => {
                    self.pos += 1;
                    return Some(self.control(start));
                }
                b'\r' | b'\n' => {
                    self.pos += 1;
                }
                _ => {
                    let text = self.text();
                    if !text.is_empty() {
                        return Some(Ok((Token::Text(text), start..self.pos)));
                    }
                }
            }
        }
    }

    fn control(&mut self, start: usize) -> Result<(Token, Range<usize>), RtfError> {
        let byte = self.peek().ok_or(RtfError::UnexpectedEof)?;

        if byte.is_ascii_alphabetic() {
            return self.control_word(start);
        }

        match byte {
            b'\'' => {
                let digits = self
                    .src
                    .get(self.pos + 1..self.pos + 3)
                    .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
                    .ok_or(RtfError::BadHexEscape { offset: start })?;
                let value =
                    u8::from_str_radix(digits, 16).map_err(|_| RtfError::BadHexEscape { offset: start })?;
                self.pos += 3;
                Ok((Token::Hex(value), start..self.pos))
            }
            b'\r' => {
                self.pos += 1;
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
                Ok((Token::ControlSymbol('\n'), start..self.pos))
            }
            _ => {
                // Control symbols may be any character, including non-ASCII.
                let c = self.src[self.pos..].chars().next().ok_or(RtfError::UnexpectedEof)?;
                self.pos += c.len_utf8();
                Ok((Token::ControlSymbol(c), start..self.pos))
            }
        }
    }

    fn control_word(&mut self, start: usize) -> Result<(Token, Range<usize>), RtfError> {
        let bytes = self.src.as_bytes();

        let name_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let name = self.src[name_start..self.pos].to_string();

        let param_start = self.pos;
        let negative = self.peek() == Some(b'-')
            && bytes.get(self.pos + 1).is_some_and(|b| b.is_ascii_digit());
        if negative {
            self.pos += 1;
        }
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let param = if self.pos > param_start {
            let value = self.src[param_start..self.pos]
                .parse::<i32>()
                .map_err(|_| RtfError::BadParameter { offset: start })?;
            Some(value)
        } else {
            None
        };

        let end = self.pos;
        if self.peek() == Some(b' ') {
            self.pos += 1;
        }

        Ok((Token::ControlWord { name, param }, start..end))
    }

    fn text(&mut self) -> String {
        let mut text = String::new();
        let mut run_start = self.pos;

        while let Some(byte) = self.peek() {
            match byte {
                b'\\' | b'{' | b'}' => break,
                b'\r' | b'\n' => {
                    text.push_str(&self.src[run_start..self.pos]);
                    self.pos += 1;
                    run_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }
        text.push_str(&self.src[run_start..self.pos]);
        text
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, RtfError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_spanned().map(|res| res.map(|(token, _)| token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Lexer::new(src).collect::<Result<_, _>>().unwrap()
    }

    fn word(name: &str, param: Option<i32>) -> Token {
        Token::ControlWord {
            name: name.to_string(),
            param,
        }
    }

    #[test]
    fn test_control_words_and_delimiters() {
        assert_eq!(
            tokens(r"{\f0\fs32 \cf2 Hello}"),
            vec![
                Token::GroupStart,
                word("f", Some(0)),
                word("fs", Some(32)),
                word("cf", Some(2)),
                Token::Text("Hello".to_string()),
                Token::GroupEnd,
            ]
        );
    }

    #[test]
    fn test_negative_parameter() {
        assert_eq!(tokens(r"\u-3913?"), vec![word("u", Some(-3913)), Token::Text("?".to_string())]);
        // A dash not followed by a digit is ordinary text.
        assert_eq!(tokens(r"\par- x"), vec![word("par", None), Token::Text("- x".to_string())]);
    }

    #[test]
    fn test_symbols_and_hex() {
        assert_eq!(
            tokens("it\\'92s\\~ok\\\nnext"),
            vec![
                Token::Text("it".to_string()),
                Token::Hex(0x92),
                Token::Text("s".to_string()),
                Token::ControlSymbol('~'),
                Token::Text("ok".to_string()),
                Token::ControlSymbol('\n'),
                Token::Text("next".to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_line_breaks_are_dropped() {
        assert_eq!(tokens("one\r\ntwo\nthree"), vec![Token::Text("onetwothree".to_string())]);
        assert!(tokens("\n\n").is_empty());
    }

    #[test]
    fn test_spans_exclude_delimiter() {
        let spans: Vec<Range<usize>> = Lexer::new(r"\cf2 Hi")
            .spanned()
            .map(|res| res.unwrap().1)
            .collect();
        assert_eq!(spans, vec![0..4, 5..7]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Lexer::new(r"\'9").collect::<Result<Vec<_>, _>>(),
            Err(RtfError::BadHexEscape { offset: 0 })
        ));
        assert!(matches!(
            Lexer::new(r"\'zz").collect::<Result<Vec<_>, _>>(),
            Err(RtfError::BadHexEscape { .. })
        ));
        assert!(matches!(
            Lexer::new("text\\").collect::<Result<Vec<_>, _>>(),
            Err(RtfError::UnexpectedEof)
        ));
        assert!(matches!(
            Lexer::new(r"\cf99999999999").collect::<Result<Vec<_>, _>>(),
            Err(RtfError::BadParameter { .. })
        ));
    }

    #[test]
    fn test_control_text() {
        assert_eq!(word("cf", Some(2)).control_text().as_deref(), Some(r"\cf2"));
        assert_eq!(Token::Hex(0xa0).control_text().as_deref(), Some(r"\'a0"));
        assert_eq!(Token::Text("x".to_string()).control_text(), None);
    }
}
