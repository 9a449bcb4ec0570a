//! Text VDF framing, as used by `config.vdf`.
//!
//! ```text
//! "InstallConfigStore"
//! {
//!     "Software"
//!     {
//!         "key"        "value"
//!     }
//! }
//! ```
//!
//! All scalars are strings. `//` comments and `[$PLATFORM]` conditionals are
//! accepted on input and dropped.

use super::value::{VdfMap, VdfValue};
use crate::error::{ConductorError, Result};
use std::fmt::Write as FmtWrite;

#[derive(Debug, PartialEq)]
enum Token {
    Str(String),
    Open,
    Close,
}

/// Decode a text VDF document into its root map.
pub fn decode(input: &str) -> Result<VdfMap> {
    let mut lexer = Lexer {
        chars: input.char_indices().peekable(),
        offset: 0,
    };
    let root = parse_map(&mut lexer, false)?;
    Ok(root)
}

/// Encode a map as a text VDF document, tab indented.
pub fn encode(root: &VdfMap) -> String {
    let mut out = String::new();
    write_map(&mut out, root, 0);
    out
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    offset: usize,
}

impl Lexer<'_> {
    fn error(&self, message: impl Into<String>) -> ConductorError {
        ConductorError::VdfParse {
            path: None,
            offset: self.offset,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let (i, c) = self.chars.next()?;
        self.offset = i + c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    /// Skip whitespace, `//` comments and `[$...]` conditionals.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('[') => {
                    while let Some(c) = self.bump() {
                        if c == ']' {
                            break;
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_trivia()?;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        match c {
            '{' => {
                self.bump();
                Ok(Some(Token::Open))
            }
            '}' => {
                self.bump();
                Ok(Some(Token::Close))
            }
            '"' => {
                self.bump();
                self.quoted().map(|s| Some(Token::Str(s)))
            }
            _ => Ok(Some(Token::Str(self.bare()))),
        }
    }

    fn quoted(&mut self) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated quoted string")),
                Some('"') => return Ok(s),
                Some('\\') => match self.bump() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('\\') => s.push('\\'),
                    Some('"') => s.push('"'),
                    Some(other) => {
                        s.push('\\');
                        s.push(other);
                    }
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) => s.push(c),
            }
        }
    }

    fn bare(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '{' | '}' | '"') {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }
}

fn parse_map(lexer: &mut Lexer<'_>, nested: bool) -> Result<VdfMap> {
    let mut map = VdfMap::new();
    loop {
        let key = match lexer.next_token()? {
            None if nested => return Err(lexer.error("missing closing brace")),
            None => return Ok(map),
            Some(Token::Close) if nested => return Ok(map),
            Some(Token::Close) => return Err(lexer.error("unexpected closing brace")),
            Some(Token::Open) => return Err(lexer.error("expected key, found opening brace")),
            Some(Token::Str(key)) => key,
        };
        match lexer.next_token()? {
            Some(Token::Str(value)) => map.push(key, VdfValue::String(value)),
            Some(Token::Open) => {
                let nested_map = parse_map(lexer, true)?;
                map.push(key, VdfValue::Map(nested_map));
            }
            Some(Token::Close) | None => {
                return Err(lexer.error(format!("missing value for key {:?}", key)))
            }
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn write_map(out: &mut String, map: &VdfMap, depth: usize) {
    let indent = "\t".repeat(depth);
    for (key, value) in map.iter() {
        match value {
            VdfValue::Map(nested) => {
                let _ = writeln!(out, "{}\"{}\"", indent, escape(key));
                let _ = writeln!(out, "{}{{", indent);
                write_map(out, nested, depth + 1);
                let _ = writeln!(out, "{}}}", indent);
            }
            scalar => {
                let _ = writeln!(
                    out,
                    "{}\"{}\"\t\t\"{}\"",
                    indent,
                    escape(key),
                    escape(&scalar.to_string())
                );
            }
        }
    }
}
