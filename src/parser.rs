//! Single-line grammar: what kind of line this is, and the scanners for headers
//! and key/value pairs.
//!
//! Both scanners are one left-to-right pass over the characters, driven by an
//! explicit state; nothing here backtracks.

use crate::error::ParseError;

pub const COMMENT: char = ';';

/// A trimmed input line, classified by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    KeyValue(&'a str),
}

#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();

    match line.chars().next() {
        None => Line::Blank,
        Some(COMMENT) => Line::Comment,
        Some('[') => Line::Header(line),
        Some(_) => Line::KeyValue(line),
    }
}

/// `[name]` or `[name]:parent, other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    /// Inside the brackets.
    Name,
    /// After `]`, waiting for `:`.
    Next,
    /// After `:`, collecting the parent list.
    Inheritance,
}

/// Parse a line that starts with `[`.
///
/// Characters between `]` and `:` are ignored. A `;` ends the parent list, but
/// inside the brackets it is part of the name.
pub fn parse_header(line: &str, line_number: usize) -> Result<Header, ParseError> {
    let body = line.strip_prefix('[').unwrap_or(line);

    let mut state = HeaderState::Name;
    let mut name = String::new();
    let mut inheritance = String::new();

    for c in body.chars() {
        match state {
            HeaderState::Name if c == ']' => state = HeaderState::Next,
            HeaderState::Name => name.push(c),
            HeaderState::Next if c == ':' => state = HeaderState::Inheritance,
            HeaderState::Next => {}
            HeaderState::Inheritance if c == COMMENT => break,
            HeaderState::Inheritance => inheritance.push(c),
        }
    }

    if state == HeaderState::Name {
        return Err(ParseError::MalformedHeader {
            line_number,
            line: line.to_owned(),
        });
    }

    let parents = inheritance
        .split(',')
        .map(str::trim)
        .filter(|parent| !parent.is_empty())
        .map(str::to_owned)
        .collect();

    Ok(Header { name, parents })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyValueState {
    Key,
    Value,
}

/// Split `key = value ; comment` into a trimmed `(key, value)`.
///
/// Never fails: a line without `=` is all key and an empty value.
#[must_use]
pub fn parse_key_value(line: &str) -> (String, String) {
    let mut state = KeyValueState::Key;
    let mut key = String::new();
    let mut value = String::new();

    for c in line.chars() {
        if c == COMMENT {
            break;
        }

        match state {
            KeyValueState::Key if c == '=' => state = KeyValueState::Value,
            KeyValueState::Key => key.push(c),
            KeyValueState::Value => value.push(c),
        }
    }

    (key.trim().to_owned(), value.trim().to_owned())
}
