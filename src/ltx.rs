use std::io::Read;
use std::ops::Index;

use indexmap::IndexMap;

use crate::diagnostic::{Diagnostic, DiagnosticKind, Reporter, WarningMode};
use crate::error::{ParseError, ValueError};
use crate::inheritance::{self, Pending};
use crate::parser::{self, Line};
use crate::section::Section;
use crate::util::decode_data;
use crate::value::{self, Value};

/// Construction-time settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub warning_mode: WarningMode,
    /// Turn numeric-looking values into `Value::Float` / `Value::List`.
    pub auto_coerce: bool,
}

/// An accumulating store of sections, fed by one or more files.
///
/// Each call to [`Ltx::parse`] continues from the sections and pending
/// inheritance left by previous calls, so a parent declared in a later file
/// still reaches children declared in an earlier one.
#[derive(Debug)]
pub struct Ltx<R = WarningMode> {
    sections: IndexMap<String, Section>,
    pending: Pending,
    reporter: R,
    auto_coerce: bool,
}

impl Ltx {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self::with_reporter(options.warning_mode).coerce_values(options.auto_coerce)
    }
}

impl Default for Ltx {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reporter> Ltx<R> {
    /// Use `reporter` for soft diagnostics instead of a [`WarningMode`].
    #[must_use]
    pub fn with_reporter(reporter: R) -> Self {
        Self {
            sections: IndexMap::with_capacity(16),
            pending: Pending::default(),
            reporter,
            auto_coerce: false,
        }
    }

    #[must_use]
    pub fn coerce_values(mut self, enabled: bool) -> Self {
        self.auto_coerce = enabled;
        self
    }

    #[must_use]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Parse one file's worth of lines into the store, then resolve inheritance.
    ///
    /// On error the remaining lines are skipped and inheritance is left for the
    /// next successful call; lines already applied stay applied.
    pub fn parse<I, S>(&mut self, lines: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = None::<usize>;

        for (index, line) in lines.into_iter().enumerate() {
            let line_number = index + 1;

            match parser::classify(line.as_ref()) {
                Line::Blank | Line::Comment => {}
                Line::Header(line) => {
                    let header = parser::parse_header(line, line_number)?;
                    let entry = self.sections.entry(header.name.clone());
                    current = Some(entry.index());
                    entry.or_insert_with(|| Section::new(header.name.clone()));

                    self.pending.declare(&header.name, header.parents);
                }
                Line::KeyValue(line) => {
                    let Some(index) = current else {
                        return Err(ParseError::OrphanKeyValue {
                            line_number,
                            line: line.to_owned(),
                        });
                    };

                    self.assign(index, line, line_number)?;
                }
            }
        }

        inheritance::resolve(&mut self.sections, &mut self.pending);

        Ok(())
    }

    /// Parse a whole document held in memory.
    pub fn parse_str(&mut self, text: &str) -> Result<(), ParseError> {
        self.parse(text.lines())
    }

    /// Read, decode, and parse everything from `reader`.
    ///
    /// UTF-16 LE is used when the data starts with its byte order mark; anything
    /// else is read as UTF-8, replacing invalid sequences.
    pub fn parse_reader<T>(&mut self, reader: &mut T) -> Result<(), ParseError>
    where
        T: Read,
    {
        let mut buffer = Vec::with_capacity(4096);
        reader.read_to_end(&mut buffer)?;

        self.parse_str(&decode_data(&buffer))
    }

    fn assign(&mut self, index: usize, line: &str, line_number: usize) -> Result<(), ParseError> {
        let (key, raw) = parser::parse_key_value(line);
        let value = if self.auto_coerce {
            value::coerce(&raw)
        } else {
            Value::Str(raw)
        };

        // `index` always comes from a header seen earlier in this call.
        let section = &mut self.sections[index];

        if section.contains_key(&key) {
            let diagnostic = Diagnostic {
                kind: DiagnosticKind::DuplicateKey,
                line_number,
                message: format!("duplicate key {key} in section {}", section.name()),
            };
            self.reporter
                .report(diagnostic)
                .map_err(ParseError::FatalWarning)?;
        }

        section.assign(key, value);

        Ok(())
    }

    /// Merge any pending parents that now exist. Safe to call at any time.
    ///
    /// Returns how many parent links were merged.
    pub fn resolve_inheritance(&mut self) -> usize {
        inheritance::resolve(&mut self.sections, &mut self.pending)
    }
}

impl<R> Ltx<R> {
    /// Section names in the order they were first declared.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    #[must_use]
    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.section(section)
            .is_some_and(|section| section.contains_key(key))
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.section(section)?.get(key)
    }

    #[must_use]
    pub fn get_or<'a>(&'a self, section: &str, key: &str, fallback: &'a Value) -> &'a Value {
        self.get(section, key).unwrap_or(fallback)
    }

    /// `Ok(None)` when the key is missing or its value is empty.
    pub fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, ValueError> {
        self.get_with(section, key, Value::to_int)
    }

    pub fn get_float(&self, section: &str, key: &str) -> Result<Option<f64>, ValueError> {
        self.get_with(section, key, Value::to_float)
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, ValueError> {
        self.get_with(section, key, Value::to_bool)
    }

    pub fn get_int_or(&self, section: &str, key: &str, fallback: i64) -> Result<i64, ValueError> {
        Ok(self.get_int(section, key)?.unwrap_or(fallback))
    }

    pub fn get_float_or(&self, section: &str, key: &str, fallback: f64) -> Result<f64, ValueError> {
        Ok(self.get_float(section, key)?.unwrap_or(fallback))
    }

    pub fn get_bool_or(&self, section: &str, key: &str, fallback: bool) -> Result<bool, ValueError> {
        Ok(self.get_bool(section, key)?.unwrap_or(fallback))
    }

    fn get_with<T, F>(&self, section: &str, key: &str, convert: F) -> Result<Option<T>, ValueError>
    where
        F: FnOnce(&Value) -> Result<T, ValueError>,
    {
        match self.get(section, key) {
            Some(value) if !value.is_empty() => convert(value).map(Some),
            _ => Ok(None),
        }
    }

    /// Parents `child` has declared that have not been merged yet.
    #[must_use]
    pub fn pending_inheritance(&self, child: &str) -> &[String] {
        self.pending.get(child)
    }

    #[must_use]
    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    /// Children that still have at least one parent pending.
    pub fn unresolved(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.pending.unresolved()
    }
}

impl<R> Index<&str> for Ltx<R> {
    type Output = Section;

    /// # Panics
    ///
    /// Panics if no section called `name` has been declared.
    fn index(&self, name: &str) -> &Section {
        self.section(name)
            .unwrap_or_else(|| panic!("no section {name:?}"))
    }
}
