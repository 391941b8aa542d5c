//! Parameter parsing and rendering.
//!
//! [`ParamsParser`] decodes URL, query, header and form values from their
//! wire pairs and aggregates every failure instead of stopping at the first
//! one. [`ParamsWriter`] renders values back into wire pairs; for every
//! primitive the two are inverse.

use std::fmt::Display;
use std::str::FromStr;

/// Code of a failure caused by an absent required value.
pub const MISSING: &str = "missing";

/// Code of a failure caused by a value that does not decode.
pub const PARSING_FAILED: &str = "parsing_failed";

/// A single parameter failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingError {
    /// Wire name of the parameter; URL parameters are prefixed with `:`
    pub path: String,
    /// [`MISSING`] or [`PARSING_FAILED`]
    pub code: String,
    /// Human-readable detail
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Url,
    Query,
    Header,
    Form,
}

/// Decoder over the wire pairs of one parameter group.
///
/// Every accessor returns `None` when the value could not be produced and
/// records why; inspect the failures with [`ParamsParser::errors`] once all
/// parameters of the group have been read.
#[derive(Debug)]
pub struct ParamsParser {
    values: Vec<(String, String)>,
    source: Source,
    errors: Vec<ParsingError>,
}

impl ParamsParser {
    fn new(values: Vec<(String, String)>, source: Source) -> Self {
        Self {
            values,
            source,
            errors: Vec::new(),
        }
    }

    /// Parser for URL template values.
    #[must_use]
    pub fn url(values: Vec<(String, String)>) -> Self {
        Self::new(values, Source::Url)
    }

    /// Parser for query string pairs.
    #[must_use]
    pub fn query(values: Vec<(String, String)>) -> Self {
        Self::new(values, Source::Query)
    }

    /// Parser for headers; names match case-insensitively.
    #[must_use]
    pub fn header(values: Vec<(String, String)>) -> Self {
        Self::new(values, Source::Header)
    }

    /// Parser for form fields.
    #[must_use]
    pub fn form(values: Vec<(String, String)>) -> Self {
        Self::new(values, Source::Form)
    }

    /// Reads a required value.
    pub fn required<T: FromStr>(&mut self, name: &str) -> Option<T> {
        self.required_value(name, None)
    }

    /// Reads a value that may be absent.
    pub fn optional<T: FromStr>(&mut self, name: &str) -> Option<Option<T>> {
        self.optional_value(name, None)
    }

    /// Reads a value, decoding `default` when it is absent.
    pub fn with_default<T: FromStr>(&mut self, name: &str, default: &str) -> Option<T> {
        self.default_value(name, default, None)
    }

    /// Reads every occurrence of a repeated value.
    pub fn array<T: FromStr>(&mut self, name: &str) -> Option<Vec<T>> {
        self.array_value(name, None)
    }

    /// Reads a required value restricted to `allowed`.
    pub fn required_enum<T: FromStr>(&mut self, name: &str, allowed: &[&str]) -> Option<T> {
        self.required_value(name, Some(allowed))
    }

    /// Reads an optional value restricted to `allowed`.
    pub fn optional_enum<T: FromStr>(
        &mut self,
        name: &str,
        allowed: &[&str],
    ) -> Option<Option<T>> {
        self.optional_value(name, Some(allowed))
    }

    /// Reads a defaulted value restricted to `allowed`.
    pub fn enum_with_default<T: FromStr>(
        &mut self,
        name: &str,
        default: &str,
        allowed: &[&str],
    ) -> Option<T> {
        self.default_value(name, default, Some(allowed))
    }

    /// Reads a repeated value restricted to `allowed`.
    pub fn enum_array<T: FromStr>(&mut self, name: &str, allowed: &[&str]) -> Option<Vec<T>> {
        self.array_value(name, Some(allowed))
    }

    /// Failures recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParsingError] {
        &self.errors
    }

    /// Consumes the parser, returning its failures.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParsingError> {
        self.errors
    }

    fn required_value<T: FromStr>(&mut self, name: &str, allowed: Option<&[&str]>) -> Option<T> {
        let Some(raw) = self.first(name) else {
            let error = self.error(name, MISSING, format!("Parameter '{name}' is required"));
            self.errors.push(error);
            return None;
        };
        self.decode(name, &raw, allowed)
    }

    fn optional_value<T: FromStr>(
        &mut self,
        name: &str,
        allowed: Option<&[&str]>,
    ) -> Option<Option<T>> {
        match self.first(name) {
            None => Some(None),
            Some(raw) => self.decode(name, &raw, allowed).map(Some),
        }
    }

    fn default_value<T: FromStr>(
        &mut self,
        name: &str,
        default: &str,
        allowed: Option<&[&str]>,
    ) -> Option<T> {
        let raw = self.first(name).unwrap_or_else(|| default.to_string());
        self.decode(name, &raw, allowed)
    }

    fn array_value<T: FromStr>(
        &mut self,
        name: &str,
        allowed: Option<&[&str]>,
    ) -> Option<Vec<T>> {
        let raws: Vec<String> = self.all(name);
        let mut decoded = Vec::with_capacity(raws.len());
        let mut valid = true;
        for raw in &raws {
            match self.decode(name, raw, allowed) {
                Some(value) => decoded.push(value),
                None => valid = false,
            }
        }
        valid.then_some(decoded)
    }

    fn decode<T: FromStr>(&mut self, name: &str, raw: &str, allowed: Option<&[&str]>) -> Option<T> {
        if let Some(allowed) = allowed {
            if !allowed.contains(&raw) {
                let message = format!(
                    "Value '{raw}' is not one of: {}",
                    allowed.join(", ")
                );
                let error = self.error(name, PARSING_FAILED, message);
                self.errors.push(error);
                return None;
            }
        }
        if let Ok(value) = raw.parse::<T>() {
            Some(value)
        } else {
            let error = self.error(
                name,
                PARSING_FAILED,
                format!("Failed to parse parameter '{name}' from '{raw}'"),
            );
            self.errors.push(error);
            None
        }
    }

    fn matches(&self, key: &str, name: &str) -> bool {
        match self.source {
            Source::Header => key.eq_ignore_ascii_case(name),
            Source::Url | Source::Query | Source::Form => key == name,
        }
    }

    fn first(&self, name: &str) -> Option<String> {
        self.values
            .iter()
            .find(|(key, _)| self.matches(key, name))
            .map(|(_, value)| value.clone())
    }

    fn all(&self, name: &str) -> Vec<String> {
        self.values
            .iter()
            .filter(|(key, _)| self.matches(key, name))
            .map(|(_, value)| value.clone())
            .collect()
    }

    fn error(&self, name: &str, code: &str, message: String) -> ParsingError {
        let path = match self.source {
            Source::Url => format!(":{name}"),
            Source::Query | Source::Header | Source::Form => name.to_string(),
        };
        ParsingError {
            path,
            code: code.to_string(),
            message,
        }
    }
}

/// Encoder of parameter values into wire pairs.
#[derive(Debug, Default, Clone)]
pub struct ParamsWriter {
    pairs: Vec<(String, String)>,
}

impl ParamsWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn add(&mut self, name: &str, value: impl Display) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Appends a value if present.
    pub fn add_optional(&mut self, name: &str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.add(name, value);
        }
    }

    /// Appends one pair per value.
    pub fn add_array<I>(&mut self, name: &str, values: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.add(name, value);
        }
    }

    /// Rendered pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Consumes the writer, returning its pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
