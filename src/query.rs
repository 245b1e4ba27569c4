//! Builds GitHub user-search query strings from [`SearchFilters`].
//!
//! Terms are always emitted in the same order (free text, `location:`,
//! `repos:>`) and joined with `+`, the separator the search endpoint reads
//! as a space.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::models::SearchFilters;

/// Separator placed between query terms.
pub const TERM_SEPARATOR: char = '+';

/// Query string ready to be put on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a raw filter value into the text placed after its qualifier.
pub trait TermEscaper {
    fn escape<'a>(&self, value: &'a str) -> Cow<'a, str>;
}

/// Passes values through untouched.
///
/// Values containing `+` or search qualifiers leak into the query as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl TermEscaper for Verbatim {
    fn escape<'a>(&self, value: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(value)
    }
}

/// Wraps multi-word values in double quotes so they stay one term.
///
/// Embedded `"` and `+` would break the quoting or the separator, so they
/// become spaces before quoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quoted;

impl TermEscaper for Quoted {
    fn escape<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let cleaned: String = value
            .chars()
            .map(|c| if c == '"' || c == TERM_SEPARATOR { ' ' } else { c })
            .collect();
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        match words.len() {
            0 => Cow::Borrowed(""),
            1 if words[0] == value => Cow::Borrowed(value),
            1 => Cow::Owned(words[0].to_string()),
            _ => Cow::Owned(format!("\"{}\"", words.join(" "))),
        }
    }
}

/// Escaping strategy selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
    #[default]
    Verbatim,
    Quoted,
}

impl TermEscaper for Escaping {
    fn escape<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Escaping::Verbatim => Verbatim.escape(value),
            Escaping::Quoted => Quoted.escape(value),
        }
    }
}

impl FromStr for Escaping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbatim" => Ok(Escaping::Verbatim),
            "quoted" => Ok(Escaping::Quoted),
            other => Err(format!("unknown escaping strategy '{other}'")),
        }
    }
}

/// Builds the query with the historical verbatim escaping.
pub fn build_query(filters: &SearchFilters) -> SearchQuery {
    build_query_with(filters, &Verbatim)
}

/// Builds the query, running every free-text value through `escaper`.
pub fn build_query_with<E>(filters: &SearchFilters, escaper: &E) -> SearchQuery
where
    E: TermEscaper + ?Sized,
{
    let mut terms: Vec<String> = Vec::with_capacity(3);

    if let Some(username) = present(filters.username.as_deref()) {
        terms.push(escaper.escape(username).into_owned());
    }
    if let Some(location) = present(filters.location.as_deref()) {
        terms.push(format!("location:{}", escaper.escape(location)));
    }
    if let Some(min) = filters.min_repositories {
        terms.push(format!("repos:>{min}"));
    }

    let joined = terms.join(" ");
    let separator = TERM_SEPARATOR.to_string();
    SearchQuery(
        joined
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(&separator),
    )
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
