//! Remark filter
//!
//! Masks denylisted terms in free-text remarks and admin comments with
//! `***`. Matching is case-insensitive. Terms are literal text, so `f*ck`
//! matches an asterisk rather than acting as a pattern.

use std::str::FromStr;

use regex::{Regex, RegexBuilder};

/// Replacement for every masked occurrence
pub const MASK: &str = "***";

/// Terms masked when no denylist is configured
pub const DEFAULT_DENYLIST: &[&str] = &["fuck", "f*ck", "fck"];

/// How denylisted terms are located in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Mask the term wherever it occurs, even inside longer words
    /// (`fucking` becomes `***ing`)
    #[default]
    Substring,
    /// Mask whole words only
    WordBoundary,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "word" | "word_boundary" => Ok(Self::WordBoundary),
            other => Err(format!("Unknown remark match mode: {other}")),
        }
    }
}

/// Compiled denylist filter
#[derive(Debug, Clone)]
pub struct RemarkFilter {
    pattern: Option<Regex>,
    mode: MatchMode,
}

impl RemarkFilter {
    /// Compile a filter from literal terms
    pub fn new<S: AsRef<str>>(terms: &[S], mode: MatchMode) -> Result<Self, regex::Error> {
        let mut escaped: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        if escaped.is_empty() {
            return Ok(Self {
                pattern: None,
                mode,
            });
        }

        // Longest first so a short term never pre-empts a longer overlapping one
        escaped.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = escaped.join("|");
        let source = match mode {
            MatchMode::Substring => format!("(?:{alternation})"),
            MatchMode::WordBoundary => format!(r"\b(?:{alternation})\b"),
        };

        let pattern = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self {
            pattern: Some(pattern),
            mode,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Mask denylisted terms; `None` and empty input yield an empty string
    pub fn sanitize(&self, text: Option<&str>) -> String {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return String::new();
        };
        match &self.pattern {
            Some(re) => re.replace_all(text, MASK).into_owned(),
            None => text.to_string(),
        }
    }

    /// Sanitize a stored optional field for output
    pub fn sanitize_field(&self, text: &mut Option<String>) {
        *text = Some(self.sanitize(text.as_deref()));
    }
}

impl Default for RemarkFilter {
    fn default() -> Self {
        // Escaped literals always compile
        Self::new(DEFAULT_DENYLIST, MatchMode::Substring).unwrap_or(Self {
            pattern: None,
            mode: MatchMode::Substring,
        })
    }
}
