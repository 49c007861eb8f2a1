//! Coverage reference - the target coverage a resolution call runs for

use serde::{Deserialize, Serialize};

/// Code and display name of one coverage item.
///
/// The name as it appears in documents usually carries an ordinal marker and
/// a parenthesized qualifier ("3. 암진단비(유사암제외)"); `cleaned_title()`
/// strips both so the anchoring gate matches the bare title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRef {
    /// Canonical coverage code
    pub code: String,

    /// Coverage name as listed in the source material
    pub name: String,
}

impl CoverageRef {
    /// Create a new coverage reference
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Title used for anchoring: leading ordinal removed, text cut at the
    /// first parenthesis (ASCII or full-width), trimmed.
    pub fn cleaned_title(&self) -> String {
        let stripped = strip_leading_ordinal(self.name.trim());
        let cut = stripped
            .char_indices()
            .find(|(_, c)| *c == '(' || *c == '（')
            .map(|(i, _)| i)
            .unwrap_or(stripped.len());
        stripped[..cut].trim().to_string()
    }
}

/// Strip one leading ordinal marker: "1.", "12)", "(3)", or a circled digit.
fn strip_leading_ordinal(s: &str) -> &str {
    match s.chars().next() {
        // "(3) 암진단비" — parenthesized digits
        Some(open @ ('(' | '（')) => {
            let close = if open == '(' { ')' } else { '）' };
            if let Some(end) = s.find(close) {
                let inner = &s[open.len_utf8()..end];
                if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
                    return s[end + close.len_utf8()..].trim_start();
                }
            }
            s
        }
        // "1. 암진단비" / "12) 암진단비"
        Some(c) if c.is_ascii_digit() => {
            let digits_end = s
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(s.len());
            let rest = &s[digits_end..];
            if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
                stripped.trim_start()
            } else {
                s
            }
        }
        // "① 암진단비" — circled digit markers
        Some(c) if ('\u{2460}'..='\u{2473}').contains(&c) => s[c.len_utf8()..].trim_start(),
        _ => s,
    }
}
