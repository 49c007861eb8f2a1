//! Row location - similarity-anchored extraction of one coverage's table row
//!
//! Insurance tables place semantically similar coverage rows next to each
//! other; the cross-coverage penalty here is the primary defense against
//! silently borrowing a neighboring row's numbers.

use covgate_domain::{CoverageRef, DocumentSource};
use regex::Regex;
use tracing::debug;

/// Line suffixes that mark the start of a coverage-bearing table row
const BENEFIT_SUFFIXES: [&str; 7] = [
    "진단비",
    "수술비",
    "입원비",
    "진단보험금",
    "수술보험금",
    "입원일당",
    "치료비",
];

/// Configuration for the row locator
#[derive(Debug, Clone)]
pub struct RowLocatorConfig {
    /// Minimum final score for a row to be accepted
    pub accept_threshold: f64,

    /// Maximum lines appended to a row start when building the row blob
    pub max_extend_lines: usize,
}

impl Default for RowLocatorConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 0.4,
            max_extend_lines: 3,
        }
    }
}

/// The best-matching table row for a target coverage
#[derive(Debug, Clone, PartialEq)]
pub struct RowMatch {
    /// Page the row starts on, 1-based
    pub page: usize,

    /// Line index of the row start within the page, 0-based
    pub line_num: usize,

    /// The assembled row blob (start line plus extension lines)
    pub text: String,

    /// Final score after the cross-coverage penalty
    pub score: f64,
}

/// Locates the single best-matching table row for a coverage.
///
/// Competing canonical names come from the coverage registry; they are only
/// used to penalize rows that better describe a different coverage, never to
/// accept anything.
pub struct RowLocator {
    config: RowLocatorConfig,
    competing_names: Vec<String>,
    numbered_start: Regex,
}

impl RowLocator {
    /// Create a locator with the given competing coverage names
    pub fn new(config: RowLocatorConfig, competing_names: Vec<String>) -> Self {
        Self {
            config,
            competing_names,
            numbered_start: Regex::new(r"^\s*(?:\d+[.)]|[①-⑳])").expect("static regex compiles"),
        }
    }

    /// Find the best-matching row across the whole document, or `None` when
    /// no candidate clears the acceptance threshold. Ties are broken by
    /// first-encountered order.
    pub fn find_best_row(
        &self,
        doc: &dyn DocumentSource,
        target: &CoverageRef,
    ) -> Option<RowMatch> {
        let mut best: Option<RowMatch> = None;

        for page in 1..=doc.page_count() {
            let Some(text) = doc.page_text(page) else {
                continue;
            };
            let lines: Vec<&str> = text.lines().collect();

            for (idx, line) in lines.iter().enumerate() {
                if !self.is_row_start(line) {
                    continue;
                }
                let blob = self.extend_row(&lines, idx);
                let raw = composite_score(&blob, &target.name);
                let score = raw * self.cross_coverage_penalty(&blob);

                let better = match &best {
                    Some(current) => score > current.score,
                    None => true,
                };
                if better {
                    best = Some(RowMatch {
                        page,
                        line_num: idx,
                        text: blob,
                        score,
                    });
                }
            }
        }

        match best {
            Some(row) if row.score >= self.config.accept_threshold => {
                debug!(
                    page = row.page,
                    line = row.line_num,
                    score = row.score,
                    coverage = target.code.as_str(),
                    "located coverage row"
                );
                Some(row)
            }
            _ => None,
        }
    }

    /// Whether a line begins a coverage-bearing row: a numbered list item or
    /// a line ending in a benefit-type suffix.
    fn is_row_start(&self, line: &str) -> bool {
        let trimmed = line.trim_end();
        if trimmed.trim().is_empty() {
            return false;
        }
        self.numbered_start.is_match(line)
            || BENEFIT_SUFFIXES.iter().any(|suffix| trimmed.ends_with(suffix))
    }

    /// Extend a row start into a row blob: append following lines until a
    /// table boundary (separator row, blank line, or the next row start) or
    /// the extension cap is hit.
    fn extend_row(&self, lines: &[&str], start: usize) -> String {
        let mut blob = lines[start].to_string();
        for offset in 1..=self.config.max_extend_lines {
            let Some(line) = lines.get(start + offset) else {
                break;
            };
            if line.trim().is_empty() || is_separator_row(line) || self.is_row_start(line) {
                break;
            }
            blob.push('\n');
            blob.push_str(line);
        }
        blob
    }

    /// Penalty multiplier from the best score against any competing coverage
    /// name. Severe when a competitor clearly matches better.
    fn cross_coverage_penalty(&self, blob: &str) -> f64 {
        let best_competing = self
            .competing_names
            .iter()
            .map(|name| composite_score(blob, name))
            .fold(0.0_f64, f64::max);

        if best_competing > 0.7 {
            0.2
        } else if best_competing > 0.5 {
            0.5
        } else if best_competing > 0.3 {
            0.8
        } else {
            1.0
        }
    }
}

/// A line made only of rule/border characters, used as a table boundary
fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | '=' | '_' | '─' | '━' | '│' | '┃' | '|' | '+' | '·'))
}

/// Weighted composite similarity between a row blob and a coverage name:
/// 50% token overlap, 30% substring/partial-substring, 20% sequence ratio.
/// All parts run on parenthesis/Roman-numeral-stripped, lower-cased text.
pub(crate) fn composite_score(candidate: &str, target: &str) -> f64 {
    let candidate_tokens = tokens(&normalize(candidate, true));
    let target_tokens = tokens(&normalize(target, true));
    let candidate_compact = normalize(candidate, false);
    let target_compact = normalize(target, false);

    0.5 * token_overlap_ratio(&candidate_tokens, &target_tokens)
        + 0.3 * partial_substring_ratio(&candidate_compact, &target_compact)
        + 0.2 * sequence_ratio(&candidate_compact, &target_compact)
}

/// Lowercase and strip parentheses and Roman-numeral characters; when
/// `keep_spaces` is false, whitespace is stripped too.
fn normalize(s: &str, keep_spaces: bool) -> String {
    s.chars()
        .filter(|&c| {
            if c.is_whitespace() {
                return keep_spaces;
            }
            !matches!(c, '(' | ')' | '（' | '）') && !('\u{2160}'..='\u{2188}').contains(&c)
        })
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Alphanumeric (including Hangul) runs of length ≥ 2
fn tokens(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for c in s.chars() {
        if c.is_alphanumeric() {
            current.push(c);
        } else if !current.is_empty() {
            if current.chars().count() >= 2 {
                out.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.chars().count() >= 2 {
        out.push(current);
    }
    out
}

/// Share of the target's tokens present in the candidate
fn token_overlap_ratio(candidate: &[String], target: &[String]) -> f64 {
    if target.is_empty() {
        return 0.0;
    }
    let hits = target.iter().filter(|t| candidate.contains(t)).count();
    hits as f64 / target.len() as f64
}

/// 1.0 when one string contains the other; otherwise the longest common
/// substring relative to the shorter string.
fn partial_substring_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(b) || b.contains(a) {
        return 1.0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let lcs = longest_common_substring(&a_chars, &b_chars);
    lcs as f64 / a_chars.len().min(b_chars.len()) as f64
}

/// Normalized sequence similarity: 1 − edit distance / max length
fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() && b_chars.is_empty() {
        return 1.0;
    }
    if a_chars.is_empty() || b_chars.is_empty() {
        return 0.0;
    }
    let dist = levenshtein(&a_chars, &b_chars);
    1.0 - dist as f64 / a_chars.len().max(b_chars.len()) as f64
}

fn longest_common_substring(a: &[char], b: &[char]) -> usize {
    let mut best = 0usize;
    let mut prev = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut row = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                row[j + 1] = prev[j] + 1;
                best = best.max(row[j + 1]);
            }
        }
        prev = row;
    }
    best
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut row = vec![i + 1];
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            row.push(substitution.min(prev[j + 1] + 1).min(row[j] + 1));
        }
        prev = row;
    }
    prev[b.len()]
}
