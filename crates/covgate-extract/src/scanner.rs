//! Candidate extraction - line-oriented keyword scanning

use crate::patterns::PatternDef;
use covgate_domain::{Candidate, DocCategory, SlotKey};
use tracing::debug;

/// Table separator characters recognized by the table heuristic
const TABLE_SEPARATORS: [char; 3] = ['|', '│', '┃'];

/// Whether a line looks like a table row: at least two separator characters,
/// or at least two runs of two-or-more consecutive whitespace characters.
pub fn is_table_shaped(line: &str) -> bool {
    let separator_count = line.chars().filter(|c| TABLE_SEPARATORS.contains(c)).count();
    if separator_count >= 2 {
        return true;
    }

    let mut runs = 0usize;
    let mut run_len = 0usize;
    for c in line.chars() {
        if c.is_whitespace() {
            run_len += 1;
        } else {
            if run_len >= 2 {
                runs += 1;
            }
            run_len = 0;
        }
    }
    if run_len >= 2 {
        runs += 1;
    }
    runs >= 2
}

/// Scan one page of text for slot candidates.
///
/// Pure function of (text, pattern). Each line yields at most one candidate;
/// the first keyword in the pattern's declaration order wins. When
/// `table_priority` is set, table-shaped lines are scanned in a first pass
/// and the remaining lines in a second, so table matches come first in the
/// returned order.
pub fn scan_page(
    text: &str,
    slot: SlotKey,
    pattern: &PatternDef,
    category: DocCategory,
    page: usize,
) -> Vec<Candidate> {
    let lines: Vec<&str> = text.lines().collect();
    let mut candidates = Vec::new();
    let mut consumed = vec![false; lines.len()];

    if pattern.table_priority {
        for (idx, line) in lines.iter().enumerate() {
            if !is_table_shaped(line) {
                continue;
            }
            if let Some(candidate) =
                match_line(&lines, idx, slot, pattern, category, page, true)
            {
                candidates.push(candidate);
                consumed[idx] = true;
            }
        }
    }

    for (idx, line) in lines.iter().enumerate() {
        if consumed[idx] {
            continue;
        }
        let table_shaped = is_table_shaped(line);
        if pattern.table_priority && table_shaped {
            // Already covered by the table pass
            continue;
        }
        if let Some(candidate) =
            match_line(&lines, idx, slot, pattern, category, page, table_shaped)
        {
            candidates.push(candidate);
        }
    }

    debug!(
        slot = slot.as_str(),
        category = category.as_str(),
        page,
        count = candidates.len(),
        "scanned page"
    );
    candidates
}

/// Try the pattern's keywords against one line, in declaration order.
fn match_line(
    lines: &[&str],
    idx: usize,
    slot: SlotKey,
    pattern: &PatternDef,
    category: DocCategory,
    page: usize,
    is_table_shaped: bool,
) -> Option<Candidate> {
    let line = lines[idx];
    let keyword = pattern
        .keywords
        .iter()
        .find(|keyword| line.contains(keyword.as_str()))?;

    let start = idx.saturating_sub(pattern.context_lines);
    let end = (idx + pattern.context_lines + 1).min(lines.len());
    let context_text = lines[start..end].join("\n");

    Some(Candidate {
        slot,
        category,
        page,
        matched_keyword: keyword.clone(),
        line_num: idx,
        line_text: line.to_string(),
        context_text,
        is_table_shaped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternDef;

    fn pattern(keywords: &[&str], context: usize, table: bool) -> PatternDef {
        PatternDef::new(keywords, context, table)
    }

    #[test]
    fn test_table_shape_by_separators() {
        assert!(is_table_shaped("| 암진단비 | 90일 |"));
        assert!(is_table_shaped("│가입나이│15세~65세│"));
        assert!(!is_table_shaped("암진단비는 | 표에 있다"));
    }

    #[test]
    fn test_table_shape_by_whitespace_runs() {
        assert!(is_table_shaped("암진단비    90일    3000만원"));
        assert!(!is_table_shaped("암진단비는 90일 후 보장됩니다"));
    }

    #[test]
    fn test_single_candidate_per_line() {
        // Both keywords appear; the first declared keyword wins
        let text = "면책기간 및 대기기간은 90일입니다";
        let candidates = scan_page(
            text,
            SlotKey::WaitingPeriod,
            &pattern(&["대기기간", "면책기간"], 1, false),
            DocCategory::PolicyTerms,
            1,
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].matched_keyword, "대기기간");
    }

    #[test]
    fn test_context_window() {
        let text = "첫째 줄\n둘째 줄\n대기기간 90일\n넷째 줄\n다섯째 줄";
        let candidates = scan_page(
            text,
            SlotKey::WaitingPeriod,
            &pattern(&["대기기간"], 1, false),
            DocCategory::Proposal,
            3,
        );
        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.line_num, 2);
        assert_eq!(candidate.page, 3);
        assert_eq!(candidate.context_text, "둘째 줄\n대기기간 90일\n넷째 줄");
    }

    #[test]
    fn test_context_window_clamped_at_page_bounds() {
        let text = "대기기간 90일\n다음 줄";
        let candidates = scan_page(
            text,
            SlotKey::WaitingPeriod,
            &pattern(&["대기기간"], 3, false),
            DocCategory::Proposal,
            1,
        );
        assert_eq!(candidates[0].context_text, "대기기간 90일\n다음 줄");
    }

    #[test]
    fn test_table_pass_comes_first() {
        let text = "감액 조항은 아래 표와 같습니다\n| 감액 | 50% |\n끝";
        let candidates = scan_page(
            text,
            SlotKey::Reduction,
            &pattern(&["감액"], 0, true),
            DocCategory::ProductSummary,
            1,
        );
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].is_table_shaped);
        assert_eq!(candidates[0].line_num, 1);
        assert!(!candidates[1].is_table_shaped);
        assert_eq!(candidates[1].line_num, 0);
    }

    #[test]
    fn test_line_never_yields_two_candidates_across_passes() {
        let text = "| 감액 | 50% |";
        let candidates = scan_page(
            text,
            SlotKey::Reduction,
            &pattern(&["감액"], 0, true),
            DocCategory::ProductSummary,
            1,
        );
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_no_keywords_no_candidates() {
        let candidates = scan_page(
            "이 페이지에는 관련 내용이 없습니다",
            SlotKey::WaitingPeriod,
            &pattern(&["대기기간"], 2, false),
            DocCategory::PolicyTerms,
            1,
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_empty_page() {
        let candidates = scan_page(
            "",
            SlotKey::WaitingPeriod,
            &pattern(&["대기기간"], 2, false),
            DocCategory::PolicyTerms,
            1,
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_deterministic_repeat_scan() {
        let text = "대기기간 90일\n감액 50%\n대기기간 180일";
        let def = pattern(&["대기기간"], 1, false);
        let first = scan_page(text, SlotKey::WaitingPeriod, &def, DocCategory::Proposal, 1);
        let second = scan_page(text, SlotKey::WaitingPeriod, &def, DocCategory::Proposal, 1);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
