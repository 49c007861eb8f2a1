//! Deterministic value extraction from the top-ranked evidence

use regex::Regex;

/// Extracts the slot value from an excerpt with a fixed pattern cascade:
/// age ranges, ages, counts, percentages, unit amounts, then a bare digit
/// run. The first pattern with a match wins; nothing is merged across
/// evidences.
#[derive(Debug)]
pub struct ValueExtractor {
    patterns: Vec<Regex>,
}

impl ValueExtractor {
    /// Compile the pattern cascade
    pub fn new() -> Self {
        let sources = [
            // Age range then single age ("15세~65세", "65세")
            r"\d+\s*세\s*[~∼\-]\s*\d+\s*세",
            r"\d+\s*세",
            // Counts ("최초 1회")
            r"\d+\s*회",
            // Percentages ("50%")
            r"\d+\s*%",
            // Unit amounts and periods ("90일", "3,000만원")
            r"\d[\d,]*\s*(?:일|개월|년|만원|억원)",
            // Generic digit run, last resort
            r"\d[\d,]*",
        ];
        Self {
            patterns: sources
                .iter()
                .map(|s| Regex::new(s).expect("static regex compiles"))
                .collect(),
        }
    }

    /// First matching value in the excerpt, or `None`
    pub fn extract(&self, excerpt: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.find(excerpt))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for ValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_period_value() {
        let extractor = ValueExtractor::new();
        assert_eq!(extractor.extract("대기기간 90일이 적용"), Some("90일".to_string()));
    }

    #[test]
    fn test_age_range_beats_bare_number() {
        let extractor = ValueExtractor::new();
        assert_eq!(
            extractor.extract("가입나이 15세~65세, 갱신 3년"),
            Some("15세~65세".to_string())
        );
    }

    #[test]
    fn test_percentage_value() {
        let extractor = ValueExtractor::new();
        assert_eq!(extractor.extract("1년 미만 감액 50% 지급"), Some("50%".to_string()));
    }

    #[test]
    fn test_count_beats_percentage() {
        let extractor = ValueExtractor::new();
        assert_eq!(
            extractor.extract("최초 1회에 한하여 100% 지급"),
            Some("1회".to_string())
        );
    }

    #[test]
    fn test_amount_with_thousands_separator() {
        let extractor = ValueExtractor::new();
        assert_eq!(extractor.extract("지급한도 3,000만원"), Some("3,000만원".to_string()));
    }

    #[test]
    fn test_bare_digit_run_last_resort() {
        let extractor = ValueExtractor::new();
        assert_eq!(extractor.extract("별표 제12호 참조"), Some("12".to_string()));
    }

    #[test]
    fn test_no_digits_no_value() {
        let extractor = ValueExtractor::new();
        assert_eq!(extractor.extract("보장하지 않는 사항"), None);
    }
}
