//! README quality checks.
//!
//! Findings are data, not failures: errors make a document invalid and cost
//! 15 points each, warnings cost 5 points and never affect validity.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Level-2 headings every README must have.
pub const REQUIRED_SECTIONS: [&str; 4] = ["Installation", "Usage", "Contributing", "License"];

/// Level-2 headings whose absence is a warning.
pub const RECOMMENDED_SECTIONS: [&str; 3] = ["API Documentation", "Project Structure", "Dependencies"];

/// Fewest non-blank lines a README may have.
pub const MIN_LINES: usize = 10;

const ERROR_PENALTY: usize = 15;
const WARNING_PENALTY: usize = 5;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading regex"));

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]+\)").expect("valid image regex"));

/// A Markdown ATX heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Number of leading `#` characters, 1 to 6.
    pub level: usize,
    /// Trimmed heading text.
    pub text: String,
    /// 1-based line number.
    pub line: usize,
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` when there are no errors.
    pub valid: bool,
    /// Findings that make the document invalid.
    pub errors: Vec<String>,
    /// Findings that only lower the score.
    pub warnings: Vec<String>,
    /// `100 - 15 * errors - 5 * warnings`, floored at 0.
    pub score: u8,
}

/// Extracts every heading line. Lines inside code fences are not skipped.
#[must_use]
pub fn parse_headings(content: &str) -> Vec<Heading> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(i, line)| {
            let caps = HEADING_RE.captures(line)?;
            Some(Heading { level: caps[1].len(), text: caps[2].trim().to_string(), line: i + 1 })
        })
        .collect()
}

fn has_section(headings: &[Heading], title: &str) -> bool {
    headings.iter().any(|h| h.level == 2 && h.text.to_lowercase() == title.to_lowercase())
}

/// One error when no level-1 heading exists anywhere.
#[must_use]
pub fn check_title(content: &str) -> Vec<String> {
    if parse_headings(content).iter().any(|h| h.level == 1) {
        Vec::new()
    } else {
        vec!["Missing title: expected a # heading at the top".to_string()]
    }
}

/// One error per missing required section.
#[must_use]
pub fn check_required_sections(content: &str) -> Vec<String> {
    let headings = parse_headings(content);
    REQUIRED_SECTIONS
        .iter()
        .filter(|title| !has_section(&headings, title))
        .map(|title| format!("Missing required section: ## {title}"))
        .collect()
}

/// One warning per missing recommended section.
#[must_use]
pub fn check_recommended_sections(content: &str) -> Vec<String> {
    let headings = parse_headings(content);
    RECOMMENDED_SECTIONS
        .iter()
        .filter(|title| !has_section(&headings, title))
        .map(|title| format!("Recommended section missing: ## {title}"))
        .collect()
}

/// One error when a code fence is still open at the end of the document.
///
/// Any line whose trimmed text starts with three backticks toggles the
/// fence state, so an odd number of such lines always yields an error.
#[must_use]
pub fn check_code_blocks(content: &str) -> Vec<String> {
    let mut open_at = None;
    for (i, line) in content.split('\n').enumerate() {
        if line.trim().starts_with("```") {
            open_at = match open_at {
                None => Some(i + 1),
                Some(_) => None,
            };
        }
    }
    open_at.map(|line| format!("Unclosed code block starting at line {line}")).into_iter().collect()
}

/// One error when the document has fewer than [`MIN_LINES`] non-blank lines.
#[must_use]
pub fn check_minimum_length(content: &str) -> Vec<String> {
    let count = content.split('\n').filter(|l| !l.trim().is_empty()).count();
    if count < MIN_LINES {
        vec![format!("README is too short ({count} non-empty lines). Expected at least {MIN_LINES}.")]
    } else {
        Vec::new()
    }
}

/// One warning per image whose alt text is blank.
#[must_use]
pub fn check_image_alt_text(content: &str) -> Vec<String> {
    IMAGE_RE
        .captures_iter(content)
        .filter(|caps| caps[1].trim().is_empty())
        .map(|_| "Image/badge found without alt text".to_string())
        .collect()
}

/// Runs every check over `content`.
#[must_use]
pub fn validate(content: &str) -> ValidationResult {
    let errors: Vec<String> = [
        check_title(content),
        check_required_sections(content),
        check_code_blocks(content),
        check_minimum_length(content),
    ]
    .concat();
    let warnings: Vec<String> =
        [check_recommended_sections(content), check_image_alt_text(content)].concat();

    let penalty = errors.len() * ERROR_PENALTY + warnings.len() * WARNING_PENALTY;
    let score = u8::try_from(100_usize.saturating_sub(penalty)).unwrap_or(0);
    tracing::debug!(errors = errors.len(), warnings = warnings.len(), score, "validated");

    ValidationResult { valid: errors.is_empty(), errors, warnings, score }
}

/// Renders findings and the score for the terminal.
///
/// Empty groups are omitted; the score line is always last.
#[must_use]
pub fn format_report(result: &ValidationResult) -> String {
    let mut out = String::new();
    for (title, findings) in
        [("Validation errors:", &result.errors), ("Validation warnings:", &result.warnings)]
    {
        if findings.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{title}");
        for finding in findings {
            let _ = writeln!(out, "  - {finding}");
        }
        out.push('\n');
    }
    let _ = write!(out, "Quality score: {}/100", result.score);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "\
# my-app

A tool.

## Installation

```bash
npm install
```

## Usage

Run it.

## API Documentation

## Project Structure

## Dependencies

## Contributing

PRs welcome.

## License

MIT
";

    #[test]
    fn parses_headings_with_levels_and_lines() {
        let headings = parse_headings("# Title\ntext\n##   Spaced  \n####### seven\n#nospace\n###### six");
        assert_eq!(
            headings,
            vec![
                Heading { level: 1, text: "Title".into(), line: 1 },
                Heading { level: 2, text: "Spaced".into(), line: 3 },
                Heading { level: 6, text: "six".into(), line: 6 },
            ]
        );
    }

    #[test]
    fn complete_document_scores_100() {
        let result = validate(GOOD);
        assert_eq!(
            result,
            ValidationResult { valid: true, errors: vec![], warnings: vec![], score: 100 }
        );
    }

    #[test]
    fn section_matching_is_case_insensitive_and_level_2_only() {
        let doc = GOOD.replace("## Usage", "## USAGE").replace("## License", "### License");
        assert_eq!(check_required_sections(&doc), vec!["Missing required section: ## License"]);
    }

    #[test]
    fn title_may_appear_anywhere() {
        assert!(check_title("intro\n\n# Late title").is_empty());
        assert_eq!(
            check_title("## Only sections"),
            vec!["Missing title: expected a # heading at the top"]
        );
    }

    #[test]
    fn each_missing_required_section_costs_15() {
        let without = GOOD.replace("## Usage\n", "");
        let result = validate(&without);
        assert!(!result.valid);
        assert_eq!(result.score, 85);
        assert_eq!(result.errors, vec!["Missing required section: ## Usage"]);
    }

    #[test]
    fn each_warning_costs_5_and_keeps_validity() {
        let without = GOOD.replace("## Dependencies\n", "");
        let result = validate(&without);
        assert!(result.valid);
        assert_eq!(result.score, 95);

        let with_blank_alt = format!("{GOOD}\n![ ](https://x/badge.svg) ![ok](https://x/ok.svg)\n");
        let result = validate(&with_blank_alt);
        assert!(result.valid);
        assert_eq!(result.warnings, vec!["Image/badge found without alt text"]);
        assert_eq!(result.score, 95);
    }

    #[test]
    fn odd_fence_count_reports_the_unmatched_opening() {
        let doc = "a\n```\nb\n```\n  ```rust\nc";
        assert_eq!(check_code_blocks(doc), vec!["Unclosed code block starting at line 5"]);
        for n in [1, 3, 5] {
            let doc = "```x\nbody\n".repeat(n);
            assert_eq!(check_code_blocks(&doc).len(), 1, "{n} fences");
        }
        assert!(check_code_blocks("```\n```\n```\n```").is_empty());
    }

    #[test]
    fn short_documents_name_the_line_count() {
        assert_eq!(
            check_minimum_length("# a\n\nb\n   \nc"),
            vec!["README is too short (3 non-empty lines). Expected at least 10."]
        );
    }

    #[test]
    fn ten_non_blank_lines_is_long_enough() {
        let nine = vec!["line"; 9].join("\n\n");
        assert_eq!(
            check_minimum_length(&nine),
            vec!["README is too short (9 non-empty lines). Expected at least 10."]
        );
        let ten = format!("{nine}\nlast");
        assert!(check_minimum_length(&ten).is_empty());
    }

    #[test]
    fn score_is_floored_at_zero() {
        let result = validate("");
        // Title, four sections, length; then three recommended sections.
        assert_eq!((result.errors.len(), result.warnings.len()), (6, 3));
        assert_eq!(result.score, 0);
        assert!(!result.valid);
    }

    #[test]
    fn report_lists_groups_then_score() {
        let result = ValidationResult {
            valid: false,
            errors: vec!["Missing required section: ## Usage".into()],
            warnings: vec!["Recommended section missing: ## Dependencies".into()],
            score: 80,
        };
        assert_eq!(
            format_report(&result),
            "Validation errors:\n  - Missing required section: ## Usage\n\n\
             Validation warnings:\n  - Recommended section missing: ## Dependencies\n\n\
             Quality score: 80/100"
        );
        let clean = validate(GOOD);
        assert_eq!(format_report(&clean), "Quality score: 100/100");
    }
}
