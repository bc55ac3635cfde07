//! Placeholder matching for `{path}` syntax and custom delimiters
//!
//! Scans a template for placeholder occurrences and extracts the trimmed
//! path text of each one, with its position.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use stencil_domain::{DomainError, DomainResult};

/// Default rule: single-level braces, content up to the first `}`.
pub const BRACES_PATTERN: &str = r"\{([^}]*)\}";

/// `[[path]]` rule.
pub const DOUBLE_BRACKETS_PATTERN: &str = r"\[\[([^\]]*)\]\]";

/// `{{path}}` rule.
pub const DOUBLE_BRACES_PATTERN: &str = r"\{\{([^}]*)\}\}";

#[allow(clippy::expect_used)]
static BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BRACES_PATTERN).expect("valid regex"));

#[allow(clippy::expect_used)]
static DOUBLE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DOUBLE_BRACKETS_PATTERN).expect("valid regex"));

#[allow(clippy::expect_used)]
static DOUBLE_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DOUBLE_BRACES_PATTERN).expect("valid regex"));

/// A single placeholder occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch {
    /// Byte range of the whole match in the template.
    pub span: Range<usize>,

    /// The whitespace-trimmed path captured inside the delimiters.
    pub path: String,
}

impl PlaceholderMatch {
    /// Creates a new match, trimming the captured path.
    #[must_use]
    pub fn new(span: Range<usize>, path: &str) -> Self {
        Self {
            span,
            path: path.trim().to_string(),
        }
    }

    /// Returns the full matched text, delimiters included.
    #[must_use]
    pub fn text<'t>(&self, template: &'t str) -> &'t str {
        template.get(self.span.clone()).unwrap_or_default()
    }
}

/// A rule that finds placeholders in a template.
///
/// Implementations return leftmost, non-overlapping matches in template
/// order.
pub trait PlaceholderMatcher: Send + Sync + fmt::Debug {
    /// Finds every placeholder occurrence in the template.
    fn find_all(&self, template: &str) -> Vec<PlaceholderMatch>;

    /// Returns the source of the rule, for diagnostics.
    fn pattern(&self) -> &str;
}

/// A regex-backed matcher whose single capture group holds the path.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compiles a custom matching rule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPattern` if the pattern does not compile
    /// or does not have exactly one capture group.
    pub fn new(pattern: &str) -> DomainResult<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| DomainError::invalid_pattern(pattern, e.to_string()))?;
        Self::from_regex(regex)
    }

    /// Wraps an already compiled regex.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPattern` unless the regex has exactly one
    /// capture group.
    pub fn from_regex(regex: Regex) -> DomainResult<Self> {
        // Group 0 is the whole match
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(DomainError::invalid_pattern(
                regex.as_str(),
                format!("expected exactly one capture group, found {groups}"),
            ));
        }
        Ok(Self { regex })
    }

    /// The default `{path}` rule.
    #[must_use]
    pub fn braces() -> Self {
        Self {
            regex: BRACES.clone(),
        }
    }

    /// The `[[path]]` rule.
    #[must_use]
    pub fn double_brackets() -> Self {
        Self {
            regex: DOUBLE_BRACKETS.clone(),
        }
    }

    /// The `{{path}}` rule.
    #[must_use]
    pub fn double_braces() -> Self {
        Self {
            regex: DOUBLE_BRACES.clone(),
        }
    }
}

impl Default for RegexMatcher {
    fn default() -> Self {
        Self::braces()
    }
}

impl PlaceholderMatcher for RegexMatcher {
    fn find_all(&self, template: &str) -> Vec<PlaceholderMatch> {
        self.regex
            .captures_iter(template)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                // An optional group that did not take part yields an empty path
                let path = caps.get(1).map_or("", |m| m.as_str());
                Some(PlaceholderMatch::new(whole.range(), path))
            })
            .collect()
    }

    fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Extracts the unique placeholder paths, in order of first appearance.
#[must_use]
pub fn find_placeholders(template: &str, matcher: &dyn PlaceholderMatcher) -> Vec<String> {
    matcher
        .find_all(template)
        .into_iter()
        .map(|m| m.path)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Returns true if the template contains at least one placeholder.
#[must_use]
pub fn has_placeholders(template: &str, matcher: &dyn PlaceholderMatcher) -> bool {
    !matcher.find_all(template).is_empty()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(matches: &[PlaceholderMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.path.as_str()).collect()
    }

    #[test]
    fn test_find_simple_placeholder() {
        let matches = RegexMatcher::braces().find_all("{name}");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "name");
        assert_eq!(matches[0].span, 0..6);
    }

    #[test]
    fn test_find_dotted_path() {
        let matches = RegexMatcher::braces().find_all("Hi {user.name}!");
        assert_eq!(paths(&matches), vec!["user.name"]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let template = "Hello { name }";
        let matches = RegexMatcher::braces().find_all(template);
        assert_eq!(matches[0].path, "name");
        assert_eq!(matches[0].text(template), "{ name }");
    }

    #[test]
    fn test_empty_and_blank_content_match() {
        let matches = RegexMatcher::braces().find_all("{} and {   }");
        assert_eq!(paths(&matches), vec!["", ""]);
    }

    #[test]
    fn test_no_placeholders() {
        assert!(RegexMatcher::braces().find_all("Hello, World!").is_empty());
    }

    #[test]
    fn test_unclosed_brace() {
        assert!(RegexMatcher::braces().find_all("{name").is_empty());
    }

    #[test]
    fn test_adjacent_placeholders() {
        let matches = RegexMatcher::braces().find_all("{a}{b}{c}");
        assert_eq!(paths(&matches), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicates_are_kept_in_raw_matches() {
        let matches = RegexMatcher::braces().find_all("{a} {b} {a}");
        assert_eq!(paths(&matches), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_nested_braces_are_not_supported() {
        let template = "{{name}}";
        let matches = RegexMatcher::braces().find_all(template);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "{name");
        assert_eq!(matches[0].text(template), "{{name}");
    }

    #[test]
    fn test_double_brackets() {
        let matches = RegexMatcher::double_brackets().find_all("Hello [[ name ]] and {other}");
        assert_eq!(paths(&matches), vec!["name"]);
    }

    #[test]
    fn test_double_braces() {
        let template = "{{greeting}}, {single}";
        let matches = RegexMatcher::double_braces().find_all(template);
        assert_eq!(paths(&matches), vec!["greeting"]);
        assert_eq!(matches[0].text(template), "{{greeting}}");
    }

    #[test]
    fn test_spans_with_multibyte_text() {
        let template = "Olá {nome}, ⚠️ {idade}";
        let matches = RegexMatcher::braces().find_all(template);
        assert_eq!(matches[0].text(template), "{nome}");
        assert_eq!(matches[1].text(template), "{idade}");
    }

    #[test]
    fn test_custom_pattern() {
        let matcher = RegexMatcher::new(r"<%\s*(\w+(?:\.\w+)*)\s*%>").unwrap();
        let matches = matcher.find_all("Dear <% user.name %>,");
        assert_eq!(paths(&matches), vec!["user.name"]);
    }

    #[test]
    fn test_custom_pattern_requires_one_group() {
        let err = RegexMatcher::new(r"\{\w+\}").unwrap_err();
        assert!(matches!(err, DomainError::InvalidPattern { .. }));
        assert!(err.to_string().contains("found 0"));

        let err = RegexMatcher::new(r"\{(\w+)(\w*)\}").unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_custom_pattern_must_compile() {
        let err = RegexMatcher::new(r"\{(unclosed").unwrap_err();
        assert!(matches!(err, DomainError::InvalidPattern { .. }));
    }

    #[test]
    fn test_non_participating_group_is_empty_path() {
        let matcher = RegexMatcher::new(r"\$(?:\{(\w+)\}|\$)").unwrap();
        let matches = matcher.find_all("cost: $$ for ${item}");
        assert_eq!(paths(&matches), vec!["", "item"]);
    }

    #[test]
    fn test_find_placeholders_deduplicates_in_order() {
        let names = find_placeholders(
            "Hello {name}, you are {age} and live in {city}. Bye {name}!",
            &RegexMatcher::braces(),
        );
        assert_eq!(names, vec!["name", "age", "city"]);
    }

    #[test]
    fn test_has_placeholders() {
        let matcher = RegexMatcher::braces();
        assert!(has_placeholders("Hello {name}!", &matcher));
        assert!(!has_placeholders("Hello World!", &matcher));
        assert!(!has_placeholders("incomplete}", &matcher));
    }

    #[test]
    fn test_pattern_source() {
        assert_eq!(RegexMatcher::braces().pattern(), BRACES_PATTERN);
        assert_eq!(RegexMatcher::double_brackets().pattern(), DOUBLE_BRACKETS_PATTERN);
    }
}
