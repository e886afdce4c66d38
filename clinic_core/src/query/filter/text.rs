//! Text comparison logic for predicates

use log::debug;
use regex::RegexBuilder;
use serde_json::Value;

use super::coerce::stringify;
use super::types::Operator;

/// Compare a field against a text predicate. Both sides are stringified and
/// compared without regard to case.
pub fn compare_text(field_value: &Value, operator: &Operator, filter_value: &Value) -> bool {
    let value = stringify(field_value);
    let lowered = value.to_lowercase();
    let needle = stringify(filter_value).to_lowercase();

    match operator {
        Operator::Equals => lowered == needle,
        Operator::NotEquals => lowered != needle,
        Operator::Contains => lowered.contains(&needle),
        Operator::NotContains => !lowered.contains(&needle),
        Operator::StartsWith => lowered.starts_with(&needle),
        Operator::EndsWith => lowered.ends_with(&needle),
        Operator::Regex => matches_pattern(&value, &stringify(filter_value)),
        Operator::IsEmpty => value.trim().is_empty(),
        Operator::IsNotEmpty => !value.trim().is_empty(),
        _ => false,
    }
}

/// Case-insensitive regex match. A pattern that does not compile never matches.
fn matches_pattern(value: &str, pattern: &str) -> bool {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(value),
        Err(e) => {
            debug!("Ignoring invalid regex '{}': {}", pattern, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(field: Value, op: Operator, filter: &str) -> bool {
        compare_text(&field, &op, &json!(filter))
    }

    #[test]
    fn test_equals_case_insensitive() {
        assert!(text(json!("Alice"), Operator::Equals, "alice"));
        assert!(text(json!("ALICE"), Operator::Equals, "Alice"));
        assert!(!text(json!("Alice"), Operator::Equals, "Alicia"));
    }

    #[test]
    fn test_not_equals() {
        assert!(text(json!("open"), Operator::NotEquals, "closed"));
        assert!(!text(json!("Open"), Operator::NotEquals, "open"));
    }

    #[test]
    fn test_contains_case_insensitive() {
        assert!(text(json!("Alice"), Operator::Contains, "ALI"));
        assert!(!text(json!("Alice"), Operator::Contains, "bob"));
        assert!(text(json!("Alice"), Operator::NotContains, "bob"));
        assert!(!text(json!("Alice"), Operator::NotContains, "LIC"));
    }

    #[test]
    fn test_starts_and_ends_with() {
        assert!(text(json!("Hearing test"), Operator::StartsWith, "hear"));
        assert!(!text(json!("Hearing test"), Operator::StartsWith, "test"));
        assert!(text(json!("Hearing test"), Operator::EndsWith, "TEST"));
    }

    #[test]
    fn test_numbers_are_stringified() {
        assert!(text(json!(9876543210_i64), Operator::StartsWith, "98765"));
        assert!(text(json!(500), Operator::Equals, "500"));
    }

    #[test]
    fn test_regex_is_case_insensitive() {
        assert!(text(json!("REF-2024-001"), Operator::Regex, r"^ref-\d{4}"));
        assert!(!text(json!("REF-2024-001"), Operator::Regex, r"^inv-"));
    }

    #[test]
    fn test_invalid_regex_never_matches() {
        assert!(!text(json!("(unclosed"), Operator::Regex, "(unclosed"));
        assert!(!text(json!("anything"), Operator::Regex, "[a-"));
    }

    #[test]
    fn test_is_empty() {
        assert!(text(json!(""), Operator::IsEmpty, ""));
        assert!(text(json!("   "), Operator::IsEmpty, ""));
        assert!(!text(json!("x"), Operator::IsEmpty, ""));
        assert!(text(json!("x"), Operator::IsNotEmpty, ""));
    }

    #[test]
    fn test_operator_from_another_type_never_matches() {
        assert!(!text(json!("10"), Operator::GreaterThan, "5"));
        assert!(!text(json!("x"), Operator::IsNull, ""));
        assert!(!text(json!("x"), Operator::Unsupported, "x"));
    }
}
