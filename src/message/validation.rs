use crate::errors::FieldErrors;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 200;
pub const CONTENT_MIN_LEN: usize = 10;
pub const CONTENT_MAX_LEN: usize = 1000;

/// Checks the field constraints of a message payload.
///
/// Returns a field name to error message mapping; an empty mapping means the
/// payload is valid. Each field reports at most one error: the required check
/// runs first and suppresses the length check.
pub fn validate_message(title: &str, content: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(e) = check_field("title", title, TITLE_MIN_LEN, TITLE_MAX_LEN) {
        errors.insert("title", vec![e]);
    }
    if let Some(e) = check_field("content", content, CONTENT_MIN_LEN, CONTENT_MAX_LEN) {
        errors.insert("content", vec![e]);
    }

    errors
}

pub fn field_error(field: &'static str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field, vec![message.to_string()]);
    errors
}

fn check_field(field: &'static str, value: &str, min: usize, max: usize) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{field} is required"));
    }

    let len = value.chars().count();
    if len < min || len > max {
        Some(format!("{field} must be between {min} and {max} characters"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fields_within_bounds() {
        let errors = validate_message("Launch Notice", "Service launching next Monday.");
        assert!(errors.is_empty());
    }

    #[test]
    fn accepts_inclusive_length_bounds() {
        assert!(validate_message(&"a".repeat(3), &"b".repeat(10)).is_empty());
        assert!(validate_message(&"a".repeat(200), &"b".repeat(1000)).is_empty());
    }

    #[test]
    fn rejects_blank_title_as_required() {
        for title in ["", "   ", "\t\n"] {
            let errors = validate_message(title, "long enough content");

            let title_errors = errors.get("title").expect("title error entry");
            assert_eq!(title_errors, &vec!["title is required".to_string()]);
        }
    }

    #[test]
    fn rejects_out_of_bounds_title_with_single_length_error() {
        for title in ["ab", "a".repeat(201).as_str()] {
            let errors = validate_message(title, "long enough content");

            let title_errors = errors.get("title").expect("title error entry");
            assert_eq!(title_errors.len(), 1);
            assert_eq!(
                title_errors[0],
                "title must be between 3 and 200 characters"
            );
        }
    }

    #[test]
    fn rejects_out_of_bounds_content() {
        let errors = validate_message("A title", "too short");
        assert_eq!(
            errors.get("content").expect("content error entry")[0],
            "content must be between 10 and 1000 characters"
        );

        let errors = validate_message("A title", &"c".repeat(1001));
        assert!(errors.contains_key("content"));
    }

    #[test]
    fn reports_both_fields_independently() {
        let errors = validate_message("", "");

        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("content"));
    }

    #[test]
    fn length_is_measured_in_chars() {
        // Two-byte chars; 3 of them satisfy the title minimum.
        assert!(validate_message("äöü", "content with äöü chars").is_empty());
    }
}
