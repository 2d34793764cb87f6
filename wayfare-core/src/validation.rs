use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field-level failure found while parsing one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Typed reader over raw form values. Each accessor records a failure and
/// returns `None` instead of stopping, so one pass reports every bad field.
pub struct FieldReader {
    errors: ValidationErrors,
}

impl FieldReader {
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    pub fn required(&mut self, field: &'static str, raw: Option<&str>, max_len: usize) -> Option<String> {
        match non_blank(raw) {
            Some(value) => self.bounded(field, value, max_len),
            None => {
                self.errors.add(field, "This field is required.");
                None
            }
        }
    }

    /// Blank input reads as `None`; an over-long value is still an error.
    pub fn optional(&mut self, field: &'static str, raw: Option<&str>, max_len: usize) -> Option<String> {
        non_blank(raw).and_then(|value| self.bounded(field, value, max_len))
    }

    pub fn email(&mut self, field: &'static str, raw: Option<&str>) -> Option<String> {
        let value = self.required(field, raw, 254)?;
        if is_plausible_email(&value) {
            Some(value)
        } else {
            self.errors.add(field, "Enter a valid email address.");
            None
        }
    }

    pub fn date(&mut self, field: &'static str, raw: Option<&str>) -> Option<NaiveDate> {
        let value = self.required(field, raw, 10)?;
        match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.add(field, "Enter a valid date (YYYY-MM-DD).");
                None
            }
        }
    }

    /// Whole-number count within `min..=max`. Missing or blank input takes `default`.
    pub fn count(&mut self, field: &'static str, raw: Option<&str>, min: u32, max: u32, default: u32) -> Option<u32> {
        let Some(value) = non_blank(raw) else {
            return Some(default);
        };
        match value.parse::<i64>() {
            Ok(n) if n < i64::from(min) => {
                self.errors.add(field, format!("Must be at least {}.", min));
                None
            }
            Ok(n) if n > i64::from(max) => {
                self.errors.add(field, format!("Must be at most {}.", max));
                None
            }
            Ok(n) => u32::try_from(n).ok(),
            Err(_) => {
                self.errors.add(field, "Enter a whole number.");
                None
            }
        }
    }

    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn finish(self) -> ValidationErrors {
        self.errors
    }

    fn bounded(&mut self, field: &'static str, value: &str, max_len: usize) -> Option<String> {
        if value.chars().count() > max_len {
            self.errors
                .add(field, format!("Ensure this value has at most {} characters.", max_len));
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl Default for FieldReader {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_failure() {
        let mut reader = FieldReader::new();
        assert_eq!(reader.required("name", Some("  "), 255), None);
        assert_eq!(reader.email("email", Some("not-an-email")), None);
        assert_eq!(reader.date("travel_date", Some("25/12/2024")), None);
        assert_eq!(reader.count("adults", Some("zero"), 1, 50, 1), None);

        let errors = reader.finish();
        assert_eq!(errors.fields().len(), 4);
        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert!(errors.has("travel_date"));
        assert!(errors.has("adults"));
    }

    #[test]
    fn test_count_rules() {
        let mut reader = FieldReader::new();
        assert_eq!(reader.count("adults", None, 1, 50, 1), Some(1));
        assert_eq!(reader.count("children", Some(""), 0, 50, 0), Some(0));
        assert_eq!(reader.count("adults", Some(" 3 "), 1, 50, 1), Some(3));
        assert_eq!(reader.count("adults", Some("0"), 1, 50, 1), None);
        assert_eq!(reader.count("children", Some("-1"), 0, 50, 0), None);
        assert_eq!(reader.count("children", Some("1.5"), 0, 50, 0), None);
        assert_eq!(reader.finish().fields().len(), 3);
    }

    #[test]
    fn test_count_upper_bound() {
        let mut reader = FieldReader::new();
        assert_eq!(reader.count("adults", Some("50"), 1, 50, 1), Some(50));
        assert_eq!(reader.count("adults", Some("51"), 1, 50, 1), None);
        assert_eq!(reader.count("adults", Some("3000000000"), 1, 50, 1), None);

        let errors = reader.finish();
        assert_eq!(errors.fields().len(), 2);
        assert_eq!(errors.fields()[0].message, "Must be at most 50.");
    }

    #[test]
    fn test_length_limit_applies_to_optional_fields() {
        let mut reader = FieldReader::new();
        let long = "x".repeat(21);
        assert_eq!(reader.optional("zip_code", Some(&long), 20), None);
        assert_eq!(reader.optional("zip_code", Some(""), 20), None);
        assert_eq!(reader.optional("city", Some(" Pune "), 100), Some("Pune".to_string()));

        let errors = reader.finish();
        assert_eq!(errors.fields().len(), 1);
        assert!(errors.has("zip_code"));
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("a.b@example.co.in"));
        assert!(!is_plausible_email("a b@example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("user@localhost"));
        assert!(!is_plausible_email("user@.com"));
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("adults", "Must be at least 1.");
        errors.add("email", "This field is required.");
        assert_eq!(
            errors.to_string(),
            "adults: Must be at least 1.; email: This field is required."
        );
    }
}
