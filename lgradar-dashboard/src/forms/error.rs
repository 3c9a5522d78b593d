//! Field-level validation errors for rendered forms

use std::collections::BTreeMap;

/// Error messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
    form: Vec<String>,
}

impl ValidationErrors {
    /// No errors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message to a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Attach a message to the form as a whole
    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Messages for one field
    #[must_use]
    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Messages not tied to a field
    #[must_use]
    pub fn form_errors(&self) -> &[String] {
        &self.form
    }

    /// Whether there is nothing to report
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = Self::new();
        for (field, field_errors) in source.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
                errors.add(field.to_string(), message);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(email(message = "Enter a valid email address"))]
        email: String,
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_collects_validator_messages() {
        let form = Signup {
            email: "not-an-email".to_string(),
            name: String::new(),
        };
        let errors = ValidationErrors::from(form.validate().unwrap_err());

        assert_eq!(errors.for_field("email"), ["Enter a valid email address"]);
        assert_eq!(errors.for_field("name"), ["name is invalid"]);
        assert!(errors.for_field("other").is_empty());
    }

    #[test]
    fn test_form_errors_count_as_errors() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        errors.add_form_error("Invalid login credentials");
        assert!(!errors.is_empty());
        assert_eq!(errors.form_errors(), ["Invalid login credentials"]);
    }
}
