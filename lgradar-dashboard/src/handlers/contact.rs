//! Public contact form
//!
//! Submissions are validated and logged. Nothing is stored.

use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use validator::Validate;

use crate::forms::ValidationErrors;
use crate::htmx::HxRequest;
use crate::views::public;

/// Submitted contact form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub company: Option<String>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl ContactForm {
    /// Trim every field; a blank company becomes `None`
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self
                .company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

pub async fn contact_page() -> Html<String> {
    let form = public::contact_form(&ValidationErrors::new(), &ContactForm::default(), false);
    Html(public::contact(&form))
}

/// `POST /contact`: htmx gets the form fragment, plain posts the whole page
pub async fn submit(HxRequest(is_htmx): HxRequest, Form(form): Form<ContactForm>) -> Html<String> {
    let form = form.normalized();

    let fragment = match form.validate() {
        Ok(()) => {
            tracing::info!(
                subject = %form.subject,
                company = form.company.as_deref().unwrap_or("-"),
                message_len = form.message.len(),
                "Contact form submitted"
            );
            public::contact_form(&ValidationErrors::new(), &ContactForm::default(), true)
        }
        Err(e) => {
            tracing::debug!(fields = e.field_errors().len(), "Contact form rejected");
            public::contact_form(&ValidationErrors::from(e), &form, false)
        }
    };

    if is_htmx {
        Html(fragment)
    } else {
        Html(public::contact(&fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_drops_blank_company() {
        let form = ContactForm {
            first_name: "  Ada ".to_string(),
            company: Some("   ".to_string()),
            ..ContactForm::default()
        }
        .normalized();

        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.company, None);
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        let errors = ValidationErrors::from(
            ContactForm::default().normalized().validate().unwrap_err(),
        );
        assert_eq!(errors.for_field("first_name"), ["First name is required"]);
        assert_eq!(errors.for_field("message"), ["Message is required"]);
        assert!(errors.for_field("company").is_empty());
    }
}
