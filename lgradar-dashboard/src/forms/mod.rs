//! Form building and validation for dashboard pages
//!
//! A builder-pattern API for the login, signup, contact and account forms:
//! - HTMX attribute support
//! - Field-level error rendering
//! - Conversion from `validator` errors
//!
//! # Quick Start
//!
//! ```rust
//! use lgradar_dashboard::forms::{FormBuilder, InputType};
//!
//! let form = FormBuilder::new("/contact", "POST")
//!     .field("email", InputType::Email)
//!         .label("Email")
//!         .required()
//!         .placeholder("Enter your email")
//!         .done()
//!     .textarea("message")
//!         .label("Message")
//!         .rows(6)
//!         .done()
//!     .submit("Send Message")
//!     .htmx_post("/contact")
//!     .htmx_target("#contact-form")
//!     .htmx_swap("outerHTML")
//!     .build();
//!
//! assert!(form.contains("<textarea"));
//! ```
//!
//! # Validation Errors
//!
//! ```rust
//! use lgradar_dashboard::forms::{FormBuilder, InputType, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! errors.add("email", "Enter a valid email address");
//!
//! let form = FormBuilder::new("/login", "POST")
//!     .errors(&errors)
//!     .field("email", InputType::Email)
//!         .label("Email")
//!         .done()
//!     .build();
//!
//! assert!(form.contains("Enter a valid email address"));
//! ```

mod builder;
mod error;
mod field;
mod render;

pub use builder::{FieldBuilder, FormBuilder};
pub use error::ValidationErrors;
pub use field::{FieldKind, FormField, InputType, SelectOption};
pub use render::{escape_html, FormRenderer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_form() {
        let form = FormBuilder::new("/login", "POST")
            .field("email", InputType::Email)
            .label("Email")
            .required()
            .done()
            .field("password", InputType::Password)
            .label("Password")
            .required()
            .done()
            .submit("Sign In")
            .build();

        assert!(form.contains(r#"action="/login""#));
        assert!(form.contains(r#"method="POST""#));
        assert!(form.contains(r#"type="email""#));
        assert!(form.contains(r#"type="password""#));
        assert!(form.contains("Sign In"));
    }

    #[test]
    fn test_htmx_attributes() {
        let form = FormBuilder::new("/contact", "POST")
            .htmx_post("/contact")
            .htmx_target("#contact-form")
            .htmx_swap("outerHTML")
            .build();

        assert!(form.contains(r#"hx-post="/contact""#));
        assert!(form.contains(r##"hx-target="#contact-form""##));
        assert!(form.contains(r#"hx-swap="outerHTML""#));
    }

    #[test]
    fn test_field_and_form_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is required");
        errors.add_form_error("Passwords do not match");

        let form = FormBuilder::new("/signup", "POST")
            .errors(&errors)
            .field("email", InputType::Email)
            .label("Email")
            .done()
            .build();

        assert!(form.contains("is required"));
        assert!(form.contains("has-error"));
        assert!(form.contains("Passwords do not match"));
    }

    #[test]
    fn test_values_are_escaped() {
        let form = FormBuilder::new("/contact", "POST")
            .field("subject", InputType::Text)
            .value(r#""><script>"#)
            .done()
            .build();

        assert!(!form.contains("<script>"));
        assert!(form.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_disabled_field_with_value() {
        let form = FormBuilder::new("/dashboard/account", "POST")
            .field("email", InputType::Email)
            .value("demo@lgradar.com.au")
            .disabled()
            .help("Email address cannot be changed.")
            .done()
            .build();

        assert!(form.contains(r#"value="demo@lgradar.com.au""#));
        assert!(form.contains(" disabled"));
        assert!(form.contains("form-help"));
    }

    #[test]
    fn test_select_field() {
        let form = FormBuilder::new("/dashboard/account", "POST")
            .select("timezone")
            .label("Timezone")
            .option("Australia/Perth", "Perth (AWST)")
            .option("Australia/Sydney", "Sydney (AEST)")
            .value("Australia/Perth")
            .done()
            .build();

        assert!(form.contains("<select"));
        assert!(form.contains(r#"<option value="Australia/Perth" selected>"#));
        assert!(form.contains(r#"<option value="Australia/Sydney">"#));
    }

    #[test]
    fn test_textarea_and_checkbox() {
        let form = FormBuilder::new("/x", "POST")
            .textarea("message")
            .rows(6)
            .value("hello")
            .done()
            .checkbox("weekly_digest")
            .label("Weekly digest")
            .checked()
            .done()
            .build();

        assert!(form.contains(r#"rows="6">hello</textarea>"#));
        assert!(form.contains(r#"type="checkbox""#));
        assert!(form.contains(" checked"));
    }

    #[test]
    fn test_kind_specific_setters_ignore_other_kinds() {
        let form = FormBuilder::new("/x", "POST")
            .field("name", InputType::Text)
            .rows(9)
            .checked()
            .done()
            .build();

        assert!(!form.contains("rows="));
        assert!(!form.contains("checked"));
    }

    #[test]
    fn test_hidden_field() {
        let form = FormBuilder::new("/x", "POST").hidden("demo", "true").build();
        assert!(form.contains(r#"<input type="hidden" name="demo" value="true">"#));
        assert!(!form.contains("form-group"));
    }
}
