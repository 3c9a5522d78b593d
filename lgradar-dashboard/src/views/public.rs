//! Pages reachable without signing in

use super::escape_html;
use super::layout::page_shell;
use crate::forms::{FormBuilder, InputType, ValidationErrors};
use crate::handlers::contact::ContactForm;

const SUPPORT_EMAIL: &str = "support@lgradar.com.au";
const SALES_EMAIL: &str = "sales@lgradar.com.au";
const PHONE: &str = "+61 8 1234 5678";
const OFFICE_HOURS: &str = "Monday to Friday, 9am to 5pm AWST";

fn auth_card(title: &str, subtitle: &str, inner: &str) -> String {
    format!(
        r#"<main class="auth"><div class="card auth-card"><h1>{}</h1><p class="muted">{}</p>{inner}</div></main>"#,
        escape_html(title),
        escape_html(subtitle)
    )
}

/// Sign-in page
#[must_use]
pub fn login(errors: &ValidationErrors, email: &str, allow_demo: bool) -> String {
    let form = FormBuilder::new("/login", "POST")
        .id("login-form")
        .errors(errors)
        .field("email", InputType::Email)
        .label("Email")
        .placeholder("Enter your email")
        .value(email)
        .autocomplete("email")
        .required()
        .done()
        .field("password", InputType::Password)
        .label("Password")
        .placeholder("Enter your password")
        .autocomplete("current-password")
        .required()
        .done()
        .submit("Sign In")
        .build();

    let mut footer = String::from(
        r#"<p class="muted">Don't have an account? <a href="/signup">Sign up</a></p>"#,
    );
    if allow_demo {
        footer.push_str(
            r#"<p class="muted"><a class="btn btn-outline" href="/dashboard?demo=true">Try the demo</a></p>"#,
        );
    }

    page_shell(
        "Sign In",
        &auth_card(
            "Welcome to LG Radar",
            "Sign in to your account to continue",
            &format!("{form}{}{footer}", google_button()),
        ),
    )
}

/// Link starting the Google sign-in redirect, shared by login and signup
fn google_button() -> String {
    r#"<div class="auth-divider"><span>or</span></div><a class="btn btn-outline btn-block" href="/auth/google">Continue with Google</a>"#
        .to_string()
}

/// Sign-up page; `notice` replaces the form once the account is created
#[must_use]
pub fn signup(errors: &ValidationErrors, email: &str, notice: Option<&str>) -> String {
    let inner = if let Some(notice) = notice {
        format!(
            r#"<div class="form-alert form-success" role="status">{}</div><p class="muted"><a href="/login">Back to sign in</a></p>"#,
            escape_html(notice)
        )
    } else {
        let form = FormBuilder::new("/signup", "POST")
            .id("signup-form")
            .errors(errors)
            .field("email", InputType::Email)
            .label("Email")
            .placeholder("Enter your email")
            .value(email)
            .autocomplete("email")
            .required()
            .done()
            .field("password", InputType::Password)
            .label("Password")
            .placeholder("Create a password")
            .autocomplete("new-password")
            .min_length(6)
            .required()
            .done()
            .field("confirm_password", InputType::Password)
            .label("Confirm Password")
            .placeholder("Confirm your password")
            .autocomplete("new-password")
            .required()
            .done()
            .submit("Create Account")
            .build();
        format!(
            r#"{form}{}<p class="muted">Already have an account? <a href="/login">Sign in</a></p>"#,
            google_button()
        )
    };

    page_shell(
        "Sign Up",
        &auth_card("Create an account", "Start monitoring government gazettes", &inner),
    )
}

/// Contact form, swapped in place by htmx on submit
#[must_use]
pub fn contact_form(errors: &ValidationErrors, draft: &ContactForm, sent: bool) -> String {
    let form = FormBuilder::new("/contact", "POST")
        .id("contact-form")
        .errors(errors)
        .htmx_post("/contact")
        .htmx_target("#contact-form")
        .htmx_swap("outerHTML")
        .field("first_name", InputType::Text)
        .label("First Name")
        .value(&draft.first_name)
        .required()
        .done()
        .field("last_name", InputType::Text)
        .label("Last Name")
        .value(&draft.last_name)
        .required()
        .done()
        .field("email", InputType::Email)
        .label("Email")
        .value(&draft.email)
        .required()
        .done()
        .field("company", InputType::Text)
        .label("Company")
        .placeholder("Optional")
        .value_opt(draft.company.as_deref())
        .done()
        .field("subject", InputType::Text)
        .label("Subject")
        .value(&draft.subject)
        .required()
        .done()
        .textarea("message")
        .label("Message")
        .rows(6)
        .value(&draft.message)
        .required()
        .done()
        .submit("Send Message")
        .build();

    if sent {
        // success banner goes inside the swapped element
        form.replacen(
            '>',
            r#"><div class="form-alert form-success" role="status">Thanks for reaching out! We'll get back to you within one business day.</div>"#,
            1,
        )
    } else {
        form
    }
}

/// Full contact page
#[must_use]
pub fn contact(form: &str) -> String {
    let body = format!(
        r#"<main class="contact"><header class="page-header"><h1>Contact Us</h1><p class="muted">Questions about LG Radar? Our team is here to help.</p></header><div class="grid"><section class="card">{form}</section><aside class="card"><h2>Get in touch</h2><p>Support: <a href="mailto:{SUPPORT_EMAIL}">{SUPPORT_EMAIL}</a></p><p>Sales: <a href="mailto:{SALES_EMAIL}">{SALES_EMAIL}</a></p><p>Phone: {PHONE}</p><p class="muted">{OFFICE_HOURS}</p><p><a href="/dashboard">Back to dashboard</a></p></aside></div></main>"#
    );
    page_shell("Contact", &body)
}
