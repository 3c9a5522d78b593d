//! HTML rendering for built forms

use std::fmt::Write;

use super::builder::FormBuilder;
use super::field::{FieldKind, FormField};

/// Escape text for use in HTML content and double-quoted attributes
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(out, r#" {name}="{}""#, escape_html(value));
    }
}

fn flag(out: &mut String, name: &str, on: bool) {
    if on {
        let _ = write!(out, " {name}");
    }
}

/// Renders a [`FormBuilder`] to HTML
pub struct FormRenderer;

impl FormRenderer {
    /// Render the whole form
    #[must_use]
    pub fn render(form: &FormBuilder<'_>) -> String {
        let mut out = String::from("<form");
        attr(&mut out, "action", Some(&form.action));
        attr(&mut out, "method", Some(&form.method));
        attr(&mut out, "id", form.id.as_deref());
        attr(&mut out, "hx-get", form.htmx.get.as_deref());
        attr(&mut out, "hx-post", form.htmx.post.as_deref());
        attr(&mut out, "hx-trigger", form.htmx.trigger.as_deref());
        attr(&mut out, "hx-target", form.htmx.target.as_deref());
        attr(&mut out, "hx-swap", form.htmx.swap.as_deref());
        out.push('>');

        if let Some(errors) = form.errors {
            for message in errors.form_errors() {
                let _ = write!(
                    out,
                    r#"<div class="form-alert form-error" role="alert">{}</div>"#,
                    escape_html(message)
                );
            }
        }

        for field in &form.fields {
            let messages = form
                .errors
                .map(|errors| errors.for_field(&field.name))
                .unwrap_or_default();
            Self::render_field(&mut out, field, messages);
        }

        if let Some(text) = &form.submit_text {
            let _ = write!(
                out,
                r#"<button type="submit" class="btn btn-primary">{}</button>"#,
                escape_html(text)
            );
        }

        out.push_str("</form>");
        out
    }

    fn render_field(out: &mut String, field: &FormField, errors: &[String]) {
        if field.is_hidden() {
            out.push_str(r#"<input type="hidden""#);
            attr(out, "name", Some(&field.name));
            attr(out, "value", field.value.as_deref());
            out.push('>');
            return;
        }

        let is_checkbox = matches!(field.kind, FieldKind::Checkbox { .. });
        let mut group = String::from("form-group");
        if is_checkbox {
            group.push_str(" form-check");
        }
        if !errors.is_empty() {
            group.push_str(" has-error");
        }
        let _ = write!(out, r#"<div class="{group}">"#);

        if !is_checkbox {
            Self::render_label(out, field);
        }
        Self::render_control(out, field);
        if is_checkbox {
            Self::render_label(out, field);
        }

        if let Some(help) = &field.help_text {
            let _ = write!(out, r#"<p class="form-help">{}</p>"#, escape_html(help));
        }
        for message in errors {
            let _ = write!(out, r#"<p class="form-error">{}</p>"#, escape_html(message));
        }
        out.push_str("</div>");
    }

    fn render_label(out: &mut String, field: &FormField) {
        if let Some(label) = &field.label {
            let _ = write!(
                out,
                r#"<label for="{}">{}</label>"#,
                escape_html(&field.name),
                escape_html(label)
            );
        }
    }

    fn common_attrs(out: &mut String, field: &FormField) {
        attr(out, "name", Some(&field.name));
        attr(out, "id", Some(&field.name));
        attr(out, "placeholder", field.placeholder.as_deref());
        attr(out, "autocomplete", field.autocomplete.as_deref());
        if let Some(len) = field.min_length {
            let _ = write!(out, r#" minlength="{len}""#);
        }
        flag(out, "required", field.required);
        flag(out, "disabled", field.disabled);
    }

    fn render_control(out: &mut String, field: &FormField) {
        match &field.kind {
            FieldKind::Input(input_type) => {
                let _ = write!(out, r#"<input type="{}""#, input_type.as_str());
                Self::common_attrs(out, field);
                attr(out, "value", field.value.as_deref());
                out.push('>');
            }
            FieldKind::Textarea { rows } => {
                out.push_str("<textarea");
                Self::common_attrs(out, field);
                let _ = write!(out, r#" rows="{rows}">"#);
                if let Some(value) = &field.value {
                    out.push_str(&escape_html(value));
                }
                out.push_str("</textarea>");
            }
            FieldKind::Select { options } => {
                out.push_str("<select");
                Self::common_attrs(out, field);
                out.push('>');
                for option in options {
                    let selected = field.value.as_deref() == Some(option.value.as_str());
                    let _ = write!(
                        out,
                        r#"<option value="{}"{}>{}</option>"#,
                        escape_html(&option.value),
                        if selected { " selected" } else { "" },
                        escape_html(&option.label)
                    );
                }
                out.push_str("</select>");
            }
            FieldKind::Checkbox { checked } => {
                out.push_str(r#"<input type="checkbox""#);
                Self::common_attrs(out, field);
                attr(out, "value", Some(field.value.as_deref().unwrap_or("on")));
                flag(out, "checked", *checked);
                out.push('>');
            }
        }
    }
}
