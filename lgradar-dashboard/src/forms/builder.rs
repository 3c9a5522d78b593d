//! Form builder API with fluent interface

use super::error::ValidationErrors;
use super::field::{FieldKind, FormField, InputType, SelectOption};
use super::render::FormRenderer;

/// Builder for constructing HTML forms
///
/// # Examples
///
/// ```rust
/// use lgradar_dashboard::forms::{FormBuilder, InputType};
///
/// let html = FormBuilder::new("/login", "POST")
///     .id("login-form")
///     .field("email", InputType::Email)
///         .label("Email")
///         .required()
///         .placeholder("Enter your email")
///         .done()
///     .field("password", InputType::Password)
///         .label("Password")
///         .required()
///         .done()
///     .submit("Sign In")
///     .build();
///
/// assert!(html.contains(r#"action="/login""#));
/// ```
#[derive(Debug, Clone)]
pub struct FormBuilder<'a> {
    pub(crate) action: String,
    pub(crate) method: String,
    pub(crate) id: Option<String>,
    pub(crate) fields: Vec<FormField>,
    pub(crate) submit_text: Option<String>,
    pub(crate) errors: Option<&'a ValidationErrors>,
    pub(crate) htmx: HtmxFormAttrs,
}

/// HTMX attributes for the form element
#[derive(Debug, Clone, Default)]
pub struct HtmxFormAttrs {
    /// hx-get URL
    pub get: Option<String>,
    /// hx-post URL
    pub post: Option<String>,
    /// hx-trigger value
    pub trigger: Option<String>,
    /// hx-target selector
    pub target: Option<String>,
    /// hx-swap strategy
    pub swap: Option<String>,
}

impl<'a> FormBuilder<'a> {
    /// Create a new form builder with action and method
    #[must_use]
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            id: None,
            fields: Vec::new(),
            submit_text: None,
            errors: None,
            htmx: HtmxFormAttrs::default(),
        }
    }

    /// Set the form ID
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set validation errors to display
    #[must_use]
    pub fn errors(mut self, errors: &'a ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Set the submit button text
    #[must_use]
    pub fn submit(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }

    /// Set hx-get attribute
    #[must_use]
    pub fn htmx_get(mut self, url: impl Into<String>) -> Self {
        self.htmx.get = Some(url.into());
        self
    }

    /// Set hx-trigger attribute
    #[must_use]
    pub fn htmx_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.htmx.trigger = Some(trigger.into());
        self
    }

    /// Set hx-post attribute
    #[must_use]
    pub fn htmx_post(mut self, url: impl Into<String>) -> Self {
        self.htmx.post = Some(url.into());
        self
    }

    /// Set hx-target attribute
    #[must_use]
    pub fn htmx_target(mut self, selector: impl Into<String>) -> Self {
        self.htmx.target = Some(selector.into());
        self
    }

    /// Set hx-swap attribute
    #[must_use]
    pub fn htmx_swap(mut self, strategy: impl Into<String>) -> Self {
        self.htmx.swap = Some(strategy.into());
        self
    }

    /// Add an input field
    #[must_use]
    pub fn field(self, name: impl Into<String>, input_type: InputType) -> FieldBuilder<'a> {
        FieldBuilder::new(self, FormField::new(name, FieldKind::Input(input_type)))
    }

    /// Add a textarea (4 rows unless changed)
    #[must_use]
    pub fn textarea(self, name: impl Into<String>) -> FieldBuilder<'a> {
        FieldBuilder::new(self, FormField::new(name, FieldKind::Textarea { rows: 4 }))
    }

    /// Add a select; options are added with [`FieldBuilder::option`]
    #[must_use]
    pub fn select(self, name: impl Into<String>) -> FieldBuilder<'a> {
        FieldBuilder::new(
            self,
            FormField::new(name, FieldKind::Select { options: Vec::new() }),
        )
    }

    /// Add a checkbox
    #[must_use]
    pub fn checkbox(self, name: impl Into<String>) -> FieldBuilder<'a> {
        FieldBuilder::new(self, FormField::new(name, FieldKind::Checkbox { checked: false }))
    }

    /// Add a hidden field
    #[must_use]
    pub fn hidden(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = FormField::new(name, FieldKind::Input(InputType::Hidden));
        field.value = Some(value.into());
        self.fields.push(field);
        self
    }

    /// Build the form HTML
    #[must_use]
    pub fn build(self) -> String {
        FormRenderer::render(&self)
    }
}

/// Builder for a single field; [`done`](Self::done) returns to the form
///
/// Kind-specific setters ([`rows`](Self::rows), [`option`](Self::option),
/// [`checked`](Self::checked)) are ignored on fields of another kind.
pub struct FieldBuilder<'a> {
    form: FormBuilder<'a>,
    field: FormField,
}

impl<'a> FieldBuilder<'a> {
    fn new(form: FormBuilder<'a>, field: FormField) -> Self {
        Self { form, field }
    }

    /// Set the field label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.field.label = Some(label.into());
        self
    }

    /// Set placeholder text
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.field.placeholder = Some(placeholder.into());
        self
    }

    /// Set the current value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.field.value = Some(value.into());
        self
    }

    /// Set the value; `None` clears any earlier one
    #[must_use]
    pub fn value_opt(mut self, value: Option<&str>) -> Self {
        self.field.value = value.map(str::to_string);
        self
    }

    /// Mark field as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.field.required = true;
        self
    }

    /// Mark field as disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.field.disabled = true;
        self
    }

    /// Set autocomplete attribute
    #[must_use]
    pub fn autocomplete(mut self, value: impl Into<String>) -> Self {
        self.field.autocomplete = Some(value.into());
        self
    }

    /// Set minimum length
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.field.min_length = Some(len);
        self
    }

    /// Set help text
    #[must_use]
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.field.help_text = Some(text.into());
        self
    }

    /// Textarea height
    #[must_use]
    pub fn rows(mut self, count: u32) -> Self {
        if let FieldKind::Textarea { rows } = &mut self.field.kind {
            *rows = count;
        }
        self
    }

    /// Append a select option
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        if let FieldKind::Select { options } = &mut self.field.kind {
            options.push(SelectOption {
                value: value.into(),
                label: label.into(),
            });
        }
        self
    }

    /// Pre-check a checkbox
    #[must_use]
    pub fn checked(mut self) -> Self {
        if let FieldKind::Checkbox { checked } = &mut self.field.kind {
            *checked = true;
        }
        self
    }

    /// Finish building this field and return to form builder
    #[must_use]
    pub fn done(mut self) -> FormBuilder<'a> {
        self.form.fields.push(self.field);
        self.form
    }
}
