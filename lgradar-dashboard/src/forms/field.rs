//! Form field model

/// HTML `<input>` types used by the dashboard forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// `type="text"`
    Text,
    /// `type="email"`
    Email,
    /// `type="password"`
    Password,
    /// `type="search"`
    Search,
    /// `type="hidden"`
    Hidden,
}

impl InputType {
    /// Attribute value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Search => "search",
            Self::Hidden => "hidden",
        }
    }
}

/// `<option>` inside a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value
    pub value: String,
    /// Visible text
    pub label: String,
}

/// Element kind of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `<input>`
    Input(InputType),
    /// `<textarea>`
    Textarea {
        /// Visible rows
        rows: u32,
    },
    /// `<select>`
    Select {
        /// Available options
        options: Vec<SelectOption>,
    },
    /// `<input type="checkbox">`
    Checkbox {
        /// Initially checked
        checked: bool,
    },
}

/// A single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Submitted name, also the default element id
    pub name: String,
    /// Element kind
    pub kind: FieldKind,
    /// Label text
    pub label: Option<String>,
    /// Placeholder text
    pub placeholder: Option<String>,
    /// Current value (selected value for selects)
    pub value: Option<String>,
    /// Help text under the field
    pub help_text: Option<String>,
    /// Autocomplete hint
    pub autocomplete: Option<String>,
    /// Minimum length
    pub min_length: Option<usize>,
    /// `required`
    pub required: bool,
    /// `disabled`
    pub disabled: bool,
}

impl FormField {
    /// New field of the given kind
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            placeholder: None,
            value: None,
            help_text: None,
            autocomplete: None,
            min_length: None,
            required: false,
            disabled: false,
        }
    }

    /// Whether the field renders without a wrapper
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.kind == FieldKind::Input(InputType::Hidden)
    }
}
