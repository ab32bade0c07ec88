//! The option form and the command line built from it.

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldWidget {
    /// A single-line text box.
    #[default]
    TextField,
    /// A text box with a button opening a folder picker.
    DirChooser,
}

/// A field of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The field identifier.
    pub dest: String,
    /// The flags written before the value. Empty for a positional field.
    pub flags: Vec<String>,
    /// The label shown above the field.
    pub metavar: String,
    /// The help text shown under the label.
    pub help: String,
    /// The initial value.
    pub default: String,
    /// How the field is edited.
    pub widget: FieldWidget,
}

impl Field {
    /// Creates a positional field.
    pub fn positional(dest: impl Into<String>) -> Self {
        let dest = dest.into();
        Self {
            metavar: dest.clone(),
            dest,
            flags: Vec::new(),
            help: String::new(),
            default: String::new(),
            widget: FieldWidget::TextField,
        }
    }

    /// Creates an optional field written as `<flag> <value>`.
    ///
    /// The last flag (usually the long one) names the field.
    pub fn optional<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flags: Vec<String> = flags.into_iter().map(Into::into).collect();
        let dest = flags
            .last()
            .map(|flag| flag.trim_start_matches('-').replace('-', "_"))
            .unwrap_or_default();
        Self {
            metavar: dest.clone(),
            dest,
            flags,
            help: String::new(),
            default: String::new(),
            widget: FieldWidget::TextField,
        }
    }

    /// Sets the label.
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = metavar.into();
        self
    }

    /// Sets the help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the initial value.
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the widget.
    pub fn widget(mut self, widget: FieldWidget) -> Self {
        self.widget = widget;
        self
    }

    /// Returns true if the field is positional, hence required.
    pub fn is_positional(&self) -> bool {
        self.flags.is_empty()
    }
}

/// The option form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Form {
    /// The text shown in the header.
    pub description: String,
    /// The fields, in display order.
    pub fields: Vec<Field>,
}

impl Form {
    /// Creates an empty form.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the initial values of the fields.
    pub fn defaults(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.default.clone()).collect()
    }

    /// Returns the labels of the required fields left blank in `values`.
    pub fn missing(&self, values: &[String]) -> Vec<&str> {
        self.fields
            .iter()
            .zip(values)
            .filter(|(field, value)| field.is_positional() && value.trim().is_empty())
            .map(|(field, _)| field.metavar.as_str())
            .collect()
    }

    /// Builds the command line from `target` and the field values.
    ///
    /// Optional fields come first as `<flag> "<value>"` (blank ones are
    /// skipped), then positional fields as `"<value>"`.
    pub fn command_line(&self, target: &str, values: &[String]) -> String {
        let mut parts = vec![target.to_string()];

        for (field, value) in self.fields.iter().zip(values) {
            if field.is_positional() || value.trim().is_empty() {
                continue;
            }
            if let Some(flag) = field.flags.first() {
                parts.push(format!("{} {}", flag, quote(value)));
            }
        }

        for (field, value) in self.fields.iter().zip(values) {
            if field.is_positional() {
                parts.push(quote(value));
            }
        }

        parts.join(" ")
    }
}

/// Wraps a value in double quotes, escaping the quotes it holds.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}
