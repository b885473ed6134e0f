// ABOUTME: Render-ready description of a form screen, produced by the screen and drawn by FormComponent

use crate::components::picker::trigger_text;
use crate::forms::TextField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Text {
        display: String,
        placeholder: String,
        cursor: usize,
        masked: bool,
        revealed: bool,
    },
    Picker {
        display: String,
        has_value: bool,
    },
    Checkbox {
        checked: bool,
    },
    Tabs {
        options: Vec<String>,
        selected: Option<usize>,
    },
    Button {
        loading: bool,
    },
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub label: String,
    pub kind: RowKind,
    pub required: bool,
    pub invalid: bool,
    pub disabled: bool,
    pub hint: Option<String>,
}

impl FormRow {
    fn with_kind(label: &str, kind: RowKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            required: false,
            invalid: false,
            disabled: false,
            hint: None,
        }
    }

    pub fn text(label: &str, field: &TextField, placeholder: &str) -> Self {
        Self::with_kind(
            label,
            RowKind::Text {
                display: field.display(),
                placeholder: placeholder.to_string(),
                cursor: field.cursor(),
                masked: field.is_masked(),
                revealed: field.is_revealed(),
            },
        )
    }

    pub fn picker(label: &str, value: &str, placeholder: Option<&str>) -> Self {
        Self::with_kind(
            label,
            RowKind::Picker {
                display: trigger_text(value, label, placeholder),
                has_value: !value.is_empty(),
            },
        )
    }

    pub fn checkbox(label: &str, checked: bool) -> Self {
        Self::with_kind(label, RowKind::Checkbox { checked })
    }

    pub fn tabs(label: &str, options: &[&str], selected: Option<usize>) -> Self {
        Self::with_kind(
            label,
            RowKind::Tabs {
                options: options.iter().map(|o| (*o).to_string()).collect(),
                selected,
            },
        )
    }

    /// Submit-style button; `enabled` reflects the form's submit predicate
    pub fn button(label: &str, enabled: bool, loading: bool) -> Self {
        Self {
            disabled: !enabled || loading,
            ..Self::with_kind(label, RowKind::Button { loading })
        }
    }

    pub fn link(label: &str) -> Self {
        Self::with_kind(label, RowKind::Link)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<FormRow>,
    pub focused: usize,
}

impl FormView {
    pub fn new(title: &str, subtitle: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            rows: Vec::new(),
            focused: 0,
        }
    }

    pub fn row(mut self, row: FormRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn focused(mut self, index: usize) -> Self {
        self.focused = index;
        self
    }

    /// Row with the given label, for assertions and lookups
    pub fn find(&self, label: &str) -> Option<&FormRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}
