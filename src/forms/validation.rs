// ABOUTME: Required-field validation shared by every form screen
// Fields are exposed as an explicit field -> value list, never resolved by name at runtime

use std::collections::BTreeSet;

/// The value a required field currently holds, as seen by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Free text; present when non-empty after trimming
    Text(&'a str),
    /// Boolean gate such as a checkbox; present when true
    Flag(bool),
    /// Optional selection such as a tab group; present when `Some`
    Choice(Option<&'a str>),
}

impl FieldValue<'_> {
    /// Whether this value satisfies a required-field check
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::Flag(flag) => *flag,
            Self::Choice(choice) => choice.is_some_and(|c| !c.trim().is_empty()),
        }
    }
}

/// Set of fields currently flagged invalid on a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<F: Ord> {
    invalid: BTreeSet<F>,
}

impl<F: Ord + Copy> ValidationErrors<F> {
    pub fn new() -> Self {
        Self {
            invalid: BTreeSet::new(),
        }
    }

    /// Replace the invalid set with exactly these fields
    pub fn recompute(&mut self, missing: impl IntoIterator<Item = F>) {
        self.invalid = missing.into_iter().collect();
    }

    /// Optimistically clear one field's flag after the user edits it
    pub fn clear(&mut self, field: F) {
        self.invalid.remove(&field);
    }

    /// Flag a single field without touching the others
    pub fn mark(&mut self, field: F) {
        self.invalid.insert(field);
    }

    pub fn contains(&self, field: F) -> bool {
        self.invalid.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invalid.len()
    }
}

impl<F: Ord + Copy> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// A screen whose submit action is gated on a fixed set of required fields
pub trait RequiredForm {
    /// Field identifier for this screen
    type Field: Ord + Copy;

    /// Every required field paired with its current value, in display order
    fn required_values(&self) -> Vec<(Self::Field, FieldValue<'_>)>;

    fn errors(&self) -> &ValidationErrors<Self::Field>;

    fn errors_mut(&mut self) -> &mut ValidationErrors<Self::Field>;

    /// Recompute the full invalid set; returns true when the form is complete
    fn validate(&mut self) -> bool {
        let missing: Vec<Self::Field> = self
            .required_values()
            .into_iter()
            .filter(|(_, value)| !value.is_present())
            .map(|(field, _)| field)
            .collect();

        let errors = self.errors_mut();
        errors.recompute(missing);
        errors.is_empty()
    }

    /// Whether every required field is present right now
    fn all_required_present(&self) -> bool {
        self.required_values().iter().all(|(_, value)| value.is_present())
    }
}
