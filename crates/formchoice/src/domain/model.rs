//! Domain models for rendered options and submission outcomes.

use serde::Serialize;

/// One `<option>` as it will be emitted to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

impl RenderedOption {
    /// The blank-valued option standing in for "no selection".
    pub fn placeholder(label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: String::new(),
            label: label.into(),
            selected,
            disabled: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// What a form submission did to the bound model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The submitted id matched the choice at `index`.
    Selected { index: usize },
    /// Nothing was submitted or the id matched no current choice.
    Cleared,
}
