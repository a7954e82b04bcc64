//! Mapping choice objects to display text and wire identifiers.

use std::fmt;

use crate::domain::errors::{ChoiceError, ValueKind};
use crate::domain::property::PropertyPath;
use crate::infra::accessor::{PropertyAccessor, SerdeAccessor, value_to_string};

/// Id produced by the index fallback for an object that is not in the choice list.
const ABSENT_INDEX: &str = "-1";

/// Strategy turning a choice into the label shown to the user and the id posted back by forms.
///
/// Ids are opaque strings. Callers compare them with plain string equality, never numerically.
pub trait ChoiceRender<T: ?Sized> {
    /// Text shown for `object`; empty for `None`.
    fn display_value(&self, object: Option<&T>) -> Result<String, ChoiceError>;

    /// Identifier for `object` sitting at `index` in the choice list (`None` when absent).
    fn id_value(&self, object: Option<&T>, index: Option<usize>) -> Result<String, ChoiceError>;
}

/// Default [`ChoiceRender`] driven by optional property paths.
///
/// ```
/// use formchoice::app::renderer::{ChoiceRender, ChoiceRenderer};
///
/// // Label via `Display`, id is the list position.
/// let renderer = ChoiceRenderer::new();
/// assert_eq!(renderer.id_value(Some(&"red"), Some(2)).unwrap(), "2");
/// assert_eq!(renderer.display_value(Some(&"red")).unwrap(), "red");
/// ```
///
/// With [`ChoiceRenderer::with_display`] the label is read from the object, and with
/// [`ChoiceRenderer::with_display_and_id`] the id is read from it too.
#[derive(Debug, Clone, Default)]
pub struct ChoiceRenderer<A = SerdeAccessor> {
    display_expression: Option<PropertyPath>,
    id_expression: Option<PropertyPath>,
    accessor: A,
}

impl ChoiceRenderer {
    /// Label from `Display`, id from the list index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label from `display`, id from the list index.
    pub fn with_display(display: impl Into<PropertyPath>) -> Self {
        Self::with_accessor(SerdeAccessor, Some(display.into()), None)
    }

    /// Label from `display`, id from `id`.
    pub fn with_display_and_id(
        display: impl Into<PropertyPath>,
        id: impl Into<PropertyPath>,
    ) -> Self {
        Self::with_accessor(SerdeAccessor, Some(display.into()), Some(id.into()))
    }
}

impl<A> ChoiceRenderer<A> {
    /// Build a renderer evaluating its paths with a custom accessor.
    pub fn with_accessor(
        accessor: A,
        display_expression: Option<PropertyPath>,
        id_expression: Option<PropertyPath>,
    ) -> Self {
        Self {
            display_expression,
            id_expression,
            accessor,
        }
    }

    pub fn display_expression(&self) -> Option<&PropertyPath> {
        self.display_expression.as_ref()
    }

    pub fn id_expression(&self) -> Option<&PropertyPath> {
        self.id_expression.as_ref()
    }

    fn evaluate<T>(
        &self,
        kind: ValueKind,
        expression: &PropertyPath,
        object: &T,
    ) -> Result<String, ChoiceError>
    where
        T: fmt::Debug + ?Sized,
        A: PropertyAccessor<T>,
    {
        let value = self
            .accessor
            .evaluate(expression, object)
            .map_err(|source| ChoiceError::Evaluation {
                kind,
                object: format!("{object:?}"),
                expression: expression.to_string(),
                source,
            })?;
        Ok(value_to_string(value).unwrap_or_default())
    }
}

impl<T, A> ChoiceRender<T> for ChoiceRenderer<A>
where
    T: fmt::Display + fmt::Debug + ?Sized,
    A: PropertyAccessor<T>,
{
    fn display_value(&self, object: Option<&T>) -> Result<String, ChoiceError> {
        let Some(object) = object else {
            return Ok(String::new());
        };
        match &self.display_expression {
            Some(expression) => self.evaluate(ValueKind::Display, expression, object),
            None => Ok(object.to_string()),
        }
    }

    fn id_value(&self, object: Option<&T>, index: Option<usize>) -> Result<String, ChoiceError> {
        let Some(expression) = &self.id_expression else {
            return Ok(index.map_or_else(|| ABSENT_INDEX.to_owned(), |index| index.to_string()));
        };
        match object {
            Some(object) => self.evaluate(ValueKind::Id, expression, object),
            None => Ok(String::new()),
        }
    }
}
