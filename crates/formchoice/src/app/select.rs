//! Single-select choice component: selection state, placeholder option and submission handling.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::app::model::Model;
use crate::app::renderer::{ChoiceRender, ChoiceRenderer};
use crate::app::source::ChoiceSource;
use crate::domain::errors::ChoiceError;
use crate::domain::model::{RenderedOption, Submission};
use crate::infra::config::Config;
use crate::infra::resources::{Localizer, non_empty};
use crate::ui::markup::OptionMarkup;

/// Label of the forced placeholder when no resource overrides it.
const CHOOSE_ONE: &str = "Choose One";

/// Default id meaning "nothing selected".
pub const NO_SELECTION_VALUE: &str = "-1";

/// Decides whether the choice at an index is rendered disabled. Receives the current selection.
pub type DisabledPredicate<T> = Arc<dyn Fn(&T, usize, Option<&str>) -> bool + Send + Sync>;

/// Behavioural switches of a single-select choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSettings {
    /// Offer an explicit blank option that users may pick.
    pub null_valid: bool,
    /// Id standing for "nothing selected"; must differ from every real choice id.
    pub no_selection_value: String,
    /// Reject submissions that resolve to no choice.
    pub required: bool,
}

impl Default for ChoiceSettings {
    fn default() -> Self {
        Self {
            null_valid: false,
            no_selection_value: NO_SELECTION_VALUE.to_owned(),
            required: false,
        }
    }
}

impl ChoiceSettings {
    /// Build settings from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            null_valid: config.select.null_valid(),
            no_selection_value: config.select.no_selection_value(),
            required: config.select.required(),
        }
    }
}

/// Everything needed to construct a [`SingleSelectChoice`].
pub struct SelectConfig<T, R = ChoiceRenderer> {
    pub choices: ChoiceSource<T>,
    pub renderer: R,
    pub model: Model<T>,
    pub settings: ChoiceSettings,
}

impl<T> SelectConfig<T> {
    /// Choices rendered with the default index/`Display` renderer and an empty model.
    pub fn new(choices: impl Into<ChoiceSource<T>>) -> Self {
        Self {
            choices: choices.into(),
            renderer: ChoiceRenderer::new(),
            model: Model::empty(),
            settings: ChoiceSettings::default(),
        }
    }
}

impl<T, R> SelectConfig<T, R> {
    pub fn with_renderer<R2>(self, renderer: R2) -> SelectConfig<T, R2> {
        SelectConfig {
            choices: self.choices,
            renderer,
            model: self.model,
            settings: self.settings,
        }
    }

    pub fn with_model(mut self, model: Model<T>) -> Self {
        self.model = model;
        self
    }

    pub fn with_settings(mut self, settings: ChoiceSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl<T, R: Default> Default for SelectConfig<T, R> {
    fn default() -> Self {
        Self {
            choices: ChoiceSource::default(),
            renderer: R::default(),
            model: Model::empty(),
            settings: ChoiceSettings::default(),
        }
    }
}

/// A form component letting the user pick at most one of an ordered list of choices.
///
/// Rendering marks the option whose id matches the bound model; submission resolves the posted
/// id back to a choice and writes it to the model. Every cycle rescans the current choices, so a
/// stale id posted after the list changed simply clears the selection.
pub struct SingleSelectChoice<T, R = ChoiceRenderer> {
    id: String,
    choices: ChoiceSource<T>,
    renderer: R,
    model: Model<T>,
    settings: ChoiceSettings,
    disabled: Option<DisabledPredicate<T>>,
}

impl<T, R> SingleSelectChoice<T, R> {
    pub fn new(id: impl Into<String>, config: SelectConfig<T, R>) -> Self {
        Self {
            id: id.into(),
            choices: config.choices,
            renderer: config.renderer,
            model: config.model,
            settings: config.settings,
            disabled: None,
        }
    }

    /// Component id, also the prefix of its resource keys.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn choices(&self) -> Arc<[T]> {
        self.choices.load()
    }

    pub fn set_choices(&mut self, choices: impl Into<ChoiceSource<T>>) -> &mut Self {
        self.choices = choices.into();
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn set_renderer(&mut self, renderer: R) -> &mut Self {
        self.renderer = renderer;
        self
    }

    pub fn model(&self) -> &Model<T> {
        &self.model
    }

    /// Whether the blank option is a legitimate pick. This says nothing about whether a selection
    /// is mandatory; see [`Self::is_required`].
    pub fn is_null_valid(&self) -> bool {
        self.settings.null_valid
    }

    pub fn set_null_valid(&mut self, null_valid: bool) -> &mut Self {
        self.settings.null_valid = null_valid;
        self
    }

    pub fn no_selection_value(&self) -> &str {
        &self.settings.no_selection_value
    }

    pub fn set_no_selection_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.settings.no_selection_value = value.into();
        self
    }

    pub fn is_required(&self) -> bool {
        self.settings.required
    }

    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.settings.required = required;
        self
    }

    pub fn set_disabled<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&T, usize, Option<&str>) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(predicate));
        self
    }

    /// The placeholder option, if one should precede the real choices.
    ///
    /// `selected` is the id of the current selection, `None` when nothing is bound.
    pub fn default_choice(
        &self,
        selected: Option<&str>,
        localizer: &dyn Localizer,
    ) -> Option<RenderedOption> {
        if self.settings.null_valid {
            let label = non_empty(localizer, &format!("{}.nullValid", self.id))
                .or_else(|| non_empty(localizer, "nullValid"))
                .unwrap_or_default();
            return Some(RenderedOption::placeholder(label, selected.is_none()));
        }

        let nothing_selected = match selected {
            None => true,
            Some(value) => value == self.settings.no_selection_value || value.is_empty(),
        };
        if !nothing_selected {
            return None;
        }

        let label = non_empty(localizer, &format!("{}.null", self.id))
            .or_else(|| non_empty(localizer, "null"))
            .unwrap_or_else(|| CHOOSE_ONE.to_owned());
        Some(RenderedOption::placeholder(label, true))
    }
}

impl<T, R> SingleSelectChoice<T, R>
where
    T: PartialEq + Clone,
    R: ChoiceRender<T>,
{
    /// Id of the bound model object, or the no-selection value when the model is empty.
    ///
    /// An object missing from the choice list is passed to the renderer with no index.
    pub fn model_value(&self) -> Result<String, ChoiceError> {
        let choices = self.choices.load();
        Ok(self
            .current_selection(&choices)?
            .unwrap_or_else(|| self.settings.no_selection_value.clone()))
    }

    /// Whether the choice at `index` is the one identified by `selected`.
    pub fn is_selected(
        &self,
        object: &T,
        index: usize,
        selected: Option<&str>,
    ) -> Result<bool, ChoiceError> {
        match selected {
            Some(selected) => Ok(self.renderer.id_value(Some(object), Some(index))? == selected),
            None => Ok(false),
        }
    }

    /// Resolve a submitted id to the first choice rendering the same id.
    ///
    /// No match is not an error: it means the selection is cleared.
    pub fn convert_choice_id_to_choice(&self, id: Option<&str>) -> Result<Option<T>, ChoiceError> {
        Ok(self.find_choice(id)?.map(|(_, choice)| choice))
    }

    /// Resolve the first of the submitted values.
    pub fn convert_value(&self, values: &[String]) -> Result<Option<T>, ChoiceError> {
        self.convert_choice_id_to_choice(values.first().map(String::as_str))
    }

    /// Apply a form submission to the bound model.
    ///
    /// With [`Self::is_required`] set, a submission resolving to nothing fails and the model keeps
    /// its previous value.
    pub fn process_input(&self, values: &[String]) -> Result<Submission, ChoiceError> {
        let submitted = values.first().map(String::as_str);
        let resolved = self.find_choice(submitted)?;

        if resolved.is_none() {
            if let Some(id) = submitted
                && !id.is_empty()
                && id != self.settings.no_selection_value
            {
                warn!(component = %self.id, submitted = id, "submitted id matched no choice");
            }
            if self.settings.required {
                return Err(ChoiceError::Required {
                    component: self.id.clone(),
                });
            }
        }

        match resolved {
            Some((index, choice)) => {
                debug!(component = %self.id, index, "selection updated");
                self.model.set_object(Some(choice));
                Ok(Submission::Selected { index })
            }
            None => {
                debug!(component = %self.id, "selection cleared");
                self.model.set_object(None);
                Ok(Submission::Cleared)
            }
        }
    }

    /// Options to emit, placeholder first.
    pub fn rendered_options(
        &self,
        localizer: &dyn Localizer,
    ) -> Result<Vec<RenderedOption>, ChoiceError> {
        let choices = self.choices.load();
        let selected = self.current_selection(&choices)?;
        let selected = selected.as_deref();

        let mut options = Vec::with_capacity(choices.len() + 1);
        options.extend(self.default_choice(selected, localizer));

        for (index, choice) in choices.iter().enumerate() {
            let option = RenderedOption {
                value: self.renderer.id_value(Some(choice), Some(index))?,
                label: self.renderer.display_value(Some(choice))?,
                selected: self.is_selected(choice, index, selected)?,
                disabled: self
                    .disabled
                    .as_ref()
                    .is_some_and(|predicate| predicate(choice, index, selected)),
            };
            trace!(component = %self.id, index, value = %option.value, selected = option.selected, "option");
            options.push(option);
        }

        debug!(
            component = %self.id,
            choices = choices.len(),
            selected = selected.unwrap_or_default(),
            "rendered choice options"
        );
        Ok(options)
    }

    /// Render the `<option>` markup for the current state.
    pub fn render(
        &self,
        localizer: &dyn Localizer,
        markup: &OptionMarkup,
    ) -> Result<String, ChoiceError> {
        let options = self.rendered_options(localizer)?;
        markup.render(&options)
    }

    /// Check that the no-selection value cannot be mistaken for a real choice.
    ///
    /// An empty value is rejected outright: it is what the placeholder option posts.
    pub fn validate(&self) -> Result<(), ChoiceError> {
        let sentinel = &self.settings.no_selection_value;
        if sentinel.is_empty() {
            return Err(ChoiceError::EmptySentinel);
        }
        for (index, choice) in self.choices.load().iter().enumerate() {
            if self.renderer.id_value(Some(choice), Some(index))? == *sentinel {
                return Err(ChoiceError::SentinelCollision {
                    value: sentinel.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    // The model object is cloned out first so no lock is held while the renderer runs.
    fn current_selection(&self, choices: &[T]) -> Result<Option<String>, ChoiceError> {
        let Some(object) = self.model.object() else {
            return Ok(None);
        };
        let index = choices.iter().position(|choice| *choice == object);
        self.renderer.id_value(Some(&object), index).map(Some)
    }

    fn find_choice(&self, id: Option<&str>) -> Result<Option<(usize, T)>, ChoiceError> {
        let Some(id) = id else {
            return Ok(None);
        };
        for (index, choice) in self.choices.load().iter().enumerate() {
            if self.renderer.id_value(Some(choice), Some(index))? == id {
                return Ok(Some((index, choice.clone())));
            }
        }
        Ok(None)
    }
}

impl<T: fmt::Debug, R: fmt::Debug> fmt::Debug for SingleSelectChoice<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleSelectChoice")
            .field("id", &self.id)
            .field("choices", &self.choices)
            .field("renderer", &self.renderer)
            .field("model", &self.model)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
