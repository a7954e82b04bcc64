use std::fmt;

use formchoice::app::model::Model;
use formchoice::app::renderer::{ChoiceRender, ChoiceRenderer};
use formchoice::app::select::{ChoiceSettings, SelectConfig, SingleSelectChoice};
use formchoice::domain::errors::ChoiceError;
use formchoice::domain::model::Submission;
use formchoice::infra::resources::{NoResources, ResourceBundle};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Country {
    iso: &'static str,
    name: &'static str,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn countries() -> Vec<Country> {
    vec![
        Country {
            iso: "NL",
            name: "Netherlands",
        },
        Country {
            iso: "BE",
            name: "Belgium",
        },
        Country {
            iso: "LU",
            name: "Luxembourg",
        },
    ]
}

#[test]
fn page_observes_value_written_by_submission() {
    let page_model = Model::empty();
    let config = SelectConfig::new(countries())
        .with_renderer(ChoiceRenderer::with_display_and_id("name", "iso"))
        .with_model(page_model.clone());
    let choice = SingleSelectChoice::new("country", config);

    let outcome = choice.process_input(&["BE".to_owned()]).expect("submit");
    assert_eq!(outcome, Submission::Selected { index: 1 });
    assert_eq!(page_model.object().map(|c| c.name), Some("Belgium"));

    let options = choice.rendered_options(&NoResources).expect("render");
    let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].value, "BE");
    assert_eq!(selected[0].label, "Belgium");
}

#[test]
fn stale_submission_after_list_change_clears_selection() {
    let config = SelectConfig::new(countries()).with_model(Model::of(countries()[2].clone()));
    let mut choice = SingleSelectChoice::new("country", config);
    assert_eq!(choice.model_value().expect("model value"), "2");

    choice.set_choices(countries()[..2].to_vec());
    assert_eq!(
        choice.process_input(&["2".to_owned()]).expect("submit"),
        Submission::Cleared
    );
    assert!(choice.model().is_empty());
}

#[test]
fn null_valid_choice_with_localized_blank_label() {
    let settings = ChoiceSettings {
        null_valid: true,
        ..ChoiceSettings::default()
    };
    let config = SelectConfig::new(countries()).with_settings(settings);
    let choice = SingleSelectChoice::new("country", config);
    let resources = ResourceBundle::new().with("country.nullValid", "No country");

    let options = choice.rendered_options(&resources).expect("render");
    assert_eq!(options.len(), 4);
    assert!(options[0].is_placeholder());
    assert_eq!(options[0].label, "No country");
    assert!(options[0].selected);
}

#[test]
fn default_renderer_ids_are_positions() {
    let renderer = ChoiceRenderer::new();
    for (index, country) in countries().iter().enumerate() {
        assert_eq!(
            renderer.id_value(Some(country), Some(index)).expect("id"),
            index.to_string()
        );
        assert_eq!(
            renderer.display_value(Some(country)).expect("display"),
            country.name
        );
    }
}

#[test]
fn broken_expression_is_fatal_for_render() {
    let config =
        SelectConfig::new(countries()).with_renderer(ChoiceRenderer::with_display("capital.name"));
    let choice = SingleSelectChoice::new("country", config);

    let err = choice.rendered_options(&NoResources).unwrap_err();
    assert!(matches!(err, ChoiceError::Evaluation { .. }));
    assert!(err.to_string().contains("Netherlands"));
    assert!(err.to_string().contains("capital.name"));
}
