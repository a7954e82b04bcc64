use formchoice::app::select::{SelectConfig, SingleSelectChoice};
use formchoice::infra::resources::NoResources;
use formchoice::ui::markup::OptionMarkup;
use insta::assert_snapshot;

#[test]
fn placeholder_precedes_unselected_digits() {
    let choices: Vec<String> = vec!["1".into(), "2".into(), "3".into()];
    let choice = SingleSelectChoice::new("digit", SelectConfig::new(choices));
    let markup = OptionMarkup::new().expect("markup");

    let rendered = choice.render(&NoResources, &markup).expect("render");
    assert_snapshot!("choose_one_placeholder", rendered.trim_start());
}
