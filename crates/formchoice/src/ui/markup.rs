//! HTML emission for choice options.

use minijinja::Environment;

use crate::domain::errors::ChoiceError;
use crate::domain::model::RenderedOption;

const OPTION_TEMPLATE_NAME: &str = "option.html";

// The `.html` name turns on minijinja's HTML auto-escaping for value and label.
const OPTION_TEMPLATE: &str = r#"<option{% if selected %} selected="selected"{% endif %}{% if disabled %} disabled="disabled"{% endif %} value="{{ value }}">{{ label }}</option>"#;

/// Renders [`RenderedOption`]s into `<option>` tags.
pub struct OptionMarkup {
    env: Environment<'static>,
}

impl OptionMarkup {
    /// Create a renderer with the built-in option template loaded.
    pub fn new() -> Result<Self, ChoiceError> {
        let mut env = Environment::new();
        env.add_template(OPTION_TEMPLATE_NAME, OPTION_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render a single option tag.
    pub fn render_option(&self, option: &RenderedOption) -> Result<String, ChoiceError> {
        let template = self.env.get_template(OPTION_TEMPLATE_NAME)?;
        Ok(template.render(option)?)
    }

    /// Render all options, each on its own line.
    pub fn render(&self, options: &[RenderedOption]) -> Result<String, ChoiceError> {
        let mut buffer = String::with_capacity(64 * options.len());
        for option in options {
            buffer.push('\n');
            buffer.push_str(&self.render_option(option)?);
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, label: &str, selected: bool) -> RenderedOption {
        RenderedOption {
            value: value.into(),
            label: label.into(),
            selected,
            disabled: false,
        }
    }

    #[test]
    fn renders_plain_option() {
        let markup = OptionMarkup::new().unwrap();
        let rendered = markup.render_option(&option("3", "Three", false)).unwrap();
        assert_eq!(rendered, r#"<option value="3">Three</option>"#);
    }

    #[test]
    fn renders_selected_and_disabled_flags() {
        let markup = OptionMarkup::new().unwrap();
        let mut choice = option("0", "Zero", true);
        choice.disabled = true;
        let rendered = markup.render_option(&choice).unwrap();
        assert_eq!(
            rendered,
            r#"<option selected="selected" disabled="disabled" value="0">Zero</option>"#
        );
    }

    #[test]
    fn escapes_untrusted_text() {
        let markup = OptionMarkup::new().unwrap();
        let rendered = markup
            .render_option(&option("a&b", "<b>Bold</b>", false))
            .unwrap();
        assert!(rendered.contains("value=\"a&amp;b\""));
        assert!(rendered.contains("&lt;b&gt;Bold"));
        assert!(!rendered.contains("<b>"));
    }

    #[test]
    fn renders_each_option_on_a_new_line() {
        let markup = OptionMarkup::new().unwrap();
        let rendered = markup
            .render(&[
                RenderedOption::placeholder("Choose One", true),
                option("0", "1", false),
            ])
            .unwrap();
        assert_eq!(
            rendered,
            "\n<option selected=\"selected\" value=\"\">Choose One</option>\n<option value=\"0\">1</option>"
        );
    }
}
