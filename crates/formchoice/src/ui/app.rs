//! Command line front end rendering and resolving choices from data files.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::app::renderer::ChoiceRenderer;
use crate::app::select::{ChoiceSettings, SelectConfig, SingleSelectChoice};
use crate::domain::property::PropertyPath;
use crate::infra::accessor::SerdeAccessor;
use crate::infra::config::Config;
use crate::ui::markup::OptionMarkup;

#[derive(Parser, Debug)]
#[command(
    name = "formchoice",
    author,
    version,
    about = "Render and resolve single-select form choices",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the <option> markup for a choice list
    Render(RenderArgs),
    /// Resolve a submitted id back to the choice it names
    Resolve(ResolveArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct RendererArgs {
    /// Property path producing the option label
    #[arg(long, value_name = "EXPR")]
    display: Option<String>,
    /// Property path producing the option value (defaults to the list index)
    #[arg(long, value_name = "EXPR")]
    id: Option<String>,
}

impl RendererArgs {
    fn renderer(&self) -> ChoiceRenderer {
        ChoiceRenderer::with_accessor(
            SerdeAccessor,
            self.display.as_deref().map(PropertyPath::from),
            self.id.as_deref().map(PropertyPath::from),
        )
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON or YAML file holding an array of choices
    choices: PathBuf,
    #[command(flatten)]
    renderer: RendererArgs,
    /// Previously submitted id to mark as selected
    #[arg(long, value_name = "ID", allow_hyphen_values = true)]
    selected: Option<String>,
    /// Offer a blank option users may pick; `--null-valid false` overrides the config
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    null_valid: Option<bool>,
    /// Component id used to look up placeholder labels
    #[arg(long, default_value = "choice")]
    component_id: String,
    /// Override the id meaning "nothing selected"
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    no_selection_value: Option<String>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// JSON or YAML file holding an array of choices
    choices: PathBuf,
    /// Submitted id
    #[arg(allow_hyphen_values = true)]
    submitted: String,
    #[command(flatten)]
    renderer: RendererArgs,
}

/// A choice read from a data file; strings display without quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonChoice(pub Value);

impl fmt::Display for JsonChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

/// Entry point used by the binary.
#[derive(Debug, Default)]
pub struct CliApp;

impl CliApp {
    pub fn run(&mut self) -> Result<()> {
        let cli = Cli::parse();
        let config = Config::load()?;
        let stdout = io::stdout();
        execute(cli, &config, &mut stdout.lock())
    }
}

fn execute(cli: Cli, config: &Config, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Render(args) => render(args, config, out),
        Commands::Resolve(args) => resolve(args, config, out),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "formchoice", out);
            Ok(())
        }
    }
}

fn render(args: RenderArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let choices = load_choices(&args.choices)?;
    let mut settings = ChoiceSettings::from_config(config);
    if let Some(null_valid) = args.null_valid {
        settings.null_valid = null_valid;
    }
    if let Some(value) = args.no_selection_value {
        settings.no_selection_value = value;
    }

    let select_config = SelectConfig::new(choices)
        .with_renderer(args.renderer.renderer())
        .with_settings(settings);
    let choice = SingleSelectChoice::new(args.component_id, select_config);
    choice
        .validate()
        .context("invalid choice configuration")?;

    if let Some(selected) = args.selected.as_deref() {
        let object = choice.convert_choice_id_to_choice(Some(selected))?;
        choice.model().set_object(object);
    }

    let markup = OptionMarkup::new()?;
    let rendered = choice
        .render(&config.resources, &markup)
        .with_context(|| format!("failed to render choices from {}", args.choices.display()))?;
    info!(component = choice.id(), "rendered choices");
    writeln!(out, "{}", rendered.trim_start_matches('\n'))?;
    Ok(())
}

fn resolve(args: ResolveArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let choices = load_choices(&args.choices)?;
    let select_config = SelectConfig::new(choices)
        .with_renderer(args.renderer.renderer())
        .with_settings(ChoiceSettings::from_config(config));
    let choice = SingleSelectChoice::new("choice", select_config);

    let resolved = choice
        .convert_choice_id_to_choice(Some(&args.submitted))
        .with_context(|| format!("failed to resolve '{}'", args.submitted))?;
    let json = serde_json::to_string(&resolved).context("failed to serialize resolved choice")?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn load_choices(path: &Path) -> Result<Vec<JsonChoice>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read choices from {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml"));

    if is_yaml {
        serde_yaml::from_str(&data)
            .with_context(|| format!("invalid YAML choice list in {}", path.display()))
    } else {
        serde_json::from_str(&data)
            .with_context(|| format!("invalid JSON choice list in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_cli(args: &[&str], config: &Config) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("formchoice").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        execute(cli, config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn write_choices(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn renders_index_based_options_with_selection() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = write_choices(temp.path(), "digits.json", r#"["1", "2", "3"]"#);
        let output = run_cli(
            &["render", path.to_str().unwrap(), "--selected", "1"],
            &Config::default(),
        )?;

        assert_eq!(
            output,
            "<option value=\"0\">1</option>\n<option selected=\"selected\" value=\"1\">2</option>\n<option value=\"2\">3</option>\n"
        );
        Ok(())
    }

    #[test]
    fn renders_placeholder_from_configured_resources() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = write_choices(
            temp.path(),
            "colors.yaml",
            "- {code: r, name: Red}\n- {code: g, name: Green}\n",
        );
        let mut config = Config::default();
        config.resources = toml::from_str(r#""color.null" = "Any colour""#)?;

        let output = run_cli(
            &[
                "render",
                path.to_str().unwrap(),
                "--display",
                "name",
                "--id",
                "code",
                "--component-id",
                "color",
            ],
            &config,
        )?;

        assert!(output.starts_with("<option selected=\"selected\" value=\"\">Any colour</option>"));
        assert!(output.contains("<option value=\"g\">Green</option>"));
        Ok(())
    }

    #[test]
    fn resolve_prints_matching_choice_or_null() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = write_choices(
            temp.path(),
            "accounts.json",
            r#"[{"number": -1, "holder": "Suspense"}, {"number": 4, "holder": "Ada"}]"#,
        );
        let file = path.to_str().unwrap();

        let found = run_cli(&["resolve", "--id", "number", file, "-1"], &Config::default())?;
        assert_eq!(found.trim(), r#"{"holder":"Suspense","number":-1}"#);

        let missing = run_cli(&["resolve", "--id", "number", file, "9"], &Config::default())?;
        assert_eq!(missing.trim(), "null");
        Ok(())
    }

    #[test]
    fn render_rejects_colliding_no_selection_value() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = write_choices(temp.path(), "digits.json", r#"["a", "b"]"#);
        let result = run_cli(
            &["render", path.to_str().unwrap(), "--no-selection-value", "1"],
            &Config::default(),
        );
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("collides"));
        Ok(())
    }

    #[test]
    fn null_valid_flag_overrides_config_both_ways() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = write_choices(temp.path(), "digits.json", r#"["1", "2"]"#);
        let file = path.to_str().unwrap();
        let mut config = Config::default();
        config.select = toml::from_str("null_valid = true")?;

        let from_config = run_cli(&["render", file], &config)?;
        assert!(from_config.starts_with("<option selected=\"selected\" value=\"\"></option>"));

        let disabled = run_cli(&["render", file, "--null-valid", "false"], &config)?;
        assert!(disabled.starts_with("<option selected=\"selected\" value=\"\">Choose One</option>"));

        let enabled = run_cli(&["render", file, "--null-valid"], &Config::default())?;
        assert!(!enabled.contains("Choose One"));
        Ok(())
    }

    #[test]
    fn json_choice_displays_strings_unquoted() {
        assert_eq!(JsonChoice(Value::from("red")).to_string(), "red");
        assert_eq!(JsonChoice(Value::from(3)).to_string(), "3");
    }
}
