use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the inkpress binary.
#[derive(Debug, Parser)]
#[command(name = "inkpress", version, about = "Render blog markup to HTML")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "INKPRESS_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a markup document to an HTML fragment.
    Render(Box<RenderArgs>),
    /// Print the heading anchor slug for a title.
    Slug(SlugArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The HTML fragment only.
    #[default]
    Html,
    /// The full render output (HTML, headings, metrics) as JSON.
    Json,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderArgs {
    /// Markup file to read; `-` or nothing reads standard input.
    #[arg(value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Write the result to this file instead of standard output.
    #[arg(long, short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

#[derive(Debug, Args, Clone)]
pub struct SlugArgs {
    /// Heading title; multiple words are joined with spaces.
    #[arg(value_name = "TITLE", required = true, num_args = 1..)]
    pub title: Vec<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Emit fenced code bodies without escaping `&`, `<` and `>`.
    #[arg(long = "raw-code", action = clap::ArgAction::SetTrue)]
    pub raw_code: bool,

    /// Keep the author's numbers on `N. ` list items instead of `1.`.
    #[arg(long = "preserve-ordered-numbers", action = clap::ArgAction::SetTrue)]
    pub preserve_ordered_numbers: bool,

    /// Suffix repeated heading anchors with `-2`, `-3`, ….
    #[arg(long = "unique-anchors", action = clap::ArgAction::SetTrue)]
    pub unique_anchors: bool,
}
