use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process,
};

use inkpress::{
    application::{
        error::AppError,
        render::{
            RenderOptions, RenderRequest, RenderService, RenderTarget, configure_render_service,
            render_service,
        },
    },
    config::{self, OutputFormat, RenderArgs, SlugArgs},
    domain::slug::slugify,
    infra::{error::InfraError, telemetry},
};
use tracing::{Dispatch, Level, debug, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

const STDIN_MARKER: &str = "-";
const STDIN_SLUG: &str = "stdin";

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Render(Box::<RenderArgs>::default()));

    telemetry::init(&settings.logging)?;
    configure_render_service(RenderOptions::from(&settings.render))?;

    match command {
        config::Command::Render(args) => run_render(&args),
        config::Command::Slug(args) => run_slug(&args),
    }
}

fn run_render(args: &RenderArgs) -> Result<(), AppError> {
    let (markup, slug) = read_input(args.input.as_deref())?;
    let request = RenderRequest::new(RenderTarget::PageBody { slug }, markup);

    let output = render_service().render(&request);
    debug!(
        target = "inkpress::render",
        bytes = output.html.len(),
        headings = output.headings.len(),
        contains_code = output.contains_code,
        "document rendered"
    );

    let mut rendered = match args.format {
        OutputFormat::Html => output.html,
        OutputFormat::Json => serde_json::to_string_pretty(&output).map_err(InfraError::from)?,
    };
    rendered.push('\n');

    match args.output.as_deref() {
        Some(path) => fs::write(path, rendered).map_err(InfraError::from)?,
        None => io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .map_err(InfraError::from)?,
    }

    Ok(())
}

fn run_slug(args: &SlugArgs) -> Result<(), AppError> {
    let title = args.title.join(" ");
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", slugify(&title)).map_err(InfraError::from)?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<(String, String), AppError> {
    match path {
        Some(path) if path.as_os_str() != STDIN_MARKER => {
            let markup = fs::read_to_string(path).map_err(InfraError::from)?;
            let slug = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(STDIN_SLUG)
                .to_owned();
            Ok((markup, slug))
        }
        _ => {
            let mut markup = String::new();
            io::stdin()
                .read_to_string(&mut markup)
                .map_err(InfraError::from)?;
            Ok((markup, STDIN_SLUG.to_owned()))
        }
    }
}
