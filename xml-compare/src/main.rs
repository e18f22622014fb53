use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xml_compare::inspect::render_events;
use xml_compare::report::{render_summary, render_text, CompareReport};
use xml_compare::settings::load_configuration;
use xml_compare_core::{
    collect_events, compare_documents, DiffConfiguration, WhitespaceHandling, XmlInput,
};

mod cli;

use cli::{Cli, Command, CompareArgs, EventsArgs, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Events(args) => run_events(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "xml_compare_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let config = build_configuration(&args)?;
    let control = XmlInput::from_file(&args.control);
    let test = XmlInput::from_file(&args.test);

    let result = compare_documents(&control, &test, &config).with_context(|| {
        format!(
            "failed to compare {} with {}",
            args.control.display(),
            args.test.display()
        )
    })?;

    match args.format {
        OutputFormat::Text => {
            if !config.description().is_empty() {
                println!("{}", config.description());
            }
            if args.summary {
                println!("{}", render_summary(&result));
            } else {
                println!("{}", render_text(&result));
            }
        }
        OutputFormat::Json => {
            let report = CompareReport {
                description: config.description(),
                control: args.control.display().to_string(),
                test: args.test.display().to_string(),
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if args.identical && !result.identical() {
        bail!("documents are not identical");
    }
    if !result.equal() {
        bail!("documents are not equal");
    }
    Ok(())
}

fn build_configuration(args: &CompareArgs) -> Result<DiffConfiguration> {
    let mut config = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading settings");
            load_configuration(path)?
        }
        None => DiffConfiguration::default(),
    };

    if let Some(whitespace) = args.whitespace {
        config = config.with_whitespace_handling(WhitespaceHandling::from(whitespace));
    }
    if args.ignore_attribute_order {
        config = config.with_ignore_attribute_order(true);
    }
    if args.no_validate {
        config = config.with_validating_parser(false);
    }
    if let Some(description) = &args.description {
        config = config.with_description(description.as_str());
    }
    Ok(config)
}

fn run_events(args: EventsArgs) -> Result<()> {
    let config = DiffConfiguration::default()
        .with_whitespace_handling(WhitespaceHandling::from(args.whitespace))
        .with_validating_parser(!args.no_validate);

    let input = XmlInput::from_file(&args.file);
    let mut cursor = input
        .open(&config)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let events = collect_events(&mut cursor)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    print!("{}", render_events(&events));
    Ok(())
}
