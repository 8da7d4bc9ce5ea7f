//! xlsxpopulate CLI
//!
//! Renders a template once per spreadsheet row and writes one file per row.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;
use xlsxpopulate::{
    BoolStyle, CollisionPolicy, DateFormat, DuplicateHeaderPolicy, PopulatorBuilder, RunPaths,
    DEFAULT_EXTENSION,
};

#[derive(Parser, Debug)]
#[command(name = "xlsxpopulate")]
#[command(about = "Populate a text template from spreadsheet rows, one file per row")]
#[command(long_about = "Populate a text template from spreadsheet rows, one file per row.

The first row of the first worksheet holds the headers. Every following row
is rendered through the template, where each header is available as a
variable ({{ Name }}) and the whole row as `record` ({{ record[\"First Name\"] }}).

EXAMPLES:
  xlsxpopulate -t letter.txt -v people.xlsx -o out/
  xlsxpopulate -t page.html -v rows.ods -o site/ -c Slug -e html --remove-newlines

Set RUST_LOG to control log verbosity (default: xlsxpopulate=info).")]
#[command(version)]
struct Cli {
    /// Template file to populate
    #[arg(short, long, env = "XLSXPOPULATE_TEMPLATE")]
    template: PathBuf,

    /// Spreadsheet holding the values (xlsx, xlsm, xlsb, xls, ods)
    #[arg(short, long, env = "XLSXPOPULATE_VALUES")]
    values: PathBuf,

    /// Existing directory receiving the generated files
    #[arg(short, long, env = "XLSXPOPULATE_OUT")]
    out: PathBuf,

    /// Header whose value names each output file
    #[arg(short = 'c', long)]
    filename_column: Option<String>,

    /// Extension of the generated files
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Remove line breaks from the template before rendering
    #[arg(long)]
    remove_newlines: bool,

    /// Decimal separator used for numeric cells
    #[arg(long, default_value_t = '.')]
    decimal_separator: char,

    /// strftime pattern for date cells without a time part (default: ISO 8601)
    #[arg(long)]
    date_format: Option<String>,

    /// strftime pattern for date cells with a time part (default: ISO 8601)
    #[arg(long)]
    datetime_format: Option<String>,

    /// Rendering of boolean cells
    #[arg(long, value_enum, default_value_t = BoolArg::Title)]
    bool_style: BoolArg,

    /// Let a later column win over an earlier column with the same header
    #[arg(long)]
    allow_duplicate_headers: bool,

    /// What to do when two rows produce the same file name
    #[arg(long, value_enum, default_value_t = CollisionArg::Overwrite)]
    on_collision: CollisionArg,

    /// Print a JSON run summary to stdout
    #[arg(long)]
    summary_json: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug details
    #[arg(long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BoolArg {
    /// True / False
    Title,
    /// TRUE / FALSE
    Upper,
    /// true / false
    Lower,
}

impl From<BoolArg> for BoolStyle {
    fn from(arg: BoolArg) -> Self {
        match arg {
            BoolArg::Title => BoolStyle::TitleCase,
            BoolArg::Upper => BoolStyle::UpperCase,
            BoolArg::Lower => BoolStyle::LowerCase,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CollisionArg {
    /// Later rows replace earlier files with the same name
    Overwrite,
    /// Later rows get `<name>-<row index>.<ext>`
    AppendIndex,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Overwrite => CollisionPolicy::Overwrite,
            CollisionArg::AppendIndex => CollisionPolicy::AppendIndex,
        }
    }
}

fn init_logging(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "xlsxpopulate=warn"
    } else if verbose {
        "xlsxpopulate=debug"
    } else {
        "xlsxpopulate=info"
    };

    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::try_from_default_env()?,
        Err(_) => EnvFilter::new(level),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut builder = PopulatorBuilder::new()
        .with_extension(cli.extension)
        .with_decimal_separator(cli.decimal_separator)
        .with_bool_style(cli.bool_style.into())
        .collapse_newlines(cli.remove_newlines)
        .with_collision_policy(cli.on_collision.into());

    if let Some(column) = cli.filename_column {
        builder = builder.with_naming_column(column);
    }
    if let Some(pattern) = cli.date_format {
        builder = builder.with_date_format(DateFormat::Custom(pattern));
    }
    if let Some(pattern) = cli.datetime_format {
        builder = builder.with_datetime_format(DateFormat::Custom(pattern));
    }
    if cli.allow_duplicate_headers {
        builder = builder.with_duplicate_headers(DuplicateHeaderPolicy::LastWins);
    }

    let populator = builder.build().context("invalid options")?;

    let paths = RunPaths {
        template: cli.template,
        spreadsheet: cli.values,
        output_dir: cli.out,
    };
    let summary = populator
        .run(&paths)
        .with_context(|| format!("failed to populate from {}", paths.spreadsheet.display()))?;

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.quiet, cli.verbose) {
        eprintln!("Error: invalid RUST_LOG: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
