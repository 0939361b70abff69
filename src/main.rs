use clap::{Parser, Subcommand};
use royalbit_xlsform::cli::{self, ResolveTarget};
use royalbit_xlsform::config::{ExportConfig, OutputFormat};
use royalbit_xlsform::error::FormResult;
use royalbit_xlsform::vocabulary;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xlsform")]
#[command(about = "Export XLSForm survey models to spreadsheet tables.")]
#[command(long_about = "XLSForm - form model to survey / choices / settings tables

Loads a form document (pyxform JSON survey shape, as JSON or YAML) and writes
it back out as XLSForm tables, or translates question types between the
internal, XForm and XLSForm vocabularies.

COMMANDS:
  export   - Form document to .xlsx workbook or .csv
  tables   - Print the exported tables as JSON
  resolve  - Translate a question type name

EXAMPLES:
  xlsform export household.json household.xlsx
  xlsform export household.yaml --format csv > household.csv
  xlsform tables household.json --seed 42
  xlsform resolve \"select all that apply\" --to runtime

ENVIRONMENT:
  XLSFORM_FORMAT  default output format (xlsx, csv)
  XLSFORM_SEED    default seed for list names
  RUST_LOG        log filter (default: royalbit_xlsform=warn)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export a form document as XLSForm tables.

Writes three tables: survey, choices and settings. Choice lists get a
generated name (<question>_<random suffix>); use --seed for names that are
identical across runs.

Cascading selects (choice filters) are exported with a single placeholder
choice and a warning on stderr.

OUTPUT:
  With an output path the file is written; the format is taken from --format,
  then from the file extension, then defaults to xlsx.
  Without an output path the encoded bytes go to stdout.")]
    /// Export a form document to .xlsx or .csv
    Export {
        /// Path to the form document (.json, .yaml)
        input: PathBuf,

        /// Output file path (.xlsx, .csv); stdout when omitted
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, env = "XLSFORM_FORMAT")]
        format: Option<OutputFormat>,

        /// Seed for reproducible choice-list names
        #[arg(long, env = "XLSFORM_SEED")]
        seed: Option<u64>,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the exported survey, choices and settings tables as JSON
    Tables {
        /// Path to the form document (.json, .yaml)
        input: PathBuf,

        /// Seed for reproducible choice-list names
        #[arg(long, env = "XLSFORM_SEED")]
        seed: Option<u64>,
    },

    #[command(long_about = "Translate a question type name.

Accepts internal names (\"select one\", \"calculate\", \"gps\"), XForm types
(select1, int, binary) and XLSForm types (select_one, integer, file).

EXAMPLES:
  xlsform resolve photo --to runtime      # binary
  xlsform resolve select1                 # select_one
  xlsform resolve xsd:dateTime --to runtime")]
    /// Translate a question type into the XForm or XLSForm vocabulary
    Resolve {
        /// Question type name
        type_id: String,

        /// Target vocabulary
        #[arg(long, value_enum, default_value_t = ResolveTarget::Authoring)]
        to: ResolveTarget,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "royalbit_xlsform=debug"
    } else {
        "royalbit_xlsform=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn main() -> FormResult<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Export { verbose: true, .. });
    init_tracing(verbose);
    vocabulary::init()?;

    match cli.command {
        Commands::Export {
            input,
            output,
            format,
            seed,
            verbose,
        } => cli::export(input, ExportConfig::new(format, output, seed), verbose),

        Commands::Tables { input, seed } => cli::tables(input, seed),

        Commands::Resolve { type_id, to } => cli::resolve(type_id, to),
    }
}
