use std::path::{Path, PathBuf};

use argspec_core::validate_schema;
use argspec_resolver::{ParseError, Resolver};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

mod document;
mod logging;
mod usage;

use document::SchemaDocument;

/// Output format for resolved tokens.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argspec")]
#[command(about = "Resolve command-line tokens against a flag and argument schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve tokens against a schema document and print the result.
    Resolve(ResolveArgs),
    /// Validate one or more schema documents.
    Validate(ValidateArgs),
    /// Print help text for a schema document.
    Usage(UsageArgs),
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Schema document (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Tokens to resolve. Put them after `--` so they are not read as options.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema documents to check.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Schema document.
    #[arg(long)]
    schema: PathBuf,
    /// Program name shown in the usage line.
    #[arg(long, default_value = "argspec")]
    bin: String,
}

/// Error reported by a subcommand, with the process exit code to use.
#[derive(Debug)]
struct Failure {
    message: String,
    code: i32,
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self { message, code: 1 }
    }
}

impl From<ParseError> for Failure {
    fn from(err: ParseError) -> Self {
        Self {
            message: err.to_string(),
            code: err.exit_code(),
        }
    }
}

#[tokio::main]
async fn main() {
    logging::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Resolve(args) => run_resolve(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Usage(args) => run_usage(args),
    };

    if let Err(failure) = result {
        eprintln!("error: {}", failure.message);
        std::process::exit(failure.code);
    }
}

async fn run_resolve(args: ResolveArgs) -> Result<(), Failure> {
    let doc = load_document(&args.schema)?;
    let schema = doc.to_schema();
    for problem in validate_schema(&schema) {
        warn!(schema = %args.schema.display(), "{problem}");
    }

    debug!(tokens = ?args.tokens, "resolving");
    let output = Resolver::new(&schema).parse(args.tokens).await?;

    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|err| format!("Failed to serialize output: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&output)
            .map_err(|err| format!("Failed to serialize output: {err}"))?,
    };
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), Failure> {
    let mut invalid = 0usize;
    for path in &args.inputs {
        let doc = load_document(path)?;
        let errors = validate_schema(&doc.to_schema());
        for err in &errors {
            eprintln!("{}: {err}", path.display());
        }
        if !errors.is_empty() {
            invalid += 1;
        }
    }

    if invalid > 0 {
        return Err(format!("{invalid} of {} schema document(s) invalid", args.inputs.len()).into());
    }
    println!("Validated {} schema document(s).", args.inputs.len());
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<(), Failure> {
    let doc = load_document(&args.schema)?;
    print!("{}", usage::render_help(&args.bin, &doc));
    Ok(())
}

fn load_document(path: &Path) -> Result<SchemaDocument, String> {
    SchemaDocument::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}
