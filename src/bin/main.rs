use adoc_docx_rename::{self, logging, Mode, ReplaceStrategy};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, level_filters::LevelFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan recursively
    directory: PathBuf,

    /// Only report the renames that would happen
    #[arg(long)]
    preview: bool,

    /// Replace only the trailing `.adoc.docx` instead of every occurrence in the name
    #[arg(long)]
    strict_suffix: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log: LevelFilter,

    /// File the log is appended to
    #[arg(long, default_value = logging::DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::init(cli.log, &cli.log_file) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mode = if cli.preview {
        Mode::Preview
    } else {
        Mode::Execute
    };
    let strategy = if cli.strict_suffix {
        ReplaceStrategy::Suffix
    } else {
        ReplaceStrategy::Substring
    };
    debug!(mode = ?mode, strategy = ?strategy, "Starting run");

    let processor = match adoc_docx_rename::new(&cli.directory, strategy) {
        Ok(processor) => processor,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = processor.run(mode);

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(report) => println!("{report}"),
            Err(err) => {
                error!("Failed to serialize run report: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
