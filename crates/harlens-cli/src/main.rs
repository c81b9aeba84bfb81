use clap::Parser;
use console::style;
use harlens_cli::commands::analyze::{self, DEFAULT_OUTPUT_DIR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "harlens")]
#[command(author, version)]
#[command(
    about = "Batch analyzer for HTTP Archive (HAR) files",
    long_about = "Harlens scans a directory for HAR captures and writes, for each one, a JSON \
                  analysis and a Markdown report covering hosts, endpoints, parameters, headers \
                  and response types, plus a summary of all analyzed files."
)]
struct Cli {
    /// Directory to scan recursively for .har files
    #[arg(value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Directory that receives the generated reports
    #[arg(short, long, env = "HARLENS_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    println!("{}", style("HAR analyzer").bold().cyan());
    println!("{}", style("============").cyan());

    match analyze::execute(&cli.dir, &cli.output_dir) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{} {:#}", style("✗ Analysis failed:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("harlens=debug,harlens_cli=debug,harlens_core=debug")
        } else {
            EnvFilter::new("harlens=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
