use clap::{Parser, Subcommand};
use pyprobe::commands;
use pyprobe::config::PyprobeConfig;
use pyprobe::logging::init_tracing;
use pyprobe::output::OutputFormat;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "pyprobe", version, about = "Analyze Python snippets and generate edge-case tests")]
struct Cli {
    /// Enable debug logging (overridden by PYPROBE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Address to bind [default: 127.0.0.1]
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on [default: 5000]
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a Python file (`-` for stdin)
    Analyze {
        file: PathBuf,
        /// Print the JSON report
        #[arg(long)]
        json: bool,
        /// Human-friendly output with colors
        #[arg(long)]
        pretty: bool,
    },
    /// Generate edge-case tests for a Python file (`-` for stdin)
    Export {
        file: PathBuf,
        /// Test format; `pytest` or anything else for unittest [default: from config]
        #[arg(short, long)]
        format: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the JSON schema of the analysis report
    Schema,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = PyprobeConfig::load(&commands::project_root());
    debug!(?config, "loaded config");

    let result = match cli.command {
        Command::Serve { host, port } => commands::cmd_serve(host.as_deref(), port, &config),
        Command::Analyze { file, json, pretty } => {
            commands::cmd_analyze(&file, &OutputFormat::from_cli(json, pretty))
        }
        Command::Export {
            file,
            format,
            output,
        } => commands::cmd_export(&file, format.as_deref(), output.as_deref(), &config),
        Command::Schema => commands::cmd_schema(),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
