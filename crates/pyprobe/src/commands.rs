//! CLI command implementations.

use crate::config::PyprobeConfig;
use crate::http::{self, AppState};
use crate::output::{OutputFormat, OutputFormatter};
use anyhow::{Context, bail};
use pyprobe_analyze::{AnalysisReport, Analyzer, render_test_module};
use std::io::Read;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read source from a file, or stdin for `-`.
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Analyze a file and print the report. Fails when the snippet does not parse.
pub fn cmd_analyze(file: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    let source = read_source(file)?;
    debug!(path = %file.display(), bytes = source.len(), "analyzing");

    let report = AnalysisReport::from(Analyzer::new().analyze(&source));
    report.print(format);
    if !report.success {
        bail!("analysis failed");
    }
    Ok(())
}

/// Generate the test module for a file, writing to `output` or stdout.
pub fn cmd_export(
    file: &Path,
    format: Option<&str>,
    output: Option<&Path>,
    config: &PyprobeConfig,
) -> anyhow::Result<()> {
    let source = read_source(file)?;
    let format = format.unwrap_or_else(|| config.export.default_format());

    let analysis = Analyzer::new()
        .analyze(&source)
        .with_context(|| format!("failed to analyze {}", file.display()))?;
    let module = render_test_module(&analysis, format);

    match output {
        Some(path) => {
            std::fs::write(path, &module)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote tests");
        }
        None => print!("{module}"),
    }
    Ok(())
}

/// Resolve the bind address from flags and config, then serve.
pub fn cmd_serve(
    host: Option<&str>,
    port: Option<u16>,
    config: &PyprobeConfig,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| config.serve.host());
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("invalid host address: {host}"))?;
    let addr = SocketAddr::new(ip, port.unwrap_or_else(|| config.serve.port()));

    let state = AppState {
        default_format: config.export.default_format().to_string(),
    };

    let rt = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    rt.block_on(http::run_http_server(addr, state))
}

/// JSON schema of the analysis report.
pub fn cmd_schema() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(AnalysisReport);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

/// Working directory used to locate project config.
pub fn project_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
