//! CLI command implementations
//!
//! `analyze` and `narrate` answer with exactly one JSON envelope on stdout,
//! success or error. `serve` runs until the listener fails.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::analysis::PlanAnalyzer;
use crate::annotate::{AnnotatorRegistry, Emphasis};
use crate::config::PlanLensConfig;
use crate::http_server::HttpServer;
use crate::plan::PlanTree;
use crate::session::{CatalogSessions, SessionProvider};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{parse_request, read_request, write_error, write_response};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Analyze { config, query } => analyze(&config, query),
        Command::Narrate { plan, config } => narrate(plan.as_deref(), config.as_deref()),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Analyze one query against the configured plan catalog
pub fn analyze(config_path: &Path, query: Option<String>) -> CliResult<()> {
    respond(load_and_analyze(config_path, query))
}

fn load_and_analyze(config_path: &Path, query: Option<String>) -> CliResult<Value> {
    let config = PlanLensConfig::load(config_path)?;
    let query = match query {
        Some(query) => query,
        None => query_from_request(&read_request()?)?,
    };
    analyze_query(&config, &query)
}

/// Summarize and narrate a single plan document, without probing
pub fn narrate(plan_path: Option<&Path>, config_path: Option<&Path>) -> CliResult<()> {
    respond(load_and_narrate(plan_path, config_path))
}

fn load_and_narrate(plan_path: Option<&Path>, config_path: Option<&Path>) -> CliResult<Value> {
    let emphasis = match config_path {
        Some(path) => PlanLensConfig::load(path)?.emphasis,
        None => Emphasis::default(),
    };
    let document = match plan_path {
        Some(path) => parse_request(&fs::read_to_string(path)?)?,
        None => read_request()?,
    };
    narrate_document(&document, emphasis)
}

/// Serve analysis over HTTP until the listener fails
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = PlanLensConfig::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }

    let provider: Arc<dyn SessionProvider> =
        Arc::new(CatalogSessions::from_path(config.catalog_path.clone()));
    let server = HttpServer::with_config(config.http.clone(), provider, analyzer_for(&config));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Run a full analysis and return the alternative set as JSON
pub fn analyze_query(config: &PlanLensConfig, query: &str) -> CliResult<Value> {
    let provider = CatalogSessions::from_path(config.catalog_path.clone());
    let set = analyzer_for(config).analyze_with(&provider, query)?;
    Ok(serde_json::to_value(set)?)
}

/// Summary and narration of one EXPLAIN document as JSON
pub fn narrate_document(document: &Value, emphasis: Emphasis) -> CliResult<Value> {
    let plan = PlanTree::from_explain_json(document)?;
    let analyzer = PlanAnalyzer::new().with_registry(AnnotatorRegistry::with_emphasis(emphasis));
    let report = analyzer.report(plan)?;
    Ok(serde_json::to_value(report)?)
}

/// Pull the query text out of a `{"query": ...}` request
pub fn query_from_request(request: &Value) -> CliResult<String> {
    match request.get("query") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(query)) => Ok(query.clone()),
        Some(other) => Err(CliError::invalid_input(format!(
            "query must be a string, got {}",
            other
        ))),
    }
}

fn analyzer_for(config: &PlanLensConfig) -> PlanAnalyzer {
    PlanAnalyzer::new().with_registry(AnnotatorRegistry::with_emphasis(config.emphasis.clone()))
}

fn respond(result: CliResult<Value>) -> CliResult<()> {
    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}
