//! Shortcut Discovery CLI
//!
//! Command-line interface for discovering stream schemas and checking records against them.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use shortcut_discovery::{
    discover, discover_one, load_config, load_spec_auto, shortcut_resources, ValidateError,
    SHORTCUT_OPENAPI_URL,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shortcut-discovery")]
#[command(about = "Discover Shortcut stream schemas from the published OpenAPI document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover every stream and print the catalog
    Discover {
        /// OpenAPI document: file path or URL (http:// or https://)
        #[arg(long, default_value = SHORTCUT_OPENAPI_URL)]
        spec: String,

        /// Connector config file, checked for a token when given. Discovery itself
        /// runs without credentials because the OpenAPI document is public.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the final schema of one stream
    Schema {
        /// Stream name (e.g., members, project_stories)
        stream: String,

        /// OpenAPI document: file path or URL (http:// or https://)
        #[arg(long, default_value = SHORTCUT_OPENAPI_URL)]
        spec: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate records against a stream's schema
    Validate {
        /// Stream name (e.g., members, project_stories)
        stream: String,

        /// Records file: a JSON array or one JSON object per line
        records: PathBuf,

        /// OpenAPI document: file path or URL (http:// or https://)
        #[arg(long, default_value = SHORTCUT_OPENAPI_URL)]
        spec: String,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Download the OpenAPI document into a local snapshot
    UpdateSpec {
        /// Snapshot file to write
        #[arg(long)]
        output: PathBuf,

        /// Document URL
        #[arg(long, default_value = SHORTCUT_OPENAPI_URL)]
        url: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Discover {
            spec,
            config,
            output,
            pretty,
        } => run_discover(&spec, config.as_deref(), output, pretty),

        Commands::Schema {
            stream,
            spec,
            pretty,
        } => run_schema(&stream, &spec, pretty),

        Commands::Validate {
            stream,
            records,
            spec,
            json,
        } => run_validate(&stream, &records, &spec, json),

        Commands::UpdateSpec { output, url } => run_update_spec(&url, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_discover(
    spec: &str,
    config: Option<&Path>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), u8> {
    if let Some(path) = config {
        load_config(path).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;
    }

    let document = load_spec_auto(spec).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let catalog = discover(&document, &shortcut_resources()).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = to_json(&catalog, pretty)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_schema(stream: &str, spec: &str, pretty: bool) -> Result<(), u8> {
    let document = load_spec_auto(spec).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let discovered = discover_one(&document, &shortcut_resources(), stream).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    println!("{}", to_json(&discovered.schema, pretty)?);
    Ok(())
}

fn run_validate(stream: &str, records_path: &Path, spec: &str, json_output: bool) -> Result<(), u8> {
    let records = load_records(records_path).map_err(|msg| {
        report_error(json_output, &msg);
        2u8
    })?;

    let document = load_spec_auto(spec).map_err(|e| {
        report_error(json_output, &format!("loading spec: {}", e));
        e.exit_code() as u8
    })?;

    let discovered = discover_one(&document, &shortcut_resources(), stream).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    let mut failures = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match discovered.validate(record) {
            Ok(()) => {}
            Err(ValidateError::Invalid { errors }) => failures.push((index, errors)),
            Err(e @ ValidateError::InvalidSchema { .. }) => {
                report_error(json_output, &e.to_string());
                return Err(e.exit_code() as u8);
            }
        }
    }

    if json_output {
        let failed: Vec<Value> = failures
            .iter()
            .map(|(index, errors)| serde_json::json!({ "record": index, "errors": errors }))
            .collect();
        let output = serde_json::json!({
            "valid": failures.is_empty(),
            "records": records.len(),
            "failed": failed
        });
        println!("{}", output);
    } else if failures.is_empty() {
        println!("Valid ({} records)", records.len());
    } else {
        eprintln!("Validation failed:");
        for (index, errors) in &failures {
            for error in errors {
                eprintln!("  record {}: {}", index, error);
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(1)
    }
}

#[cfg(feature = "remote")]
fn run_update_spec(url: &str, output: &Path) -> Result<(), u8> {
    use shortcut_discovery::{fetch_json, write_snapshot, SchemaDocument};

    let raw = fetch_json(url).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    // Refuse to overwrite a snapshot with something discovery can't read
    SchemaDocument::from_value(raw.clone()).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    write_snapshot(&raw, output).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    tracing::info!(path = %output.display(), "wrote OpenAPI snapshot");
    Ok(())
}

#[cfg(not(feature = "remote"))]
fn run_update_spec(_url: &str, _output: &Path) -> Result<(), u8> {
    eprintln!("Error: update-spec requires the 'remote' feature");
    Err(2)
}

/// Read records from a JSON array or a stream of JSON values (e.g., JSON lines).
fn load_records(path: &Path) -> Result<Vec<Value>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;

    let values = serde_json::Deserializer::from_str(&content)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid records in {}: {}", path.display(), e))?;

    match values.as_slice() {
        [Value::Array(records)] => Ok(records.clone()),
        _ => Ok(values),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, u8> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}
