use clap::{Parser, ValueEnum};
use eligibility::application::engine::RuleEngine;
use eligibility::domain::ports::ReferenceDataSourceBox;
use eligibility::infrastructure::in_memory::InMemoryReferenceSource;
use eligibility::infrastructure::json_file::JsonFileReferenceSource;
use eligibility::interfaces::ResultWriter;
use eligibility::interfaces::csv::result_writer::CsvResultWriter;
use eligibility::interfaces::json::payload_reader::PayloadReader;
use eligibility::interfaces::json::result_writer::JsonResultWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payload files: a JSON object, an array of objects, or JSON Lines
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Reference data file (JSON). Built-in defaults are used when omitted.
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eligibility=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let source: ReferenceDataSourceBox = match cli.reference {
        Some(path) => Box::new(JsonFileReferenceSource::new(path)),
        None => Box::new(InMemoryReferenceSource::default()),
    };
    let engine = RuleEngine::from_source(source.as_ref())
        .await
        .into_diagnostic()?;

    let mut writer: Box<dyn ResultWriter> = match cli.format {
        OutputFormat::Json => Box::new(JsonResultWriter::new(io::stdout())),
        OutputFormat::Csv => Box::new(CsvResultWriter::new(io::stdout())),
    };

    for input in &cli.inputs {
        let file = File::open(input).into_diagnostic()?;
        let payloads = PayloadReader::new(file).payloads().into_diagnostic()?;

        for (index, payload) in payloads.into_iter().enumerate() {
            let label = format!("{}#{}", input.display(), index + 1);
            match payload.and_then(|value| engine.evaluate_value(value)) {
                Ok(result) => writer.write_result(&label, &result).into_diagnostic()?,
                Err(e) => {
                    eprintln!("Error evaluating payload {}: {}", label, e);
                }
            }
        }
    }

    writer.finish().into_diagnostic()?;
    Ok(())
}
