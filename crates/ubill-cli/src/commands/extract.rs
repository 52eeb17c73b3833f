//! Extract command - pull billing data from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use ubill_core::models::config::UbillConfig;
use ubill_core::{BillRecord, BillRecordBuilder, DocumentAnalysisClient};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input document (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Custom extraction model to analyze with (overrides config)
    #[arg(short, long)]
    model_id: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (section,field,value rows)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        UbillConfig::from_file(std::path::Path::new(path))?
    } else {
        let default_path = super::config::default_config_path();
        if default_path.exists() {
            UbillConfig::from_file(&default_path)?
        } else {
            UbillConfig::default()
        }
    };

    if config.azure.endpoint.is_empty() || config.azure.api_key.is_empty() {
        anyhow::bail!(
            "Azure endpoint and api_key are not configured.\n\n\
             Run 'ubill config init' and fill in the azure section."
        );
    }

    let model_id = args
        .model_id
        .clone()
        .or_else(|| {
            (!config.extraction.model_id.is_empty()).then(|| config.extraction.model_id.clone())
        })
        .ok_or_else(|| {
            anyhow::anyhow!("No extraction model given. Pass --model-id or set extraction.model_id.")
        })?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading document...");
    pb.set_position(10);

    let document = fs::read(&args.input)?;
    debug!("Read {} bytes", document.len());

    pb.set_message("Analyzing document...");
    pb.set_position(30);

    let client = DocumentAnalysisClient::from_config(&config.azure, &config.extraction);
    let fields = client.analyze_document(&model_id, document).await?;

    debug!("Service returned {} fields", fields.len());

    pb.set_message("Assembling bill record...");
    pb.set_position(80);

    let record = BillRecordBuilder::new().build(&fields)?;

    pb.set_position(100);
    pb.finish_with_message("Done");

    // Format output
    let output = format_record(&record, args.format, args.pretty)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &BillRecord, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            if pretty {
                Ok(serde_json::to_string_pretty(record)?)
            } else {
                Ok(serde_json::to_string(record)?)
            }
        }
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// Long-format CSV: one row per field, grouped by record section.
fn format_csv(record: &BillRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["section", "field", "value"])?;

    let json = serde_json::to_value(record)?;
    for section in ["staticinformation", "consumptioninformation", "commercials"] {
        let Some(fields) = json.get(section).and_then(|v| v.as_object()) else {
            continue;
        };
        for (name, value) in fields {
            wtr.write_record([section, name, &value.to_string()])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &BillRecord) -> String {
    let mut output = String::new();

    output.push_str("Billing period:\n");
    output.push_str(&format!(
        "  Bill date:  {} (epoch)\n",
        record.staticinformation.billdate
    ));
    output.push_str(&format!(
        "  Month span: {} .. {} (epoch)\n",
        record.staticinformation.billdatestart, record.staticinformation.billdateend
    ));
    output.push('\n');

    output.push_str("Consumption:\n");
    output.push_str(&format!(
        "  Total consumed units: {:.2}\n",
        record.consumptioninformation.totalconsumedunits
    ));
    output.push_str(&format!(
        "  Billed demand:        {:.2}\n",
        record.consumptioninformation.billeddemand
    ));
    output.push_str(&format!(
        "  Billed PF:            {:.2}\n",
        record.consumptioninformation.billedpf
    ));
    output.push('\n');

    output.push_str("Commercials:\n");
    output.push_str(&format!(
        "  Energy consumption charge: {:.2}\n",
        record.commercials.totalenergyconsumptioncharge
    ));
    output.push_str(&format!(
        "  Demand charges:            {:.2}\n",
        record.commercials.demandcharges
    ));
    output.push_str(&format!(
        "  Demand rate:               {:.2}\n",
        record.staticinformation.demandrate
    ));
    output.push_str(&format!(
        "  Total bill amount:         {:.2}\n",
        record.commercials.totalbillamount
    ));

    output
}
