//! Fetch command - authenticate and download the bill history.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info};

use releve_core::{BillRecord, Connector, ConnectorConfig};

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Portal account login
    #[arg(short, long)]
    login: String,

    /// Portal account password
    #[arg(short, long)]
    password: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: FetchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    debug!("portal base URL: {}", config.base_url);

    let connector = Connector::new(config)?;
    let records = connector.run(&args.login, &args.password).await?;

    if records.is_empty() {
        println!("{} No bills found for this account.", style("ℹ").blue());
        return Ok(());
    }

    let output = format_records(&records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} bill records written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn load_config(config_path: Option<&str>) -> anyhow::Result<ConnectorConfig> {
    if let Some(path) = config_path {
        return Ok(ConnectorConfig::from_file(Path::new(path))?);
    }

    let default_path = super::config::default_config_path();
    if default_path.exists() {
        info!("using config file {}", default_path.display());
        return Ok(ConnectorConfig::from_file(&default_path)?);
    }

    Ok(ConnectorConfig::default())
}

fn format_records(records: &[BillRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record([
                "vendor", "vendorRef", "label", "amount", "date", "isRefund", "fileurl",
                "filename",
            ])?;
            for record in records {
                writer.write_record(&[
                    record.vendor.clone(),
                    record.vendor_ref.clone(),
                    record.label.clone(),
                    record.amount.to_string(),
                    record.date.to_string(),
                    record
                        .is_refund
                        .map(|refund| refund.to_string())
                        .unwrap_or_default(),
                    record.file_url.clone(),
                    record.filename.clone(),
                ])?;
            }
            let data = writer
                .into_inner()
                .map_err(|err| anyhow::anyhow!("failed to flush CSV output: {err}"))?;
            Ok(String::from_utf8(data)?)
        }
        OutputFormat::Text => {
            let mut lines: Vec<String> = records
                .iter()
                .map(|record| {
                    format!(
                        "{}  {}  {} EUR  {}",
                        record.date, record.vendor_ref, record.amount, record.filename
                    )
                })
                .collect();
            lines.push(format!("{} records", records.len()));
            Ok(lines.join("\n"))
        }
    }
}
