mod cli;
mod config;
mod dvsa;
mod error;
mod pipeline;
mod resolver;
mod ui;
mod validator;
mod workbook;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use console::Style;

use cli::Cli;
use config::MotConfig;
use dvsa::{ClientCredentials, TokenProvider, VehicleHistoryClient};
use pipeline::EnrichmentPipeline;
use resolver::MotResolver;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {err:#}", Style::new().red().bold().apply_to("✗"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = MotConfig::load(&cli.config)?;
    if let Some(pace_ms) = cli.pace_ms {
        config.pace_ms = pace_ms;
    }

    println!("MOT Checker");
    println!("Processing file: {}", cli.input.display());
    if config.missing_credentials() {
        println!(
            "{} DVSA credentials are not fully configured; lookups will fail",
            Style::new().yellow().apply_to("!")
        );
    }

    let tokens = TokenProvider::new(
        config.token_url,
        ClientCredentials {
            client_id: config.client_id,
            client_secret: config.client_secret,
            scope: config.scope_url,
        },
    );
    let lookup = VehicleHistoryClient::new(config.api_base_url, config.api_key);
    let resolver = MotResolver::new(tokens, lookup);
    let pipeline = EnrichmentPipeline::new(resolver, Duration::from_millis(config.pace_ms));

    let report = pipeline.run(&cli.input).await?;
    println!(
        "{} Processed {} of {} vehicles across {} sheets",
        Style::new().green().bold().apply_to("✓"),
        report.processed_count,
        report.candidate_count,
        report.sheet_count,
    );
    println!("Results saved to {}", report.output_path.display());
    Ok(())
}
