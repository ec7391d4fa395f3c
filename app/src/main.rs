use anyhow::Context;
use clap::Parser;
use prospector_app::{init_tracing, Cli, LeadWorkflow};
use prospector_core::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    info!("Starting Prospector v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        AppConfig::load_with_env(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(output) = cli.output {
        config.export.output_path = output;
    }
    let num_results = cli.results.unwrap_or(config.search.num_results).clamp(1, 50);

    let workflow = LeadWorkflow::from_config(&config).context("failed to set up lead workflow")?;
    info!("Exporting via {}", workflow.sink_name());

    let run = workflow
        .generate_leads(&cli.query, &cli.location, num_results)
        .await;

    println!("{}", serde_json::to_string_pretty(&run.leads)?);
    match run.export_id {
        Some(id) => eprintln!("Exported {} lead(s): {}", run.leads.len(), id),
        None => eprintln!("Export failed; {} lead(s) printed above", run.leads.len()),
    }

    Ok(())
}
