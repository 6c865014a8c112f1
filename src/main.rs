use anyhow::{Context, Result};
use pipecheck::api::{ApiClient, ApiClientConfig, HttpTransport};
use pipecheck::cli::commands::{RunCommand, ValidateCommand};
use pipecheck::cli::output::*;
use pipecheck::cli::{Cli, Command};
use pipecheck::core::config::ValidatorConfig;
use pipecheck::scenario::{ScenarioRunner, StepExecutor};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over the -v default
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_scenario(cmd).await?,
        Command::Validate(cmd) => validate_config(cmd)?,
    }

    Ok(())
}

async fn run_scenario(cmd: &RunCommand) -> Result<()> {
    // Load config, defaults when no file given
    let mut config = match &cmd.file {
        Some(path) => {
            ValidatorConfig::from_file(path).context("Failed to load validator config")?
        }
        None => ValidatorConfig::default(),
    };

    // Apply CLI overrides
    if let Some(base_url) = &cmd.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cmd.timeout {
        config.timeout_secs = timeout;
    }
    config.validate().context("Invalid configuration")?;

    println!("{} Target API: {}", INFO, style(&config.base_url).bold());

    let api_config = ApiClientConfig::new()
        .with_base_url(config.base_url.clone())
        .with_timeout(config.timeout_secs);
    let transport = HttpTransport::from_config(&api_config)?;
    let client = ApiClient::new(transport);
    let executor = StepExecutor::new(client, config);

    let mut runner = ScenarioRunner::new(executor);
    runner.add_event_handler(|event| {
        if let Some(line) = format_scenario_event(&event) {
            println!("{line}");
        }
    });

    println!();
    let report = runner.run().await;

    println!("\n{}", format_verdict(&report.verdict));

    if cmd.json {
        println!("\n{}", serde_json::to_string_pretty(&report)?);
    }

    // Exit 1 on a failed run so scripts can gate on the verdict
    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_config(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating config...", INFO);

    let result = ValidatorConfig::from_file(&cmd.file);

    match result {
        Ok(config) => {
            println!("{} Configuration is valid!", CHECK);
            println!("  Target: {}", style(&config.base_url).bold());
            println!(
                "  Data source: {}@{}:{}/{}",
                style(&config.data_source.username).cyan(),
                style(&config.data_source.host).cyan(),
                style(config.data_source.port).cyan(),
                style(&config.data_source.database).cyan()
            );
            println!(
                "  Pipeline: {} ({} mappings)",
                style(&config.pipeline.name).bold(),
                style(config.pipeline.mappings.len()).cyan()
            );

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
