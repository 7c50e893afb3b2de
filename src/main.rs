use clap::Parser;
use colored::*;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use codefixer::{cli::Cli, config::{get_config_path, Config}, handlers::handle_fix};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            let location = get_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".to_string());
            eprintln!("{} {}: {:#}", "Error loading configuration".red(), location, e);
            return ExitCode::from(1);
        }
    };

    match handle_fix(cli.file.as_deref(), &config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\n{} {}", "Error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}
