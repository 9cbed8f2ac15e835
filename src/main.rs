// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use artifacthub::application::{list_repositories, resolve_artifact};
use artifacthub::{AppError, AppResult, AppState, ErrorResponse, ResolverConfig};

#[derive(Parser, Debug)]
#[command(name = "artifacthub", version, about = "Resolve artifacts from a fallback chain of repositories")]
struct Cli {
    /// TOML file describing the repository chain
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Per-endpoint timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Extra repository appended to the chain (repeatable)
    #[arg(long = "repository", global = true, value_name = "URL")]
    repositories: Vec<String>,

    /// Where resolved artifacts are stored
    #[arg(long, global = true, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve group:name:version[:configuration][@extension]
    Resolve { coordinate: String },

    /// Print the configured chain in fallback order
    Repositories,
}

fn load_config(cli: &Cli) -> AppResult<ResolverConfig> {
    let mut config = match &cli.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };

    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err(AppError::Configuration(
                "--timeout must be greater than zero".to_string(),
            ));
        }
        config.timeout_secs = secs;
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    for url in &cli.repositories {
        config.add_repository(url)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("artifacthub=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = match load_config(&cli).and_then(|config| AppState::from_config(&config)) {
        Ok(state) => state,
        Err(e) => return report_error(ErrorResponse::from_app_error(e)),
    };

    match cli.command {
        Command::Repositories => {
            for name in list_repositories(&state) {
                println!("{}", name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Resolve { coordinate } => {
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::info!("interrupt received, cancelling resolution");
                    on_interrupt.cancel();
                }
            });

            match resolve_artifact(&coordinate, &state, &cancel).await {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(if report.is_resolved() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    })
                }
                Err(e) => report_error(ErrorResponse::from_app_error(e)),
            }
        }
    }
}

fn report_error(response: ErrorResponse) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    let code = u8::try_from(response.exit_code()).unwrap_or(1);
    Ok(ExitCode::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifacthub::ErrorType;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_bad_repository_flag_is_configuration_error() {
        let cli = parse(&["artifacthub", "--repository", "not a url", "resolve", "g:n:1.0"]);

        let response = ErrorResponse::from_app_error(load_config(&cli).unwrap_err());
        assert_eq!(response.error_type, ErrorType::Configuration);
        assert_eq!(response.exit_code(), 2);
    }

    #[test]
    fn test_missing_config_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let cli = parse(&[
            "artifacthub",
            "--config",
            missing.to_str().unwrap(),
            "repositories",
        ]);

        assert!(matches!(load_config(&cli), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let cli = parse(&["artifacthub", "--timeout", "0", "resolve", "g:n:1.0"]);
        assert!(matches!(load_config(&cli), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_overrides_are_applied() {
        let cli = parse(&[
            "artifacthub",
            "--timeout",
            "7",
            "--cache-dir",
            "/tmp/artifacthub-cache",
            "--repository",
            "https://maven.example.org/releases",
            "repositories",
        ]);

        let config = load_config(&cli).unwrap();
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/artifacthub-cache")));
        assert_eq!(config.endpoints.last().unwrap().name, "maven.example.org");
    }
}
