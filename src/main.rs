//! Genbank → KBaseGenomes.Genome transform script.
//!
//! Loads configuration, sets up logging and runs the external converter
//! once. Exits 0 on success and 1 on any failure.

use tracing_subscriber::{EnvFilter, fmt};

use plugin_genbank_genome::GenbankTransformer;
use transform_core::config::TransformConfig;
use transform_core::config::logging::LoggingConfig;
use transform_core::result::AppResult;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() {
    let (cli, ignored) = Cli::try_parse_known(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if !ignored.is_empty() {
        tracing::debug!(?ignored, "Ignoring unrecognized arguments");
    }

    std::process::exit(exit_code(run(&cli, &config).await));
}

/// Process exit status for a finished run: 0 on success, 1 on any failure.
fn exit_code(result: AppResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(kind = %e.kind, "{}", e.message);
            1
        }
    }
}

/// Load configuration from file and environment, then apply CLI overrides.
fn load_configuration(cli: &Cli) -> AppResult<TransformConfig> {
    let mut config = TransformConfig::load(&cli.config)?;

    if let Some(root) = &cli.kb_top {
        config.root_path = Some(root.into());
    }

    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Run one transform.
async fn run(cli: &Cli, config: &TransformConfig) -> AppResult<()> {
    let transformer = GenbankTransformer::from_config(config)?;

    tracing::debug!(
        root = %transformer.root().display(),
        libraries = transformer.manifest().entries().len(),
        "Transformer ready"
    );

    let report = transformer.transform(&cli.params()).await?;

    tracing::debug!(
        duration_ms = report.duration_ms,
        command = %report.command_line,
        "Transform finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use transform_core::error::ErrorKind;

    fn cli(extra: &[&str]) -> Cli {
        let mut argv = vec![
            "trns_transform_genbank_genome",
            "--shock_service_url",
            "http://shock",
            "--workspace_service_url",
            "http://ws",
            "--workspace_name",
            "my_ws",
            "--object_name",
            "myGenome",
            "--input_directory",
            "/data/in",
            "--working_directory",
            "/data/work",
        ];
        argv.extend_from_slice(extra);
        Cli::try_parse_known(argv).expect("parse").0
    }

    #[test]
    fn test_kb_top_overrides_loaded_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("transform.toml");
        std::fs::write(&path, "root_path = \"/from/file\"\n").expect("write config");
        let path = path.to_string_lossy().into_owned();

        let config = load_configuration(&cli(&["--config", &path])).expect("load");
        assert_eq!(config.root_path().expect("root"), std::path::Path::new("/from/file"));

        let config =
            load_configuration(&cli(&["--config", &path, "--kb_top", "/opt/kb"])).expect("load");
        assert_eq!(config.root_path().expect("root"), std::path::Path::new("/opt/kb"));
    }

    #[tokio::test]
    async fn test_missing_root_exits_with_failure() {
        let result = run(&cli(&[]), &TransformConfig::default()).await;
        let err = result.as_ref().expect_err("root missing");
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert_eq!(exit_code(result), 1);
    }

    #[tokio::test]
    async fn test_missing_libraries_exit_with_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = TransformConfig {
            root_path: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let result = run(&cli(&[]), &config).await;
        let err = result.as_ref().expect_err("jars missing");
        assert_eq!(err.kind, ErrorKind::MissingDependency);
        assert_eq!(exit_code(result), 1);
    }

    #[test]
    fn test_success_exits_with_zero() {
        assert_eq!(exit_code(Ok(())), 0);
    }
}
