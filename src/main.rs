use drycast_core::{App, AppError, Config, ConfigError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = drycast_core::init() {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    // Optional first argument: path to config.toml
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match run(config_path.as_deref()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

/// Loads the config, runs the forecast and renders the report
fn run(config_path: Option<&Path>) -> Result<String, AppError> {
    let (config, _) = Config::load_validated(config_path).map_err(|e| {
        match e.downcast::<ConfigError>() {
            Ok(config_err) => AppError::Config(config_err),
            Err(other) => AppError::Other(other),
        }
    })?;

    let app = App::new(config);
    let report = app.run()?;

    drycast_core::report::render(&report, &app.config().report)
        .map_err(|e| AppError::Other(anyhow::Error::from(e)))
}
