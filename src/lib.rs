pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::valuation::ValuationOptions;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub enum AppCommand {
    Valuation(ValuationOptions),
    Factors,
    Generate,
    Show,
    Improve {
        section: String,
        feedback: String,
    },
    Investors,
    Email {
        investors: Vec<String>,
        firm: Option<String>,
        tone: Option<String>,
    },
    Export {
        output: PathBuf,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Like `load_config`, but a missing default config file yields the defaults.
/// An explicitly given path must exist.
fn load_config_or_default(config_path: Option<&str>) -> Result<AppConfig> {
    if config_path.is_none() && !AppConfig::default_config_path()?.exists() {
        debug!("No config file found, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(config_path)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("raisekit starting...");

    // Neither needs a backend, so they also run before `setup`
    match &command {
        AppCommand::Factors => {
            cli::valuation::list_factors();
            return Ok(());
        }
        AppCommand::Valuation(options) => {
            let config = load_config_or_default(config_path)?;
            return cli::valuation::run(&config, options);
        }
        _ => {}
    }

    let config = load_config(config_path)?;

    match command {
        AppCommand::Valuation(_) | AppCommand::Factors => unreachable!("handled above"),
        AppCommand::Generate => {
            let profile = config.require_profile()?;
            let backend = providers::HttpBackend::new(&config.backend)?;
            let store = store::open_disk_store(&config)?;
            cli::pitch::generate(profile, &backend, store.as_ref()).await
        }
        AppCommand::Show => {
            let store = store::open_store(&config);
            cli::pitch::show(store.as_ref()).await
        }
        AppCommand::Improve { section, feedback } => {
            let backend = providers::HttpBackend::new(&config.backend)?;
            let store = store::open_disk_store(&config)?;
            cli::pitch::improve(&backend, store.as_ref(), &section, &feedback).await
        }
        AppCommand::Investors => {
            let profile = config.require_profile()?;
            let backend = providers::HttpBackend::new(&config.backend)?;
            cli::investors::run(profile, &backend).await
        }
        AppCommand::Email {
            investors,
            firm,
            tone,
        } => {
            let profile = config.require_profile()?;
            let backend = providers::HttpBackend::new(&config.backend)?;
            cli::investors::email(
                profile,
                &backend,
                &investors,
                firm.as_deref(),
                tone.as_deref(),
            )
            .await
        }
        AppCommand::Export { output } => {
            let store = store::open_store(&config);
            let title = config.profile.as_ref().map(|p| p.company_name.as_str());
            cli::pitch::export(store.as_ref(), title, &output).await
        }
    }
}
