use anyhow::Context;
use clap::{CommandFactory, Parser};
use projadm::config::AdminConfig;
use projadm::core::ConfigProvider;
use projadm::utils::error::AdminError;
use projadm::utils::lock::InstanceLock;
use projadm::utils::{logger, validation::Validate};
use projadm::{Action, CliArgs, CommandMerger, ProjectAdmin, RestWebApp, RunMode};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();

    // 先初始化日誌，之後的步驟都可以記錄
    if args.log_json {
        logger::init_json_logger(args.debug);
    } else {
        logger::init_cli_logger(args.debug);
    }
    tracing::debug!("CLI args: {:?}", args);

    let action = match args.action.to_action() {
        Ok(Some(action)) => action,
        Ok(None) => {
            CliArgs::command()
                .print_help()
                .context("cannot print help")?;
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Ok(report(&e)),
    };

    let config = match AdminConfig::from_cli(&args) {
        Ok(config) => config,
        Err(e) => return Ok(report(&e)),
    };
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        return Ok(report(&e));
    }

    let _lock = match InstanceLock::acquire(&config.lock_dir) {
        Ok(lock) => lock,
        Err(AdminError::LockHeldError { .. }) => {
            tracing::warn!("Already running, exiting.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Ok(report(&e)),
    };

    match run(&config, &action, args.upload, RunMode::from_noop(args.noop)).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => Ok(report(&e)),
    }
}

async fn run(
    config: &AdminConfig,
    action: &Action,
    upload: bool,
    mode: RunMode,
) -> projadm::Result<()> {
    let webapp = RestWebApp::from_config(config)?;
    let merger = config.configmerge().map(|p| CommandMerger::new(p.to_path_buf()));

    let mut admin = ProjectAdmin::new(webapp, config.clone(), mode);
    if let Some(merger) = merger {
        admin = admin.with_merger(merger);
    }

    admin.run(action, upload).await
}

fn report(e: &AdminError) -> ExitCode {
    tracing::error!(
        "{} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    ExitCode::FAILURE
}
