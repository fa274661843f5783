//! `otp` operator command line

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use otp_core::{NotifierConfig, OtpNotifier, OtpPruner, OtpService, OtpServiceConfig};
use otp_infra::{
    create_sms_service, init_tracing, load_config_from, DatabasePool, MySqlOtpRepository,
    SmtpMailService,
};
use otp_shared::AppConfig;

/// Longest accepted `--ttl`: one year
const MAX_TTL_MINUTES: i64 = 525_600;

#[derive(Debug, Parser)]
#[command(name = "otp", version, about = "Issue, verify and prune one-time passwords")]
struct Cli {
    /// Configuration file (defaults to ./otp.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Delete every expired code
    Prune {
        /// Keep running and prune on the configured interval
        #[arg(long)]
        watch: bool,
    },
    /// Generate a code for an identity
    Generate {
        identity: String,
        /// Validity in minutes (defaults to otp.expires_minutes)
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_TTL_MINUTES))]
        ttl: Option<i64>,
        /// Deliver the code by mail or SMS instead of printing it
        #[arg(long)]
        notify: bool,
    },
    /// Check and consume a code
    Verify { identity: String, code: String },
    /// Create the code table if it does not exist
    Migrate,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config_from(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    let repository = Arc::new(MySqlOtpRepository::new(
        pool.get_pool().clone(),
        &config.otp.table,
    )?);

    let outcome = execute(cli.command, repository, &config).await;

    pool.close().await;
    outcome
}

async fn execute(
    command: Command,
    repository: Arc<MySqlOtpRepository>,
    config: &AppConfig,
) -> anyhow::Result<ExitCode> {
    match command {
        Command::Migrate => {
            repository.create_table().await?;
            println!("table `{}` is ready", repository.table());
            Ok(ExitCode::SUCCESS)
        }
        Command::Prune { watch: false } => {
            let pruner = OtpPruner::new(repository, config.prune.clone());
            let deleted = pruner.prune_expired().await?;
            println!("pruned {} expired code(s)", deleted);
            Ok(ExitCode::SUCCESS)
        }
        Command::Prune { watch: true } => watch_prune(repository, config).await,
        Command::Generate {
            identity,
            ttl,
            notify,
        } => generate(repository, config, &identity, ttl, notify).await,
        Command::Verify { identity, code } => {
            let service = build_service(repository, config, None)?;
            let key = storage_key(&service, &identity);
            if service.verify(&key, &code).await? {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::from(1))
            }
        }
    }
}

async fn watch_prune(
    repository: Arc<MySqlOtpRepository>,
    config: &AppConfig,
) -> anyhow::Result<ExitCode> {
    let pruner = Arc::new(OtpPruner::new(repository, config.prune.clone()));
    let Some(handle) = pruner.start_background_task() else {
        anyhow::bail!("pruning is disabled (prune.enabled = false)");
    };

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutting down pruner");
    handle.abort();
    Ok(ExitCode::SUCCESS)
}

async fn generate(
    repository: Arc<MySqlOtpRepository>,
    config: &AppConfig,
    identity: &str,
    ttl: Option<i64>,
    notify: bool,
) -> anyhow::Result<ExitCode> {
    let service = build_service(repository, config, ttl)?;
    service.check_email_provider(identity)?;

    if notify {
        let result = service.send_to_identity(identity).await?;
        for (channel, message_id) in &result.report.delivered {
            println!("sent via {} ({})", channel, message_id);
        }
        println!("expires at {}", result.issued.record.expires_at);
    } else {
        let key = storage_key(&service, identity);
        let issued = service.generator().generate(&key).await?;
        println!("{}", issued.code);
        println!("expires at {}", issued.record.expires_at);
    }

    Ok(ExitCode::SUCCESS)
}

fn build_service(
    repository: Arc<MySqlOtpRepository>,
    config: &AppConfig,
    ttl: Option<i64>,
) -> anyhow::Result<OtpService<MySqlOtpRepository>> {
    let mut service_config = OtpServiceConfig::from(&config.otp);
    if let Some(minutes) = ttl {
        service_config.expires_minutes = minutes;
    }

    let sms = create_sms_service(&config.sms)?;
    let mut notifier = OtpNotifier::new(NotifierConfig::try_from(&config.otp)?).with_sms(sms);
    if config.mail.enabled {
        notifier = notifier.with_mail(Arc::new(SmtpMailService::new(&config.mail)?));
    } else {
        warn!("Mail delivery is disabled (mail.enabled = false)");
    }

    Ok(OtpService::new(repository, service_config, notifier))
}

/// Email and phone identities are keyed in canonical form; anything else as given
fn storage_key(service: &OtpService<MySqlOtpRepository>, identity: &str) -> String {
    service
        .normalize_identity(identity)
        .unwrap_or_else(|_| identity.to_string())
}
