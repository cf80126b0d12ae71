use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::{Duration, timeout};
use tracing_subscriber::EnvFilter;

mod cli;

use check_hp_firmware::check::{self, CheckOptions, CheckReport};
use check_hp_firmware::config::AppConfig;
use check_hp_firmware::errors::CheckError;
use check_hp_firmware::formatter::JsonFormatter;
use check_hp_firmware::hp::RuleSet;
use check_hp_firmware::nagios::Status;
use check_hp_firmware::snmp::{Capture, SnmpSession, Transport};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help тоже сюда, плагин всегда выходит с UNKNOWN
            let _ = e.print();
            std::process::exit(Status::Unknown.exit_code());
        }
    };

    if cli.version {
        println!("check_hp_firmware version {}", env!("CARGO_PKG_VERSION"));
        std::process::exit(Status::Unknown.exit_code());
    }

    let log_level = if cli.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let status = match execute(&cli).await {
        Ok(report) if cli.json => match JsonFormatter::to_json_string(&report) {
            Ok(json) => {
                println!("{}", json);
                report.status
            }
            Err(e) => exit_error(e),
        },
        Ok(report) => {
            println!("{} - {}", report.status, report.output());
            report.status
        }
        Err(e) => exit_error(e),
    };

    std::process::exit(status.exit_code());
}

fn exit_error(e: anyhow::Error) -> Status {
    println!("{} - {:#}", Status::Unknown, e);
    Status::Unknown
}

async fn execute(cli: &cli::Cli) -> Result<CheckReport> {
    let mut config = AppConfig::load(cli.config.as_ref())?;
    cli.apply(&mut config);
    config.debug_config();

    // Версию проверяем до любого обращения к данным
    let version = config.get_protocol()?;
    let settings = &config.settings;

    let mut transport = match &settings.check.snmpwalk_file {
        Some(file) => Transport::Capture(Capture::load(file).await?),
        None => {
            let connection = &settings.connection;
            let community = config.get_community();
            let session = SnmpSession::new(
                &connection.host,
                connection.port,
                connection.family,
                version,
                &community,
            );

            let session = timeout(Duration::from_secs(connection.timeout), session)
                .await
                .map_err(|_| CheckError::Timeout(connection.timeout))?
                .context("SNMP подключение не удалось")?;

            Transport::Session(session)
        }
    };

    let options = CheckOptions {
        ignore_ilo: settings.check.ignore_ilo,
        timeout: config.get_timeout(),
    };
    let rules = RuleSet::hpe();

    let report = check::run(&mut transport, &options, &rules).await?;

    Ok(report)
}
