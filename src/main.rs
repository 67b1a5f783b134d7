//! callstat binary entry point

use callstat::cli::{Cli, Command, ReportArgs, observation_length};
use callstat::report::{Reporter, with_session};
use callstat_core::error::Result;
use callstat_core::timezone::TimezoneConfig;
use callstat_pricing::CostCalculator;
use callstat_provider_easybell::Session;
use callstat_terminal::get_formatter;
use chrono::Utc;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Session and cost calculator for one report run
fn prepare(args: &ReportArgs) -> Result<(Session, CostCalculator)> {
    let calculator = CostCalculator::new(args.tariff.quota_config()?);
    let session = Session::with_config(args.account.session_config())?;
    Ok((session, calculator))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose enables our info output
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            tracing_subscriber::EnvFilter::new("callstat=info")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tz = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone {}", tz.display_name());
    let formatter = get_formatter(cli.json, tz.tz, std::io::stdout().is_terminal());
    let now = Utc::now();

    match cli.command {
        Command::LastMonth(args) => {
            let (session, calculator) = prepare(&args)?;
            let reporter = Reporter::new(&session, tz, calculator)
                .with_page_size(args.account.page_size);

            let report = with_session(
                &session,
                &args.account.username,
                &args.account.password,
                reporter.last_month(now),
            )
            .await?;
            println!("{}", formatter.format_month(&report));
        }
        Command::CurrentMonth {
            report: args,
            observation_days,
        } => {
            let observation = observation_length(observation_days)?;
            let (session, calculator) = prepare(&args)?;
            let reporter = Reporter::new(&session, tz, calculator)
                .with_page_size(args.account.page_size);

            let report = with_session(
                &session,
                &args.account.username,
                &args.account.password,
                reporter.current_month(now, observation),
            )
            .await?;
            println!("{}", formatter.format_current(&report));
        }
    }

    Ok(())
}
