//! CLI interface for callstat
//!
//! This module defines the command-line interface using clap. Every
//! account and tariff setting can also come from the environment, so the
//! tool can run unattended from a scheduler.
//!
//! # Example
//!
//! ```bash
//! export EASYBELL_USERNAME=12345 EASYBELL_PASSWORD=...
//!
//! # Usage and overage cost of the previous month
//! callstat last-month --national-minutes 1000 --mobile-minutes 100
//!
//! # Usage so far plus a month-end estimate from the last 35 days
//! callstat current-month --json
//! ```

use callstat_core::error::{CallstatError, Result};
use callstat_pricing::QuotaConfig;
use callstat_pricing::cost_calculator::{DEFAULT_MOBILE_PRICE, DEFAULT_NATIONAL_PRICE};
use callstat_provider_easybell::{DEFAULT_BASE_URL, SessionConfig};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Default length of the estimation window, in days
pub const DEFAULT_OBSERVATION_DAYS: u32 = 35;

const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Report easyBell call minutes against monthly quotas
#[derive(Parser, Debug, Clone)]
#[command(name = "callstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Timezone for month boundaries (e.g. "Europe/Berlin", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC for month boundaries (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

// ---------------------------------------------------------------------------
// Shared argument structs
// ---------------------------------------------------------------------------

/// Portal account and connection settings
#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    /// Portal login
    #[arg(long, env = "EASYBELL_USERNAME")]
    pub username: String,

    /// Portal password
    #[arg(long, env = "EASYBELL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Portal address
    #[arg(long, env = "EASYBELL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Records per call log page (server default if omitted)
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl AccountArgs {
    /// Connection settings for the session
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default().with_base_url(self.base_url.clone())
    }
}

/// Included minutes and overage prices
#[derive(Args, Debug, Clone)]
pub struct TariffArgs {
    /// Included national minutes per month
    #[arg(long, env = "EASYBELL_NATIONAL_MINUTES", default_value = "0")]
    pub national_minutes: u64,

    /// Included mobile minutes per month
    #[arg(long, env = "EASYBELL_MOBILE_MINUTES", default_value = "0")]
    pub mobile_minutes: u64,

    /// Price per national minute beyond the quota
    #[arg(long, default_value_t = DEFAULT_NATIONAL_PRICE)]
    pub national_price: f64,

    /// Price per mobile minute beyond the quota
    #[arg(long, default_value_t = DEFAULT_MOBILE_PRICE)]
    pub mobile_price: f64,
}

impl TariffArgs {
    /// Tariff as passed to the cost calculator
    pub fn quota_config(&self) -> Result<QuotaConfig> {
        for (name, price) in [
            ("national", self.national_price),
            ("mobile", self.mobile_price),
        ] {
            if !price.is_finite() || price < 0.0 {
                return Err(CallstatError::Config(format!(
                    "{name} price must be a non-negative number, got {price}"
                )));
            }
        }
        Ok(QuotaConfig::new(self.national_minutes, self.mobile_minutes)
            .with_prices(self.national_price, self.mobile_price))
    }
}

/// Arguments shared by all reports
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    #[command(flatten)]
    pub tariff: TariffArgs,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Available reports
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Usage and overage cost of the previous calendar month
    LastMonth(ReportArgs),

    /// Usage so far this month plus a month-end estimate
    CurrentMonth {
        #[command(flatten)]
        report: ReportArgs,

        /// Days of recent history the estimate is based on (more than one)
        #[arg(long, default_value_t = DEFAULT_OBSERVATION_DAYS)]
        observation_days: u32,
    },
}

/// Length of the estimation window
///
/// The window has to span more than one day.
pub fn observation_length(days: u32) -> Result<Duration> {
    if days <= 1 {
        return Err(CallstatError::InvalidArgument(format!(
            "observation window must be longer than one day, got {days}"
        )));
    }
    Ok(Duration::from_secs(u64::from(days) * SECONDS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDENTIALS: [&str; 4] = ["--username", "alice", "--password", "secret"];

    #[test]
    fn test_last_month_parsing() {
        let cli = Cli::try_parse_from(
            ["callstat", "last-month", "--national-minutes", "1000"]
                .into_iter()
                .chain(CREDENTIALS),
        )
        .unwrap();

        match cli.command {
            Command::LastMonth(args) => {
                assert_eq!(args.account.username, "alice");
                assert_eq!(args.account.base_url, DEFAULT_BASE_URL);
                assert_eq!(args.tariff.national_minutes, 1000);
                assert_eq!(args.tariff.mobile_minutes, 0);
                let quota = args.tariff.quota_config().unwrap();
                assert_eq!(quota.mobile_price, DEFAULT_MOBILE_PRICE);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_current_month_parsing() {
        let cli = Cli::try_parse_from(
            ["callstat", "--json", "current-month", "--observation-days", "14", "--utc"]
                .into_iter()
                .chain(CREDENTIALS),
        )
        .unwrap();

        assert!(cli.json);
        assert!(cli.utc);
        match cli.command {
            Command::CurrentMonth {
                observation_days, ..
            } => assert_eq!(observation_days, 14),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_default_observation_days() {
        let cli = Cli::try_parse_from(
            ["callstat", "current-month"].into_iter().chain(CREDENTIALS),
        )
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::CurrentMonth {
                observation_days: DEFAULT_OBSERVATION_DAYS,
                ..
            }
        ));
    }

    #[test]
    fn test_observation_length() {
        assert_eq!(
            observation_length(35).unwrap(),
            Duration::from_secs(35 * 24 * 3600)
        );
        assert!(observation_length(1).is_err());
        assert!(observation_length(0).is_err());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let tariff = TariffArgs {
            national_minutes: 0,
            mobile_minutes: 0,
            national_price: -1.0,
            mobile_price: 0.1,
        };
        assert!(matches!(
            tariff.quota_config(),
            Err(CallstatError::Config(_))
        ));
    }
}
