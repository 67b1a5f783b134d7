//! Output formatting for usage reports
//!
//! This module provides formatters for displaying reports in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use callstat_core::period::TimeWindow;
//! use callstat_core::types::Usage;
//! use callstat_pricing::{CostCalculator, MonthReport, QuotaConfig};
//! use callstat_terminal::get_formatter;
//! use chrono::{TimeZone, Utc};
//! use std::time::Duration;
//!
//! let window = TimeWindow::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
//! ).unwrap();
//! let usage = Usage::new(Duration::from_secs(600), Duration::from_secs(900), Duration::ZERO);
//! let report = MonthReport::new(window, usage, &CostCalculator::new(QuotaConfig::new(10, 10)));
//!
//! let formatter = get_formatter(true, chrono_tz::UTC, false);
//! assert!(formatter.format_month(&report).contains("\"total_cost\""));
//! ```

use callstat_core::period::TimeWindow;
use callstat_core::types::{Usage, ceil_minutes};
use callstat_pricing::{CategoryCost, CostBreakdown, CurrentMonthReport, MonthReport, Severity};
use colored::Colorize;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Value, json};
use std::time::Duration;

/// Trait for report formatters
pub trait OutputFormatter {
    /// Format the report of a closed month
    fn format_month(&self, report: &MonthReport) -> String;

    /// Format the running month with its month-end estimate
    fn format_current(&self, report: &CurrentMonthReport) -> String;
}

/// `MM:SS`, with minutes allowed to exceed two digits
///
/// # Examples
/// ```
/// use callstat_terminal::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(754)), "12:34");
/// assert_eq!(format_duration(Duration::from_secs(6005)), "100:05");
/// assert_eq!(format_duration(Duration::ZERO), "00:00");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Started minutes, as shown for estimates
pub fn format_minutes(duration: Duration) -> String {
    format!("{} min.", ceil_minutes(duration))
}

/// Cost with two decimals
pub fn format_cost(amount: f64) -> String {
    format!("{amount:.2} €")
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    tz: chrono_tz::Tz,
    /// Whether severities are colored
    colored_output: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    ///
    /// Colors are disabled when `NO_COLOR` is set, whatever `colored_output` says.
    pub fn new(tz: chrono_tz::Tz, colored_output: bool) -> Self {
        Self {
            tz,
            colored_output: colored_output && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    fn format_window(&self, window: &TimeWindow) -> String {
        format!(
            "{} to {}",
            window.start().with_timezone(&self.tz).format("%Y-%m-%d %H:%M"),
            window.end().with_timezone(&self.tz).format("%Y-%m-%d %H:%M %Z"),
        )
    }

    fn format_severity(&self, severity: Severity) -> String {
        if !self.colored_output {
            return severity.to_string();
        }
        match severity {
            Severity::Good => severity.as_str().green().to_string(),
            Severity::Warning => severity.as_str().yellow().to_string(),
            Severity::Attention => severity.as_str().red().bold().to_string(),
        }
    }

    fn category_row(&self, name: &str, category: &CategoryCost) -> Row {
        row![
            name,
            r -> format_duration(category.usage),
            r -> category.minutes,
            r -> category.quota_minutes,
            r -> category.overage_minutes,
            r -> format_cost(category.cost),
            self.format_severity(category.severity)
        ]
    }

    fn usage_table(&self, usage: &Usage, cost: &CostBreakdown) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Category",
            b -> "Duration",
            b -> "Minutes",
            b -> "Quota",
            b -> "Overage",
            b -> "Cost",
            b -> "Status"
        ]);

        table.add_row(self.category_row("National", &cost.national));
        table.add_row(self.category_row("Mobile", &cost.mobile));
        table.add_row(row![
            "Other",
            r -> format_duration(usage.other),
            r -> cost.other_minutes,
            r -> "-",
            r -> "-",
            r -> "-",
            if cost.has_unpriced { "unpriced" } else { "" }
        ]);

        table.add_row(Row::new(vec![Cell::new(""); 7]));
        table.add_row(row![
            b -> "TOTAL",
            br -> format_duration(usage.total()),
            br -> ceil_minutes(usage.total()),
            "",
            br -> cost.national.overage_minutes + cost.mobile.overage_minutes,
            br -> format_cost(cost.total_cost),
            ""
        ]);

        table
    }

    fn estimate_table(&self, report: &CurrentMonthReport) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Category",
            b -> "Observed",
            b -> "Estimated",
            b -> "Overage",
            b -> "Cost",
            b -> "Status"
        ]);

        let cost = &report.estimated_cost;
        for (name, observed, category) in [
            ("National", report.observed.national, &cost.national),
            ("Mobile", report.observed.mobile, &cost.mobile),
        ] {
            table.add_row(row![
                name,
                r -> format_duration(observed),
                r -> format_minutes(category.usage),
                r -> category.overage_minutes,
                r -> format_cost(category.cost),
                self.format_severity(category.severity)
            ]);
        }
        table.add_row(row![
            "Other",
            r -> format_duration(report.observed.other),
            r -> format_minutes(report.estimated.other),
            r -> "-",
            r -> "-",
            if cost.has_unpriced { "unpriced" } else { "" }
        ]);

        table.add_row(Row::new(vec![Cell::new(""); 6]));
        table.add_row(row![
            b -> "TOTAL",
            br -> format_duration(report.observed.total()),
            br -> format_minutes(report.estimated.total()),
            br -> cost.national.overage_minutes + cost.mobile.overage_minutes,
            br -> format_cost(cost.total_cost),
            ""
        ]);

        table
    }
}

impl OutputFormatter for TableFormatter {
    fn format_month(&self, report: &MonthReport) -> String {
        format!(
            "Calls {}\n{}",
            self.format_window(&report.window),
            self.usage_table(&report.usage, &report.cost)
        )
    }

    fn format_current(&self, report: &CurrentMonthReport) -> String {
        let days = report.observation_length().as_secs_f64() / 86_400.0;
        format!(
            "Calls {}\n{}\nEstimate for the full month, based on the last {:.0} days ({})\n{}",
            self.format_window(&report.actual.window),
            self.usage_table(&report.actual.usage, &report.actual.cost),
            days,
            self.format_window(&report.observation),
            self.estimate_table(report)
        )
    }
}

/// JSON formatter for machine-readable output
///
/// Durations are whole seconds; minutes are started minutes.
pub struct JsonFormatter;

impl JsonFormatter {
    fn window_json(window: &TimeWindow) -> Value {
        json!({
            "start": window.start().to_rfc3339(),
            "end": window.end().to_rfc3339(),
        })
    }

    fn usage_json(usage: &Usage) -> Value {
        json!({
            "national_seconds": usage.national.as_secs(),
            "mobile_seconds": usage.mobile.as_secs(),
            "other_seconds": usage.other.as_secs(),
            "total_seconds": usage.total().as_secs(),
        })
    }

    fn cost_json(cost: &CostBreakdown) -> Value {
        json!({
            "national": cost.national,
            "mobile": cost.mobile,
            "other_minutes": cost.other_minutes,
            "has_unpriced": cost.has_unpriced,
            "total_cost": cost.total_cost,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_month(&self, report: &MonthReport) -> String {
        let output = json!({
            "window": Self::window_json(&report.window),
            "usage": Self::usage_json(&report.usage),
            "cost": Self::cost_json(&report.cost),
        });

        format!("{output:#}")
    }

    fn format_current(&self, report: &CurrentMonthReport) -> String {
        let output = json!({
            "window": Self::window_json(&report.actual.window),
            "usage": Self::usage_json(&report.actual.usage),
            "cost": Self::cost_json(&report.actual.cost),
            "estimate": {
                "observation": Self::window_json(&report.observation),
                "observation_seconds": report.observation_length().as_secs(),
                "observed": Self::usage_json(&report.observed),
                "usage": Self::usage_json(&report.estimated),
                "cost": Self::cost_json(&report.estimated_cost),
            },
        });

        format!("{output:#}")
    }
}

/// Get the appropriate formatter based on output format preference
pub fn get_formatter(
    json_output: bool,
    tz: chrono_tz::Tz,
    colored_output: bool,
) -> Box<dyn OutputFormatter> {
    if json_output {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(tz, colored_output))
    }
}
