//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let (updater, report) = super::load(&args.input, config)?;
    let body = formatter.format_statistics(&updater.statistics())?;

    if formatter.is_quiet() {
        Ok(body)
    } else {
        Ok(format!("{}\n{}", formatter.load_report(&report), body))
    }
}
