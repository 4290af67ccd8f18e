//! Recommend command implementation.

use crate::cli::RecommendArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use basketry_domain::ItemId;
use basketry_query::recommendations_for;

/// Execute the recommend command.
pub fn execute_recommend(args: RecommendArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let item = ItemId::new(args.item.trim());
    if item.as_str().is_empty() {
        return Err(CliError::InvalidInput("Item id cannot be empty".to_string()));
    }
    let top_n = args.top_n.unwrap_or(config.query.top_n);

    let (updater, report) = super::load(&args.input, config)?;
    let recs = recommendations_for(&updater.snapshot(), &item, top_n)?;
    let body = formatter.format_recommendations(&item, &recs)?;

    if formatter.is_quiet() {
        Ok(body)
    } else {
        Ok(format!("{}\n{}", formatter.load_report(&report), body))
    }
}
