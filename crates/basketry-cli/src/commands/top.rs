//! Top command implementation.

use crate::cli::TopArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use basketry_query::AffinityQueryEngine;

/// Execute the top command.
pub fn execute_top(args: TopArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let mut query = config.query.clone();
    if let Some(metric) = args.metric {
        query.metric = metric.into();
    }
    if let Some(min_support) = args.min_support {
        query.min_support = min_support;
    }
    if let Some(min_confidence) = args.min_confidence {
        query.min_confidence = min_confidence;
    }
    if let Some(top_n) = args.top_n {
        query.top_n = top_n;
    }

    // Reject bad flags before reading the file
    let engine = AffinityQueryEngine::new(query)?;

    let (updater, report) = super::load(&args.input, config)?;
    let records = engine.top_affinities(&updater.snapshot())?;
    let body = formatter.format_affinities(&records, engine.query().metric)?;

    if formatter.is_quiet() {
        Ok(body)
    } else {
        Ok(format!("{}\n{}", formatter.load_report(&report), body))
    }
}
