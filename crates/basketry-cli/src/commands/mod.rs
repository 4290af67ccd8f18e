//! Command implementations.

pub mod recommend;
pub mod stats;
pub mod top;

pub use self::recommend::execute_recommend;
pub use self::stats::execute_stats;
pub use self::top::execute_top;

use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input;
use basketry_cache::{IncrementalUpdater, UpdateReport};

/// Read the input file and count its baskets.
pub(crate) fn load(args: &InputArgs, config: &Config) -> Result<(IncrementalUpdater, UpdateReport)> {
    let delimiter = args.delimiter.unwrap_or(config.input.delimiter);
    let records = input::load_line_items(&args.file, delimiter)?;

    let updater = IncrementalUpdater::new(config.extractor.clone(), config.cache.clone());
    let report = updater.initialize_from_line_items(records)?;

    if report.records_skipped > 0 {
        tracing::warn!(
            skipped = report.records_skipped,
            file = %args.file.display(),
            "Some line items were missing an identifier"
        );
    }
    Ok((updater, report))
}
