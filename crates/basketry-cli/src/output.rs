//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use basketry_cache::{CacheStatistics, UpdateReport};
use basketry_domain::{AffinityRecord, ItemId, Metric};
use basketry_query::Recommendation;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format ranked pairs.
    pub fn format_affinities(&self, records: &[AffinityRecord], metric: Metric) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_affinities_table(records, metric)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| format!("{}\t{}", r.item_a, r.item_b))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format recommendations for one item.
    pub fn format_recommendations(&self, item: &ItemId, recs: &[Recommendation]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "item": item,
                "recommendations": recs,
            }))?),
            OutputFormat::Table => Ok(self.format_recommendations_table(item, recs)),
            OutputFormat::Quiet => Ok(recs
                .iter()
                .map(|r| r.item.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format cache statistics.
    pub fn format_statistics(&self, stats: &CacheStatistics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => Ok(self.format_statistics_table(stats)),
            OutputFormat::Quiet => Ok(stats.total_baskets.to_string()),
        }
    }

    fn format_affinities_table(&self, records: &[AffinityRecord], metric: Metric) -> String {
        if records.is_empty() {
            return self.colorize("No affinities found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Item A", "Item B", "Support", "Conf A→B", "Conf B→A", "Lift"]);

        for (rank, record) in records.iter().enumerate() {
            builder.push_record([
                (rank + 1).to_string(),
                record.item_a.to_string(),
                record.item_b.to_string(),
                format!("{:.4}", record.support),
                format!("{:.4}", record.confidence_a_to_b),
                format!("{:.4}", record.confidence_b_to_a),
                format!("{:.4}", record.lift),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let title = format!("Top {} pairs by {}", records.len(), metric);
        format!("{}\n{}", self.colorize(&title, "cyan"), table)
    }

    fn format_recommendations_table(&self, item: &ItemId, recs: &[Recommendation]) -> String {
        if recs.is_empty() {
            return self.colorize(&format!("No items are bought with {}.", item), "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Item", "Support", "Confidence", "Reverse", "Lift"]);

        for (rank, rec) in recs.iter().enumerate() {
            builder.push_record([
                (rank + 1).to_string(),
                rec.item.to_string(),
                format!("{:.4}", rec.support),
                format!("{:.4}", rec.confidence),
                format!("{:.4}", rec.reverse_confidence),
                format!("{:.4}", rec.lift),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let title = format!("Bought with {}", item);
        format!("{}\n{}", self.colorize(&title, "cyan"), table)
    }

    fn format_statistics_table(&self, stats: &CacheStatistics) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Statistic", "Value"]);
        builder.push_record(["Total baskets".to_string(), stats.total_baskets.to_string()]);
        builder.push_record(["Distinct items".to_string(), stats.distinct_items.to_string()]);
        builder.push_record(["Distinct pairs".to_string(), stats.distinct_pairs.to_string()]);
        if let Some((item, count)) = &stats.most_frequent_item {
            builder.push_record(["Most frequent item".to_string(), format!("{} ({})", item, count)]);
        }
        if let Some((pair, count)) = &stats.most_frequent_pair {
            builder.push_record(["Most frequent pair".to_string(), format!("{} ({})", pair, count)]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// Describe what loading the input did.
    pub fn load_report(&self, report: &UpdateReport) -> String {
        let msg = format!(
            "Loaded {} baskets ({} records skipped)",
            report.baskets_applied, report.records_skipped
        );
        if report.records_skipped > 0 {
            self.warning(&msg)
        } else {
            self.info(&msg)
        }
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether extra status lines should be printed.
    pub fn is_quiet(&self) -> bool {
        self.format != OutputFormat::Table
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
