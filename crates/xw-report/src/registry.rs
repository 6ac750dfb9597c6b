//! The fixed list of reports.
//!
//! A [`ReportKind`] pairs a name and column list with a pure compute function
//! over an [`AnalysisContext`]. The registry is an immutable, ordered table;
//! nothing registers reports at runtime.

use xw_config::ReportConfig;
use xw_core::{Corpus, ResolvedEntry};

use crate::reports;
use crate::rowset::{Column, RowSet};

/// Inputs shared by every report: the corpus, its resolved entries and the
/// report settings. Resolution runs once per context.
pub struct AnalysisContext<'a> {
    pub corpus: &'a Corpus,
    pub resolved: Vec<ResolvedEntry<'a>>,
    pub config: &'a ReportConfig,
}

impl<'a> AnalysisContext<'a> {
    #[must_use]
    pub fn new(corpus: &'a Corpus, config: &'a ReportConfig) -> Self {
        Self {
            corpus,
            resolved: xw_analytics::resolve_corpus(corpus),
            config,
        }
    }

    /// `<a href="{base}{crossword_id}">{number}</a>`
    #[must_use]
    pub fn crossword_link(&self, crossword_id: &str, number: &str) -> String {
        format!(
            "<a href=\"{}{crossword_id}\">{number}</a>",
            self.config.link_base_url
        )
    }
}

/// A named report with a fixed column list.
#[derive(Debug)]
pub struct ReportKind {
    /// Stable identifier, used in requests and table names.
    pub name: &'static str,
    pub title: &'static str,
    pub columns: &'static [Column],
    compute: fn(&AnalysisContext<'_>) -> RowSet,
}

impl ReportKind {
    /// Compute the report's rows in natural order.
    #[must_use]
    pub fn compute(&self, ctx: &AnalysisContext<'_>) -> RowSet {
        let rows = (self.compute)(ctx);
        tracing::debug!(report = self.name, rows = rows.len(), "computed report");
        rows
    }

    /// Name of the materialised `DuckDB` table.
    #[must_use]
    pub fn table_name(&self) -> String {
        format!("report_{}", self.name)
    }
}

macro_rules! report {
    ($name:literal, $title:literal, $module:ident) => {
        ReportKind {
            name: $name,
            title: $title,
            columns: reports::$module::COLUMNS,
            compute: reports::$module::compute,
        }
    };
}

/// Every report, in presentation order.
pub static REPORTS: &[ReportKind] = &[
    report!("setter_totals", "Crosswords per setter by type", setter_totals),
    report!("yearly_activity", "Crosswords per year, per setter", yearly_activity),
    report!("repeat_peaks", "Most repeated answer per setter", repeat_peaks),
    report!("setter_profiles", "Setter biographies", setter_profiles),
    report!("duplicate_answers", "Duplicate answers and their clues", duplicate_answers),
    report!("duplicate_clues", "Duplicate clues", duplicate_clues),
    report!("pdf_crosswords", "Crosswords with a PDF version", pdf_crosswords),
    report!("most_used_answers", "Most used answers", most_used_answers),
    report!("uniqueness_ratio", "Answer uniqueness ratio per setter", uniqueness_ratio),
    report!("average_clue_length", "Average clue length per setter", average_clue_length),
    report!("direction_balance", "Across and down balance per setter", direction_balance),
    report!("debut_years", "Setter debuts per year", debut_years),
    report!("monthly_cadence", "Crosswords per calendar month", monthly_cadence),
    report!("weekly_streaks", "Longest weekly streak per setter", weekly_streaks),
    report!("monthly_streaks", "Longest monthly streak per setter", monthly_streaks),
];

/// Look a report up by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ReportKind> {
    REPORTS.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn report_names_are_unique_identifiers() {
        let mut seen = HashSet::new();
        for report in REPORTS {
            assert!(seen.insert(report.name), "duplicate report {}", report.name);
            assert!(
                report
                    .name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_'),
                "report name {} is not a plain identifier",
                report.name
            );
            assert!(!report.columns.is_empty());
        }
    }

    #[test]
    fn find_by_name() {
        assert_eq!(find("weekly_streaks").map(|r| r.columns.len()), Some(5));
        assert!(find("nope").is_none());
        assert_eq!(find("setter_totals").unwrap().table_name(), "report_setter_totals");
    }

    #[test]
    fn link_uses_configured_base() {
        let corpus = Corpus::default();
        let config = ReportConfig {
            link_base_url: "https://example.org/".to_string(),
            ..ReportConfig::default()
        };
        let ctx = AnalysisContext::new(&corpus, &config);
        assert_eq!(
            ctx.crossword_link("crosswords/cryptic/1", "1"),
            "<a href=\"https://example.org/crosswords/cryptic/1\">1</a>"
        );
    }
}
